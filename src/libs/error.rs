use std::fmt;

/// Fatal problems found in the content of an input table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynError {
    /// A data line that can't be split into the required columns
    Malformed {
        /// The input file name
        file: String,
        /// The line number (1-based)
        line: usize,
        /// The offending line, trimmed
        content: String,
        /// What is wrong with it
        reason: String,
    },
    /// An identifier retained twice in one relation
    Duplicate {
        file: String,
        line: usize,
        /// 1 for the first id column, 2 for the second
        column: usize,
        key: String,
    },
}

impl fmt::Display for SynError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynError::Malformed {
                file,
                line,
                content,
                reason,
            } => {
                write!(
                    f,
                    "invalid line ({}) in file {}: {}\nLine: \"{}\"",
                    line, file, reason, content
                )
            }
            SynError::Duplicate {
                file,
                line,
                column,
                key,
            } => write!(
                f,
                "duplicated ID{} at line ({}) in file {}: {}",
                column, line, file, key
            ),
        }
    }
}

impl std::error::Error for SynError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = SynError::Malformed {
            file: "ab.tsv".to_string(),
            line: 3,
            content: "A01\tB01".to_string(),
            reason: "expected at least 3 columns".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid line (3) in file ab.tsv: expected at least 3 columns\nLine: \"A01\tB01\""
        );

        let err = SynError::Duplicate {
            file: "ab.tsv".to_string(),
            line: 5,
            column: 2,
            key: "B01".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "duplicated ID2 at line (5) in file ab.tsv: B01"
        );
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = SynError::Duplicate {
            file: "ab.tsv".to_string(),
            line: 1,
            column: 1,
            key: "A01".to_string(),
        }
        .into();
        let err = err.context("loading relation 1");
        assert!(err.downcast_ref::<SynError>().is_some());
    }
}
