//! Pairwise synteny tables.
//!
//! A relation file has three tab-separated columns, `id1 id2 score`, and is
//! cut into syntenic blocks by marker lines (`###` by default):
//!
//! ```text
//! ###
//! A01	B01	50
//! A02	B02	40
//! ###
//! A03	B03	30
//! ```

use crate::libs::error::SynError;
use indexmap::{IndexMap, IndexSet};
use std::io::BufRead;

/// The partner of a key in one relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub partner: String,
    /// Number of block markers seen before this record
    pub block: usize,
    pub score: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub lines: usize,
    pub blocks: usize,
    pub valid: usize,
    pub keys: usize,
}

#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Records scoring below this are dropped
    pub min_score: i64,
    pub marker: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            min_score: 0,
            marker: "###".to_string(),
        }
    }
}

/// An immutable `id1 -> id2` mapping in file order.
#[derive(Debug, Clone, Default)]
pub struct Relation {
    name: String,
    links: IndexMap<String, Link>,
    stats: LoadStats,
}

impl Relation {
    // Immutable accessors
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn stats(&self) -> &LoadStats {
        &self.stats
    }

    pub fn get(&self, key: &str) -> Option<&Link> {
        self.links.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.links.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Keys and links in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Link)> {
        self.links.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Parses a relation from `reader`; `name` is only used in messages.
    ///
    /// ```
    /// # use synmerge::libs::relation::{LoadOptions, Relation};
    /// let input = "###\nA01\tB01\t50\nA02\tB02\t5\n###\nA03\tB03\t30\n";
    /// let opt = LoadOptions { min_score: 10, ..Default::default() };
    /// let rel = Relation::read(input.as_bytes(), "ab.tsv", &opt).unwrap();
    ///
    /// assert_eq!(rel.len(), 2);
    /// assert_eq!(rel.get("A01").unwrap().partner, "B01");
    /// assert_eq!(rel.get("A03").unwrap().block, 2);
    /// assert!(!rel.contains_key("A02"));
    /// ```
    pub fn read<R: BufRead>(reader: R, name: &str, opt: &LoadOptions) -> anyhow::Result<Relation> {
        let mut links: IndexMap<String, Link> = IndexMap::new();
        let mut partners: IndexSet<String> = IndexSet::new();
        let mut stats = LoadStats::default();

        for line in reader.lines() {
            let line = line?;
            stats.lines += 1;

            let line = line.trim();
            if line.starts_with(opt.marker.as_str()) {
                stats.blocks += 1;
                continue;
            }

            let malformed = |reason: &str| SynError::Malformed {
                file: name.to_string(),
                line: stats.lines,
                content: line.to_string(),
                reason: reason.to_string(),
            };

            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 3 {
                return Err(malformed("expected at least 3 columns").into());
            }
            let score = fields[2]
                .trim()
                .parse::<i64>()
                .map_err(|_| malformed("score is not an integer"))?;
            if score < opt.min_score {
                continue;
            }

            let (id1, id2) = (fields[0], fields[1]);
            if links.contains_key(id1) {
                return Err(SynError::Duplicate {
                    file: name.to_string(),
                    line: stats.lines,
                    column: 1,
                    key: id1.to_string(),
                }
                .into());
            }
            if !partners.insert(id2.to_string()) {
                return Err(SynError::Duplicate {
                    file: name.to_string(),
                    line: stats.lines,
                    column: 2,
                    key: id2.to_string(),
                }
                .into());
            }

            links.insert(
                id1.to_string(),
                Link {
                    partner: id2.to_string(),
                    block: stats.blocks,
                    score,
                },
            );
            stats.valid += 1;
        }
        stats.keys = links.len();

        Ok(Relation {
            name: name.to_string(),
            links,
            stats,
        })
    }
}

/// Loads a relation from a file, a `.gz` file or `stdin`.
pub fn load_relation(infile: &str, opt: &LoadOptions) -> anyhow::Result<Relation> {
    let reader = crate::reader(infile)?;
    let relation = Relation::read(reader, infile, opt)?;

    let stats = relation.stats();
    log::info!(
        "{}: {} lines, {} blocks, {} valid lines, {} keys",
        infile,
        stats.lines,
        stats.blocks,
        stats.valid,
        stats.keys
    );

    Ok(relation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_str(input: &str, min_score: i64) -> anyhow::Result<Relation> {
        let opt = LoadOptions {
            min_score,
            ..Default::default()
        };
        Relation::read(input.as_bytes(), "test.tsv", &opt)
    }

    #[test]
    fn test_blocks_and_stats() {
        let input = "\
A00\tB00\t10
###
A01\tB01\t50
A02\tB02\t40
###
A03\tB03\t30
";
        let rel = read_str(input, 0).unwrap();
        assert_eq!(rel.name(), "test.tsv");
        assert_eq!(
            *rel.stats(),
            LoadStats {
                lines: 6,
                blocks: 2,
                valid: 4,
                keys: 4,
            }
        );
        assert_eq!(rel.get("A00").unwrap().block, 0);
        assert_eq!(rel.get("A02").unwrap().block, 1);
        assert_eq!(
            *rel.get("A03").unwrap(),
            Link {
                partner: "B03".to_string(),
                block: 2,
                score: 30,
            }
        );

        let keys: Vec<&str> = rel.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["A00", "A01", "A02", "A03"]);
    }

    #[test]
    fn test_custom_marker() {
        let input = "A01\tB01\t1\n## block\nA02\tB02\t1\n";
        let opt = LoadOptions {
            marker: "##".to_string(),
            ..Default::default()
        };
        let rel = Relation::read(input.as_bytes(), "test.tsv", &opt).unwrap();
        assert_eq!(rel.stats().blocks, 1);
        assert_eq!(rel.get("A02").unwrap().block, 1);
    }

    #[test]
    fn test_crlf_and_extra_columns() {
        let input = "A01\tB01\t7\textra\r\n";
        let rel = read_str(input, 0).unwrap();
        assert_eq!(rel.get("A01").unwrap().score, 7);
    }

    #[test]
    fn test_score_filter_is_monotonic() {
        let input = "\
A01\tB01\t50
A02\tB02\t-3
A03\tB03\t0
A04\tB04\t12
A05\tB05\t12
";
        let mut last = usize::MAX;
        for cutoff in [-10, -3, 0, 1, 12, 13, 50, 51] {
            let valid = read_str(input, cutoff).unwrap().stats().valid;
            assert!(valid <= last, "cutoff {}", cutoff);
            last = valid;
        }
        assert_eq!(read_str(input, 12).unwrap().len(), 3);
        assert_eq!(read_str(input, 51).unwrap().len(), 0);
    }

    #[test]
    fn test_too_few_columns() {
        let input = "A01\tB01\t50\nA02\tB02\n";
        let err = read_str(input, 0).unwrap_err();
        let err = err.downcast_ref::<SynError>().unwrap();
        assert_eq!(
            *err,
            SynError::Malformed {
                file: "test.tsv".to_string(),
                line: 2,
                content: "A02\tB02".to_string(),
                reason: "expected at least 3 columns".to_string(),
            }
        );
    }

    #[test]
    fn test_blank_line() {
        let input = "A01\tB01\t10\n\nA02\tB02\t10\n";
        let err = read_str(input, 0).unwrap_err();
        assert_eq!(
            *err.downcast_ref::<SynError>().unwrap(),
            SynError::Malformed {
                file: "test.tsv".to_string(),
                line: 2,
                content: "".to_string(),
                reason: "expected at least 3 columns".to_string(),
            }
        );
    }

    #[test]
    fn test_bad_score() {
        let input = "A01\tB01\thigh\n";
        let err = read_str(input, 0).unwrap_err();
        match err.downcast_ref::<SynError>() {
            Some(SynError::Malformed { line, reason, .. }) => {
                assert_eq!(*line, 1);
                assert_eq!(reason, "score is not an integer");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_duplicates() {
        let input = "A01\tB01\t50\nA01\tB02\t50\n";
        match read_str(input, 0).unwrap_err().downcast_ref::<SynError>() {
            Some(SynError::Duplicate {
                line, column, key, ..
            }) => {
                assert_eq!((*line, *column, key.as_str()), (2, 1, "A01"));
            }
            other => panic!("unexpected: {:?}", other),
        }

        let input = "A01\tB01\t50\nA02\tB01\t50\n";
        match read_str(input, 0).unwrap_err().downcast_ref::<SynError>() {
            Some(SynError::Duplicate { column, key, .. }) => {
                assert_eq!((*column, key.as_str()), (2, "B01"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_filtered_rows_do_not_collide() {
        // the low-scoring copy is dropped before the uniqueness check
        let input = "A01\tB01\t1\nA01\tB01\t50\n";
        let rel = read_str(input, 10).unwrap();
        assert_eq!(rel.len(), 1);
        assert_eq!(rel.get("A01").unwrap().score, 50);
    }
}
