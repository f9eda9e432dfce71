//! Three-way join of `A -> B`, `B -> D` and `A -> D` relations.
//!
//! Each key of the first relation is an anchor. Its partner is looked up in
//! the other two relations and the resulting triangle is classified as
//! [`Triad::Consistent`], [`Triad::Inconsistent`], or one of the missing
//! variants when a leg can't be found.

use crate::libs::relation::{Link, Relation};
use itertools::Itertools;
use std::fmt;

/// Written in place of every field of a missing leg.
pub const SENTINEL: &str = "NaN";

/// One side of a triangle: the key used for the lookup and what it found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leg<'a> {
    pub key: &'a str,
    pub link: &'a Link,
}

impl<'a> Leg<'a> {
    fn lookup(relation: &'a Relation, key: &'a str) -> Option<Self> {
        relation.get(key).map(|link| Leg { key, link })
    }

    fn fields(leg: Option<&Leg>) -> [String; 3] {
        match leg {
            Some(leg) => [
                leg.key.to_string(),
                leg.link.partner.clone(),
                leg.link.block.to_string(),
            ],
            None => [SENTINEL.to_string(), SENTINEL.to_string(), SENTINEL.to_string()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Consistent,
    Inconsistent,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Consistent => write!(f, "+++"),
            Status::Inconsistent => write!(f, "***"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Triad<'a> {
    /// Both legs found and they reach the same D
    Consistent { leg2: Leg<'a>, leg3: Leg<'a> },
    /// Both legs found but they disagree on D
    Inconsistent { leg2: Leg<'a>, leg3: Leg<'a> },
    /// Nothing in the `B -> D` relation
    MissingLeg2 { leg3: Leg<'a> },
    /// Nothing in the `A -> D` relation
    MissingLeg3 { leg2: Leg<'a> },
    MissingBoth,
}

impl<'a> Triad<'a> {
    /// Classifies the anchor pair `(id_a, id_b)` against `r2` (`B -> D`)
    /// and `r3` (`A -> D`).
    ///
    /// Both ids are tried as keys of both relations, the first matching rule
    /// wins:
    ///
    /// 1. `id_a` in `r2` and `id_b` in `r3`
    /// 2. `id_a` in `r3` and `id_b` in `r2`
    /// 3. `id_a` in `r2`, then `id_a` in `r3`
    /// 4. `id_b` in `r2`, then `id_b` in `r3`
    ///
    /// ```
    /// # use synmerge::libs::relation::{LoadOptions, Relation};
    /// # use synmerge::libs::triad::Triad;
    /// let opt = LoadOptions::default();
    /// let r2 = Relation::read("B01\tD01\t10\n".as_bytes(), "bd", &opt).unwrap();
    /// let r3 = Relation::read("A01\tD01\t10\n".as_bytes(), "ad", &opt).unwrap();
    ///
    /// let triad = Triad::classify("A01", "B01", &r2, &r3);
    /// assert!(matches!(triad, Triad::Consistent { .. }));
    ///
    /// let triad = Triad::classify("A02", "B02", &r2, &r3);
    /// assert_eq!(triad, Triad::MissingBoth);
    /// ```
    pub fn classify(id_a: &'a str, id_b: &'a str, r2: &'a Relation, r3: &'a Relation) -> Self {
        let a2 = Leg::lookup(r2, id_a);
        let a3 = Leg::lookup(r3, id_a);
        let b2 = Leg::lookup(r2, id_b);
        let b3 = Leg::lookup(r3, id_b);

        match (a2, a3, b2, b3) {
            (Some(leg2), _, _, Some(leg3)) | (_, Some(leg3), Some(leg2), _) => {
                if leg2.link.partner == leg3.link.partner {
                    Triad::Consistent { leg2, leg3 }
                } else {
                    Triad::Inconsistent { leg2, leg3 }
                }
            }
            (Some(leg2), _, _, _) => Triad::MissingLeg3 { leg2 },
            (None, Some(leg3), _, _) => Triad::MissingLeg2 { leg3 },
            (None, None, Some(leg2), _) => Triad::MissingLeg3 { leg2 },
            (None, None, None, Some(leg3)) => Triad::MissingLeg2 { leg3 },
            (None, None, None, None) => Triad::MissingBoth,
        }
    }

    pub fn status(&self) -> Status {
        match self {
            Triad::Consistent { .. } => Status::Consistent,
            _ => Status::Inconsistent,
        }
    }

    /// Both legs were found.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Triad::Consistent { .. } | Triad::Inconsistent { .. })
    }

    pub fn leg2(&self) -> Option<&Leg<'a>> {
        match self {
            Triad::Consistent { leg2, .. }
            | Triad::Inconsistent { leg2, .. }
            | Triad::MissingLeg3 { leg2 } => Some(leg2),
            _ => None,
        }
    }

    pub fn leg3(&self) -> Option<&Leg<'a>> {
        match self {
            Triad::Consistent { leg3, .. }
            | Triad::Inconsistent { leg3, .. }
            | Triad::MissingLeg2 { leg3 } => Some(leg3),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MergeOptions {
    /// Write every anchor in the full layout, missing legs included
    pub missing: bool,
    /// Append the disagreeing D of an inconsistent triangle
    pub problematic: bool,
}

/// One anchor of the first relation together with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergedRow<'a> {
    pub anchor: Leg<'a>,
    pub triad: Triad<'a>,
}

impl MergedRow<'_> {
    /// Renders the row as a tab-separated line without the newline, or `None`
    /// when the options drop it.
    ///
    /// The full layout is `A B block | key D block | key D block | status`,
    /// the compact one `A B D`. An inconsistent triangle gets the D of its
    /// second leg appended after the status when `problematic` is set.
    pub fn render(&self, opt: &MergeOptions) -> Option<String> {
        let mut fields: Vec<String> = vec![
            self.anchor.key.to_string(),
            self.anchor.link.partner.clone(),
        ];

        if opt.missing {
            fields.push(self.anchor.link.block.to_string());
            fields.extend(Leg::fields(self.triad.leg2()));
            fields.extend(Leg::fields(self.triad.leg3()));
            fields.push(self.triad.status().to_string());
            if let Triad::Inconsistent { leg2, .. } = self.triad {
                if opt.problematic {
                    fields.push(leg2.link.partner.clone());
                }
            }
        } else {
            match self.triad {
                Triad::Consistent { leg3, .. } => {
                    fields.push(leg3.link.partner.clone());
                }
                Triad::Inconsistent { leg2, leg3 } if opt.problematic => {
                    fields.push(leg3.link.partner.clone());
                    fields.push(self.triad.status().to_string());
                    fields.push(leg2.link.partner.clone());
                }
                _ => return None,
            }
        }

        Some(fields.iter().join("\t"))
    }
}

/// Per-class tallies of a merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeCounts {
    pub total: usize,
    pub consistent: usize,
    pub inconsistent: usize,
    pub missing_leg2: usize,
    pub missing_leg3: usize,
    pub missing_both: usize,
    pub written: usize,
}

impl MergeCounts {
    pub fn tally(&mut self, triad: &Triad) {
        self.total += 1;
        match triad {
            Triad::Consistent { .. } => self.consistent += 1,
            Triad::Inconsistent { .. } => self.inconsistent += 1,
            Triad::MissingLeg2 { .. } => self.missing_leg2 += 1,
            Triad::MissingLeg3 { .. } => self.missing_leg3 += 1,
            Triad::MissingBoth => self.missing_both += 1,
        }
    }
}

/// Classifies every key of `r1` in insertion order.
pub fn merge_rows<'a>(
    r1: &'a Relation,
    r2: &'a Relation,
    r3: &'a Relation,
) -> impl Iterator<Item = MergedRow<'a>> + 'a {
    r1.iter().map(move |(id_a, link)| MergedRow {
        anchor: Leg { key: id_a, link },
        triad: Triad::classify(id_a, &link.partner, r2, r3),
    })
}
