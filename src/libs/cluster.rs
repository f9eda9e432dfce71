//! N-way ortholog rows built from two-column pairing files.
//!
//! Every identifier belongs to a genome, named by its leading characters
//! (`A01g001` -> `A01`). Pairs are folded into clusters holding at most one
//! identifier per genome.

use crate::libs::error::SynError;
use indexmap::IndexSet;
use itertools::Itertools;
use std::collections::HashMap;
use std::io::BufRead;

/// Genome tag of `id`: its first `len` characters, or all of it when shorter.
///
/// ```
/// # use synmerge::libs::cluster::genome_tag;
/// assert_eq!(genome_tag("A01g0010", 3), "A01");
/// assert_eq!(genome_tag("D1", 3), "D1");
/// ```
pub fn genome_tag(id: &str, len: usize) -> &str {
    match id.char_indices().nth(len) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Slot {
    #[default]
    Empty,
    Id(String),
    Conflict,
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Slot::Empty => write!(f, "?"),
            Slot::Id(id) => write!(f, "{}", id),
            Slot::Conflict => write!(f, "error"),
        }
    }
}

/// Reads the first two columns of every data line.
///
/// Blank lines and `#` lines are skipped.
pub fn read_pairs<R: BufRead>(reader: R, name: &str) -> anyhow::Result<Vec<(String, String)>> {
    let mut pairs = vec![];

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 2 {
            return Err(SynError::Malformed {
                file: name.to_string(),
                line: i + 1,
                content: line.to_string(),
                reason: "expected at least 2 columns".to_string(),
            }
            .into());
        }
        pairs.push((fields[0].to_string(), fields[1].to_string()));
    }

    Ok(pairs)
}

#[derive(Debug, Clone)]
pub struct PairClusters {
    tag_len: usize,
    genomes: IndexSet<String>,
    clusters: Vec<Vec<Slot>>,
    // ids to the clusters holding them, ascending
    index: HashMap<String, Vec<usize>>,
    conflicts: Vec<(String, String)>,
}

impl PairClusters {
    /// Columns follow the first appearance of each genome in `pairs`.
    pub fn new(pairs: &[(String, String)], tag_len: usize) -> Self {
        let genomes: IndexSet<String> = pairs
            .iter()
            .flat_map(|(a, b)| [a, b])
            .map(|id| genome_tag(id, tag_len).to_string())
            .collect();

        Self {
            tag_len,
            genomes,
            clusters: vec![],
            index: HashMap::new(),
            conflicts: vec![],
        }
    }

    pub fn genomes(&self) -> &IndexSet<String> {
        &self.genomes
    }
    pub fn clusters(&self) -> &Vec<Vec<Slot>> {
        &self.clusters
    }
    /// Pairings that disagreed with a cluster, as `(held, offered)`.
    pub fn conflicts(&self) -> &Vec<(String, String)> {
        &self.conflicts
    }

    fn column(&self, id: &str) -> anyhow::Result<usize> {
        let tag = genome_tag(id, self.tag_len);
        self.genomes
            .get_index_of(tag)
            .ok_or_else(|| anyhow::anyhow!("Unknown genome {} of {}", tag, id))
    }

    fn first_cluster(&self, id: &str) -> Option<usize> {
        self.index.get(id).and_then(|v| v.first().copied())
    }

    fn set(&mut self, cluster: usize, column: usize, slot: Slot) {
        let old = std::mem::replace(&mut self.clusters[cluster][column], slot);
        if let Slot::Id(id) = old {
            if let Some(held) = self.index.get_mut(&id) {
                held.retain(|&c| c != cluster);
            }
        }
        if let Slot::Id(id) = &self.clusters[cluster][column] {
            let held = self.index.entry(id.clone()).or_default();
            if let Err(pos) = held.binary_search(&cluster) {
                held.insert(pos, cluster);
            }
        }
    }

    /// Folds one pair into the earliest cluster holding either id.
    ///
    /// ```
    /// # use synmerge::libs::cluster::PairClusters;
    /// let pairs = vec![
    ///     ("A01g1".to_string(), "B01g1".to_string()),
    ///     ("B01g1".to_string(), "D01g1".to_string()),
    ///     ("A01g1".to_string(), "D01g2".to_string()),
    /// ];
    /// let mut clusters = PairClusters::new(&pairs, 3);
    /// for (a, b) in &pairs {
    ///     clusters.add(a, b).unwrap();
    /// }
    /// assert_eq!(clusters.rows(), vec!["A01g1\tB01g1\terror"]);
    /// assert_eq!(clusters.conflicts().len(), 1);
    /// ```
    pub fn add(&mut self, a: &str, b: &str) -> anyhow::Result<()> {
        let col_a = self.column(a)?;
        let col_b = self.column(b)?;

        let found = match (self.first_cluster(a), self.first_cluster(b)) {
            (Some(x), Some(y)) => Some(x.min(y)),
            (x, y) => x.or(y),
        };

        let Some(idx) = found else {
            self.clusters.push(vec![Slot::Empty; self.genomes.len()]);
            let idx = self.clusters.len() - 1;
            self.set(idx, col_a, Slot::Id(a.to_string()));
            self.set(idx, col_b, Slot::Id(b.to_string()));
            return Ok(());
        };

        let held_a = self.clusters[idx][col_a].clone();
        let held_b = self.clusters[idx][col_b].clone();

        if held_a != Slot::Empty && held_a != Slot::Id(a.to_string()) {
            self.conflicts.push((held_a.to_string(), a.to_string()));
            self.set(idx, col_a, Slot::Conflict);
            self.set(idx, col_b, Slot::Id(b.to_string()));
        } else if held_b != Slot::Empty && held_b != Slot::Id(b.to_string()) {
            self.conflicts.push((held_b.to_string(), b.to_string()));
            self.set(idx, col_a, Slot::Id(a.to_string()));
            self.set(idx, col_b, Slot::Conflict);
        } else {
            self.set(idx, col_a, Slot::Id(a.to_string()));
            self.set(idx, col_b, Slot::Id(b.to_string()));
        }

        Ok(())
    }

    /// Tab-separated clusters in creation order.
    pub fn rows(&self) -> Vec<String> {
        self.clusters
            .iter()
            .map(|slots| slots.iter().join("\t"))
            .collect()
    }
}
