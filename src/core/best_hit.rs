use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::hit::HitRecord;

/// Bit score used for comparisons when a side has no qualifying hit.
///
/// Real bit scores are non-negative, so the sentinel only ever equals
/// another sentinel.
pub const ABSENT_BIT_SCORE: f64 = -1.0;

/// The winning hit for one query at one threshold index, on one side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestHit {
    pub subject: String,
    pub percent_id: f64,
    pub aln_length: u64,
    pub bit_score: f64,
    pub evalue: f64,
}

impl BestHit {
    pub fn from_hit(hit: &HitRecord) -> Self {
        Self {
            subject: hit.subject.clone(),
            percent_id: hit.percent_id,
            aln_length: hit.aln_length,
            bit_score: hit.bit_score,
            evalue: hit.evalue,
        }
    }
}

/// Both sides of a best-hit slot.
///
/// A slot only exists when the interest side qualified, so `interest` is
/// always present; `other` is filled during the merge phase and stays
/// `None` when the other database produced no qualifying hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotPair {
    pub interest: BestHit,
    pub other: Option<BestHit>,
}

impl SlotPair {
    pub fn interest_only(interest: BestHit) -> Self {
        Self {
            interest,
            other: None,
        }
    }

    /// Bit score of the other side, or the absent sentinel
    pub fn other_bit_score(&self) -> f64 {
        self.other
            .as_ref()
            .map_or(ABSENT_BIT_SCORE, |hit| hit.bit_score)
    }
}

/// One query's row in the table: a slot per threshold index.
#[derive(Debug, Clone, PartialEq)]
pub struct TableEntry {
    pub query: String,
    pub slots: Vec<Option<SlotPair>>,
}

/// Best-hit slots per query, one slot per threshold index.
///
/// Iteration order is insertion (parse) order. Re-inserting an existing
/// query keeps its position but replaces its slots; duplicates are not
/// treated as an error.
#[derive(Debug, Clone, Default)]
pub struct BestHitTable {
    entries: Vec<TableEntry>,
    index: HashMap<String, usize>,
}

impl BestHitTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, query: &str) -> bool {
        self.index.contains_key(query)
    }

    pub fn insert(&mut self, query: impl Into<String>, slots: Vec<Option<SlotPair>>) {
        let query = query.into();
        match self.index.get(&query) {
            Some(&pos) => self.entries[pos].slots = slots,
            None => {
                self.index.insert(query.clone(), self.entries.len());
                self.entries.push(TableEntry { query, slots });
            }
        }
    }

    pub fn get(&self, query: &str) -> Option<&TableEntry> {
        self.index.get(query).map(|&pos| &self.entries[pos])
    }

    pub fn get_mut(&mut self, query: &str) -> Option<&mut TableEntry> {
        self.index.get(query).map(|&pos| &mut self.entries[pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableEntry> {
        self.entries.iter()
    }
}
