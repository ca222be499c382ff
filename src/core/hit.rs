use serde::{Deserialize, Serialize};

/// A single alignment hit from an m9-style tabular result line.
///
/// Only the first 12 columns of the tabular format are represented; the
/// 14-column variant produced by some tools carries two extra columns that
/// are ignored on parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitRecord {
    /// Query sequence identifier (column 1)
    pub query: String,

    /// Subject (reference database entry) identifier (column 2)
    pub subject: String,

    /// Percent identity of the alignment, 0-100 (column 3)
    pub percent_id: f64,

    /// Alignment length in bases (column 4)
    pub aln_length: u64,

    /// Number of mismatches (column 5)
    pub mismatches: u64,

    /// Number of gap openings (column 6)
    pub gap_openings: u64,

    /// Alignment start on the query (column 7)
    pub q_start: u64,

    /// Alignment end on the query (column 8)
    pub q_end: u64,

    /// Alignment start on the subject (column 9)
    pub s_start: u64,

    /// Alignment end on the subject (column 10)
    pub s_end: u64,

    /// Expect value (column 11)
    pub evalue: f64,

    /// Bit score (column 12); higher is a stronger match
    pub bit_score: f64,
}

/// All hits sharing one query id, in file order.
///
/// A group with `query: None` (and no hits) is the zero-hit sentinel: the
/// search tool reported the query but found nothing for it. Sentinels count
/// toward the query universe but never carry hits.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryGroup {
    pub query: Option<String>,
    pub hits: Vec<HitRecord>,
}

impl QueryGroup {
    pub fn new(query: impl Into<String>, hits: Vec<HitRecord>) -> Self {
        Self {
            query: Some(query.into()),
            hits,
        }
    }

    /// The sentinel for a query that produced zero hits
    pub fn empty() -> Self {
        Self {
            query: None,
            hits: Vec::new(),
        }
    }

    /// True for the zero-hit sentinel
    pub fn is_empty_sentinel(&self) -> bool {
        self.query.is_none()
    }
}
