//! Parsers for the input formats of the comparison pipeline.
//!
//! This module provides parsers for:
//!
//! - **m9 tabular hits**: streaming reader over BLAST/sortmerna-style
//!   tab-separated hit records, grouped by query
//! - **Taxonomy maps**: tab-delimited identifier-to-taxonomy files used by
//!   the database splitter
//! - **FASTA files**: sequence input for the database splitter, plain or
//!   gzip compressed
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::fs::File;
//! use std::io::BufReader;
//! use hit_compare::parsing::m9::M9Reader;
//!
//! let file = BufReader::new(File::open("interest_results.txt").unwrap());
//! for group in M9Reader::new(file) {
//!     let group = group.unwrap();
//!     match &group.query {
//!         Some(query) => println!("{query}: {} hits", group.hits.len()),
//!         None => println!("query with no hits"),
//!     }
//! }
//! ```
//!
//! ## Input record format
//!
//! Data lines are tab-separated with 12 or 14 fields; only the first 12 are
//! interpreted:
//!
//! | Column | Field |
//! |--------|-------|
//! | 1  | query id |
//! | 2  | subject id |
//! | 3  | percent identity |
//! | 4  | alignment length |
//! | 5  | mismatches |
//! | 6  | gap openings |
//! | 7  | query start |
//! | 8  | query end |
//! | 9  | subject start |
//! | 10 | subject end |
//! | 11 | e-value |
//! | 12 | bit score |

pub mod fasta;
pub mod m9;
pub mod taxonomy;
