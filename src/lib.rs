//! # hit-compare
//!
//! A library for comparing taxonomic-classification search results produced
//! against two reference sequence databases.
//!
//! After splitting a reference collection into a database of interest (say,
//! one genus) and a database of everything else, the same queries are
//! searched against both. `hit-compare` parses the two tabular result
//! files and reports, per query and per acceptance threshold, which
//! database produced the stronger match.
//!
//! ## Features
//!
//! - **Streaming m9 parsing**: lazy, single-pass grouping of tabular hits
//!   by query, handling both header-delimited and query-change-delimited
//!   record boundaries
//! - **Multi-threshold selection**: one best hit per query for every
//!   (percent identity, alignment length) minimum pair
//! - **Cross-database comparison**: per-query classification into equal,
//!   other-wins, and interest-exclusive outcomes, with per-subject tallies
//! - **Database splitting**: partition a FASTA collection into interest and
//!   rest by taxonomy query
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::fs::File;
//! use std::io::BufReader;
//! use hit_compare::core::thresholds::ThresholdGrid;
//! use hit_compare::matching::{comparator, merge, selector};
//! use hit_compare::parsing::m9::M9Reader;
//!
//! let interest_grid = ThresholdGrid::cross(&[70], &[50]);
//! let other_grid = interest_grid.clone();
//!
//! let interest = M9Reader::new(BufReader::new(File::open("interest.txt").unwrap()));
//! let selection = selector::select_interest(interest, &interest_grid).unwrap();
//!
//! let other = M9Reader::new(BufReader::new(File::open("other.txt").unwrap()));
//! let table = merge::merge_other(selection.table, other, &other_grid).unwrap();
//!
//! for result in comparator::compare(&table, &interest_grid, &other_grid).unwrap() {
//!     println!(
//!         "{}: equal={} other={} only-interest={}",
//!         result.label, result.equal, result.other_wins, result.interest_exclusive
//!     );
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Hit records, query groups, thresholds, and the best-hit table
//! - [`parsing`]: Parsers for m9 tabular hits, taxonomy maps, and FASTA
//! - [`matching`]: Best-hit selection, merge, and the comparator
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;

// Re-export commonly used types for convenience
pub use crate::core::best_hit::{BestHit, BestHitTable, SlotPair};
pub use crate::core::hit::{HitRecord, QueryGroup};
pub use crate::core::thresholds::{ThresholdGrid, ThresholdPair};
pub use crate::matching::comparator::ComparisonResult;
pub use crate::parsing::m9::M9Reader;
