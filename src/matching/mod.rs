//! Best-hit selection and cross-database comparison.
//!
//! The pipeline runs in three strictly sequential steps:
//!
//! 1. [`selector::select_interest`] scans the interest database's query
//!    groups and keeps, per query and per threshold pair, the strongest
//!    qualifying hit.
//! 2. [`merge::merge_other`] scans the other database's groups and fills
//!    the other side of every slot that qualified on the interest side,
//!    consuming and returning the table.
//! 3. [`comparator::compare`] classifies every query at every threshold
//!    index and accumulates counts, summary rows, and per-subject tallies.
//!
//! A hit qualifies for a threshold pair when its percent identity and
//! alignment length both reach the pair's minimums; among qualifying hits
//! the strictly greatest bit score wins, first in file order on ties.

pub mod comparator;
pub mod merge;
pub mod selector;
