//! Core data types for the two-database comparison pipeline.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`HitRecord`](hit::HitRecord): one alignment hit from a tabular result line
//! - [`QueryGroup`](hit::QueryGroup): all hits sharing one query, or the zero-hit sentinel
//! - [`ThresholdPair`](thresholds::ThresholdPair), [`ThresholdGrid`](thresholds::ThresholdGrid):
//!   identity/length acceptance rules
//! - [`BestHit`](best_hit::BestHit), [`SlotPair`](best_hit::SlotPair),
//!   [`BestHitTable`](best_hit::BestHitTable): per-query, per-threshold winners
//!
//! ## Table lifecycle
//!
//! The [`BestHitTable`](best_hit::BestHitTable) is filled in two phases:
//! selection over the interest database builds it, and the other-database
//! merge consumes it by value and returns it with the `other` side of each
//! slot resolved. The comparator only ever reads the merged table.

pub mod best_hit;
pub mod hit;
pub mod thresholds;
