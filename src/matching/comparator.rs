use std::collections::HashMap;

use thiserror::Error;

use crate::core::best_hit::BestHitTable;
use crate::core::thresholds::ThresholdGrid;

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("{0} is in both databases")]
    SubjectCollision(String),

    #[error(
        "Threshold grids must have the same length: interest has {interest}, other has {other}"
    )]
    GridLengthMismatch { interest: usize, other: usize },
}

/// One row of the per-query summary log.
///
/// `first` is the interest-side subject, `second` the other-side subject;
/// an absent side renders as an empty column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub query: String,
    pub first: Option<String>,
    pub second: Option<String>,
}

impl std::fmt::Display for SummaryRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\t{}\t{}",
            self.query,
            self.first.as_deref().unwrap_or(""),
            self.second.as_deref().unwrap_or("")
        )
    }
}

/// Per-subject hit tallies for one side at one threshold index.
///
/// The `None` key stands for "no qualifying subject on this side"; it is
/// registered so the absence shows up in the tally, but never incremented.
pub type SubjectCounts = HashMap<Option<String>, u64>;

/// Outcome of comparing every query at one threshold index.
#[derive(Debug, Clone, Default)]
pub struct ComparisonResult {
    /// Human-readable label built from the four threshold values,
    /// `p1_<pct>-a1_<len>_p2_<pct>-a2_<len>`
    pub label: String,

    /// Queries whose best hits scored identically on both sides
    pub equal: u64,

    /// Queries where the other database scored strictly higher
    pub other_wins: u64,

    /// Queries with a qualifying interest hit and no qualifying other hit
    pub interest_exclusive: u64,

    /// Queries where the interest hit scored strictly higher but the other
    /// database also qualified
    pub interest_stronger: u64,

    /// Per-query log rows, in table order
    pub summary: Vec<SummaryRow>,

    /// Interest-side per-subject tallies
    pub interest_subject_counts: SubjectCounts,

    /// Other-side per-subject tallies
    pub other_subject_counts: SubjectCounts,
}

impl ComparisonResult {
    fn new(label: String) -> Self {
        Self {
            label,
            ..Self::default()
        }
    }

    /// Queries from the interest stream that landed in no classification:
    /// parsed but never qualified at this threshold index.
    pub fn no_hits(&self, total_queries: usize) -> u64 {
        (total_queries as u64)
            .saturating_sub(self.equal)
            .saturating_sub(self.other_wins)
            .saturating_sub(self.interest_exclusive)
            .saturating_sub(self.interest_stronger)
    }

    /// Named subjects with non-zero counts, descending by count.
    /// Ties break by subject id for deterministic output.
    fn sorted_counts(counts: &SubjectCounts) -> Vec<(&str, u64)> {
        let mut hits: Vec<(&str, u64)> = counts
            .iter()
            .filter_map(|(subject, &count)| {
                subject
                    .as_deref()
                    .filter(|_| count > 0)
                    .map(|s| (s, count))
            })
            .collect();
        hits.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        hits
    }

    pub fn sorted_interest_hits(&self) -> Vec<(&str, u64)> {
        Self::sorted_counts(&self.interest_subject_counts)
    }

    pub fn sorted_other_hits(&self) -> Vec<(&str, u64)> {
        Self::sorted_counts(&self.other_subject_counts)
    }
}

/// Render a percent-identity minimum the way it was given on the command
/// line (integers without a decimal point)
fn fmt_threshold(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Register a subject on one side, erroring if it is already a real key on
/// the opposite side. A subject present in both databases means the
/// upstream split was bad.
fn register_subject(
    subject: &Option<String>,
    own: &mut SubjectCounts,
    opposite: &SubjectCounts,
) -> Result<(), CompareError> {
    if own.contains_key(subject) {
        return Ok(());
    }

    if let Some(id) = subject {
        if opposite.contains_key(&Some(id.clone())) {
            return Err(CompareError::SubjectCollision(id.clone()));
        }
    }

    own.insert(subject.clone(), 0);
    Ok(())
}

fn increment(counts: &mut SubjectCounts, subject: &Option<String>) {
    *counts.entry(subject.clone()).or_insert(0) += 1;
}

/// Classify every query in the merged table, once per threshold index.
///
/// Each index is an independent accumulation pass; the grids are only used
/// to derive the labels. Query ids are truncated at the first space before
/// being logged.
///
/// # Errors
///
/// Returns `CompareError::GridLengthMismatch` if the grids differ in length
/// and `CompareError::SubjectCollision` if a subject id shows up on both
/// sides' tallies.
pub fn compare(
    table: &BestHitTable,
    interest_grid: &ThresholdGrid,
    other_grid: &ThresholdGrid,
) -> Result<Vec<ComparisonResult>, CompareError> {
    if interest_grid.len() != other_grid.len() {
        return Err(CompareError::GridLengthMismatch {
            interest: interest_grid.len(),
            other: other_grid.len(),
        });
    }

    let mut results: Vec<ComparisonResult> = interest_grid
        .pairs()
        .iter()
        .zip(other_grid.pairs())
        .map(|(a, b)| {
            ComparisonResult::new(format!(
                "p1_{}-a1_{}_p2_{}-a2_{}",
                fmt_threshold(a.min_percent_id),
                a.min_aln_length,
                fmt_threshold(b.min_percent_id),
                b.min_aln_length,
            ))
        })
        .collect();

    for entry in table.iter() {
        let seq_name = entry
            .query
            .split(' ')
            .next()
            .unwrap_or(entry.query.as_str())
            .trim();

        for (slot, result) in entry.slots.iter().zip(results.iter_mut()) {
            let Some(pair) = slot else {
                continue;
            };

            let subject_a = Some(pair.interest.subject.clone());
            let subject_b = pair.other.as_ref().map(|hit| hit.subject.clone());

            register_subject(
                &subject_a,
                &mut result.interest_subject_counts,
                &result.other_subject_counts,
            )?;
            register_subject(
                &subject_b,
                &mut result.other_subject_counts,
                &result.interest_subject_counts,
            )?;

            let score_a = pair.interest.bit_score;
            let score_b = pair.other_bit_score();

            if score_a == score_b {
                result.equal += 1;
                result.summary.push(SummaryRow {
                    query: seq_name.to_string(),
                    first: subject_a.clone(),
                    second: subject_b.clone(),
                });
                increment(&mut result.interest_subject_counts, &subject_a);
                increment(&mut result.other_subject_counts, &subject_b);
            } else if score_a > score_b {
                if subject_b.is_none() {
                    result.interest_exclusive += 1;
                    result.summary.push(SummaryRow {
                        query: seq_name.to_string(),
                        first: subject_a.clone(),
                        second: None,
                    });
                } else {
                    // The other database qualified but scored lower. No
                    // summary row, but the query still counts toward the
                    // interest side of the collated table.
                    result.interest_stronger += 1;
                }
                increment(&mut result.interest_subject_counts, &subject_a);
            } else {
                result.other_wins += 1;
                result.summary.push(SummaryRow {
                    query: seq_name.to_string(),
                    first: None,
                    second: subject_b.clone(),
                });
                increment(&mut result.other_subject_counts, &subject_b);
            }
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::best_hit::{BestHit, SlotPair};

    fn best(subject: &str, bit_score: f64) -> BestHit {
        BestHit {
            subject: subject.to_string(),
            percent_id: 99.0,
            aln_length: 500,
            bit_score,
            evalue: 0.0,
        }
    }

    fn slot(interest: BestHit, other: Option<BestHit>) -> Option<SlotPair> {
        Some(SlotPair { interest, other })
    }

    fn grids() -> (ThresholdGrid, ThresholdGrid) {
        (
            ThresholdGrid::cross(&[80], &[50]),
            ThresholdGrid::cross(&[30], &[30]),
        )
    }

    /// Five queries: one equal pair, two interest-only, one stronger-other,
    /// one weaker-but-present-other. The equal and stronger-other queries
    /// share one other-side subject.
    fn scenario_table() -> BestHitTable {
        let mut table = BestHitTable::new();
        table.insert(
            "q_equal",
            vec![slot(best("int_1", 959.0), Some(best("oth_shared", 959.0)))],
        );
        table.insert("q_only_a", vec![slot(best("int_2", 1005.0), None)]);
        table.insert("q_only_b", vec![slot(best("int_3", 482.0), None)]);
        table.insert(
            "q_other_better",
            vec![slot(best("int_4", 10.0), Some(best("oth_shared", 959.0)))],
        );
        table.insert(
            "q_weaker_other",
            vec![slot(best("int_5", 800.0), Some(best("oth_weak", 40.1)))],
        );
        table
    }

    #[test]
    fn test_classification_counts() {
        let (grid_a, grid_b) = grids();
        let results = compare(&scenario_table(), &grid_a, &grid_b).unwrap();
        assert_eq!(results.len(), 1);

        let result = &results[0];
        assert_eq!(result.label, "p1_80-a1_50_p2_30-a2_30");
        assert_eq!(result.equal, 1);
        assert_eq!(result.interest_exclusive, 2);
        assert_eq!(result.other_wins, 1);
        assert_eq!(result.interest_stronger, 1);
    }

    #[test]
    fn test_summary_rows() {
        let (grid_a, grid_b) = grids();
        let results = compare(&scenario_table(), &grid_a, &grid_b).unwrap();
        let rows: Vec<String> = results[0].summary.iter().map(ToString::to_string).collect();

        // Table order; the uncategorized weaker-other query logs nothing
        assert_eq!(
            rows,
            vec![
                "q_equal\tint_1\toth_shared",
                "q_only_a\tint_2\t",
                "q_only_b\tint_3\t",
                "q_other_better\t\toth_shared",
            ]
        );
    }

    #[test]
    fn test_subject_counts() {
        let (grid_a, grid_b) = grids();
        let results = compare(&scenario_table(), &grid_a, &grid_b).unwrap();
        let result = &results[0];

        // Interest side: incremented for every query except the other-wins
        // one, whose subject is registered at zero
        let a = &result.interest_subject_counts;
        assert_eq!(a[&Some("int_1".to_string())], 1);
        assert_eq!(a[&Some("int_2".to_string())], 1);
        assert_eq!(a[&Some("int_3".to_string())], 1);
        assert_eq!(a[&Some("int_4".to_string())], 0);
        assert_eq!(a[&Some("int_5".to_string())], 1);

        // Other side: the shared subject collects the equal and other-wins
        // increments; the weaker hit and the absent side stay at zero
        let b = &result.other_subject_counts;
        assert_eq!(b[&Some("oth_shared".to_string())], 2);
        assert_eq!(b[&Some("oth_weak".to_string())], 0);
        assert_eq!(b[&None], 0);
    }

    #[test]
    fn test_sorted_hits_filter_zeros_and_none() {
        let (grid_a, grid_b) = grids();
        let results = compare(&scenario_table(), &grid_a, &grid_b).unwrap();
        let result = &results[0];

        let interest = result.sorted_interest_hits();
        assert_eq!(interest.len(), 4);
        assert!(interest.iter().all(|&(_, count)| count > 0));

        let other = result.sorted_other_hits();
        assert_eq!(other, vec![("oth_shared", 2)]);
    }

    #[test]
    fn test_no_hits_derivation() {
        let (grid_a, grid_b) = grids();
        let results = compare(&scenario_table(), &grid_a, &grid_b).unwrap();
        let result = &results[0];

        // 7 parsed query groups, 5 classified (the weaker-other case now
        // counts), so 2 never qualified
        assert_eq!(result.no_hits(7), 2);
    }

    #[test]
    fn test_empty_slots_skipped() {
        let mut table = BestHitTable::new();
        table.insert("q1", vec![None]);

        let (grid_a, grid_b) = grids();
        let results = compare(&table, &grid_a, &grid_b).unwrap();
        let result = &results[0];
        assert_eq!(
            result.equal + result.other_wins + result.interest_exclusive
                + result.interest_stronger,
            0
        );
        assert!(result.summary.is_empty());
    }

    #[test]
    fn test_query_id_truncated_at_space() {
        let mut table = BestHitTable::new();
        table.insert(
            "read_1 length=450 xy=0042",
            vec![slot(best("int_1", 100.0), None)],
        );

        let (grid_a, grid_b) = grids();
        let results = compare(&table, &grid_a, &grid_b).unwrap();
        assert_eq!(results[0].summary[0].query, "read_1");
    }

    #[test]
    fn test_subject_collision_is_fatal() {
        let mut table = BestHitTable::new();
        table.insert(
            "q1",
            vec![slot(best("shared_subject", 100.0), None)],
        );
        table.insert(
            "q2",
            vec![slot(
                best("int_2", 100.0),
                Some(best("shared_subject", 90.0)),
            )],
        );

        let (grid_a, grid_b) = grids();
        let err = compare(&table, &grid_a, &grid_b).unwrap_err();
        match err {
            CompareError::SubjectCollision(id) => assert_eq!(id, "shared_subject"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_grid_length_mismatch() {
        let table = BestHitTable::new();
        let grid_a = ThresholdGrid::cross(&[80, 90], &[50]);
        let grid_b = ThresholdGrid::cross(&[30], &[30]);

        let err = compare(&table, &grid_a, &grid_b).unwrap_err();
        assert!(matches!(
            err,
            CompareError::GridLengthMismatch {
                interest: 2,
                other: 1
            }
        ));
    }

    #[test]
    fn test_category_partition() {
        let (grid_a, grid_b) = grids();
        let results = compare(&scenario_table(), &grid_a, &grid_b).unwrap();
        let result = &results[0];

        let non_empty_slots = 5;
        assert!(result.equal + result.other_wins + result.interest_exclusive <= non_empty_slots);
        assert_eq!(
            result.equal
                + result.other_wins
                + result.interest_exclusive
                + result.interest_stronger,
            non_empty_slots
        );
    }

    #[test]
    fn test_per_index_independence() {
        let mut table = BestHitTable::new();
        table.insert(
            "q1",
            vec![
                slot(best("int_1", 100.0), Some(best("oth_1", 100.0))),
                slot(best("int_1", 100.0), None),
            ],
        );

        let grid_a = ThresholdGrid::cross(&[80], &[50, 100]);
        let grid_b = ThresholdGrid::cross(&[30], &[30, 60]);
        let results = compare(&table, &grid_a, &grid_b).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].equal, 1);
        assert_eq!(results[0].interest_exclusive, 0);
        assert_eq!(results[1].equal, 0);
        assert_eq!(results[1].interest_exclusive, 1);
    }
}
