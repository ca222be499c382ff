use crate::core::best_hit::BestHitTable;
use crate::core::hit::QueryGroup;
use crate::core::thresholds::ThresholdGrid;
use crate::matching::selector::best_qualifying_hit;
use crate::parsing::m9::ParseError;

/// Fill the other-database side of an interest-filled table.
///
/// Takes the phase-1 table by value and returns it merged; the pipeline
/// never holds a half-merged table alongside the original.
///
/// Only queries already present in the table are considered: the other
/// database is scanned, not indexed. Within a known query, only threshold
/// indices whose interest side qualified are re-evaluated; a threshold
/// combination that failed on the interest side has nothing to compare
/// against. Selection semantics (thresholds, strict-greater running
/// maximum, first-max tie break) match the interest pass, using the
/// other-side grid.
///
/// # Errors
///
/// Propagates the first `ParseError` from the underlying group stream.
pub fn merge_other<I>(
    mut table: BestHitTable,
    groups: I,
    grid: &ThresholdGrid,
) -> Result<BestHitTable, ParseError>
where
    I: IntoIterator<Item = Result<QueryGroup, ParseError>>,
{
    for group in groups {
        let group = group?;

        let Some(query) = group.query.as_deref() else {
            continue;
        };
        let Some(entry) = table.get_mut(query) else {
            continue;
        };

        for (slot, pair) in entry.slots.iter_mut().zip(grid.pairs()) {
            let Some(slot) = slot.as_mut() else {
                continue;
            };
            if let Some(best) = best_qualifying_hit(&group, pair) {
                slot.other = Some(best);
            }
        }
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hit::HitRecord;
    use crate::matching::selector::select_interest;

    fn hit(query: &str, subject: &str, percent_id: f64, aln_length: u64, bit_score: f64) -> HitRecord {
        HitRecord {
            query: query.to_string(),
            subject: subject.to_string(),
            percent_id,
            aln_length,
            mismatches: 0,
            gap_openings: 0,
            q_start: 1,
            q_end: aln_length,
            s_start: 1,
            s_end: aln_length,
            evalue: 0.0,
            bit_score,
        }
    }

    fn interest_table() -> BestHitTable {
        let groups = vec![
            Ok(QueryGroup::new(
                "q1",
                vec![hit("q1", "interest_s1", 99.4, 519, 1005.0)],
            )),
            Ok(QueryGroup::new(
                "q2",
                vec![hit("q2", "interest_s2", 99.2, 512, 959.0)],
            )),
            Ok(QueryGroup::new(
                "q3",
                vec![hit("q3", "interest_s3", 95.0, 20, 40.0)],
            )),
        ];
        select_interest(groups, &ThresholdGrid::cross(&[80], &[50]))
            .unwrap()
            .table
    }

    #[test]
    fn test_merge_fills_other_side() {
        let other_grid = ThresholdGrid::cross(&[30], &[30]);
        let groups = vec![
            Ok(QueryGroup::new(
                "q1",
                vec![hit("q1", "other_s1", 90.62, 32, 40.1)],
            )),
            Ok(QueryGroup::new(
                "q2",
                vec![hit("q2", "other_s2", 88.79, 455, 482.0)],
            )),
        ];

        let table = merge_other(interest_table(), groups, &other_grid).unwrap();

        let slot = table.get("q1").unwrap().slots[0].as_ref().unwrap();
        assert_eq!(slot.interest.subject, "interest_s1");
        let other = slot.other.as_ref().unwrap();
        assert_eq!(other.subject, "other_s1");
        assert_eq!(other.bit_score, 40.1);

        let slot = table.get("q2").unwrap().slots[0].as_ref().unwrap();
        assert_eq!(slot.other.as_ref().unwrap().subject, "other_s2");
    }

    #[test]
    fn test_unknown_queries_ignored() {
        let other_grid = ThresholdGrid::cross(&[30], &[30]);
        let groups = vec![Ok(QueryGroup::new(
            "not_in_interest",
            vec![hit("not_in_interest", "other_s9", 99.0, 500, 900.0)],
        ))];

        let table = merge_other(interest_table(), groups, &other_grid).unwrap();

        assert_eq!(table.len(), 3);
        assert!(!table.contains("not_in_interest"));
    }

    #[test]
    fn test_empty_interest_slot_never_evaluated() {
        // q3's interest slot is empty at (80, 50); even a strong other-side
        // hit must not resurrect it
        let other_grid = ThresholdGrid::cross(&[30], &[30]);
        let groups = vec![Ok(QueryGroup::new(
            "q3",
            vec![hit("q3", "other_s3", 100.0, 600, 1200.0)],
        ))];

        let table = merge_other(interest_table(), groups, &other_grid).unwrap();
        assert!(table.get("q3").unwrap().slots[0].is_none());
    }

    #[test]
    fn test_no_qualifying_other_hit_leaves_none() {
        let other_grid = ThresholdGrid::cross(&[80], &[50]);
        let groups = vec![Ok(QueryGroup::new(
            "q1",
            vec![hit("q1", "other_s1", 50.0, 20, 40.1)],
        ))];

        let table = merge_other(interest_table(), groups, &other_grid).unwrap();
        let slot = table.get("q1").unwrap().slots[0].as_ref().unwrap();
        assert!(slot.other.is_none());
    }

    #[test]
    fn test_sentinel_groups_skipped() {
        let other_grid = ThresholdGrid::cross(&[30], &[30]);
        let groups = vec![Ok(QueryGroup::empty()), Ok(QueryGroup::empty())];

        let table = merge_other(interest_table(), groups, &other_grid).unwrap();
        assert_eq!(table.len(), 3);
    }
}
