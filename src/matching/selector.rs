use crate::core::best_hit::{BestHit, BestHitTable, SlotPair};
use crate::core::hit::QueryGroup;
use crate::core::thresholds::ThresholdGrid;
use crate::parsing::m9::ParseError;

/// Phase-1 output: the interest-side table plus the size of the query
/// universe.
#[derive(Debug)]
pub struct Selection {
    /// Number of query groups seen, zero-hit sentinels included. Used
    /// downstream to derive the "no hits in interest database" count.
    pub total_queries: usize,

    /// Best interest-side hit per query, per threshold index
    pub table: BestHitTable,
}

/// Scan one query's hits for the strongest one satisfying a threshold pair.
///
/// The running maximum uses strict greater-than, so among equal-scoring
/// qualifying hits the first one in file order wins.
pub(crate) fn best_qualifying_hit(
    group: &QueryGroup,
    pair: &crate::core::thresholds::ThresholdPair,
) -> Option<BestHit> {
    let mut best_bit_score = 0.0;
    let mut best = None;

    for hit in &group.hits {
        if pair.accepts(hit.percent_id, hit.aln_length) && hit.bit_score > best_bit_score {
            best = Some(BestHit::from_hit(hit));
            best_bit_score = hit.bit_score;
        }
    }

    best
}

/// Build the best-hit table from the interest database results.
///
/// For each query group (zero-hit sentinels are counted but carry no
/// entry) and each threshold pair in grid order, the strongest qualifying
/// hit becomes the interest side of that slot; a threshold pair with no
/// qualifying hit leaves the slot empty.
///
/// # Errors
///
/// Propagates the first `ParseError` from the underlying group stream.
pub fn select_interest<I>(groups: I, grid: &ThresholdGrid) -> Result<Selection, ParseError>
where
    I: IntoIterator<Item = Result<QueryGroup, ParseError>>,
{
    let mut total_queries = 0;
    let mut table = BestHitTable::new();

    for group in groups {
        let group = group?;
        total_queries += 1;

        let Some(query) = group.query.clone() else {
            continue;
        };

        let slots = grid
            .pairs()
            .iter()
            .map(|pair| best_qualifying_hit(&group, pair).map(SlotPair::interest_only))
            .collect();

        table.insert(query, slots);
    }

    Ok(Selection {
        total_queries,
        table,
    })
}
