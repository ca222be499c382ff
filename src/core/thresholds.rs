use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "The percentage values for both databases should be the same length: {interest:?} - {other:?}"
    )]
    MismatchedPercentIds {
        interest: Vec<u32>,
        other: Vec<u32>,
    },

    #[error(
        "The alignment length values for both databases should be the same length: {interest:?} - {other:?}"
    )]
    MismatchedAlnLengths {
        interest: Vec<u64>,
        other: Vec<u64>,
    },
}

/// One acceptance rule: a hit qualifies when it reaches both minimums.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdPair {
    pub min_percent_id: f64,
    pub min_aln_length: u64,
}

impl ThresholdPair {
    pub fn new(min_percent_id: f64, min_aln_length: u64) -> Self {
        Self {
            min_percent_id,
            min_aln_length,
        }
    }

    /// Does this hit reach both minimums?
    pub fn accepts(&self, percent_id: f64, aln_length: u64) -> bool {
        percent_id >= self.min_percent_id && aln_length >= self.min_aln_length
    }
}

/// Ordered acceptance thresholds for one database.
///
/// Built as the cross product of identity minimums and length minimums,
/// identities in the outer loop. The interest-side and other-side grids are
/// compared position-by-position, so their lengths must match; the CLI
/// validates the underlying lists before building either grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdGrid {
    pairs: Vec<ThresholdPair>,
}

impl ThresholdGrid {
    /// Cross product of identity and length minimums, identities outermost
    pub fn cross(percent_ids: &[u32], aln_lengths: &[u64]) -> Self {
        let mut pairs = Vec::with_capacity(percent_ids.len() * aln_lengths.len());
        for &pct in percent_ids {
            for &len in aln_lengths {
                pairs.push(ThresholdPair::new(f64::from(pct), len));
            }
        }
        Self { pairs }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[ThresholdPair] {
        &self.pairs
    }

    pub fn get(&self, index: usize) -> Option<&ThresholdPair> {
        self.pairs.get(index)
    }
}

/// Check that the interest and other threshold lists pair up one-to-one.
///
/// Equal list lengths on each axis guarantee equal cross-product sizes, so
/// index i of one grid always has a counterpart in the other.
pub fn validate_threshold_lists(
    interest_pcts: &[u32],
    interest_lens: &[u64],
    other_pcts: &[u32],
    other_lens: &[u64],
) -> Result<(), ConfigError> {
    if interest_pcts.len() != other_pcts.len() {
        return Err(ConfigError::MismatchedPercentIds {
            interest: interest_pcts.to_vec(),
            other: other_pcts.to_vec(),
        });
    }

    if interest_lens.len() != other_lens.len() {
        return Err(ConfigError::MismatchedAlnLengths {
            interest: interest_lens.to_vec(),
            other: other_lens.to_vec(),
        });
    }

    Ok(())
}
