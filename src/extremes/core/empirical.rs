//! Empirical return levels from plotting positions.
//!
//! Each observation gets the Weibull plotting position: with rank `k`
//! counted from the largest value (ties share their average rank), the
//! exceedance probability is `k/(n + 1)` and the return period is its
//! reciprocal. The table is non-parametric and is the reference curve fitted
//! models are checked against.
use crate::extremes::{core::data::BlockMaxima, errors::GevResult};
use ndarray::Array1;

/// `EmpiricalReturnLevels` — one `(level, exceedance, period)` row per
/// observation, ordered by ascending period (ascending level).
#[derive(Debug, Clone, PartialEq)]
pub struct EmpiricalReturnLevels {
    pub levels: Array1<f64>,
    pub exceedance: Array1<f64>,
    pub periods: Array1<f64>,
}

impl EmpiricalReturnLevels {
    /// Build the table for a validated sample.
    pub fn from_sample(data: &BlockMaxima) -> Self {
        let values = data.values();
        let n = values.len();

        let mut desc: Vec<f64> = values.to_vec();
        desc.sort_by(|a, b| b.total_cmp(a));
        let ranks = average_ranks_desc(&desc);

        let denom = (n + 1) as f64;
        let mut levels = Array1::zeros(n);
        let mut exceedance = Array1::zeros(n);
        let mut periods = Array1::zeros(n);
        // Reverse so the smallest level (largest rank) comes first.
        for (out, (&x, &rank)) in desc.iter().zip(ranks.iter()).rev().enumerate() {
            levels[out] = x;
            exceedance[out] = rank / denom;
            periods[out] = denom / rank;
        }
        Self { levels, exceedance, periods }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Empirical return-level table for raw values.
///
/// # Errors
/// - `GevError::EmptySample` for `n = 0` (an `InsufficientData` error).
/// - `GevError::NonFiniteData` for NaN/±∞.
pub fn empirical_return_levels(values: &[f64]) -> GevResult<EmpiricalReturnLevels> {
    let data = BlockMaxima::from_slice(values)?;
    Ok(EmpiricalReturnLevels::from_sample(&data))
}

/// 1-based ranks of a descending slice, ties replaced by their mean rank.
fn average_ranks_desc(desc: &[f64]) -> Vec<f64> {
    let mut ranks = vec![0.0; desc.len()];
    let mut start = 0;
    while start < desc.len() {
        let mut end = start + 1;
        while end < desc.len() && desc[end] == desc[start] {
            end += 1;
        }
        // Ranks start+1 ..= end share their average.
        let avg = 0.5 * ((start + 1) + end) as f64;
        ranks[start..end].fill(avg);
        start = end;
    }
    ranks
}
