//! inference::percentile — empirical quantiles of bootstrap replicates.
//!
//! Percentile intervals use linear interpolation between order statistics
//! (`pos = q·(m − 1)`), the same rule as NumPy's default `percentile`.
use crate::inference::errors::{InferenceError, InferenceResult};

/// Linear-interpolated quantile of an already sorted, non-empty slice.
///
/// `q` is clamped to `[0, 1]`. Returns `NaN` for an empty slice.
pub fn quantile_linear_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }
    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let i = pos.floor() as usize;
    let j = pos.ceil() as usize;
    if i == j {
        return sorted[i];
    }
    let t = pos - i as f64;
    (1.0 - t) * sorted[i] + t * sorted[j]
}

/// Two-sided `[α/2, 1 − α/2]` percentile interval of `values`.
///
/// # Errors
/// - [`InferenceError::InvalidAlpha`] unless `0 < α < 1`.
/// - [`InferenceError::EmptySample`] for an empty slice.
/// - [`InferenceError::NonFiniteSample`] for the first NaN or ±∞.
pub fn percentile_interval(values: &[f64], alpha: f64) -> InferenceResult<(f64, f64)> {
    validate_alpha(alpha)?;
    if values.is_empty() {
        return Err(InferenceError::EmptySample);
    }
    if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(InferenceError::NonFiniteSample { index, value });
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok((
        quantile_linear_sorted(&sorted, 0.5 * alpha),
        quantile_linear_sorted(&sorted, 1.0 - 0.5 * alpha),
    ))
}

/// `alpha` must be finite and strictly inside `(0, 1)`.
///
/// # Errors
/// [`InferenceError::InvalidAlpha`].
pub fn validate_alpha(alpha: f64) -> InferenceResult<()> {
    if !(alpha.is_finite() && alpha > 0.0 && alpha < 1.0) {
        return Err(InferenceError::InvalidAlpha { alpha });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Interpolation rule at the edges and in between, and argument checks of
    // `percentile_interval`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Quantiles hit order statistics exactly and interpolate between them.
    //
    // Given
    // -----
    // - Sorted values 1..=5.
    //
    // Expect
    // ------
    // - q = 0, 0.25, 0.5, 1 give 1, 2, 3, 5; q = 0.1 gives 1.4.
    fn quantile_linear_sorted_matches_order_statistics() {
        let s = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(quantile_linear_sorted(&s, 0.0), 1.0);
        assert_relative_eq!(quantile_linear_sorted(&s, 0.25), 2.0);
        assert_relative_eq!(quantile_linear_sorted(&s, 0.5), 3.0);
        assert_relative_eq!(quantile_linear_sorted(&s, 1.0), 5.0);
        assert_relative_eq!(quantile_linear_sorted(&s, 0.1), 1.4, epsilon = 1e-12);
        assert!(quantile_linear_sorted(&[], 0.5).is_nan());
    }

    #[test]
    // Purpose
    // -------
    // Intervals are computed on unsorted input and bad arguments are rejected.
    //
    // Given
    // -----
    // - Values 0..=100 in reverse order, α = 0.1; then α = 1, an empty slice
    //   and a NaN.
    //
    // Expect
    // ------
    // - (5, 95); then `InvalidAlpha`, `EmptySample`, `NonFiniteSample`.
    fn percentile_interval_handles_order_and_errors() {
        let xs: Vec<f64> = (0..=100).rev().map(f64::from).collect();
        let (lo, hi) = percentile_interval(&xs, 0.1).unwrap();
        assert_relative_eq!(lo, 5.0, epsilon = 1e-12);
        assert_relative_eq!(hi, 95.0, epsilon = 1e-12);

        assert_eq!(percentile_interval(&xs, 1.0), Err(InferenceError::InvalidAlpha { alpha: 1.0 }));
        assert_eq!(percentile_interval(&[], 0.05), Err(InferenceError::EmptySample));
        assert!(matches!(
            percentile_interval(&[1.0, f64::NAN], 0.05),
            Err(InferenceError::NonFiniteSample { index: 1, .. })
        ));
    }
}
