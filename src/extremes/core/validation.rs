//! GEV validation helpers — reusable checks for samples, parameters, and
//! return-level arguments.
//!
//! Purpose
//! -------
//! Centralize the small checks that guard the public surface of the
//! `extremes` stack so constructors and models fail fast with structured
//! [`GevError`]s instead of producing NaN-laden output.
//!
//! Key behaviors
//! -------------
//! - Validate block-maxima and covariate arrays (non-empty, finite, length).
//! - Validate GEV parameters (`σ > 0`, finite `μ` and `ξ`).
//! - Validate return-level arguments (`0 < p < 1`, `T > 1`) and
//!   unconstrained optimizer vectors θ.
//! - Detect samples with no usable spread.
//!
//! Conventions
//! -----------
//! - Indices in errors point at the first offending element.
//! - No I/O, no logging.
use crate::{
    extremes::errors::{GevError, GevResult},
    optimization::numerical_stability::transformations::GENERAL_TOL,
};
use ndarray::ArrayView1;

/// Require a non-empty sample of finite values.
///
/// # Errors
/// - [`GevError::EmptySample`] for `values.len() == 0`.
/// - [`GevError::NonFiniteData`] for the first NaN/±∞.
pub fn validate_sample(values: ArrayView1<f64>) -> GevResult<()> {
    if values.is_empty() {
        return Err(GevError::EmptySample);
    }
    if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(GevError::NonFiniteData { index, value });
    }
    Ok(())
}

/// Require at least `needed` observations.
///
/// # Errors
/// [`GevError::TooFewObservations`].
pub fn validate_min_len(actual: usize, needed: usize) -> GevResult<()> {
    if actual < needed {
        return Err(GevError::TooFewObservations { needed, actual });
    }
    Ok(())
}

/// Require a covariate of finite values with the expected length.
///
/// # Errors
/// - [`GevError::CovariateLengthMismatch`] when the lengths differ.
/// - [`GevError::NonFiniteCovariate`] for the first NaN/±∞.
pub fn validate_covariate(values: ArrayView1<f64>, expected: usize) -> GevResult<()> {
    if values.len() != expected {
        return Err(GevError::CovariateLengthMismatch { expected, actual: values.len() });
    }
    if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(GevError::NonFiniteCovariate { index, value });
    }
    Ok(())
}

/// Scale must be finite and strictly positive.
pub fn validate_scale(scale: f64) -> GevResult<()> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(GevError::InvalidScale { value: scale });
    }
    Ok(())
}

/// Location must be finite.
pub fn validate_location(location: f64) -> GevResult<()> {
    if !location.is_finite() {
        return Err(GevError::InvalidLocation { value: location });
    }
    Ok(())
}

/// Shape must be finite.
pub fn validate_shape(shape: f64) -> GevResult<()> {
    if !shape.is_finite() {
        return Err(GevError::InvalidShape { value: shape });
    }
    Ok(())
}

/// Non-exceedance probability must lie strictly inside (0, 1).
pub fn validate_probability(p: f64) -> GevResult<()> {
    if !(p.is_finite() && p > 0.0 && p < 1.0) {
        return Err(GevError::InvalidProbability { p });
    }
    Ok(())
}

/// Return period must be finite and strictly greater than one block.
pub fn validate_return_period(period: f64) -> GevResult<()> {
    if !(period.is_finite() && period > 1.0) {
        return Err(GevError::InvalidReturnPeriod { period });
    }
    Ok(())
}

/// Significance level must lie strictly inside (0, 1).
pub fn validate_alpha(alpha: f64) -> GevResult<()> {
    if !(alpha.is_finite() && alpha > 0.0 && alpha < 1.0) {
        return Err(GevError::InvalidAlpha { alpha });
    }
    Ok(())
}

/// Validate an unconstrained optimizer vector against its expected layout.
///
/// # Errors
/// - [`GevError::ThetaLengthMismatch`] when `theta.len() != expected`.
/// - [`GevError::NonFiniteTheta`] for the first NaN/±∞.
pub fn validate_theta(theta: ArrayView1<f64>, expected: usize) -> GevResult<()> {
    if theta.len() != expected {
        return Err(GevError::ThetaLengthMismatch { expected, actual: theta.len() });
    }
    if let Some((index, &value)) = theta.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(GevError::NonFiniteTheta { index, value });
    }
    Ok(())
}

/// Reject samples whose range is negligible against their magnitude.
///
/// The threshold is `GENERAL_TOL · max(1, max|x|)`; such a sample leaves the
/// GEV scale unidentifiable.
///
/// # Errors
/// [`GevError::ConstantSample`] carrying the first value.
pub fn validate_spread(values: ArrayView1<f64>) -> GevResult<()> {
    let Some(&first) = values.first() else {
        return Err(GevError::EmptySample);
    };
    let (lo, hi, mag) = values.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, 0.0_f64),
        |(lo, hi, mag), &x| (lo.min(x), hi.max(x), mag.max(x.abs())),
    );
    if hi - lo <= GENERAL_TOL * mag.max(1.0) {
        return Err(GevError::ConstantSample { value: first });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Happy paths and the first-offender reporting of each helper.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Samples must be non-empty and finite.
    //
    // Given
    // -----
    // - An empty array, an array with NaN at index 1, and a clean array.
    //
    // Expect
    // ------
    // - `EmptySample`, `NonFiniteData { index: 1 }`, and `Ok`.
    fn validate_sample_reports_first_offender() {
        let empty: [f64; 0] = [];
        assert_eq!(validate_sample(ArrayView1::from(&empty)), Err(GevError::EmptySample));
        let bad = array![1.0, f64::NAN, f64::INFINITY];
        assert!(matches!(
            validate_sample(bad.view()),
            Err(GevError::NonFiniteData { index: 1, .. })
        ));
        assert!(validate_sample(array![1.0, 2.0].view()).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Return-level arguments reject the boundaries.
    //
    // Given
    // -----
    // - p ∈ {0, 1, 0.5} and T ∈ {1, ∞, 2}.
    //
    // Expect
    // ------
    // - Only p = 0.5 and T = 2 pass.
    fn return_level_arguments_reject_boundaries() {
        assert!(validate_probability(0.0).is_err());
        assert!(validate_probability(1.0).is_err());
        assert!(validate_probability(0.5).is_ok());
        assert_eq!(
            validate_return_period(1.0),
            Err(GevError::InvalidReturnPeriod { period: 1.0 })
        );
        assert!(validate_return_period(f64::INFINITY).is_err());
        assert!(validate_return_period(2.0).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Covariates must match the sample length and be finite.
    //
    // Given
    // -----
    // - A length-2 covariate against n = 3, and a length-3 covariate with ∞.
    //
    // Expect
    // ------
    // - `CovariateLengthMismatch` then `NonFiniteCovariate { index: 2 }`.
    fn validate_covariate_checks_length_then_values() {
        assert_eq!(
            validate_covariate(array![0.0, 1.0].view(), 3),
            Err(GevError::CovariateLengthMismatch { expected: 3, actual: 2 })
        );
        assert!(matches!(
            validate_covariate(array![0.0, 1.0, f64::INFINITY].view(), 3),
            Err(GevError::NonFiniteCovariate { index: 2, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Constant samples are detected relative to their magnitude.
    //
    // Given
    // -----
    // - Ten copies of 5.0, and a sample with a tiny but real spread.
    //
    // Expect
    // ------
    // - `ConstantSample` for the first, `Ok` for the second.
    fn validate_spread_detects_constant_samples() {
        let flat = ndarray::Array1::from_elem(10, 5.0);
        assert_eq!(validate_spread(flat.view()), Err(GevError::ConstantSample { value: 5.0 }));
        assert!(validate_spread(array![5.0, 5.001, 4.999].view()).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // θ checks report length before finiteness.
    //
    // Given
    // -----
    // - A length-2 vector against 3, and a length-3 vector with NaN.
    //
    // Expect
    // ------
    // - `ThetaLengthMismatch` then `NonFiniteTheta { index: 0 }`.
    fn validate_theta_checks_layout() {
        assert_eq!(
            validate_theta(array![0.0, 1.0].view(), 3),
            Err(GevError::ThetaLengthMismatch { expected: 3, actual: 2 })
        );
        assert!(matches!(
            validate_theta(array![f64::NAN, 1.0, 0.0].view(), 3),
            Err(GevError::NonFiniteTheta { index: 0, .. })
        ));
    }
}
