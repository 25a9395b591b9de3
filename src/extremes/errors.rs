//! Errors for GEV extreme-value models (data validation, argument checks,
//! fitting failures, and model-comparison preconditions).
//!
//! This module defines the domain error type, [`GevError`], and its coarse
//! classification, [`GevErrorKind`]. Every public operation of the
//! `extremes` stack returns [`GevResult`].
//!
//! ## Conventions
//! - **Indices are 0-based** (match Rust/NumPy).
//! - Block maxima and covariates must be **finite**.
//! - Shape follows the convention where `ξ > 0` is the heavy (Fréchet-type)
//!   upper tail.
//! - Optimizer/backend errors are normalized to
//!   [`GevError::OptimizationFailed`] with a human-readable status; option
//!   validation errors become [`GevError::InvalidOptions`].
//! - With `python-bindings`, every variant surfaces as a Python
//!   `ValueError` carrying the `Display` message.
use crate::{inference::errors::InferenceError, optimization::errors::OptError};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*};

/// Crate-wide result alias for extreme-value operations.
pub type GevResult<T> = Result<T, GevError>;

/// Coarse error classes callers can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GevErrorKind {
    /// Sample too small or empty for the requested operation.
    InsufficientData,
    /// The optimizer failed or produced an invalid parameterization.
    FitConvergence,
    /// An argument is outside its domain.
    InvalidArgument,
    /// Models compared were fitted to different samples.
    ComparisonMismatch,
}

/// Unified error type for GEV modeling.
#[derive(Debug, Clone, PartialEq)]
pub enum GevError {
    // ---- Input/data validation ----
    /// Sample is empty.
    EmptySample,

    /// Fewer observations than the operation needs.
    TooFewObservations { needed: usize, actual: usize },

    /// A data point is NaN/±inf.
    NonFiniteData { index: usize, value: f64 },

    // ---- Parameters ----
    /// Scale must be finite and > 0.
    InvalidScale { value: f64 },

    /// Location must be finite.
    InvalidLocation { value: f64 },

    /// Shape must be finite.
    InvalidShape { value: f64 },

    /// Unconstrained parameter vector has the wrong length.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// Unconstrained parameter vector contains NaN/±inf.
    NonFiniteTheta { index: usize, value: f64 },

    /// Observation lies outside the support (`1 + ξ(x − μ)/σ ≤ 0`).
    OutsideSupport { index: usize, value: f64 },

    // ---- Return levels ----
    /// Probability must lie strictly in (0, 1).
    InvalidProbability { p: f64 },

    /// Return period must be finite and > 1.
    InvalidReturnPeriod { period: f64 },

    /// Level at or above the finite upper end point has no return period.
    AboveUpperBound { x: f64, bound: f64 },

    // ---- Covariates ----
    /// Covariate length differs from the sample length.
    CovariateLengthMismatch { expected: usize, actual: usize },

    /// A covariate value is NaN/±inf.
    NonFiniteCovariate { index: usize, value: f64 },

    // ---- Meta / options validation ----
    /// Optimizer options rejected at validation.
    InvalidOptions { reason: String },

    /// Bootstrap replicate count must be > 0.
    InvalidBootstrapCount { n_boot: usize },

    /// Significance level must lie strictly in (0, 1).
    InvalidAlpha { alpha: f64 },

    /// Tolerated bootstrap failure fraction must lie in [0, 1].
    InvalidFailureFraction { value: f64 },

    /// Window length must be ≥ 3 and ≤ the sample length.
    InvalidWindow { window: usize, len: usize },

    // ---- Estimation / optimizer ----
    /// Sample has (numerically) no spread.
    ConstantSample { value: f64 },

    /// Optimizer failed; include a human-readable status/reason.
    OptimizationFailed { status: String },

    /// Optimizer stopped without meeting its convergence criterion.
    NotConverged { status: String, iterations: usize },

    /// Fitted scale is not positive at an observed covariate value.
    NonPositiveScaleOnRange { index: usize, value: f64 },

    /// Too many bootstrap refits failed.
    BootstrapFailureRate { failed: usize, total: usize, max_fraction: f64 },

    // ---- Model comparison ----
    /// Fewer than two candidate models.
    TooFewModels { count: usize },

    /// Candidate was fitted to a different sample than the first one.
    SampleMismatch { model: String },

    /// Likelihood-ratio test needs the full model to have more parameters.
    NotNested { restricted: usize, full: usize },

    // ---- Inference ----
    /// Wrapper for percentile-interval failures.
    Inference { reason: String },
}

impl GevError {
    /// Classify this error into one of the four [`GevErrorKind`]s.
    pub fn kind(&self) -> GevErrorKind {
        match self {
            GevError::EmptySample | GevError::TooFewObservations { .. } => {
                GevErrorKind::InsufficientData
            }
            GevError::ConstantSample { .. }
            | GevError::OptimizationFailed { .. }
            | GevError::NotConverged { .. }
            | GevError::NonPositiveScaleOnRange { .. }
            | GevError::BootstrapFailureRate { .. }
            | GevError::Inference { .. } => GevErrorKind::FitConvergence,
            GevError::SampleMismatch { .. } => GevErrorKind::ComparisonMismatch,
            _ => GevErrorKind::InvalidArgument,
        }
    }
}

impl std::error::Error for GevError {}

impl std::fmt::Display for GevError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            GevError::EmptySample => write!(f, "Sample is empty."),
            GevError::TooFewObservations { needed, actual } => {
                write!(f, "Need at least {needed} observations, got {actual}.")
            }
            GevError::NonFiniteData { index, value } => {
                write!(f, "Data point at index {index} is non-finite: {value}")
            }
            // ---- Parameters ----
            GevError::InvalidScale { value } => {
                write!(f, "Scale must be finite and > 0; got: {value}")
            }
            GevError::InvalidLocation { value } => {
                write!(f, "Location must be finite; got: {value}")
            }
            GevError::InvalidShape { value } => write!(f, "Shape must be finite; got: {value}"),
            GevError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, got {actual}")
            }
            GevError::NonFiniteTheta { index, value } => {
                write!(f, "Theta entry at index {index} is non-finite: {value}")
            }
            GevError::OutsideSupport { index, value } => {
                write!(
                    f,
                    "Observation at index {index} lies outside the GEV support (1 + xi*z = {value})"
                )
            }
            // ---- Return levels ----
            GevError::InvalidProbability { p } => {
                write!(f, "Probability must lie strictly in (0, 1); got: {p}")
            }
            GevError::InvalidReturnPeriod { period } => {
                write!(f, "Return period must be finite and > 1; got: {period}")
            }
            GevError::AboveUpperBound { x, bound } => {
                write!(f, "Level {x} is at or above the upper end point {bound}; period is infinite")
            }
            // ---- Covariates ----
            GevError::CovariateLengthMismatch { expected, actual } => {
                write!(f, "Covariate length mismatch: expected {expected}, got {actual}")
            }
            GevError::NonFiniteCovariate { index, value } => {
                write!(f, "Covariate at index {index} is non-finite: {value}")
            }
            // ---- Meta / options validation ----
            GevError::InvalidOptions { reason } => write!(f, "Invalid optimizer options: {reason}"),
            GevError::InvalidBootstrapCount { n_boot } => {
                write!(f, "Bootstrap count must be > 0; got: {n_boot}")
            }
            GevError::InvalidAlpha { alpha } => {
                write!(f, "alpha must lie strictly in (0, 1); got: {alpha}")
            }
            GevError::InvalidFailureFraction { value } => {
                write!(f, "Tolerated failure fraction must lie in [0, 1]; got: {value}")
            }
            GevError::InvalidWindow { window, len } => {
                write!(f, "Window {window} must be >= 3 and <= sample length {len}")
            }
            // ---- Estimation / optimizer ----
            GevError::ConstantSample { value } => {
                write!(f, "Sample is constant ({value}); the GEV scale is not identifiable")
            }
            GevError::OptimizationFailed { status } => {
                write!(f, "Optimizer failed with status: {status}")
            }
            GevError::NotConverged { status, iterations } => {
                write!(f, "Optimizer did not converge after {iterations} iterations: {status}")
            }
            GevError::NonPositiveScaleOnRange { index, value } => {
                write!(f, "Fitted scale at observation {index} is {value}, must be > 0")
            }
            GevError::BootstrapFailureRate { failed, total, max_fraction } => {
                write!(
                    f,
                    "{failed} of {total} bootstrap refits failed, above the tolerated fraction {max_fraction}"
                )
            }
            // ---- Model comparison ----
            GevError::TooFewModels { count } => {
                write!(f, "Model comparison needs at least two models; got {count}")
            }
            GevError::SampleMismatch { model } => {
                write!(f, "Model '{model}' was fitted to a different sample")
            }
            GevError::NotNested { restricted, full } => {
                write!(
                    f,
                    "Full model must have more parameters than the restricted one ({full} <= {restricted})"
                )
            }
            // ---- Inference ----
            GevError::Inference { reason } => write!(f, "Inference failed: {reason}"),
        }
    }
}

/// Convert a [`GevError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl std::convert::From<GevError> for PyErr {
    fn from(err: GevError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

impl From<OptError> for GevError {
    fn from(err: OptError) -> GevError {
        match err {
            ref opt if opt.is_option_error() => GevError::InvalidOptions { reason: err.to_string() },
            OptError::ThetaLengthMismatch { expected, actual } => {
                GevError::ThetaLengthMismatch { expected, actual }
            }
            other => GevError::OptimizationFailed { status: other.to_string() },
        }
    }
}

impl From<InferenceError> for GevError {
    fn from(err: InferenceError) -> GevError {
        match err {
            InferenceError::InvalidAlpha { alpha } => GevError::InvalidAlpha { alpha },
            other => GevError::Inference { reason: other.to_string() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Kind classification and the conversions from the optimizer and
    // inference layers.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Each variant family lands in the documented kind.
    //
    // Given
    // -----
    // - One representative variant per kind.
    //
    // Expect
    // ------
    // - The matching `GevErrorKind`.
    fn kind_groups_variants() {
        assert_eq!(GevError::EmptySample.kind(), GevErrorKind::InsufficientData);
        assert_eq!(
            GevError::TooFewObservations { needed: 4, actual: 2 }.kind(),
            GevErrorKind::InsufficientData
        );
        assert_eq!(GevError::ConstantSample { value: 1.0 }.kind(), GevErrorKind::FitConvergence);
        assert_eq!(
            GevError::NonPositiveScaleOnRange { index: 3, value: -0.1 }.kind(),
            GevErrorKind::FitConvergence
        );
        assert_eq!(GevError::InvalidReturnPeriod { period: 1.0 }.kind(), GevErrorKind::InvalidArgument);
        assert_eq!(
            GevError::CovariateLengthMismatch { expected: 3, actual: 2 }.kind(),
            GevErrorKind::InvalidArgument
        );
        assert_eq!(
            GevError::SampleMismatch { model: "m".into() }.kind(),
            GevErrorKind::ComparisonMismatch
        );
    }

    #[test]
    // Purpose
    // -------
    // Optimizer errors split into option errors and fit failures.
    //
    // Given
    // -----
    // - `OptError::NoTolerancesProvided` and `OptError::NonFiniteCost`.
    //
    // Expect
    // ------
    // - `InvalidOptions` (InvalidArgument) and `OptimizationFailed`
    //   (FitConvergence) respectively.
    fn opt_errors_map_by_origin() {
        let opts: GevError = OptError::NoTolerancesProvided.into();
        assert!(matches!(opts, GevError::InvalidOptions { .. }));
        assert_eq!(opts.kind(), GevErrorKind::InvalidArgument);

        let fit: GevError = OptError::NonFiniteCost { value: f64::NAN }.into();
        assert!(matches!(fit, GevError::OptimizationFailed { .. }));
        assert_eq!(fit.kind(), GevErrorKind::FitConvergence);
    }

    #[test]
    // Purpose
    // -------
    // Domain violations raised inside a likelihood reach the optimizer as
    // infeasible points.
    //
    // Given
    // -----
    // - `OutsideSupport` and `NonPositiveScaleOnRange`.
    //
    // Expect
    // ------
    // - `OptError::is_infeasible()` holds after conversion.
    fn domain_errors_convert_to_infeasible_opt_errors() {
        let a: OptError = GevError::OutsideSupport { index: 2, value: -0.5 }.into();
        let b: OptError = GevError::NonPositiveScaleOnRange { index: 0, value: 0.0 }.into();
        assert!(a.is_infeasible());
        assert!(b.is_infeasible());
    }

    #[test]
    // Purpose
    // -------
    // Inference errors keep alpha validation as an argument error.
    //
    // Given
    // -----
    // - `InferenceError::InvalidAlpha` and `InferenceError::EmptySample`.
    //
    // Expect
    // ------
    // - `GevError::InvalidAlpha` and `GevError::Inference`.
    fn inference_errors_convert() {
        let a: GevError = InferenceError::InvalidAlpha { alpha: 2.0 }.into();
        assert_eq!(a, GevError::InvalidAlpha { alpha: 2.0 });
        let b: GevError = InferenceError::EmptySample.into();
        assert!(matches!(b, GevError::Inference { .. }));
    }
}
