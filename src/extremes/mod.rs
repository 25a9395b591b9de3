//! extremes — generalized extreme value (GEV) statistics for block maxima.
//!
//! Purpose
//! -------
//! Estimate how large rare block maxima (annual maximum rainfall, sea level,
//! temperature) get: fit GEV distributions by maximum likelihood, turn them
//! into return levels and periods, attach bootstrap confidence bands, let
//! parameters drift with a covariate, and rank competing models.
//!
//! Key behaviors
//! -------------
//! - [`core`]: validated samples and covariates, the [`GevParameters`] value
//!   type with its distribution functions, empirical return levels,
//!   initial guesses, and options.
//! - [`models`]: stationary and non-stationary fitters, return-level
//!   projection, bootstrap bands, and AIC/BIC comparison.
//! - [`errors`]: [`GevError`] and its four-way [`GevErrorKind`] grouping.
//!
//! Conventions
//! -----------
//! - Shape sign: `ξ > 0` is the heavy (Fréchet-type) upper tail, `ξ < 0` is
//!   bounded above by `μ − σ/ξ`, `ξ = 0` is Gumbel. SciPy's `genextreme`
//!   uses `c = −ξ`; see [`GevParameters::from_scipy`].
//! - Return period `T` (in blocks) maps to non-exceedance probability
//!   `1 − 1/T`.
//!
//! Downstream usage
//! ----------------
//! ```rust,no_run
//! use rust_extremes::extremes::prelude::*;
//!
//! let data = BlockMaxima::from_slice(&[31.2, 28.4, 40.1, 35.7, 29.9, 44.0, 33.3])?;
//! let fit = fit_gev(&data, &FitOptions::default())?;
//! let curve = return_levels(&fit.params, &[10.0, 50.0, 100.0])?;
//! println!("100-year level: {:.1}", curve.levels[2]);
//! # Ok::<(), rust_extremes::extremes::errors::GevError>(())
//! ```

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    BlockMaxima, BootstrapOptions, Covariate, CovariatePoint, EmpiricalReturnLevels, FitOptions,
    GevCovariates, GevParameters, Init, SampleFingerprint, empirical_return_levels,
};
pub use self::errors::{GevError, GevErrorKind, GevResult};
pub use self::models::{
    BootstrapResult, FittedGev, ModelComparison, NonStationaryFit, StationaryFit,
    bootstrap_return_levels, compare_models, fit_gev, fit_nonstationary, fit_windows,
    likelihood_ratio_test, return_levels,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
//     use rust_extremes::extremes::prelude::*;

pub mod prelude {
    pub use super::core::prelude::*;
    pub use super::errors::{GevError, GevErrorKind, GevResult};
    pub use super::models::prelude::*;
}
