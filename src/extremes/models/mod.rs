//! models — GEV fitters, return-level projection, bootstrap, and selection.
//!
//! Purpose
//! -------
//! Collect the user-facing estimation layer of the extreme-value stack. This
//! layer sits on top of `extremes::core`, wiring the GEV likelihood to the
//! generic log-likelihood optimizer and turning fits into return levels,
//! confidence bands, and model rankings.
//!
//! Key behaviors
//! -------------
//! - [`GevModel`] (stationary) and [`NonStationaryGevModel`] (parameters
//!   affine in covariates) implement [`LogLikelihood`] with analytic
//!   gradients and produce immutable fits.
//! - Every fit implements [`FittedGev`], the seam used by
//!   [`return_levels`], [`selection`], and the Python bindings.
//! - [`bootstrap_return_levels`] refits resampled data in parallel and
//!   reports percentile bands.
//! - [`compare_models`] ranks fits on the same sample by AIC/BIC with
//!   Akaike weights; [`likelihood_ratio_test`] compares nested fits.
//!
//! Invariants & assumptions
//! ------------------------
//! - A fit whose optimizer did not converge is never returned; it surfaces
//!   as `GevError::NotConverged`.
//! - Fits are immutable after construction and carry the
//!   [`SampleFingerprint`] of the data they were fitted to.
//!
//! Conventions
//! -----------
//! - `ξ > 0` is the heavy upper tail throughout.
//! - Parameter counts: `3` for a stationary fit, `3 + m` for a fit with `m`
//!   covariate-linked parameters (one slope each).
//!
//! Testing notes
//! -------------
//! - Unit tests live beside each fitter; end-to-end pipelines are covered by
//!   `tests/integration_gev_pipeline.rs`.

pub mod bootstrap;
pub mod nonstationary;
pub mod return_levels;
pub mod selection;
pub mod stationary;

use crate::{
    extremes::{
        core::{covariates::CovariatePoint, data::SampleFingerprint, params::GevParameters},
        errors::{GevError, GevResult},
    },
    optimization::loglik_optimizer::OptimOutcome,
};

/// Common read-only surface of a fitted GEV model.
pub trait FittedGev {
    /// GEV parameters in effect at `point` (ignored by stationary fits).
    fn params_at(&self, point: &CovariatePoint) -> GevResult<GevParameters>;

    /// Maximized log-likelihood `ℓ(θ̂)`.
    fn log_likelihood(&self) -> f64;

    /// Number of free parameters `k`.
    fn n_params(&self) -> usize;

    /// Identity of the fitted sample.
    fn fingerprint(&self) -> SampleFingerprint;
}

/// Turn a non-converged optimizer outcome into an error.
pub(crate) fn ensure_converged(outcome: &OptimOutcome) -> GevResult<()> {
    if outcome.converged && outcome.value.is_finite() {
        return Ok(());
    }
    log::debug!(
        "GEV fit stopped without convergence after {} iterations: {}",
        outcome.iterations,
        outcome.status
    );
    Err(GevError::NotConverged { status: outcome.status.clone(), iterations: outcome.iterations })
}

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::bootstrap::{BootstrapResult, ParameterInterval, bootstrap_return_levels};
pub use self::nonstationary::{
    AffineParameter, NonStationaryFit, NonStationaryGevModel, NonStationaryParameters,
    fit_nonstationary,
};
pub use self::return_levels::{
    ReturnLevelCurve, project, quantiles, return_level_surface, return_levels,
};
pub use self::selection::{
    LikelihoodRatioTest, ModelComparison, ModelScore, compare_models, likelihood_ratio_test,
};
pub use self::stationary::{GevModel, ParameterErrors, StationaryFit, fit_gev, fit_windows};

// ---- Optional convenience prelude for downstream crates -------------------
//
//     use rust_extremes::extremes::models::prelude::*;

pub mod prelude {
    pub use super::FittedGev;
    pub use super::bootstrap::bootstrap_return_levels;
    pub use super::nonstationary::{NonStationaryFit, fit_nonstationary};
    pub use super::return_levels::{project, return_levels};
    pub use super::selection::{compare_models, likelihood_ratio_test};
    pub use super::stationary::{StationaryFit, fit_gev, fit_windows};
}
