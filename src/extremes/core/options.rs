//! GEV options — configuration for fitting and bootstrap workflows.
//!
//! Purpose
//! -------
//! Collect the configuration knobs of the extreme-value stack in one place:
//! how a fit is started and optimized ([`FitOptions`]) and how bootstrap
//! confidence bands are produced ([`BootstrapOptions`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - [`FitOptions`] assumes its components were validated by their own
//!   builders (`Init`, `MLEOptions::new`, `Tolerances::new`).
//! - [`BootstrapOptions::new`] validates every field; the `Default`
//!   instance (`1000` replicates, `α = 0.05`, seed `42`, at most half of the
//!   refits may fail, parallel) is valid by construction.
//!
//! Conventions
//! -----------
//! - Replicate `i` draws from `StdRng::seed_from_u64(seed + i)` (wrapping),
//!   so results do not depend on `parallel`.
use crate::{
    extremes::{
        core::{init::Init, validation::validate_alpha},
        errors::{GevError, GevResult},
    },
    optimization::loglik_optimizer::MLEOptions,
};

/// Start policy plus optimizer settings for one maximum-likelihood fit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FitOptions {
    pub init: Init,
    pub mle_opts: MLEOptions,
}

impl FitOptions {
    pub fn new(init: Init, mle_opts: MLEOptions) -> FitOptions {
        FitOptions { init, mle_opts }
    }

    pub fn with_init(mut self, init: Init) -> FitOptions {
        self.init = init;
        self
    }
}

/// Settings for the case-resampling bootstrap.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapOptions {
    pub n_boot: usize,
    pub alpha: f64,
    pub seed: u64,
    pub max_failure_fraction: f64,
    pub parallel: bool,
}

impl BootstrapOptions {
    /// # Errors
    /// - `GevError::InvalidBootstrapCount` for `n_boot = 0`.
    /// - `GevError::InvalidAlpha` unless `0 < α < 1`.
    /// - `GevError::InvalidFailureFraction` unless the fraction is in `[0, 1]`.
    pub fn new(
        n_boot: usize, alpha: f64, seed: u64, max_failure_fraction: f64, parallel: bool,
    ) -> GevResult<BootstrapOptions> {
        let opts = BootstrapOptions { n_boot, alpha, seed, max_failure_fraction, parallel };
        opts.validate()?;
        Ok(opts)
    }

    /// Re-check the fields (they are public and may have been edited).
    pub fn validate(&self) -> GevResult<()> {
        if self.n_boot == 0 {
            return Err(GevError::InvalidBootstrapCount { n_boot: self.n_boot });
        }
        validate_alpha(self.alpha)?;
        let f = self.max_failure_fraction;
        if !(f.is_finite() && (0.0..=1.0).contains(&f)) {
            return Err(GevError::InvalidFailureFraction { value: f });
        }
        Ok(())
    }
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        BootstrapOptions {
            n_boot: 1000,
            alpha: 0.05,
            seed: 42,
            max_failure_fraction: 0.5,
            parallel: true,
        }
    }
}
