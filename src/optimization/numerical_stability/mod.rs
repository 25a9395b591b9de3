//! numerical_stability — guarded scalar transforms and shared tolerances.
//!
//! Purpose
//! -------
//! Keep the few transforms the GEV likelihood needs in one place so that
//! the models and the inference layer share the same guards.
//!
//! Key behaviors
//! -------------
//! - Positive scale parameters are optimized as `t = softplus⁻¹(σ)`
//!   ([`safe_softplus`], [`safe_softplus_inv`], [`safe_logistic`]).
//! - The shape-dependent pieces of the GEV CDF and quantile are written as
//!   [`log1p_ratio`] and [`expm1_ratio`], which switch to the Gumbel limit
//!   below [`GUMBEL_EPS`].
//!
//! Conventions
//! -----------
//! - Pure functions on `f64`; no I/O, no logging.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    EIGEN_EPS, GENERAL_TOL, GUMBEL_EPS, expm1_ratio, log1p_ratio, safe_logistic, safe_softplus,
    safe_softplus_inv,
};

pub mod prelude {
    pub use super::transformations::{
        EIGEN_EPS, GENERAL_TOL, GUMBEL_EPS, safe_softplus, safe_softplus_inv,
    };
}
