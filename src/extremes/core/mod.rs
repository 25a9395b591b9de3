//! core — shared GEV data, parameters, distribution functions, and options.
//!
//! Purpose
//! -------
//! Collect the building blocks of the extreme-value stack: validated samples
//! and covariates, the `(ξ, μ, σ)` value type and its distribution functions,
//! the empirical return-level table, initial-guess policies, options, and
//! validation helpers. The fitters in `extremes::models` build on these.
//!
//! Key behaviors
//! -------------
//! - [`BlockMaxima`] and [`Covariate`] enforce finiteness and length at the
//!   boundary; [`SampleFingerprint`] identifies a sample for comparisons.
//! - [`GevParameters`] is an immutable, validated triple with CDF, quantile,
//!   return-level and return-period methods, `statrs` and `rand` trait
//!   impls, and a θ mapping for the optimizer.
//! - [`EmpiricalReturnLevels`] assigns Weibull plotting positions with
//!   averaged tie ranks.
//! - [`Init`] chooses how the optimizer is seeded.
//!
//! Invariants & assumptions
//! ------------------------
//! - Shape sign: `ξ > 0` is the heavy upper tail. SciPy's `c` is `−ξ`.
//! - `σ > 0` for every constructed [`GevParameters`].
//!
//! Conventions
//! -----------
//! - Indexing is 0-based. Errors are [`GevError`](crate::extremes::errors::GevError)
//!   values; nothing in this module panics on user input.
//! - No I/O, no logging.
//!
//! Downstream usage
//! ----------------
//! - Most callers need only the re-exports below or the [`prelude`].

pub mod covariates;
pub mod data;
pub mod distribution;
pub mod empirical;
pub mod init;
pub mod options;
pub mod params;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::covariates::{Covariate, CovariatePoint, GevCovariates};
pub use self::data::{BlockMaxima, SampleFingerprint};
pub use self::distribution::{EULER_GAMMA, GUMBEL_SKEWNESS, gev_skewness};
pub use self::empirical::{EmpiricalReturnLevels, empirical_return_levels};
pub use self::init::{Init, sample_moments, shape_from_skewness};
pub use self::options::{BootstrapOptions, FitOptions};
pub use self::params::{GevParameters, STATIONARY_THETA_LEN};
pub use self::validation::{
    validate_alpha, validate_covariate, validate_location, validate_min_len,
    validate_probability, validate_return_period, validate_sample, validate_scale,
    validate_shape, validate_spread, validate_theta,
};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::covariates::{Covariate, CovariatePoint, GevCovariates};
    pub use super::data::{BlockMaxima, SampleFingerprint};
    pub use super::empirical::{EmpiricalReturnLevels, empirical_return_levels};
    pub use super::init::Init;
    pub use super::options::{BootstrapOptions, FitOptions};
    pub use super::params::GevParameters;
}
