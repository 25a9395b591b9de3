//! inference — uncertainty summaries for fitted extreme-value models.
//!
//! Purpose
//! -------
//! Post-estimation tools shared by the GEV models: observed-information
//! covariance and standard errors ([`hessian`]) and percentile intervals
//! over bootstrap replicates ([`percentile`]).
//!
//! Conventions
//! -----------
//! - Information-matrix routines return `OptResult` because their failures
//!   come from the finite-difference layer of the optimizer.
//! - Percentile routines return [`InferenceResult`].
//! - No I/O, no logging.

pub mod errors;
pub mod hessian;
pub mod percentile;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{InferenceError, InferenceResult};
pub use self::hessian::{calc_covariance, calc_standard_errors};
pub use self::percentile::{percentile_interval, quantile_linear_sorted};

// ---- Optional convenience prelude for downstream crates ------------------

pub mod prelude {
    pub use super::errors::{InferenceError, InferenceResult};
    pub use super::hessian::{calc_covariance, calc_standard_errors};
    pub use super::percentile::percentile_interval;
}
