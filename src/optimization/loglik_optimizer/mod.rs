//! loglik_optimizer — argmin-powered log-likelihood maximizer.
//!
//! Purpose
//! -------
//! Callers implement [`LogLikelihood`] and call [`maximize`]; the layer
//! turns that into an argmin run and returns an [`OptimOutcome`].
//!
//! Key behaviors
//! -------------
//! - Cost `c(θ) = -ℓ(θ)` via [`adapter::ArgMinAdapter`] (gradient-based) and
//!   [`adapter::SimplexAdapter`] (derivative-free; support violations score
//!   `+∞`).
//! - [`maximize`] validates `θ₀`, builds the solver selected by
//!   [`OptimMethod`] in [`builders`], and runs it via [`run`].
//! - Nelder–Mead is the default: block-maxima likelihoods have a
//!   parameter-dependent support and gradient steps routinely leave it.
//! - Finite-difference gradients and Hessians live in [`finite_diff`].
//!
//! Conventions
//! -----------
//! - `θ` is unconstrained optimizer space; models own the mapping to their
//!   natural parameters.
//! - Gradients from [`LogLikelihood::grad`] are gradients of `ℓ`, never of
//!   the cost.
//! - Errors bubble up as [`OptResult<T>`](crate::optimization::errors::OptResult).
//!
//! Testing notes
//! -------------
//! - Unit tests in each submodule; end-to-end GEV fits are covered in
//!   `tests/integration_gev_pipeline.rs`.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::maximize;
pub use self::traits::{
    LineSearcher, LogLikelihood, MLEOptions, OptimMethod, OptimOutcome, Tolerances,
};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, DEFAULT_SD_TOL, FnEvalMap, Grad, Theta};

// ---- Optional convenience prelude for downstream crates -------------------
//
//     use rust_extremes::optimization::loglik_optimizer::prelude::*;

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{
        LineSearcher, LogLikelihood, MLEOptions, OptimMethod, OptimOutcome, Tolerances,
    };
    pub use super::types::{Cost, Grad, Theta};
}
