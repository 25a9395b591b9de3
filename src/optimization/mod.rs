//! optimization — MLE stack, numerical helpers, and unified error surface.
//!
//! Purpose
//! -------
//! A cohesive fitting layer: an argmin-backed log-likelihood maximizer,
//! numerically stable transforms shared by the GEV models, and a single
//! error/result surface for everything that can go wrong while optimizing.
//!
//! Key behaviors
//! -------------
//! - `loglik_optimizer`: maximize `ℓ(θ)` with Nelder–Mead (default) or
//!   L-BFGS, with tolerances, restarts and finite-difference fallbacks.
//! - `numerical_stability`: softplus for positive scales and the
//!   `log1p`/`expm1` ratios that keep GEV formulas accurate as `ξ → 0`.
//! - `errors`: [`OptError`](errors::OptError) and
//!   [`OptResult`](errors::OptResult), including conversion from argmin
//!   errors and from GEV parameter errors.
//!
//! Conventions
//! -----------
//! - Solvers minimize `c(θ) = -ℓ(θ)`; everything user-facing speaks in `ℓ`.
//! - Support violations are errors for which
//!   [`OptError::is_infeasible`](errors::OptError::is_infeasible) holds.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
//     use rust_extremes::optimization::prelude::*;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
