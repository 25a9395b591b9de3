//! loglik_optimizer::types — numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Keep the vector, matrix and solver aliases used by the maximizer in one
//! place so the GEV models, the adapters and the runners agree on a single
//! set of `ndarray` shapes and argmin generics.
//!
//! Key behaviors
//! -------------
//! - [`Theta`], [`Grad`], [`Hessian`] and [`Cost`] name the optimizer-space
//!   parameter vector, its gradient, its curvature and the scalar objective.
//! - [`FnEvalMap`] carries argmin's function-evaluation counters.
//! - Pre-wired solver aliases: L-BFGS with either line search, and the
//!   Nelder–Mead [`Simplex`] used by default for extreme-value likelihoods
//!   (whose support constraints make gradient steps fragile).
//!
//! Conventions
//! -----------
//! - `Theta` is laid out by the model (e.g. `(μ, softplus⁻¹(σ), ξ)` for a
//!   stationary GEV); this module attaches no meaning to the coordinates.
//! - `Cost` is the negated log-likelihood; sign flips live in the adapters.
//! - [`DEFAULT_LBFGS_MEM`] and [`DEFAULT_SD_TOL`] are fallbacks used when
//!   [`MLEOptions`](super::MLEOptions) leaves a knob unset.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    neldermead::NelderMead,
    quasinewton::LBFGS,
};
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Parameter vector `θ` in optimizer space.
pub type Theta = Array1<f64>;

/// Gradient vector, same length as [`Theta`].
pub type Grad = Array1<f64>;

/// Dense `n × n` Hessian for `n = Theta.len()`.
pub type Hessian = Array2<f64>;

/// Scalar objective value `c(θ) = -ℓ(θ)`.
pub type Cost = f64;

/// Function-evaluation counters keyed by argmin's counter names
/// (e.g. `"cost_count"`).
pub type FnEvalMap = HashMap<String, u64>;

/// Default history size (`m`) for L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 7;

/// Default simplex stopping tolerance on the spread of vertex costs.
pub const DEFAULT_SD_TOL: f64 = 1e-10;

/// Hager–Zhang line search over the crate's numeric types.
pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

/// More–Thuente line search over the crate's numeric types.
pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

/// L-BFGS wired to Hager–Zhang.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

/// L-BFGS wired to More–Thuente.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;

/// Nelder–Mead simplex over the crate's parameter vector.
pub type Simplex = NelderMead<Theta, Cost>;
