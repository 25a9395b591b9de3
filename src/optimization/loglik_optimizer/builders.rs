//! loglik_optimizer::builders — solver construction helpers.
//!
//! Purpose
//! -------
//! Hide argmin's generic wiring behind small builders that apply the
//! crate-level [`MLEOptions`], so the dispatcher in `api` can ask for a
//! configured solver without touching argmin types.
//!
//! Key behaviors
//! -------------
//! - L-BFGS with Hager–Zhang or More–Thuente line search, tolerances wired
//!   through [`configure_lbfgs`].
//! - Nelder–Mead over an axis-aligned initial simplex built from `θ₀` and
//!   per-coordinate offsets ([`build_optimizer_nelder_mead`]).
//!
//! Conventions
//! -----------
//! - Builders never set `θ₀` on the executor state or `max_iters`; the
//!   runners in `run` do that.
//! - argmin configuration errors are surfaced as `OptError` through the
//!   crate's `From<argmin::core::Error>` conversion.
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::MLEOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, DEFAULT_SD_TOL, Grad, HagerZhangLS, LbfgsHagerZhang,
            LbfgsMoreThuente, MoreThuenteLS, Simplex, Theta,
        },
        validation::validate_simplex_steps,
    },
};

/// Construct L-BFGS with Hager–Zhang line search.
///
/// Uses `opts.lbfgs_mem` (or [`DEFAULT_LBFGS_MEM`]) as the history size and
/// applies the optional tolerances.
///
/// # Errors
/// Propagates argmin's rejection of a tolerance.
pub fn build_optimizer_hager_zhang(opts: &MLEOptions) -> OptResult<LbfgsHagerZhang> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsHagerZhang::new(HagerZhangLS::new(), mem);
    configure_lbfgs(lbfgs, opts)
}

/// Construct L-BFGS with More–Thuente line search.
///
/// # Errors
/// Propagates argmin's rejection of a tolerance.
pub fn build_optimizer_more_thuente(opts: &MLEOptions) -> OptResult<LbfgsMoreThuente> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsMoreThuente::new(MoreThuenteLS::new(), mem);
    configure_lbfgs(lbfgs, opts)
}

/// Apply `tol_grad` / `tol_cost` to an L-BFGS solver, leaving argmin's
/// defaults in place for the ones that are `None`.
///
/// # Errors
/// Propagates argmin's rejection of a tolerance.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &MLEOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

/// build_optimizer_nelder_mead — Nelder–Mead over an axis-aligned simplex.
///
/// Purpose
/// -------
/// Build the `n + 1` vertices `θ₀, θ₀ + s₀e₀, …, θ₀ + sₙ₋₁eₙ₋₁` and hand
/// them to argmin's [`NelderMead`](argmin::solver::neldermead::NelderMead).
///
/// Parameters
/// ----------
/// - `opts`: `&MLEOptions`
///   `opts.tols.tol_cost` is the stopping threshold on the standard
///   deviation of vertex costs; [`DEFAULT_SD_TOL`] when `None`.
/// - `theta0`: `&Theta`
///   Starting vertex.
/// - `steps`: `&Theta`
///   Per-coordinate offsets, usually from
///   [`LogLikelihood::simplex_steps`](super::LogLikelihood::simplex_steps).
///
/// Errors
/// ------
/// - `OptError::ThetaLengthMismatch` / `OptError::InvalidSimplexStep`
///   when the offsets would give a degenerate simplex.
/// - argmin's rejection of the tolerance.
pub fn build_optimizer_nelder_mead(
    opts: &MLEOptions, theta0: &Theta, steps: &Theta,
) -> OptResult<Simplex> {
    validate_simplex_steps(steps, theta0.len())?;
    let mut vertices = Vec::with_capacity(theta0.len() + 1);
    vertices.push(theta0.clone());
    for (i, &s) in steps.iter().enumerate() {
        let mut v = theta0.clone();
        v[i] += s;
        vertices.push(v);
    }
    let sd_tol = opts.tols.tol_cost.unwrap_or(DEFAULT_SD_TOL);
    Ok(Simplex::new(vertices).with_sd_tolerance(sd_tol)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;
    use crate::optimization::loglik_optimizer::traits::{
        LineSearcher, MLEOptions, OptimMethod, Tolerances,
    };
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction of L-BFGS solvers with both line searches, with and
    //   without an explicit history size.
    // - Tolerance wiring in `configure_lbfgs`.
    // - Simplex construction and rejection of degenerate offsets.
    //
    // They intentionally DO NOT cover end-to-end runs (see `api`).
    // -------------------------------------------------------------------------

    fn lbfgs_opts(ls: LineSearcher, mem: Option<usize>) -> MLEOptions {
        let tols =
            Tolerances::new(Some(1e-6), Some(1e-8), Some(50)).expect("Tolerances should be valid");
        MLEOptions::new(tols, OptimMethod::Lbfgs, ls, mem).expect("MLEOptions should be valid")
    }

    #[test]
    // Purpose
    // -------
    // Both L-BFGS builders succeed with default and explicit memory.
    //
    // Given
    // -----
    // - Valid tolerances, `lbfgs_mem` of `None` and `Some(11)`.
    //
    // Expect
    // ------
    // - All four builder calls return `Ok(_)`.
    fn lbfgs_builders_accept_default_and_explicit_memory() {
        assert!(build_optimizer_hager_zhang(&lbfgs_opts(LineSearcher::HagerZhang, None)).is_ok());
        assert!(
            build_optimizer_hager_zhang(&lbfgs_opts(LineSearcher::HagerZhang, Some(11))).is_ok()
        );
        assert!(
            build_optimizer_more_thuente(&lbfgs_opts(LineSearcher::MoreThuente, None)).is_ok()
        );
        assert!(
            build_optimizer_more_thuente(&lbfgs_opts(LineSearcher::MoreThuente, Some(9))).is_ok()
        );
    }

    #[test]
    // Purpose
    // -------
    // `configure_lbfgs` leaves the solver usable when no tolerance is set.
    //
    // Given
    // -----
    // - Tolerances with only `max_iter`.
    //
    // Expect
    // ------
    // - `Ok(_)`.
    fn configure_lbfgs_respects_absent_tolerances() {
        let raw = LBFGS::new(MoreThuenteLS::new(), DEFAULT_LBFGS_MEM);
        let tols = Tolerances::new(None, None, Some(50)).expect("Tolerances should be valid");
        let opts = MLEOptions::new(tols, OptimMethod::Lbfgs, LineSearcher::MoreThuente, None)
            .expect("MLEOptions should be valid");

        assert!(configure_lbfgs(raw, &opts).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // The simplex builder accepts valid offsets and rejects degenerate ones.
    //
    // Given
    // -----
    // - θ₀ = (1, 0, 0.1) with offsets (0.05, 2.5e-4, 0.005), then with a
    //   zero offset.
    //
    // Expect
    // ------
    // - `Ok(_)` for the first call, `InvalidSimplexStep` for the second.
    fn nelder_mead_builder_rejects_zero_offsets() {
        let opts = MLEOptions::default();
        let theta0 = array![1.0, 0.0, 0.1];

        assert!(build_optimizer_nelder_mead(&opts, &theta0, &array![0.05, 2.5e-4, 0.005]).is_ok());
        assert!(matches!(
            build_optimizer_nelder_mead(&opts, &theta0, &array![0.05, 0.0, 0.005]),
            Err(OptError::InvalidSimplexStep { index: 1, .. })
        ));
    }
}
