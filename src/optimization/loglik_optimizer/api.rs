//! High-level entry point for maximizing a [`LogLikelihood`].
//!
//! Dispatches on [`OptimMethod`]: the simplex path builds the initial
//! simplex from the model's own offsets and optionally restarts from the
//! best point; the L-BFGS path selects the configured line search.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        OptimOutcome, Theta,
        adapter::{ArgMinAdapter, SimplexAdapter},
        builders::{
            build_optimizer_hager_zhang, build_optimizer_more_thuente,
            build_optimizer_nelder_mead,
        },
        run::{run_lbfgs, run_simplex},
        traits::{LineSearcher, LogLikelihood, MLEOptions, OptimMethod},
    },
};

/// Maximize a log-likelihood `ℓ(θ)`.
///
/// # Behavior
/// - Validates the initial guess via `f.check(theta0, data)`.
/// - `OptimMethod::NelderMead`: runs the simplex from `θ₀`, then
///   `opts.restarts` more times, each from the best point so far with a
///   fresh simplex. Counters accumulate across runs and the last run
///   decides `converged`.
/// - `OptimMethod::Lbfgs`: one L-BFGS run with `opts.line_searcher`.
///
/// # Errors
/// - Propagates any error from `f.check`.
/// - Propagates builder and runner errors.
///
/// # Example
/// ```no_run
/// use ndarray::array;
/// use rust_extremes::optimization::errors::OptResult;
/// use rust_extremes::optimization::loglik_optimizer::{
///     maximize, LogLikelihood, MLEOptions, Theta,
/// };
///
/// struct Bowl;
/// impl LogLikelihood for Bowl {
///     type Data = ();
///     fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
///         Ok(-theta.dot(theta))
///     }
///     fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = maximize(&Bowl, array![0.4, -0.2], &(), &MLEOptions::default())?;
/// println!("θ̂ = {:?}", out.theta_hat);
/// # Ok::<(), rust_extremes::optimization::errors::OptError>(())
/// ```
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    match opts.method {
        OptimMethod::NelderMead => {
            let mut outcome = simplex_pass(f, &theta0, data, opts)?;
            for restart in 0..opts.restarts {
                let later = simplex_pass(f, &outcome.theta_hat, data, opts)?;
                log::debug!(
                    "simplex restart {}: loglik {:.6} -> {:.6}",
                    restart + 1,
                    outcome.value,
                    later.value
                );
                outcome.absorb(later);
            }
            Ok(outcome)
        }
        OptimMethod::Lbfgs => {
            let problem = ArgMinAdapter::new(f, data);
            match opts.line_searcher {
                LineSearcher::MoreThuente => {
                    let solver = build_optimizer_more_thuente(opts)?;
                    run_lbfgs(theta0, opts, problem, solver)
                }
                LineSearcher::HagerZhang => {
                    let solver = build_optimizer_hager_zhang(opts)?;
                    run_lbfgs(theta0, opts, problem, solver)
                }
            }
        }
    }
}

fn simplex_pass<F: LogLikelihood>(
    f: &F, start: &Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    let steps = f.simplex_steps(start, data);
    let solver = build_optimizer_nelder_mead(opts, start, &steps)?;
    run_simplex(opts, SimplexAdapter::new(f, data), solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{
        errors::OptError,
        loglik_optimizer::traits::Tolerances,
    };
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover end-to-end maximization of small concave objectives
    // with both methods, plus the simplex's tolerance of infeasible regions.
    // -------------------------------------------------------------------------

    /// ℓ(θ) = -(θ₀ - 2)² - 3(θ₁ + 1)², infeasible for θ₀ > 5.
    struct Quadratic;

    impl LogLikelihood for Quadratic {
        type Data = ();

        fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
            if theta[0] > 5.0 {
                return Err(OptError::OutsideSupport { index: 0, value: theta[0] });
            }
            Ok(-(theta[0] - 2.0).powi(2) - 3.0 * (theta[1] + 1.0).powi(2))
        }

        fn check(&self, theta: &Theta, _: &()) -> OptResult<()> {
            if theta.len() != 2 {
                return Err(OptError::ThetaLengthMismatch { expected: 2, actual: theta.len() });
            }
            Ok(())
        }
    }

    #[test]
    // Purpose
    // -------
    // The default simplex path finds the maximizer and reports convergence.
    //
    // Given
    // -----
    // - `Quadratic` started at (4.5, 1), next to the infeasible region.
    //
    // Expect
    // ------
    // - θ̂ ≈ (2, -1), ℓ(θ̂) ≈ 0, `converged == true`.
    fn simplex_finds_maximizer_near_infeasible_region() {
        let out = maximize(&Quadratic, array![4.5, 1.0], &(), &MLEOptions::default()).unwrap();

        assert!(out.converged, "status: {}", out.status);
        assert_abs_diff_eq!(out.theta_hat[0], 2.0, epsilon = 1e-3);
        assert_abs_diff_eq!(out.theta_hat[1], -1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(out.value, 0.0, epsilon = 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // The L-BFGS path reaches the same optimum from a feasible start.
    //
    // Given
    // -----
    // - `Quadratic` started at (0, 0) with `OptimMethod::Lbfgs`.
    //
    // Expect
    // ------
    // - θ̂ ≈ (2, -1).
    fn lbfgs_finds_maximizer() {
        let tols = Tolerances::new(Some(1e-8), None, Some(200)).unwrap();
        let opts =
            MLEOptions::new(tols, OptimMethod::Lbfgs, LineSearcher::MoreThuente, None).unwrap();

        let out = maximize(&Quadratic, array![0.0, 0.0], &(), &opts).unwrap();

        assert_abs_diff_eq!(out.theta_hat[0], 2.0, epsilon = 1e-4);
        assert_abs_diff_eq!(out.theta_hat[1], -1.0, epsilon = 1e-4);
    }

    #[test]
    // Purpose
    // -------
    // `check` runs before any solver work.
    //
    // Given
    // -----
    // - A length-3 starting point.
    //
    // Expect
    // ------
    // - `ThetaLengthMismatch`.
    fn maximize_rejects_bad_start_before_running() {
        let res = maximize(&Quadratic, array![0.0, 0.0, 0.0], &(), &MLEOptions::default());
        assert!(matches!(res, Err(OptError::ThetaLengthMismatch { expected: 2, actual: 3 })));
    }
}
