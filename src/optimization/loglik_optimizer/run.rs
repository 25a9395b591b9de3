//! Drive an `argmin` executor to completion and package the final state as
//! an [`OptimOutcome`].
//!
//! Both solver families share [`execute`]: it seeds `θ₀` when the solver
//! needs one (the simplex carries its own vertices), applies `max_iter`, and
//! attaches the slog observer under `obs_slog`.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Grad, LogLikelihood, MLEOptions, OptimOutcome, Theta,
        adapter::{ArgMinAdapter, SimplexAdapter},
        types::Simplex,
    },
};
#[cfg(feature = "obs_slog")]
use argmin::core::{CostFunction, Gradient};
use argmin::core::{Executor, IterState, Solver, State};
#[cfg(feature = "obs_slog")]
use argmin_math::ArgminL2Norm;

/// Solver state with gradient type `G` (`Grad` for L-BFGS, `()` for the simplex).
type MleState<G> = IterState<Theta, G, (), (), (), f64>;

/// L-BFGS on the negated log-likelihood, starting at `theta0`.
///
/// # Errors
/// Runtime errors from argmin (including likelihood errors at trial points)
/// and validation errors from [`OptimOutcome::new`].
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
    S: Solver<ArgMinAdapter<'a, F>, MleState<Grad>> + Send + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_start(&theta0, &problem)?;
    }
    let mut state = execute::<_, _, Grad>(problem, solver, Some(theta0), opts)?;
    let grad = state.take_gradient();
    into_outcome(state, grad, "L-BFGS")
}

/// Nelder–Mead on the negated log-likelihood.
///
/// Infeasible vertices score `+∞` through [`SimplexAdapter`]; if no vertex
/// was ever feasible the infinite best cost is rejected as `NonFiniteCost`.
///
/// # Errors
/// As [`run_lbfgs`].
pub fn run_simplex<'a, F>(
    opts: &MLEOptions, problem: SimplexAdapter<'a, F>, solver: Simplex,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
{
    let state = execute::<_, _, ()>(problem, solver, None, opts)?;
    into_outcome(state, None, "Nelder-Mead")
}

// ---- Helper Methods ----

fn execute<O, S, G>(
    problem: O, solver: S, theta0: Option<Theta>, opts: &MLEOptions,
) -> OptResult<MleState<G>>
where
    S: Solver<O, MleState<G>>,
    G: Clone,
{
    let mut executor = Executor::new(problem, solver);
    if let Some(theta0) = theta0 {
        executor = executor.configure(|state| state.param(theta0));
    }
    if let Some(max_iter) = opts.tols.max_iter {
        executor = executor.configure(|state| state.max_iters(max_iter as u64));
    }
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        executor = executor.add_observer(
            argmin_observer_slog::SlogLogger::term_noblock(),
            argmin::core::observers::ObserverMode::Always,
        );
    }
    Ok(executor.run()?.state().clone())
}

/// Flip the minimized cost back to a log-likelihood and validate.
fn into_outcome<G>(
    mut state: MleState<G>, grad: Option<Grad>, solver: &str,
) -> OptResult<OptimOutcome> {
    let iterations = state.get_iter();
    let status = state.get_termination_status().clone();
    log::debug!("{solver} stopped after {iterations} iterations: {status:?}");
    OptimOutcome::new(
        state.take_best_param(),
        -state.get_best_cost(),
        status,
        iterations,
        state.get_func_counts().clone(),
        grad,
    )
}

#[cfg(feature = "obs_slog")]
fn log_start<F: LogLikelihood>(theta0: &Theta, problem: &ArgMinAdapter<'_, F>) -> OptResult<()> {
    let ll0 = -problem.cost(theta0)?;
    match problem.gradient(theta0) {
        Ok(g) => log::info!("start: loglik = {ll0:.6}, |grad| = {:.6}", g.l2_norm()),
        Err(_) => log::info!("start: loglik = {ll0:.6}"),
    }
    Ok(())
}
