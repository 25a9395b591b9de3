//! Public API surface for log-likelihood maximization.
//!
//! - [`LogLikelihood`]: trait a model implements to be fitted.
//! - [`MLEOptions`] and [`Tolerances`]: optimizer configuration.
//! - [`OptimMethod`] / [`LineSearcher`]: which solver runs and, for L-BFGS,
//!   which line search it uses.
//! - [`OptimOutcome`]: normalized result returned by [`maximize`](super::maximize).
//!
//! Convention: we *maximize* a model log-likelihood `ℓ(θ)` by minimizing
//! `c(θ) = -ℓ(θ)`. Analytic gradients, when provided, are gradients of `ℓ`.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        Cost, FnEvalMap, Grad, Theta,
        validation::{validate_theta_hat, validate_value, verify_tol_cost, verify_tol_grad},
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use std::str::FromStr;

/// Model log-likelihood interface.
///
/// Required:
/// - `value(&Theta, &Data) -> OptResult<Cost>`: evaluate `ℓ(θ)`. Points
///   outside the model's support should return an error for which
///   [`OptError::is_infeasible`] is `true`; the simplex treats those as
///   infinitely bad vertices rather than aborting the run.
/// - `check(&Theta, &Data) -> OptResult<()>`: shape/finiteness check on the
///   starting point, called once before optimization.
///
/// Optional:
/// - `grad(&Theta, &Data) -> OptResult<Grad>`: analytic `∇ℓ(θ)`; finite
///   differences are used when this returns `GradientNotImplemented`.
/// - `simplex_steps(&Theta, &Data) -> Theta`: per-coordinate offsets used to
///   build the initial simplex around `θ₀`.
pub trait LogLikelihood {
    type Data: 'static;

    // Required methods
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    // Optional methods
    fn grad(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }

    /// Default offsets: 5% of each non-zero coordinate, `2.5e-4` for zeros.
    fn simplex_steps(&self, theta: &Theta, _data: &Self::Data) -> Theta {
        theta.mapv(|t| if t != 0.0 { 0.05 * t } else { 2.5e-4 })
    }
}

/// Line search used inside the L-BFGS solver.
///
/// Parsing is case-insensitive (`"MoreThuente"`, `"HagerZhang"`); unknown
/// names return [`OptError::InvalidLineSearch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Optimization algorithm.
///
/// - `NelderMead`: derivative-free simplex; tolerant of infeasible trial
///   points. Default.
/// - `Lbfgs`: quasi-Newton with the configured [`LineSearcher`]; any
///   infeasible trial point aborts the run.
///
/// Parsing is case-insensitive (`"NelderMead"`, `"LBFGS"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimMethod {
    NelderMead,
    Lbfgs,
}

impl FromStr for OptimMethod {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "neldermead" => Ok(OptimMethod::NelderMead),
            "lbfgs" => Ok(OptimMethod::Lbfgs),
            _ => Err(OptError::InvalidMethod {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'NelderMead' or 'LBFGS'.",
            }),
        }
    }
}

/// Optimizer-level configuration.
///
/// Fields:
/// - `tols`: tolerances and iteration cap. For the simplex, `tol_cost` is the
///   stopping threshold on the standard deviation of vertex costs and
///   `tol_grad` is ignored.
/// - `method`: [`OptimMethod`].
/// - `line_searcher`: used only when `method == Lbfgs`.
/// - `verbose`: attach the slog observer (feature `obs_slog`).
/// - `lbfgs_mem`: L-BFGS history size; `None` uses the default of 7.
/// - `restarts`: number of extra simplex runs started from the previous
///   optimum. Each restart rebuilds the simplex, which recovers from the
///   simplex collapsing prematurely.
///
/// Default: Nelder–Mead, `tol_grad = 1e-6`, `tol_cost = 1e-10`,
/// `max_iter = 5000`, one restart.
#[derive(Debug, Clone, PartialEq)]
pub struct MLEOptions {
    pub tols: Tolerances,
    pub method: OptimMethod,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
    pub restarts: usize,
}

impl MLEOptions {
    /// Create optimizer options; numeric tolerances are validated by
    /// [`Tolerances::new`].
    ///
    /// # Errors
    /// - [`OptError::InvalidLBFGSMem`] if `lbfgs_mem == Some(0)`.
    pub fn new(
        tols: Tolerances, method: OptimMethod, line_searcher: LineSearcher,
        lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(OptError::InvalidLBFGSMem {
                    mem: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        Ok(Self { tols, method, line_searcher, verbose: false, lbfgs_mem, restarts: 1 })
    }

    /// Toggle the progress observer.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set the number of simplex restarts.
    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts;
        self
    }
}

impl Default for MLEOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances { tol_grad: Some(1e-6), tol_cost: Some(1e-10), max_iter: Some(5000) },
            method: OptimMethod::NelderMead,
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
            lbfgs_mem: None,
            restarts: 1,
        }
    }
}

/// Numerical tolerances and iteration limits.
///
/// - `tol_grad`: stop when the gradient norm falls below this (L-BFGS).
/// - `tol_cost`: stop on cost change (L-BFGS) or vertex-cost spread (simplex).
/// - `max_iter`: hard cap on iterations. A run that hits the cap is reported
///   as not converged.
///
/// At least one field must be `Some` (see [`Tolerances::new`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if all three are `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for
    ///   non-finite or non-positive tolerances.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == Some(0)`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_cost(tol_cost)?;
        verify_tol_grad(tol_grad)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

/// Canonical result returned by `maximize`.
///
/// - `theta_hat`: best parameter vector found.
/// - `value`: best **log-likelihood** `ℓ(θ̂)` (not the cost).
/// - `converged`: `true` when the solver stopped on its own criterion;
///   `false` when it was still running or hit the iteration cap.
/// - `status`: human-readable termination status.
/// - `iterations`: optimizer iterations, summed over simplex restarts.
/// - `fn_evals`: argmin counters (e.g. `cost_count`), summed over restarts.
/// - `grad_norm`: norm of the last gradient, when the solver has one.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl OptimOutcome {
    /// Build a validated [`OptimOutcome`] from raw solver state.
    ///
    /// # Errors
    /// - Propagates validation errors for `theta_hat` (missing or non-finite)
    ///   and `value` (non-finite).
    pub fn new(
        theta_hat_opt: Option<Theta>, value: f64, termination: TerminationStatus,
        iterations: u64, fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(value)?;
        let (converged, status) = match &termination {
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
            TerminationStatus::Terminated(TerminationReason::MaxItersReached) => {
                (false, format!("{termination:?}"))
            }
            TerminationStatus::Terminated(_) => (true, format!("{termination:?}")),
        };
        let iterations = iterations as usize;
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self { theta_hat, value, converged, status, iterations, fn_evals, grad_norm })
    }

    /// Fold a follow-up run (simplex restart) into this outcome: the later
    /// run's point, value and status win, counters accumulate.
    pub(crate) fn absorb(&mut self, later: OptimOutcome) {
        self.iterations += later.iterations;
        for (k, v) in later.fn_evals {
            *self.fn_evals.entry(k).or_insert(0) += v;
        }
        if later.value >= self.value {
            self.theta_hat = later.theta_hat;
            self.value = later.value;
            self.grad_norm = later.grad_norm;
        }
        self.converged = later.converged;
        self.status = later.status;
    }
}
