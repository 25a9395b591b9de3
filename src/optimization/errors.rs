//! Optimizer-layer errors.
//!
//! `OptError` covers four sources: malformed [`MLEOptions`] inputs, bad
//! values coming back from a likelihood (cost, gradient, Hessian), points
//! outside the GEV likelihood domain, and failures raised inside argmin.
//! Domain violations are flagged by [`OptError::is_infeasible`] so the
//! simplex can score them as `+∞` and move on.
//!
//! [`MLEOptions`]: crate::optimization::loglik_optimizer::traits::MLEOptions
use argmin::core::{ArgminError, Error};

use crate::extremes::errors::GevError;

pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // options
    InvalidTolGrad { tol: f64, reason: &'static str },
    InvalidTolCost { tol: f64, reason: &'static str },
    InvalidMaxIter { max_iter: usize, reason: &'static str },
    NoTolerancesProvided,
    InvalidLineSearch { name: String, reason: &'static str },
    InvalidMethod { name: String, reason: &'static str },
    InvalidLBFGSMem { mem: usize, reason: &'static str },
    /// A simplex step was zero, non-finite, or the step vector had the
    /// wrong length (reported with `index == len`).
    InvalidSimplexStep { index: usize, value: f64 },

    // likelihood outputs
    /// The model has no analytic gradient; callers fall back to finite
    /// differences.
    GradientNotImplemented,
    GradientDimMismatch { expected: usize, found: usize },
    InvalidGradient { index: usize, value: f64, reason: &'static str },
    NonFiniteCost { value: f64 },
    HessianDimMismatch { expected: usize, found: (usize, usize) },
    InvalidHessian { row: usize, col: usize, value: f64 },

    // solver result
    MissingThetaHat,
    InvalidThetaHat { index: usize, value: f64, reason: &'static str },

    // GEV likelihood domain
    /// `1 + ξ(x − μ)/σ` was not positive for observation `index`.
    OutsideSupport { index: usize, value: f64 },
    /// `σ` evaluated at observation `index` was not positive.
    NonPositiveScale { index: usize, value: f64 },
    ThetaLengthMismatch { expected: usize, actual: usize },
    NonFiniteTheta { index: usize, value: f64 },

    /// Anything argmin raised that is not one of ours; `kind` names the
    /// argmin error class.
    Backend { kind: &'static str, text: String },
}

impl OptError {
    /// `true` for likelihood-domain violations that a derivative-free
    /// search may treat as an infinitely bad point instead of a failure.
    pub fn is_infeasible(&self) -> bool {
        matches!(self, OptError::OutsideSupport { .. } | OptError::NonPositiveScale { .. })
    }

    /// `true` for errors raised while validating [`MLEOptions`] inputs.
    ///
    /// [`MLEOptions`]: crate::optimization::loglik_optimizer::traits::MLEOptions
    pub fn is_option_error(&self) -> bool {
        matches!(
            self,
            OptError::InvalidTolGrad { .. }
                | OptError::InvalidTolCost { .. }
                | OptError::InvalidMaxIter { .. }
                | OptError::NoTolerancesProvided
                | OptError::InvalidLineSearch { .. }
                | OptError::InvalidMethod { .. }
                | OptError::InvalidLBFGSMem { .. }
                | OptError::InvalidSimplexStep { .. }
        )
    }
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use OptError::*;
        match self {
            InvalidTolGrad { tol, reason } => write!(f, "tol_grad = {tol}: {reason}"),
            InvalidTolCost { tol, reason } => write!(f, "tol_cost = {tol}: {reason}"),
            InvalidMaxIter { max_iter, reason } => write!(f, "max_iter = {max_iter}: {reason}"),
            NoTolerancesProvided => {
                write!(f, "at least one of tol_grad, tol_cost, max_iter must be set")
            }
            InvalidLineSearch { name, reason } => write!(f, "line search {name:?}: {reason}"),
            InvalidMethod { name, reason } => write!(f, "optimizer method {name:?}: {reason}"),
            InvalidLBFGSMem { mem, reason } => write!(f, "L-BFGS memory {mem}: {reason}"),
            InvalidSimplexStep { index, value } => {
                write!(f, "simplex step {index} is {value}; steps must be finite and non-zero")
            }

            GradientNotImplemented => write!(f, "model provides no analytic gradient"),
            GradientDimMismatch { expected, found } => {
                write!(f, "gradient has {found} entries, parameter vector has {expected}")
            }
            InvalidGradient { index, value, reason } => {
                write!(f, "gradient entry {index} is {value}: {reason}")
            }
            NonFiniteCost { value } => write!(f, "negative log-likelihood evaluated to {value}"),
            HessianDimMismatch { expected, found } => {
                write!(f, "Hessian is {found:?}, expected ({expected}, {expected})")
            }
            InvalidHessian { row, col, value } => {
                write!(f, "Hessian entry ({row}, {col}) is {value}")
            }

            MissingThetaHat => write!(f, "solver finished without a best parameter vector"),
            InvalidThetaHat { index, value, reason } => {
                write!(f, "fitted parameter {index} is {value}: {reason}")
            }

            OutsideSupport { index, value } => {
                write!(f, "observation {index} outside GEV support (1 + xi*z = {value})")
            }
            NonPositiveScale { index, value } => {
                write!(f, "scale at observation {index} is {value}, must be > 0")
            }
            ThetaLengthMismatch { expected, actual } => {
                write!(f, "theta has {actual} entries, layout expects {expected}")
            }
            NonFiniteTheta { index, value } => write!(f, "theta[{index}] = {value} is not finite"),

            Backend { kind, text } => write!(f, "argmin {kind}: {text}"),
        }
    }
}

/// Unwrap an argmin error, recovering our own `OptError` when a likelihood
/// raised it through the solver.
impl From<Error> for OptError {
    fn from(err: Error) -> Self {
        let err = match err.downcast::<OptError>() {
            Ok(ours) => return ours,
            Err(err) => err,
        };
        match err.downcast::<ArgminError>() {
            Ok(argmin_err) => {
                let kind = match &argmin_err {
                    ArgminError::InvalidParameter { .. } => "invalid parameter",
                    ArgminError::NotImplemented { .. } => "not implemented",
                    ArgminError::NotInitialized { .. } => "not initialized",
                    ArgminError::ConditionViolated { .. } => "condition violated",
                    ArgminError::CheckpointNotFound { .. } => "checkpoint not found",
                    ArgminError::PotentialBug { .. } => "potential bug",
                    ArgminError::ImpossibleError { .. } => "impossible error",
                    _ => "error",
                };
                OptError::Backend { kind, text: argmin_err.to_string() }
            }
            Err(other) => OptError::Backend { kind: "error", text: other.to_string() },
        }
    }
}

impl From<GevError> for OptError {
    fn from(err: GevError) -> Self {
        match err {
            GevError::ThetaLengthMismatch { expected, actual } => {
                OptError::ThetaLengthMismatch { expected, actual }
            }
            GevError::NonFiniteTheta { index, value } => OptError::NonFiniteTheta { index, value },
            GevError::InvalidScale { value } => OptError::NonPositiveScale { index: 0, value },
            GevError::OutsideSupport { index, value } => OptError::OutsideSupport { index, value },
            GevError::NonPositiveScaleOnRange { index, value } => {
                OptError::NonPositiveScale { index, value }
            }
            other => OptError::Backend { kind: "likelihood", text: other.to_string() },
        }
    }
}
