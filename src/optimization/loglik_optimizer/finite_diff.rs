//! loglik_optimizer::finite_diff — finite-difference gradient and Hessian helpers.
//!
//! - [`run_fd_diff`]: forward-difference gradient whose evaluation errors are
//!   parked in a `RefCell` by the caller's closure and surfaced afterwards.
//! - [`compute_hessian`]: central-difference Hessian of a gradient map,
//!   falling back to forward differences when the central result is not
//!   finite, then symmetrized.
//!
//! The inference layer calls [`compute_hessian`] on the gradient of the
//! negative log-likelihood to obtain observed information.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Grad, Theta,
        types::Hessian,
        validation::{validate_grad, validate_hessian},
    },
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Forward-difference gradient of `func` at `theta`.
///
/// `func` cannot return `Result`, so it is expected to store the first error
/// it hits in `closure_err` and return `NaN`. The cell is cleared on entry.
///
/// # Errors
/// - The error captured in `closure_err`, converted to `OptError`.
/// - `GradientDimMismatch` / `InvalidGradient` from validation.
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    let dim = theta.len();
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, dim)?;
    Ok(fd_grad)
}

/// Finite-difference Hessian of the gradient map `f` at `theta`.
///
/// The central-difference attempt's validation error is discarded; only the
/// forward-difference fallback's error is surfaced.
///
/// # Errors
/// `HessianDimMismatch` / `InvalidHessian` when the fallback also fails.
pub fn compute_hessian<F: Fn(&Theta) -> Grad>(f: &F, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let mut cent_hess = theta.central_hessian(f);
    match validate_hessian(&cent_hess, dim) {
        Ok(_) => {
            symmetrize_hess(&mut cent_hess);
            Ok(cent_hess)
        }
        Err(_) => {
            let mut forward_hess = theta.forward_hessian(f);
            validate_hessian(&forward_hess, dim)?;
            symmetrize_hess(&mut forward_hess);
            Ok(forward_hess)
        }
    }
}

// ---- Helper methods ----

/// Average each off-diagonal pair in place; the diagonal is untouched.
fn symmetrize_hess(hess: &mut Hessian) {
    for i in 0..hess.nrows() {
        for j in 0..i {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
}
