//! Validation helpers for log-likelihood optimization.
//!
//! - Tolerance checks: [`verify_tol_grad`], [`verify_tol_cost`].
//! - Derivative checks: [`validate_grad`], [`validate_hessian`].
//! - Outcome checks: [`validate_theta_hat`], [`validate_value`].
//! - Simplex construction: [`validate_simplex_steps`].
//!
//! Each helper reports the first offending element through a dedicated
//! [`OptError`] variant.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{Grad, Theta, types::Hessian},
};

/// Optional gradient-norm tolerance must be finite and `> 0` when present.
///
/// # Errors
/// [`OptError::InvalidTolGrad`].
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Optional cost tolerance must be finite and `> 0` when present.
///
/// # Errors
/// [`OptError::InvalidTolCost`].
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Gradient must have length `dim` and finite entries.
///
/// # Errors
/// [`OptError::GradientDimMismatch`] or [`OptError::InvalidGradient`].
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    if let Some((index, &value)) = grad.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(OptError::InvalidGradient {
            index,
            value,
            reason: "Gradient elements must be finite.",
        });
    }
    Ok(())
}

/// Unwrap the solver's best parameter vector, requiring finite entries.
///
/// # Errors
/// [`OptError::MissingThetaHat`] or [`OptError::InvalidThetaHat`].
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    let t = theta_hat.ok_or(OptError::MissingThetaHat)?;
    if let Some((index, &value)) = t.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(OptError::InvalidThetaHat {
            index,
            value,
            reason: "Parameter estimates must be finite.",
        });
    }
    Ok(t)
}

/// Log-likelihood values must be finite.
///
/// # Errors
/// [`OptError::NonFiniteCost`].
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

/// Hessian must be `dim × dim` with finite entries.
///
/// # Errors
/// [`OptError::HessianDimMismatch`] or [`OptError::InvalidHessian`].
pub fn validate_hessian(hessian: &Hessian, dim: usize) -> OptResult<()> {
    if hessian.nrows() != dim || hessian.ncols() != dim {
        return Err(OptError::HessianDimMismatch {
            expected: dim,
            found: (hessian.nrows(), hessian.ncols()),
        });
    }
    for ((row, col), &value) in hessian.indexed_iter() {
        if !value.is_finite() {
            return Err(OptError::InvalidHessian { row, col, value });
        }
    }
    Ok(())
}

/// Simplex offsets must match `dim` and be finite and non-zero, otherwise
/// the initial simplex is degenerate.
///
/// # Errors
/// [`OptError::ThetaLengthMismatch`] or [`OptError::InvalidSimplexStep`].
pub fn validate_simplex_steps(steps: &Theta, dim: usize) -> OptResult<()> {
    if steps.len() != dim {
        return Err(OptError::ThetaLengthMismatch { expected: dim, actual: steps.len() });
    }
    if let Some((index, &value)) =
        steps.iter().enumerate().find(|(_, v)| !v.is_finite() || **v == 0.0)
    {
        return Err(OptError::InvalidSimplexStep { index, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover the first-offender reporting of each validator.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // The first non-finite gradient entry is reported.
    //
    // Given
    // -----
    // - A gradient `[1, NaN, inf]`.
    //
    // Expect
    // ------
    // - `InvalidGradient { index: 1, .. }`.
    fn validate_grad_reports_first_non_finite_entry() {
        let g = array![1.0, f64::NAN, f64::INFINITY];
        match validate_grad(&g, 3) {
            Err(OptError::InvalidGradient { index, .. }) => assert_eq!(index, 1),
            other => panic!("Expected InvalidGradient, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Missing and non-finite estimates are rejected.
    //
    // Given
    // -----
    // - `None` and `Some([0, inf])`.
    //
    // Expect
    // ------
    // - `MissingThetaHat` and `InvalidThetaHat { index: 1, .. }`.
    fn validate_theta_hat_rejects_missing_and_non_finite() {
        assert_eq!(validate_theta_hat(None), Err(OptError::MissingThetaHat));
        assert!(matches!(
            validate_theta_hat(Some(array![0.0, f64::INFINITY])),
            Err(OptError::InvalidThetaHat { index: 1, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Zero simplex offsets would make the simplex degenerate.
    //
    // Given
    // -----
    // - Steps `[0.1, 0.0]` for a 2-d problem and a length mismatch.
    //
    // Expect
    // ------
    // - `InvalidSimplexStep { index: 1 }` and `ThetaLengthMismatch`.
    fn validate_simplex_steps_rejects_zero_and_wrong_length() {
        assert!(matches!(
            validate_simplex_steps(&array![0.1, 0.0], 2),
            Err(OptError::InvalidSimplexStep { index: 1, .. })
        ));
        assert!(matches!(
            validate_simplex_steps(&array![0.1], 2),
            Err(OptError::ThetaLengthMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Hessian shape is checked before entries.
    //
    // Given
    // -----
    // - A 2×3 matrix for `dim = 2`.
    //
    // Expect
    // ------
    // - `HessianDimMismatch`.
    fn validate_hessian_checks_shape() {
        let h = Array2::<f64>::zeros((2, 3));
        assert!(matches!(validate_hessian(&h, 2), Err(OptError::HessianDimMismatch { .. })));
    }
}
