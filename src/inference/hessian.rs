//! inference::hessian — observed-information covariance and standard errors.
//!
//! Purpose
//! -------
//! Turn a finite-difference Hessian of the negative log-likelihood into a
//! covariance matrix and standard errors for the fitted parameters.
//!
//! Key behaviors
//! -------------
//! - [`compute_hessian`] on the gradient of `−ℓ` gives the observed
//!   information `J(θ̂)` (sum scale, not average).
//! - `J` is copied into a `nalgebra::DMatrix` ([`fill_dmatrix`]) and
//!   inverted through its symmetric eigendecomposition, dropping
//!   eigenvalues at or below [`EIGEN_EPS`] (Moore–Penrose pseudo-inverse).
//!
//! Conventions
//! -----------
//! - The caller chooses the parameterization by choosing the gradient map:
//!   the GEV models pass the gradient in natural `(μ, σ, ξ)` coordinates so
//!   the standard errors are directly interpretable.
//! - A weakly identified direction (eigenvalue ≤ `EIGEN_EPS`) contributes
//!   nothing to the variance instead of blowing it up.
use crate::optimization::{
    errors::OptResult, loglik_optimizer::finite_diff::compute_hessian,
    numerical_stability::transformations::EIGEN_EPS,
};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

/// calc_covariance — pseudo-inverse of the observed information.
///
/// Parameters
/// ----------
/// - `f`: `&F`
///   Gradient of the **negative** log-likelihood, `θ ↦ −∇ℓ(θ)`.
/// - `theta_hat`: `&Array1<f64>`
///   Point at which `J(θ̂)` is evaluated.
///
/// Returns
/// -------
/// `OptResult<Array2<f64>>`
///   `J⁺ = Σ_{λ_k > EIGEN_EPS} q_k q_kᵀ / λ_k`.
///
/// Errors
/// ------
/// - `OptError` from [`compute_hessian`] (dimension mismatch, non-finite
///   entries on both difference schemes).
pub fn calc_covariance<F: Fn(&Array1<f64>) -> Array1<f64>>(
    f: &F, theta_hat: &Array1<f64>,
) -> OptResult<Array2<f64>> {
    let n = theta_hat.len();
    let obs_info = compute_hessian(f, theta_hat)?;
    let mut obs_info_nalg = DMatrix::<f64>::zeros(n, n);
    fill_dmatrix(&obs_info, &mut obs_info_nalg);
    Ok(pseudo_inverse(obs_info_nalg, n))
}

/// calc_standard_errors — square roots of the diagonal of [`calc_covariance`].
///
/// # Errors
/// Same as [`calc_covariance`].
///
/// # Examples
/// ```rust
/// # use ndarray::{array, Array1};
/// # use rust_extremes::inference::hessian::calc_standard_errors;
/// // −∇ℓ(θ) = A θ with A = diag(4, 1).
/// let a = array![[4.0, 0.0], [0.0, 1.0]];
/// let f = |theta: &Array1<f64>| a.dot(theta);
/// let se = calc_standard_errors(&f, &array![1.0, -1.0]).unwrap();
/// assert!((se[0] - 0.5).abs() < 1e-6);
/// assert!((se[1] - 1.0).abs() < 1e-6);
/// ```
pub fn calc_standard_errors<F: Fn(&Array1<f64>) -> Array1<f64>>(
    f: &F, theta_hat: &Array1<f64>,
) -> OptResult<Array1<f64>> {
    let cov = calc_covariance(f, theta_hat)?;
    Ok(cov.diag().mapv(|v| v.max(0.0).sqrt()))
}

// ---- Helper methods ----

/// Copy a square `ndarray` matrix into a preallocated `DMatrix` of the same
/// shape. Symmetry is assumed to have been enforced upstream.
fn fill_dmatrix(obs_info: &Array2<f64>, obs_info_nalg: &mut DMatrix<f64>) {
    for ((i, j), &v) in obs_info.indexed_iter() {
        obs_info_nalg[(i, j)] = v;
    }
}

/// `Σ_{k: λ_k > EIGEN_EPS} Q[·,k] Q[·,k]ᵀ / λ_k` from `J = Q Λ Qᵀ`.
fn pseudo_inverse(obs_info_nalg: DMatrix<f64>, n: usize) -> Array2<f64> {
    let eigen_decomp = obs_info_nalg.symmetric_eigen();
    let q = eigen_decomp.eigenvectors;
    let eigenvals = eigen_decomp.eigenvalues;
    let mut cov = Array2::<f64>::zeros((n, n));
    for (k, &lambda) in eigenvals.iter().enumerate() {
        if lambda <= EIGEN_EPS {
            continue;
        }
        for i in 0..n {
            for j in 0..n {
                cov[[i, j]] += q[(i, k)] * q[(j, k)] / lambda;
            }
        }
    }
    cov
}
