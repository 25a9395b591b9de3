//! Stationary GEV model: analytic log-likelihood, gradient, and MLE fit.
//!
//! This module wires the three-parameter GEV to the `LogLikelihood` trait and
//! turns an optimizer outcome into an immutable [`StationaryFit`].
//!
//! Key ideas:
//! - θ = `[μ, softplus⁻¹(σ), ξ]`, so every finite θ has `σ > 0`; the gradient
//!   multiplies `∂ℓ/∂σ` by `logistic(θ₁)`.
//! - Points outside the support surface as `OptError::OutsideSupport`, which
//!   the simplex treats as `+∞` cost.
//! - Constant samples are rejected before optimization; a fit that stops
//!   without converging is an error, never a silently returned triple.
//! - Standard errors come from the observed information of `−ℓ` in natural
//!   `(μ, σ, ξ)` coordinates.
use crate::{
    extremes::{
        core::{
            covariates::CovariatePoint,
            data::{BlockMaxima, SampleFingerprint},
            distribution::{obs_loglik, obs_terms},
            options::FitOptions,
            params::{GevParameters, STATIONARY_THETA_LEN},
            validation::{validate_min_len, validate_spread, validate_theta},
        },
        errors::{GevError, GevResult},
        models::{FittedGev, ensure_converged},
    },
    inference::hessian::calc_covariance,
    optimization::{
        errors::OptResult,
        loglik_optimizer::{Grad, LogLikelihood, OptimOutcome, Theta, maximize},
        numerical_stability::transformations::{GENERAL_TOL, safe_logistic, safe_softplus},
    },
};
use ndarray::{Array1, Array2, ArrayView1, array};

/// Stationary GEV likelihood plus fitting options.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GevModel {
    pub options: FitOptions,
}

impl GevModel {
    pub fn new(options: FitOptions) -> GevModel {
        GevModel { options }
    }

    /// Fit `(ξ, μ, σ)` by maximum likelihood.
    ///
    /// ## Steps
    /// 1. Require `n ≥ 3` and a sample with spread.
    /// 2. Seed from `options.init`; if the guess leaves an observation outside
    ///    its support, start from the Gumbel member with the same `(μ, σ)`.
    /// 3. Maximize with `options.mle_opts`.
    /// 4. Reject non-converged runs and degenerate scales.
    ///
    /// ## Errors
    /// - `GevError::TooFewObservations` (InsufficientData) for `n < 3`.
    /// - `GevError::ConstantSample`, `GevError::NotConverged`,
    ///   `GevError::OptimizationFailed` (FitConvergence).
    /// - `GevError::InvalidOptions` for rejected optimizer settings.
    pub fn fit(&self, data: &BlockMaxima) -> GevResult<StationaryFit> {
        validate_min_len(data.len(), STATIONARY_THETA_LEN)?;
        validate_spread(data.values())?;
        let start = feasible_start(self.options.init.initial_guess(data)?, data)?;

        let outcome = maximize(self, start.to_theta(), data, &self.options.mle_opts)?;
        ensure_converged(&outcome)?;
        let params = GevParameters::from_theta(outcome.theta_hat.view())?;
        check_scale_not_degenerate(params.scale(), data.values())?;

        Ok(StationaryFit {
            params,
            log_likelihood: outcome.value,
            fingerprint: data.fingerprint(),
            outcome,
        })
    }
}

impl LogLikelihood for GevModel {
    type Data = BlockMaxima;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<f64> {
        let params = GevParameters::from_theta(theta.view())?;
        Ok(params.log_likelihood(data.values())?)
    }

    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()> {
        validate_theta(theta.view(), STATIONARY_THETA_LEN)?;
        validate_min_len(data.len(), 1)?;
        Ok(())
    }

    /// `∇ℓ(θ)`; the scale entry carries the softplus Jacobian.
    fn grad(&self, theta: &Theta, data: &Self::Data) -> OptResult<Grad> {
        let params = GevParameters::from_theta(theta.view())?;
        let mut grad = natural_grad(&params, data.values())?;
        grad[1] *= safe_logistic(theta[1]);
        Ok(grad)
    }

    /// Steps of roughly 10% of σ in location and scale, 0.05 in shape.
    fn simplex_steps(&self, theta: &Theta, _data: &Self::Data) -> Theta {
        let sigma = safe_softplus(theta[1]);
        let dt = 0.1 * sigma / safe_logistic(theta[1]).max(GENERAL_TOL);
        array![0.1 * sigma, dt, 0.05]
    }
}

/// `StationaryFit` — result of a stationary maximum-likelihood fit.
///
/// Fields
/// ------
/// - `params`: fitted `(ξ, μ, σ)`.
/// - `log_likelihood`: maximized `ℓ(θ̂)`.
/// - `fingerprint`: identity of the fitted sample.
/// - `outcome`: optimizer diagnostics (iterations, status, evaluations).
#[derive(Debug, Clone, PartialEq)]
pub struct StationaryFit {
    pub params: GevParameters,
    pub log_likelihood: f64,
    pub fingerprint: SampleFingerprint,
    pub outcome: OptimOutcome,
}

/// Standard errors of `(ξ, μ, σ)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterErrors {
    pub shape: f64,
    pub location: f64,
    pub scale: f64,
}

impl StationaryFit {
    pub fn return_level(&self, period: f64) -> GevResult<f64> {
        self.params.return_level(period)
    }

    /// Observed-information covariance of `(μ, σ, ξ)` (that order).
    ///
    /// # Errors
    /// - `GevError::SampleMismatch` when `data` is not the fitted sample.
    /// - `GevError::OptimizationFailed` when the Hessian is not finite.
    pub fn covariance(&self, data: &BlockMaxima) -> GevResult<Array2<f64>> {
        if data.fingerprint() != self.fingerprint {
            return Err(GevError::SampleMismatch { model: "stationary".to_string() });
        }
        let values = data.values();
        let neg_grad = |nat: &Array1<f64>| -> Array1<f64> {
            GevParameters::new(nat[2], nat[0], nat[1])
                .and_then(|p| natural_grad(&p, values))
                .map(|g| -g)
                .unwrap_or_else(|_| Array1::from_elem(3, f64::NAN))
        };
        let theta_nat = array![self.params.location(), self.params.scale(), self.params.shape()];
        Ok(calc_covariance(&neg_grad, &theta_nat)?)
    }

    /// Square roots of the covariance diagonal.
    pub fn standard_errors(&self, data: &BlockMaxima) -> GevResult<ParameterErrors> {
        let cov = self.covariance(data)?;
        let se = cov.diag().mapv(|v| v.max(0.0).sqrt());
        Ok(ParameterErrors { location: se[0], scale: se[1], shape: se[2] })
    }
}

impl FittedGev for StationaryFit {
    fn params_at(&self, _point: &CovariatePoint) -> GevResult<GevParameters> {
        Ok(self.params)
    }

    fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    fn n_params(&self) -> usize {
        STATIONARY_THETA_LEN
    }

    fn fingerprint(&self) -> SampleFingerprint {
        self.fingerprint
    }
}

/// Fit a stationary GEV with `opts`.
pub fn fit_gev(data: &BlockMaxima, opts: &FitOptions) -> GevResult<StationaryFit> {
    GevModel::new(opts.clone()).fit(data)
}

/// Fit a stationary GEV to each consecutive block of `window` observations
/// (e.g. three 30-year climate normals); a trailing remainder is dropped.
///
/// # Errors
/// `GevError::InvalidWindow`, or the first per-window fit error.
pub fn fit_windows(
    data: &BlockMaxima, window: usize, opts: &FitOptions,
) -> GevResult<Vec<StationaryFit>> {
    let model = GevModel::new(opts.clone());
    data.windows(window)?.iter().map(|block| model.fit(block)).collect()
}

// ---- Helper methods ----

/// `Σ ∂ℓᵢ/∂(μ, σ, ξ)`.
pub(crate) fn natural_grad(params: &GevParameters, data: ArrayView1<f64>) -> GevResult<Array1<f64>> {
    let mut grad = Array1::zeros(STATIONARY_THETA_LEN);
    for (i, &x) in data.iter().enumerate() {
        let t = obs_terms(params, x, i)?;
        grad[0] += t.d_location;
        grad[1] += t.d_scale;
        grad[2] += t.d_shape;
    }
    Ok(grad)
}

/// Keep `guess` when it covers the sample, otherwise its Gumbel sibling.
pub(crate) fn feasible_start(guess: GevParameters, data: &BlockMaxima) -> GevResult<GevParameters> {
    let covered = data.values().iter().enumerate().all(|(i, &x)| obs_loglik(&guess, x, i).is_ok());
    if covered {
        return Ok(guess);
    }
    log::debug!("initial guess {guess:?} leaves observations outside the support; using Gumbel start");
    GevParameters::gumbel(guess.location(), guess.scale())
}

/// A scale that collapsed onto the sample's numerical resolution is a failed fit.
fn check_scale_not_degenerate(scale: f64, values: ArrayView1<f64>) -> GevResult<()> {
    let spread = values.iter().fold(f64::NEG_INFINITY, |m, &x| m.max(x))
        - values.iter().fold(f64::INFINITY, |m, &x| m.min(x));
    if scale <= GENERAL_TOL * spread.max(1.0) {
        return Err(GevError::OptimizationFailed {
            status: format!("fitted scale {scale} is degenerate"),
        });
    }
    Ok(())
}
