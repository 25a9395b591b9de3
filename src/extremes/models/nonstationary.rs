//! Non-stationary GEV model: parameters affine in covariates.
//!
//! Purpose
//! -------
//! Generalize the stationary fit so that any subset of `(μ, σ, ξ)` varies
//! linearly with its own covariate: `μᵢ = μ₀ + μ₁·cᵢ` and likewise for `σ`
//! and `ξ`. The log-likelihood is the sum of per-observation GEV terms at
//! `(μᵢ, σᵢ, ξᵢ)`.
//!
//! Key behaviors
//! -------------
//! - [`NonStationaryGevModel`] implements [`LogLikelihood`] with an analytic
//!   gradient obtained by chaining the per-observation derivatives through
//!   the affine maps.
//! - Fits start from the stationary MLE with zero slopes, so the optimizer
//!   can only improve on the stationary likelihood.
//! - [`NonStationaryFit`] recovers `(μ(c), σ(c), ξ(c))` at any covariate
//!   point, the return-level path along the observed covariates, and a
//!   covariate × period surface.
//!
//! Invariants & assumptions
//! ------------------------
//! - θ layout: `[μ₀, (μ₁), s₀, (σ₁), ξ₀, (ξ₁)]`, slopes present only for
//!   linked parameters. With an unlinked scale `s₀ = softplus⁻¹(σ)`; with a
//!   linked scale `s₀ = σ₀` and `σᵢ > 0` is checked per observation.
//! - `σᵢ ≤ 0` for an observed covariate value is an infeasible point during
//!   optimization and a `GevError::NonPositiveScaleOnRange` after it.
//! - With no linked parameter the model is the stationary model.
//!
//! Conventions
//! -----------
//! - The "natural" layout used for standard errors is the θ layout with
//!   `σ₀` in place of `s₀`.
//! - Centred or index-like covariates (e.g. `0..n`) condition the
//!   intercept/slope pair better than raw calendar years.
use crate::{
    extremes::{
        core::{
            covariates::{Covariate, CovariatePoint, GevCovariates},
            data::{BlockMaxima, SampleFingerprint},
            distribution::{obs_loglik, obs_terms},
            options::FitOptions,
            params::{GevParameters, STATIONARY_THETA_LEN},
            validation::{validate_min_len, validate_scale, validate_spread, validate_theta},
        },
        errors::{GevError, GevResult},
        models::{
            FittedGev, ensure_converged,
            return_levels::return_level_surface,
            stationary::{GevModel, feasible_start},
        },
    },
    inference::hessian::calc_covariance,
    optimization::{
        errors::OptResult,
        loglik_optimizer::{Grad, LogLikelihood, OptimOutcome, Theta, maximize},
        numerical_stability::transformations::{
            GENERAL_TOL, safe_logistic, safe_softplus, safe_softplus_inv,
        },
    },
};
use ndarray::{Array1, Array2, ArrayView1};

/// `intercept + slope·c`, or a constant when `slope` is `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineParameter {
    pub intercept: f64,
    pub slope: Option<f64>,
}

impl AffineParameter {
    pub fn constant(value: f64) -> Self {
        Self { intercept: value, slope: None }
    }

    pub fn linear(intercept: f64, slope: f64) -> Self {
        Self { intercept, slope: Some(slope) }
    }

    #[inline]
    pub fn at(&self, c: f64) -> f64 {
        match self.slope {
            Some(b) => self.intercept + b * c,
            None => self.intercept,
        }
    }

    pub fn is_linked(&self) -> bool {
        self.slope.is_some()
    }

    fn n_free(&self) -> usize {
        1 + usize::from(self.is_linked())
    }
}

/// `(μ(c), σ(c), ξ(c))` as three affine maps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NonStationaryParameters {
    pub location: AffineParameter,
    pub scale: AffineParameter,
    pub shape: AffineParameter,
}

impl NonStationaryParameters {
    /// GEV parameters at one covariate point.
    ///
    /// # Errors
    /// `GevError::InvalidScale` when `σ(c) ≤ 0` there.
    pub fn at(&self, point: &CovariatePoint) -> GevResult<GevParameters> {
        GevParameters::new(
            self.shape.at(point.shape),
            self.location.at(point.location),
            self.scale.at(point.scale),
        )
    }

    pub fn linked(&self) -> [bool; 3] {
        [self.location.is_linked(), self.scale.is_linked(), self.shape.is_linked()]
    }

    /// `3 + m` for `m` linked parameters.
    pub fn n_params(&self) -> usize {
        self.location.n_free() + self.scale.n_free() + self.shape.n_free()
    }

    /// Constant maps at `params`, with zero slopes where `linked`.
    pub fn from_stationary(params: &GevParameters, linked: [bool; 3]) -> Self {
        let affine = |value: f64, is_linked: bool| {
            if is_linked { AffineParameter::linear(value, 0.0) } else { AffineParameter::constant(value) }
        };
        Self {
            location: affine(params.location(), linked[0]),
            scale: affine(params.scale(), linked[1]),
            shape: affine(params.shape(), linked[2]),
        }
    }

    /// Natural layout `[μ₀, (μ₁), σ₀, (σ₁), ξ₀, (ξ₁)]`.
    pub fn to_natural(&self) -> Array1<f64> {
        let mut out = Vec::with_capacity(self.n_params());
        for p in [self.location, self.scale, self.shape] {
            out.push(p.intercept);
            if let Some(b) = p.slope {
                out.push(b);
            }
        }
        Array1::from(out)
    }

    /// Inverse of [`to_natural`](Self::to_natural).
    ///
    /// # Errors
    /// - `GevError::ThetaLengthMismatch` / `GevError::NonFiniteTheta`.
    /// - `GevError::InvalidScale` for an unlinked `σ₀ ≤ 0`.
    pub fn from_natural(values: ArrayView1<f64>, linked: [bool; 3]) -> GevResult<Self> {
        validate_theta(values, theta_len(linked))?;
        let mut cursor = 0;
        let mut take = |is_linked: bool| {
            let intercept = values[cursor];
            let slope = is_linked.then(|| values[cursor + 1]);
            cursor += 1 + usize::from(is_linked);
            AffineParameter { intercept, slope }
        };
        let location = take(linked[0]);
        let scale = take(linked[1]);
        let shape = take(linked[2]);
        if !linked[1] {
            validate_scale(scale.intercept)?;
        }
        Ok(Self { location, scale, shape })
    }

    pub(crate) fn from_theta(theta: ArrayView1<f64>, linked: [bool; 3]) -> GevResult<Self> {
        validate_theta(theta, theta_len(linked))?;
        let mut natural = theta.to_owned();
        if !linked[1] {
            let j = block_starts(linked)[1];
            natural[j] = safe_softplus(theta[j]);
        }
        Self::from_natural(natural.view(), linked)
    }

    pub(crate) fn to_theta(&self) -> Theta {
        let linked = self.linked();
        let mut theta = self.to_natural();
        if !linked[1] {
            let j = block_starts(linked)[1];
            theta[j] = safe_softplus_inv(theta[j]);
        }
        theta
    }
}

/// Non-stationary GEV likelihood over a fixed covariate design.
#[derive(Debug, Clone, PartialEq)]
pub struct NonStationaryGevModel {
    pub covariates: GevCovariates,
    pub options: FitOptions,
}

impl NonStationaryGevModel {
    pub fn new(covariates: GevCovariates, options: FitOptions) -> Self {
        Self { covariates, options }
    }

    /// Fit intercepts and slopes by maximum likelihood.
    ///
    /// ## Steps
    /// 1. Validate covariate lengths; require `n ≥ 3 + m` and spread.
    /// 2. Start from the stationary MLE with zero slopes (falling back to the
    ///    initial-guess policy when the stationary fit fails).
    /// 3. Maximize, reject non-converged runs, and re-check `σᵢ > 0` at every
    ///    observed covariate value.
    ///
    /// ## Errors
    /// - `GevError::CovariateLengthMismatch` (InvalidArgument).
    /// - `GevError::TooFewObservations` (InsufficientData).
    /// - `GevError::ConstantSample`, `GevError::NotConverged`,
    ///   `GevError::NonPositiveScaleOnRange` (FitConvergence).
    pub fn fit(&self, data: &BlockMaxima) -> GevResult<NonStationaryFit> {
        let n = data.len();
        self.covariates.validate_for(n)?;
        let linked = self.covariates.linked();
        validate_min_len(n, theta_len(linked))?;
        validate_spread(data.values())?;

        let start = self.start_params(data)?;
        let outcome = maximize(self, start.to_theta(), data, &self.options.mle_opts)?;
        ensure_converged(&outcome)?;
        let params = NonStationaryParameters::from_theta(outcome.theta_hat.view(), linked)?;
        for i in 0..n {
            obs_params(&params, &self.covariates, i)?;
        }

        Ok(NonStationaryFit {
            params,
            covariates: self.covariates.clone(),
            log_likelihood: outcome.value,
            fingerprint: data.fingerprint(),
            outcome,
        })
    }

    fn start_params(&self, data: &BlockMaxima) -> GevResult<NonStationaryParameters> {
        let linked = self.covariates.linked();
        let base = match GevModel::new(self.options.clone()).fit(data) {
            Ok(fit) => fit.params,
            Err(e) => {
                log::debug!("stationary start failed ({e}); using the initial-guess policy");
                feasible_start(self.options.init.initial_guess(data)?, data)?
            }
        };
        Ok(NonStationaryParameters::from_stationary(&base, linked))
    }
}

impl LogLikelihood for NonStationaryGevModel {
    type Data = BlockMaxima;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<f64> {
        let params = NonStationaryParameters::from_theta(theta.view(), self.covariates.linked())?;
        Ok(log_likelihood(&params, &self.covariates, data.values())?)
    }

    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()> {
        validate_theta(theta.view(), theta_len(self.covariates.linked()))?;
        self.covariates.validate_for(data.len())?;
        Ok(())
    }

    fn grad(&self, theta: &Theta, data: &Self::Data) -> OptResult<Grad> {
        let linked = self.covariates.linked();
        let params = NonStationaryParameters::from_theta(theta.view(), linked)?;
        let mut grad = natural_grad(&params, &self.covariates, data.values())?;
        if !linked[1] {
            let j = block_starts(linked)[1];
            grad[j] *= safe_logistic(theta[j]);
        }
        Ok(grad)
    }

    /// Intercept steps follow the stationary model; a slope step moves the
    /// parameter by a comparable amount across the covariate's range.
    fn simplex_steps(&self, theta: &Theta, data: &Self::Data) -> Theta {
        let linked = self.covariates.linked();
        let [li, si, hi] = block_starts(linked);
        let sigma_ref = NonStationaryParameters::from_theta(theta.view(), linked)
            .map(|p| mean_scale(&p, &self.covariates, data.len()))
            .ok()
            .filter(|s| s.is_finite() && *s > 0.0)
            .unwrap_or(1.0);

        let mut steps = Array1::zeros(theta.len());
        steps[li] = 0.1 * sigma_ref;
        steps[si] = if linked[1] {
            0.1 * sigma_ref
        } else {
            0.1 * sigma_ref / safe_logistic(theta[si]).max(GENERAL_TOL)
        };
        steps[hi] = 0.05;
        if linked[0] {
            steps[li + 1] = 0.1 * sigma_ref / width(&self.covariates.location);
        }
        if linked[1] {
            steps[si + 1] = 0.05 * sigma_ref / width(&self.covariates.scale);
        }
        if linked[2] {
            steps[hi + 1] = 0.05 / width(&self.covariates.shape);
        }
        steps
    }
}

/// `NonStationaryFit` — result of a non-stationary maximum-likelihood fit.
///
/// Fields
/// ------
/// - `params`: fitted intercepts and slopes.
/// - `covariates`: the design the model was fitted with.
/// - `log_likelihood`: maximized `ℓ(θ̂)`.
/// - `fingerprint`: identity of the fitted sample.
/// - `outcome`: optimizer diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct NonStationaryFit {
    pub params: NonStationaryParameters,
    pub covariates: GevCovariates,
    pub log_likelihood: f64,
    pub fingerprint: SampleFingerprint,
    pub outcome: OptimOutcome,
}

impl NonStationaryFit {
    /// `(μᵢ, σᵢ, ξᵢ)` for every observation.
    pub fn effective_parameters(&self) -> GevResult<Vec<GevParameters>> {
        (0..self.fingerprint.len).map(|i| self.params.at(&self.covariates.point(i))).collect()
    }

    pub fn return_level(&self, period: f64, point: &CovariatePoint) -> GevResult<f64> {
        self.params.at(point)?.return_level(period)
    }

    /// `T`-period return level at each observed covariate value.
    pub fn return_level_path(&self, period: f64) -> GevResult<Array1<f64>> {
        self.effective_parameters()?.iter().map(|p| p.return_level(period)).collect()
    }

    /// Return levels on a `covariate × period` grid, the same covariate
    /// value driving every linked parameter.
    pub fn return_level_surface(
        &self, covariate_values: &[f64], periods: &[f64],
    ) -> GevResult<Array2<f64>> {
        let points: Vec<CovariatePoint> =
            covariate_values.iter().map(|&c| CovariatePoint::uniform(c)).collect();
        return_level_surface(self, &points, periods)
    }

    /// Labels of the natural layout, e.g. `["location", "location_slope", ...]`.
    pub fn parameter_names(&self) -> Vec<&'static str> {
        let linked = self.params.linked();
        let mut names = Vec::with_capacity(self.params.n_params());
        for (k, (base, slope)) in [
            ("location", "location_slope"),
            ("scale", "scale_slope"),
            ("shape", "shape_slope"),
        ]
        .into_iter()
        .enumerate()
        {
            names.push(base);
            if linked[k] {
                names.push(slope);
            }
        }
        names
    }

    /// Observed-information covariance in the natural layout.
    ///
    /// # Errors
    /// `GevError::SampleMismatch` when `data` is not the fitted sample.
    pub fn covariance(&self, data: &BlockMaxima) -> GevResult<Array2<f64>> {
        if data.fingerprint() != self.fingerprint {
            return Err(GevError::SampleMismatch { model: "non-stationary".to_string() });
        }
        let linked = self.params.linked();
        let covariates = &self.covariates;
        let values = data.values();
        let neg_grad = |nat: &Array1<f64>| -> Array1<f64> {
            NonStationaryParameters::from_natural(nat.view(), linked)
                .and_then(|p| natural_grad(&p, covariates, values))
                .map(|g| -g)
                .unwrap_or_else(|_| Array1::from_elem(nat.len(), f64::NAN))
        };
        Ok(calc_covariance(&neg_grad, &self.params.to_natural())?)
    }

    /// Standard errors in the order of [`parameter_names`](Self::parameter_names).
    pub fn standard_errors(&self, data: &BlockMaxima) -> GevResult<Array1<f64>> {
        let cov = self.covariance(data)?;
        Ok(cov.diag().mapv(|v| v.max(0.0).sqrt()))
    }
}

impl FittedGev for NonStationaryFit {
    fn params_at(&self, point: &CovariatePoint) -> GevResult<GevParameters> {
        self.params.at(point)
    }

    fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    fn n_params(&self) -> usize {
        self.params.n_params()
    }

    fn fingerprint(&self) -> SampleFingerprint {
        self.fingerprint
    }
}

/// Fit a non-stationary GEV with the linked parameters in `covariates`.
pub fn fit_nonstationary(
    data: &BlockMaxima, covariates: &GevCovariates, opts: &FitOptions,
) -> GevResult<NonStationaryFit> {
    NonStationaryGevModel::new(covariates.clone(), opts.clone()).fit(data)
}

// ---- Helper methods ----

fn theta_len(linked: [bool; 3]) -> usize {
    STATIONARY_THETA_LEN + linked.iter().filter(|&&b| b).count()
}

/// First index of the location, scale, and shape blocks.
fn block_starts(linked: [bool; 3]) -> [usize; 3] {
    let l = usize::from(linked[0]);
    let s = usize::from(linked[1]);
    [0, 1 + l, 2 + l + s]
}

fn width(c: &Option<Covariate>) -> f64 {
    c.as_ref()
        .map(|c| {
            let (lo, hi) = c.range();
            hi - lo
        })
        .filter(|w| *w > GENERAL_TOL)
        .unwrap_or(1.0)
}

fn mean_scale(params: &NonStationaryParameters, covariates: &GevCovariates, n: usize) -> f64 {
    (0..n).map(|i| params.scale.at(covariates.point(i).scale)).sum::<f64>() / n as f64
}

/// Parameters at observation `i`, rejecting `σᵢ ≤ 0`.
fn obs_params(
    params: &NonStationaryParameters, covariates: &GevCovariates, i: usize,
) -> GevResult<(GevParameters, CovariatePoint)> {
    let point = covariates.point(i);
    let sigma = params.scale.at(point.scale);
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(GevError::NonPositiveScaleOnRange { index: i, value: sigma });
    }
    Ok((params.at(&point)?, point))
}

fn log_likelihood(
    params: &NonStationaryParameters, covariates: &GevCovariates, data: ArrayView1<f64>,
) -> GevResult<f64> {
    data.iter().enumerate().try_fold(0.0, |acc, (i, &x)| -> GevResult<f64> {
        let (p, _) = obs_params(params, covariates, i)?;
        Ok(acc + obs_loglik(&p, x, i)?)
    })
}

/// `∇ℓ` in the natural layout.
fn natural_grad(
    params: &NonStationaryParameters, covariates: &GevCovariates, data: ArrayView1<f64>,
) -> GevResult<Array1<f64>> {
    let linked = params.linked();
    let [li, si, hi] = block_starts(linked);
    let mut grad = Array1::zeros(theta_len(linked));
    for (i, &x) in data.iter().enumerate() {
        let (p, c) = obs_params(params, covariates, i)?;
        let t = obs_terms(&p, x, i)?;
        grad[li] += t.d_location;
        grad[si] += t.d_scale;
        grad[hi] += t.d_shape;
        if linked[0] {
            grad[li + 1] += t.d_location * c.location;
        }
        if linked[1] {
            grad[si + 1] += t.d_scale * c.scale;
        }
        if linked[2] {
            grad[hi + 1] += t.d_shape * c.shape;
        }
    }
    Ok(grad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extremes::{
        errors::GevErrorKind,
        models::stationary::fit_gev,
    };
    use approx::assert_relative_eq;
    use ndarray::array;
    use rand::{SeedableRng, distributions::Distribution, rngs::StdRng};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - θ / natural layout mappings for linked and unlinked scale.
    // - `LogLikelihood` conformance (`grad` vs finite differences).
    // - Reduction to the stationary model and recovery of a location trend.
    // - Scale positivity, sample-size and covariate-length errors.
    // - Return-level path, surface, and standard errors.
    // -------------------------------------------------------------------------

    fn trend_sample(n: usize, slope: f64, seed: u64) -> (BlockMaxima, Covariate) {
        let mut rng = StdRng::seed_from_u64(seed);
        let values = (0..n).map(|i| {
            GevParameters::new(0.1, 10.0 + slope * i as f64, 2.0).unwrap().sample(&mut rng)
        });
        (BlockMaxima::new(Array1::from_iter(values)).unwrap(), Covariate::time_index(n).unwrap())
    }

    #[test]
    // Purpose
    // -------
    // θ and natural layouts agree, with softplus only on an unlinked scale.
    //
    // Given
    // -----
    // - Location-linked and scale-linked parameter sets.
    //
    // Expect
    // ------
    // - `from_theta(to_theta(p)) == p`; the linked scale intercept is stored
    //   raw; names follow the layout.
    fn theta_layout_round_trips() {
        let loc = NonStationaryParameters {
            location: AffineParameter::linear(10.0, 0.05),
            scale: AffineParameter::constant(2.0),
            shape: AffineParameter::constant(0.1),
        };
        let back = NonStationaryParameters::from_theta(loc.to_theta().view(), loc.linked()).unwrap();
        assert_relative_eq!(back.scale.intercept, 2.0, epsilon = 1e-12);
        assert_eq!(back.location, loc.location);
        assert_eq!(loc.n_params(), 4);

        let scale = NonStationaryParameters {
            location: AffineParameter::constant(10.0),
            scale: AffineParameter::linear(2.0, -0.01),
            shape: AffineParameter::constant(0.1),
        };
        assert_eq!(scale.to_theta(), array![10.0, 2.0, -0.01, 0.1]);
        assert_eq!(scale.at(&CovariatePoint::uniform(100.0)).unwrap().scale(), 1.0);
    }

    #[test]
    // Purpose
    // -------
    // The analytic gradient matches central differences with every
    // parameter linked.
    //
    // Given
    // -----
    // - 150 trend draws; θ with non-zero slopes on all three parameters.
    //
    // Expect
    // ------
    // - Agreement to 1e-4 relative per coordinate.
    fn grad_matches_finite_differences() {
        let (data, t) = trend_sample(150, 0.02, 7);
        let cov = GevCovariates::none()
            .with_location(t.clone())
            .with_scale(t.clone())
            .with_shape(t);
        let model = NonStationaryGevModel::new(cov, FitOptions::default());
        let theta = array![10.0, 0.02, 2.0, 0.001, 0.05, 0.0002];

        let g = model.grad(&theta, &data).unwrap();
        let h = 1e-6;
        for k in 0..theta.len() {
            let mut up = theta.clone();
            let mut dn = theta.clone();
            up[k] += h;
            dn[k] -= h;
            let fd = (model.value(&up, &data).unwrap() - model.value(&dn, &data).unwrap()) / (2.0 * h);
            assert_relative_eq!(g[k], fd, max_relative = 1e-3, epsilon = 1e-4);
        }
    }

    #[test]
    // Purpose
    // -------
    // With nothing linked, or a zero covariate, the fit is the stationary fit.
    //
    // Given
    // -----
    // - 300 stationary draws; no links, and location linked to all zeros.
    //
    // Expect
    // ------
    // - Log-likelihoods and parameters within optimizer tolerance of the
    //   stationary fit.
    fn reduces_to_stationary() {
        let (data, _) = trend_sample(300, 0.0, 11);
        let stationary = fit_gev(&data, &FitOptions::default()).unwrap();

        let none = fit_nonstationary(&data, &GevCovariates::none(), &FitOptions::default()).unwrap();
        assert_relative_eq!(none.log_likelihood, stationary.log_likelihood, epsilon = 1e-4);
        assert_eq!(none.n_params(), 3);

        let zeros = Covariate::new(Array1::zeros(300)).unwrap();
        let flat = fit_nonstationary(
            &data,
            &GevCovariates::none().with_location(zeros),
            &FitOptions::default(),
        )
        .unwrap();
        assert_relative_eq!(flat.log_likelihood, stationary.log_likelihood, epsilon = 1e-4);
        let p = flat.params_at(&CovariatePoint::default()).unwrap();
        assert_relative_eq!(p.location(), stationary.params.location(), epsilon = 1e-2);
        assert_relative_eq!(p.shape(), stationary.params.shape(), epsilon = 1e-2);
    }

    #[test]
    // Purpose
    // -------
    // A linear location trend is recovered and improves the likelihood.
    //
    // Given
    // -----
    // - 200 draws with μᵢ = 10 + 0.05·i.
    //
    // Expect
    // ------
    // - Slope within 0.02 of 0.05; ℓ above the stationary ℓ; increasing
    //   100-year return-level path; standard errors finite.
    fn recovers_location_trend() {
        let (data, t) = trend_sample(200, 0.05, 13);
        let cov = GevCovariates::none().with_location(t);

        let fit = fit_nonstationary(&data, &cov, &FitOptions::default()).unwrap();
        let stationary = fit_gev(&data, &FitOptions::default()).unwrap();

        let slope = fit.params.location.slope.unwrap();
        assert!((slope - 0.05).abs() < 0.02, "slope = {slope}");
        assert!(fit.log_likelihood > stationary.log_likelihood);
        assert_eq!(fit.n_params(), 4);

        let path = fit.return_level_path(100.0).unwrap();
        assert_eq!(path.len(), 200);
        assert!(path[199] > path[0]);

        let surface = fit.return_level_surface(&[0.0, 100.0, 199.0], &[10.0, 100.0]).unwrap();
        assert_eq!(surface.dim(), (3, 2));
        assert!(surface[[2, 1]] > surface[[0, 1]]);
        assert!(surface[[0, 1]] > surface[[0, 0]]);

        let se = fit.standard_errors(&data).unwrap();
        assert_eq!(fit.parameter_names(), vec!["location", "location_slope", "scale", "shape"]);
        assert!(se.iter().all(|v| v.is_finite() && *v > 0.0));
    }

    #[test]
    // Purpose
    // -------
    // A linked scale that turns non-positive on the observed range is an
    // infeasible point and the fit keeps σᵢ > 0.
    //
    // Given
    // -----
    // - 120 draws with σ shrinking from 3 to about 1; θ with σ₁ = −0.1.
    //
    // Expect
    // ------
    // - `value` errors; the fitted σᵢ are all positive.
    fn linked_scale_stays_positive() {
        let mut rng = StdRng::seed_from_u64(19);
        let values: Vec<f64> = (0..120)
            .map(|i| GevParameters::new(0.0, 5.0, 3.0 - 0.016 * i as f64).unwrap().sample(&mut rng))
            .collect();
        let data = BlockMaxima::from_slice(&values).unwrap();
        let cov = GevCovariates::none().with_scale(Covariate::time_index(120).unwrap());
        let model = NonStationaryGevModel::new(cov.clone(), FitOptions::default());

        assert!(model.value(&array![5.0, 3.0, -0.1, 0.0], &data).is_err());

        let fit = model.fit(&data).unwrap();
        let eff = fit.effective_parameters().unwrap();
        assert!(eff.iter().all(|p| p.scale() > 0.0));
        assert!(fit.params.scale.slope.unwrap() < 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Input errors map onto the documented kinds.
    //
    // Given
    // -----
    // - Five observations with all three parameters linked (k = 6).
    // - A covariate one element short.
    //
    // Expect
    // ------
    // - `InsufficientData`; `InvalidArgument`.
    fn input_errors_have_documented_kinds() {
        let data = BlockMaxima::from_slice(&[1.0, 3.0, 2.0, 5.0, 4.0]).unwrap();
        let t = Covariate::time_index(5).unwrap();
        let all = GevCovariates::none().with_location(t.clone()).with_scale(t.clone()).with_shape(t);
        let err = fit_nonstationary(&data, &all, &FitOptions::default()).unwrap_err();
        assert_eq!(err, GevError::TooFewObservations { needed: 6, actual: 5 });
        assert_eq!(err.kind(), GevErrorKind::InsufficientData);

        let short = GevCovariates::none().with_location(Covariate::time_index(4).unwrap());
        let err = fit_nonstationary(&data, &short, &FitOptions::default()).unwrap_err();
        assert_eq!(err.kind(), GevErrorKind::InvalidArgument);
    }
}
