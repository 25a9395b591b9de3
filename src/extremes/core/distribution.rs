//! GEV distribution functions on [`GevParameters`].
//!
//! Purpose
//! -------
//! Evaluate the GEV family: CDF, survival, density, quantile, return levels,
//! return periods, moments, and per-observation log-likelihood terms with
//! their analytic derivatives.
//!
//! Key behaviors
//! -------------
//! - `F(x) = exp(−(1 + ξz)^{−1/ξ})`, `z = (x − μ)/σ`, evaluated through
//!   [`log1p_ratio`] so the Gumbel limit `exp(−e^{−z})` is taken explicitly
//!   for `|ξ| < GUMBEL_EPS`.
//! - `Q(p) = μ + σ·((−ln p)^{−ξ} − 1)/ξ` through [`expm1_ratio`], with the
//!   same explicit Gumbel branch `μ − σ ln(−ln p)`.
//! - `return_level(T) = Q(1 − 1/T)` and `return_period(x) = 1/(1 − F(x))`.
//! - `GevParameters` implements `statrs` `Continuous`, `ContinuousCDF`,
//!   `Min`, `Max`, `Distribution` (moments) and `rand` `Distribution<f64>`
//!   (inverse-transform sampling).
//!
//! Invariants & assumptions
//! ------------------------
//! - Outside the support the density is 0 (`ln_pdf = −∞`) and the CDF is 0
//!   below a lower end point or 1 above an upper end point.
//! - Likelihood helpers report points outside the support as
//!   `GevError::OutsideSupport` carrying `1 + ξz`, which the optimizer treats
//!   as an infeasible point.
use crate::{
    extremes::{
        core::{
            params::GevParameters,
            validation::{validate_probability, validate_return_period},
        },
        errors::{GevError, GevResult},
    },
    optimization::numerical_stability::transformations::{GUMBEL_EPS, expm1_ratio, log1p_ratio},
};
use ndarray::ArrayView1;
use rand::{Rng, distributions::Open01};
use statrs::{
    distribution::{Continuous, ContinuousCDF},
    function::gamma::gamma,
    statistics::{Max, Min},
};
use std::f64::consts::PI;

/// Euler–Mascheroni constant, the Gumbel mean offset.
pub const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Skewness of the Gumbel law, `12√6 ζ(3)/π³`.
pub const GUMBEL_SKEWNESS: f64 = 1.139_547_099_404_648_7;

/// Below this `|ξ|` the moment formulas use their Gumbel values.
const MOMENT_GUMBEL_EPS: f64 = 1e-4;

impl GevParameters {
    /// `1 + ξz`; the point is in the support iff this is `> 0`.
    #[inline]
    pub fn support_arg(&self, x: f64) -> f64 {
        1.0 + self.shape() * self.standardize(x)
    }

    /// Whether `x` lies in the (open) support.
    pub fn in_support(&self, x: f64) -> bool {
        self.shape().abs() < GUMBEL_EPS || self.support_arg(x) > 0.0
    }

    /// Whether every observation lies in the support.
    pub fn supports_all(&self, data: ArrayView1<f64>) -> bool {
        data.iter().all(|&x| self.in_support(x))
    }

    /// Lower end point: `μ − σ/ξ` for `ξ > 0`, otherwise `−∞`.
    pub fn lower_bound(&self) -> f64 {
        if self.shape() >= GUMBEL_EPS {
            self.location() - self.scale() / self.shape()
        } else {
            f64::NEG_INFINITY
        }
    }

    /// Upper end point: `μ − σ/ξ` for `ξ < 0`, otherwise `+∞`.
    pub fn upper_bound(&self) -> f64 {
        if self.shape() <= -GUMBEL_EPS {
            self.location() - self.scale() / self.shape()
        } else {
            f64::INFINITY
        }
    }

    /// `(−ln F(x))`, i.e. `(1 + ξz)^{−1/ξ}`, or `None` outside the support.
    fn tail_term(&self, x: f64) -> Option<f64> {
        let xi = self.shape();
        let z = self.standardize(x);
        if xi.abs() < GUMBEL_EPS {
            return Some((-z).exp());
        }
        if 1.0 + xi * z <= 0.0 {
            return None;
        }
        Some((-log1p_ratio(xi, z)).exp())
    }

    /// Cumulative distribution function `F(x)`.
    pub fn cdf(&self, x: f64) -> f64 {
        match self.tail_term(x) {
            Some(y) => (-y).exp(),
            None if self.shape() > 0.0 => 0.0,
            None => 1.0,
        }
    }

    /// Survival function `1 − F(x)`, accurate in the far upper tail.
    pub fn sf(&self, x: f64) -> f64 {
        match self.tail_term(x) {
            Some(y) => -(-y).exp_m1(),
            None if self.shape() > 0.0 => 1.0,
            None => 0.0,
        }
    }

    /// Log-density; `−∞` outside the support.
    pub fn ln_pdf(&self, x: f64) -> f64 {
        let xi = self.shape();
        let z = self.standardize(x);
        if xi.abs() >= GUMBEL_EPS && 1.0 + xi * z <= 0.0 {
            return f64::NEG_INFINITY;
        }
        let r = log1p_ratio(xi, z);
        -self.scale().ln() - (1.0 + xi) * r - (-r).exp()
    }

    pub fn pdf(&self, x: f64) -> f64 {
        self.ln_pdf(x).exp()
    }

    /// Quantile without argument checks; `p` must lie in (0, 1).
    #[inline]
    pub fn quantile_unchecked(&self, p: f64) -> f64 {
        let a = -(-p.ln()).ln();
        self.location() + self.scale() * expm1_ratio(self.shape(), a)
    }

    /// Quantile `Q(p)` for a non-exceedance probability `p`.
    ///
    /// `Q(p) = μ + σ/ξ · ((−ln p)^(−ξ) − 1)`, which is SciPy's
    /// `μ + σ/c · (1 − (−ln p)^c)` with `c = −ξ`.
    ///
    /// # Errors
    /// `GevError::InvalidProbability` unless `0 < p < 1`.
    ///
    /// # Examples
    /// ```rust
    /// use rust_extremes::extremes::core::params::GevParameters;
    ///
    /// // Heavy upper tail: ξ = 0.2 here, genextreme(c = -0.2) in SciPy.
    /// let g = GevParameters::new(0.2, 10.0, 2.0)?;
    /// let (p, c) = (0.99_f64, g.scipy_shape());
    /// let y = -p.ln();
    /// let q_xi = 10.0 + 2.0 / 0.2 * (y.powf(-0.2) - 1.0);
    /// let q_c = 10.0 + 2.0 / c * (1.0 - y.powf(c));
    ///
    /// let q = g.quantile(p)?;
    /// assert!((q - q_xi).abs() < 1e-9);
    /// assert!((q - q_c).abs() < 1e-9);
    /// assert_eq!(GevParameters::from_scipy(c, 10.0, 2.0)?, g);
    /// # Ok::<(), rust_extremes::extremes::errors::GevError>(())
    /// ```
    pub fn quantile(&self, p: f64) -> GevResult<f64> {
        validate_probability(p)?;
        Ok(self.quantile_unchecked(p))
    }

    /// Level exceeded on average once every `period` blocks, `Q(1 − 1/T)`.
    ///
    /// # Errors
    /// `GevError::InvalidReturnPeriod` unless `T > 1` and finite.
    pub fn return_level(&self, period: f64) -> GevResult<f64> {
        validate_return_period(period)?;
        // −ln(1 − 1/T) via ln_1p keeps precision for long periods.
        let a = -(-(-1.0 / period).ln_1p()).ln();
        Ok(self.location() + self.scale() * expm1_ratio(self.shape(), a))
    }

    /// Probability of exceeding `x` in one block, `1 − F(x)`.
    pub fn exceedance_probability(&self, x: f64) -> f64 {
        self.sf(x)
    }

    /// Return period of level `x`, `1/(1 − F(x))`.
    ///
    /// # Errors
    /// - `GevError::InvalidLocation` for a non-finite `x`.
    /// - `GevError::AboveUpperBound` when `1 − F(x)` is zero (at or beyond
    ///   a finite upper end point, or numerically beyond reach).
    pub fn return_period(&self, x: f64) -> GevResult<f64> {
        if !x.is_finite() {
            return Err(GevError::InvalidLocation { value: x });
        }
        let q = self.sf(x);
        if q <= 0.0 {
            return Err(GevError::AboveUpperBound { x, bound: self.upper_bound() });
        }
        Ok(1.0 / q)
    }

    /// Log-likelihood of a sample, `Σ ln f(xᵢ)`.
    ///
    /// # Errors
    /// `GevError::OutsideSupport` for the first observation outside the
    /// support.
    pub fn log_likelihood(&self, data: ArrayView1<f64>) -> GevResult<f64> {
        data.iter()
            .enumerate()
            .try_fold(0.0, |acc, (i, &x)| -> GevResult<f64> { Ok(acc + obs_loglik(self, x, i)?) })
    }
}

// ---- Per-observation likelihood terms ----

/// Log-density and its derivatives with respect to `(μ, σ, ξ)` at one
/// observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ObsTerms {
    pub loglik: f64,
    pub d_location: f64,
    pub d_scale: f64,
    pub d_shape: f64,
}

/// Log-density at observation `index`.
pub(crate) fn obs_loglik(params: &GevParameters, x: f64, index: usize) -> GevResult<f64> {
    let xi = params.shape();
    let z = params.standardize(x);
    let t = 1.0 + xi * z;
    if xi.abs() >= GUMBEL_EPS && t <= 0.0 {
        return Err(GevError::OutsideSupport { index, value: t });
    }
    let r = log1p_ratio(xi, z);
    Ok(-params.scale().ln() - (1.0 + xi) * r - (-r).exp())
}

/// Log-density plus analytic derivatives at observation `index`.
///
/// With `t = 1 + ξz` and `y = t^{−1/ξ}`:
/// - `∂ℓ/∂μ = ((1 + ξ) − y)/(σt)`
/// - `∂ℓ/∂σ = −1/σ + z((1 + ξ) − y)/(σt)`
/// - `∂ℓ/∂ξ = (1 − y) ln t/ξ² − z((1 + ξ) − y)/(ξt)`
///
/// and for `|ξ| < GUMBEL_EPS` the limits `(1 − e^{−z})/σ`,
/// `−1/σ + z(1 − e^{−z})/σ`, `z²(1 − e^{−z})/2 − z`.
pub(crate) fn obs_terms(params: &GevParameters, x: f64, index: usize) -> GevResult<ObsTerms> {
    let xi = params.shape();
    let sigma = params.scale();
    let z = params.standardize(x);

    if xi.abs() < GUMBEL_EPS {
        let y = (-z).exp();
        let w = 1.0 - y;
        return Ok(ObsTerms {
            loglik: -sigma.ln() - z - y,
            d_location: w / sigma,
            d_scale: (-1.0 + z * w) / sigma,
            d_shape: 0.5 * z * z * w - z,
        });
    }

    let t = 1.0 + xi * z;
    if t <= 0.0 {
        return Err(GevError::OutsideSupport { index, value: t });
    }
    let ln_t = (xi * z).ln_1p();
    let r = ln_t / xi;
    let y = (-r).exp();
    let w = (1.0 + xi) - y;
    Ok(ObsTerms {
        loglik: -sigma.ln() - (1.0 + xi) * r - y,
        d_location: w / (sigma * t),
        d_scale: (-1.0 + z * w / t) / sigma,
        d_shape: (1.0 - y) * ln_t / (xi * xi) - z * w / (xi * t),
    })
}

// ---- Moments ----

/// Skewness of the GEV as a function of the shape alone (finite for
/// `ξ < 1/3`); increasing in `ξ`.
pub fn gev_skewness(xi: f64) -> f64 {
    if xi.abs() < MOMENT_GUMBEL_EPS {
        return GUMBEL_SKEWNESS;
    }
    let g1 = gamma(1.0 - xi);
    let g2 = gamma(1.0 - 2.0 * xi);
    let g3 = gamma(1.0 - 3.0 * xi);
    xi.signum() * (g3 - 3.0 * g1 * g2 + 2.0 * g1.powi(3)) / (g2 - g1 * g1).powf(1.5)
}

impl statrs::statistics::Distribution<f64> for GevParameters {
    /// Finite for `ξ < 1`.
    fn mean(&self) -> Option<f64> {
        let (xi, mu, sigma) = (self.shape(), self.location(), self.scale());
        if xi.abs() < MOMENT_GUMBEL_EPS {
            Some(mu + sigma * EULER_GAMMA)
        } else if xi < 1.0 {
            Some(mu + sigma * (gamma(1.0 - xi) - 1.0) / xi)
        } else {
            None
        }
    }

    /// Finite for `ξ < 1/2`.
    fn variance(&self) -> Option<f64> {
        let (xi, sigma) = (self.shape(), self.scale());
        if xi.abs() < MOMENT_GUMBEL_EPS {
            Some(sigma * sigma * PI * PI / 6.0)
        } else if xi < 0.5 {
            let g1 = gamma(1.0 - xi);
            let g2 = gamma(1.0 - 2.0 * xi);
            Some(sigma * sigma * (g2 - g1 * g1) / (xi * xi))
        } else {
            None
        }
    }

    /// Finite for `ξ < 1/3`.
    fn skewness(&self) -> Option<f64> {
        (self.shape() < 1.0 / 3.0).then(|| gev_skewness(self.shape()))
    }
}

// ---- statrs / rand trait surface ----

impl Min<f64> for GevParameters {
    fn min(&self) -> f64 {
        self.lower_bound()
    }
}

impl Max<f64> for GevParameters {
    fn max(&self) -> f64 {
        self.upper_bound()
    }
}

impl Continuous<f64, f64> for GevParameters {
    fn pdf(&self, x: f64) -> f64 {
        GevParameters::pdf(self, x)
    }

    fn ln_pdf(&self, x: f64) -> f64 {
        GevParameters::ln_pdf(self, x)
    }
}

impl ContinuousCDF<f64, f64> for GevParameters {
    fn cdf(&self, x: f64) -> f64 {
        GevParameters::cdf(self, x)
    }

    fn sf(&self, x: f64) -> f64 {
        GevParameters::sf(self, x)
    }

    /// Closed-form inverse; the end points for `p ∈ {0, 1}`, NaN outside
    /// `[0, 1]`.
    fn inverse_cdf(&self, p: f64) -> f64 {
        if p == 0.0 {
            self.lower_bound()
        } else if p == 1.0 {
            self.upper_bound()
        } else if p > 0.0 && p < 1.0 {
            self.quantile_unchecked(p)
        } else {
            f64::NAN
        }
    }
}

impl rand::distributions::Distribution<f64> for GevParameters {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u: f64 = rng.sample(Open01);
        self.quantile_unchecked(u)
    }
}
