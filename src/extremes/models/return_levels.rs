//! Return-level projection for fitted and hand-built GEV models.
//!
//! `return_level(T) = Q(1 − 1/T)`. A stationary model gives one curve; a
//! non-stationary model gives one curve per covariate point, and a grid of
//! points and periods gives a `points × periods` surface.
use crate::extremes::{
    core::{
        covariates::CovariatePoint, params::GevParameters, validation::validate_return_period,
    },
    errors::GevResult,
    models::FittedGev,
};
use ndarray::{Array1, Array2};

/// Return levels paired with their periods.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnLevelCurve {
    pub periods: Array1<f64>,
    pub levels: Array1<f64>,
}

impl ReturnLevelCurve {
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

/// Return levels of `params` at each period.
///
/// # Errors
/// `GevError::InvalidReturnPeriod` for the first `T ≤ 1` or non-finite `T`.
pub fn return_levels(params: &GevParameters, periods: &[f64]) -> GevResult<ReturnLevelCurve> {
    let levels = periods.iter().map(|&t| params.return_level(t)).collect::<GevResult<Array1<f64>>>()?;
    Ok(ReturnLevelCurve { periods: Array1::from(periods.to_vec()), levels })
}

/// Quantiles of `params` at each non-exceedance probability.
///
/// # Errors
/// `GevError::InvalidProbability` unless every `p ∈ (0, 1)`.
pub fn quantiles(params: &GevParameters, probs: &[f64]) -> GevResult<Array1<f64>> {
    probs.iter().map(|&p| params.quantile(p)).collect()
}

/// Return-level curve of a fitted model at one covariate point.
pub fn project<M: FittedGev + ?Sized>(
    model: &M, point: &CovariatePoint, periods: &[f64],
) -> GevResult<ReturnLevelCurve> {
    return_levels(&model.params_at(point)?, periods)
}

/// `levels[[i, j]]` is the `periods[j]` return level at `points[i]`.
///
/// Periods are validated before any point is evaluated.
pub fn return_level_surface<M: FittedGev + ?Sized>(
    model: &M, points: &[CovariatePoint], periods: &[f64],
) -> GevResult<Array2<f64>> {
    for &t in periods {
        validate_return_period(t)?;
    }
    let mut surface = Array2::zeros((points.len(), periods.len()));
    for (i, point) in points.iter().enumerate() {
        let params = model.params_at(point)?;
        for (j, &t) in periods.iter().enumerate() {
            surface[[i, j]] = params.return_level(t)?;
        }
    }
    Ok(surface)
}
