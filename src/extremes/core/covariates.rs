//! Covariates for non-stationary GEV models.
//!
//! Purpose
//! -------
//! Describe which of `(μ, σ, ξ)` vary linearly with an external driver and
//! carry the driver values observed alongside each block maximum.
//!
//! Key behaviors
//! -------------
//! - [`Covariate`] is a validated, finite array of driver values (calendar
//!   years, decimal time, a global-mean temperature, ...).
//!   [`Covariate::time_index`] builds the `0..n` index convention.
//! - [`GevCovariates`] links any subset of the three parameters to its own
//!   covariate; an unlinked parameter stays constant.
//! - [`CovariatePoint`] holds one value per parameter for evaluating a
//!   fitted model at a single covariate location.
//!
//! Invariants & assumptions
//! ------------------------
//! - Linked covariates have the sample length; checked by
//!   [`GevCovariates::validate_for`].
//! - The driver's meaning is the caller's; nothing here assumes an index.
use crate::extremes::{
    core::validation::validate_covariate,
    errors::{GevError, GevResult},
};
use ndarray::{Array1, ArrayView1};

/// Validated, non-empty covariate of finite values.
#[derive(Debug, Clone, PartialEq)]
pub struct Covariate {
    values: Array1<f64>,
}

impl Covariate {
    /// # Errors
    /// - `GevError::EmptySample` for an empty array.
    /// - `GevError::NonFiniteCovariate` for NaN/±∞.
    pub fn new(values: Array1<f64>) -> GevResult<Self> {
        if values.is_empty() {
            return Err(GevError::EmptySample);
        }
        validate_covariate(values.view(), values.len())?;
        Ok(Self { values })
    }

    /// `[0, 1, …, n − 1]`.
    pub fn time_index(n: usize) -> GevResult<Self> {
        Self::new(Array1::from_iter((0..n).map(|i| i as f64)))
    }

    pub fn values(&self) -> ArrayView1<'_, f64> {
        self.values.view()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(min, max)` of the observed values.
    pub fn range(&self) -> (f64, f64) {
        self.values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &c| (lo.min(c), hi.max(c)))
    }
}

/// Which parameters are covariate-linked, with their drivers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GevCovariates {
    pub location: Option<Covariate>,
    pub scale: Option<Covariate>,
    pub shape: Option<Covariate>,
}

impl GevCovariates {
    pub fn new(
        location: Option<Covariate>, scale: Option<Covariate>, shape: Option<Covariate>,
    ) -> Self {
        Self { location, scale, shape }
    }

    /// No linked parameters (reduces to the stationary model).
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_location(mut self, c: Covariate) -> Self {
        self.location = Some(c);
        self
    }

    pub fn with_scale(mut self, c: Covariate) -> Self {
        self.scale = Some(c);
        self
    }

    pub fn with_shape(mut self, c: Covariate) -> Self {
        self.shape = Some(c);
        self
    }

    /// Linked flags in `(location, scale, shape)` order.
    pub fn linked(&self) -> [bool; 3] {
        [self.location.is_some(), self.scale.is_some(), self.shape.is_some()]
    }

    /// Number of covariate-linked parameters.
    pub fn n_linked(&self) -> usize {
        self.linked().iter().filter(|&&b| b).count()
    }

    /// Check every linked covariate against the sample length `n`.
    ///
    /// # Errors
    /// `GevError::CovariateLengthMismatch` naming the first offender.
    pub fn validate_for(&self, n: usize) -> GevResult<()> {
        for c in [&self.location, &self.scale, &self.shape].into_iter().flatten() {
            validate_covariate(c.values(), n)?;
        }
        Ok(())
    }

    /// Covariate values at observation `i`; unlinked parameters get `0`.
    pub fn point(&self, i: usize) -> CovariatePoint {
        let at = |c: &Option<Covariate>| c.as_ref().map_or(0.0, |c| c.values[i]);
        CovariatePoint {
            location: at(&self.location),
            scale: at(&self.scale),
            shape: at(&self.shape),
        }
    }
}

/// Covariate values for one evaluation of a non-stationary model.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CovariatePoint {
    pub location: f64,
    pub scale: f64,
    pub shape: f64,
}

impl CovariatePoint {
    pub fn new(location: f64, scale: f64, shape: f64) -> Self {
        Self { location, scale, shape }
    }

    /// Same driver value for every linked parameter (the common case of
    /// a single time covariate).
    pub fn uniform(c: f64) -> Self {
        Self { location: c, scale: c, shape: c }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Covariate construction, linkage bookkeeping, and per-observation points.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // The time index follows the `0..n` convention and reports its range.
    //
    // Given
    // -----
    // - `time_index(4)`.
    //
    // Expect
    // ------
    // - values [0, 1, 2, 3] and range (0, 3).
    fn time_index_counts_from_zero() {
        let c = Covariate::time_index(4).unwrap();
        assert_eq!(c.values(), array![0.0, 1.0, 2.0, 3.0].view());
        assert_eq!(c.range(), (0.0, 3.0));
        assert!(matches!(Covariate::time_index(0), Err(GevError::EmptySample)));
    }

    #[test]
    // Purpose
    // -------
    // Linkage flags, validation, and points follow the linked subset.
    //
    // Given
    // -----
    // - Location linked to [1, 2, 3] and shape linked to [10, 20, 30].
    //
    // Expect
    // ------
    // - flags [true, false, true], two linked, point(1) = (2, 0, 20), and a
    //   length mismatch against n = 4.
    fn linked_subset_drives_points() {
        let cov = GevCovariates::none()
            .with_location(Covariate::new(array![1.0, 2.0, 3.0]).unwrap())
            .with_shape(Covariate::new(array![10.0, 20.0, 30.0]).unwrap());

        assert_eq!(cov.linked(), [true, false, true]);
        assert_eq!(cov.n_linked(), 2);
        assert_eq!(cov.point(1), CovariatePoint::new(2.0, 0.0, 20.0));
        assert!(cov.validate_for(3).is_ok());
        assert_eq!(
            cov.validate_for(4),
            Err(GevError::CovariateLengthMismatch { expected: 4, actual: 3 })
        );
    }
}
