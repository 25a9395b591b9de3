//! GEV parameterization and the optimizer-space mapping.
//!
//! This module provides the **model-space** value type [`GevParameters`]
//! `(ξ, μ, σ)` and its **numerically stable mapping** to an optimizer-space
//! vector θ (as `ndarray::Array1<f64>`).
//!
//! ## Sign convention
//! - `ξ > 0`: heavy (Fréchet-type) upper tail, support bounded below.
//! - `ξ < 0`: bounded (Weibull-type) upper tail at `μ − σ/ξ`.
//! - `ξ = 0`: Gumbel, unbounded support.
//! - SciPy's `genextreme` uses `c = −ξ`; see [`GevParameters::from_scipy`]
//!   and [`GevParameters::scipy_shape`].
//!
//! ## Mapping conventions
//! - Stationary θ is `[μ, softplus⁻¹(σ), ξ]`, so every finite θ maps to a
//!   triple with `σ > 0`.
//!
//! ## Invariants validated by constructors
//! - `σ > 0` and finite; `μ`, `ξ` finite.
use crate::{
    extremes::{
        core::validation::{validate_location, validate_scale, validate_shape, validate_theta},
        errors::GevResult,
    },
    optimization::numerical_stability::transformations::{safe_softplus, safe_softplus_inv},
};
use ndarray::{Array1, ArrayView1, array};

/// Length of the stationary optimizer vector θ.
pub const STATIONARY_THETA_LEN: usize = 3;

/// `GevParameters` — one member of the GEV family.
///
/// Fields are private so a constructed value always satisfies its
/// invariants; read them through [`shape`](Self::shape),
/// [`location`](Self::location) and [`scale`](Self::scale).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GevParameters {
    shape: f64,
    location: f64,
    scale: f64,
}

impl GevParameters {
    /// Construct a validated triple `(ξ, μ, σ)`.
    ///
    /// # Errors
    /// - `GevError::InvalidShape` / `InvalidLocation` for non-finite values.
    /// - `GevError::InvalidScale` unless `σ` is finite and `> 0`.
    pub fn new(shape: f64, location: f64, scale: f64) -> GevResult<Self> {
        validate_shape(shape)?;
        validate_location(location)?;
        validate_scale(scale)?;
        Ok(Self { shape, location, scale })
    }

    /// Gumbel member (`ξ = 0`).
    pub fn gumbel(location: f64, scale: f64) -> GevResult<Self> {
        Self::new(0.0, location, scale)
    }

    /// Build from SciPy `genextreme(c, loc, scale)` arguments (`ξ = −c`).
    pub fn from_scipy(c: f64, loc: f64, scale: f64) -> GevResult<Self> {
        Self::new(-c, loc, scale)
    }

    /// Shape ξ.
    pub fn shape(&self) -> f64 {
        self.shape
    }

    /// Location μ.
    pub fn location(&self) -> f64 {
        self.location
    }

    /// Scale σ.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Shape in SciPy's convention, `c = −ξ`.
    pub fn scipy_shape(&self) -> f64 {
        -self.shape
    }

    /// Map θ = `[μ, softplus⁻¹(σ), ξ]` back to model space.
    ///
    /// # Errors
    /// - `GevError::ThetaLengthMismatch` / `NonFiniteTheta` for a malformed θ.
    /// - `GevError::InvalidScale` when softplus underflows to zero.
    pub fn from_theta(theta: ArrayView1<f64>) -> GevResult<Self> {
        validate_theta(theta, STATIONARY_THETA_LEN)?;
        Self::new(theta[2], theta[0], safe_softplus(theta[1]))
    }

    /// Inverse of [`from_theta`](Self::from_theta).
    pub fn to_theta(&self) -> Array1<f64> {
        array![self.location, safe_softplus_inv(self.scale), self.shape]
    }

    /// Standardized value `z = (x − μ)/σ`.
    #[inline]
    pub fn standardize(&self, x: f64) -> f64 {
        (x - self.location) / self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extremes::errors::GevError;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Constructor validation, SciPy conversions, and the θ mapping.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // The constructor rejects invalid triples by field.
    //
    // Given
    // -----
    // - σ = 0, μ = NaN, ξ = ∞.
    //
    // Expect
    // ------
    // - `InvalidScale`, `InvalidLocation`, `InvalidShape`.
    fn new_rejects_invalid_fields() {
        assert_eq!(GevParameters::new(0.1, 0.0, 0.0), Err(GevError::InvalidScale { value: 0.0 }));
        assert!(matches!(
            GevParameters::new(0.1, f64::NAN, 1.0),
            Err(GevError::InvalidLocation { .. })
        ));
        assert!(matches!(
            GevParameters::new(f64::INFINITY, 0.0, 1.0),
            Err(GevError::InvalidShape { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // SciPy's shape sign is flipped on the way in and out.
    //
    // Given
    // -----
    // - `from_scipy(c = −0.2, 10, 2)`.
    //
    // Expect
    // ------
    // - ξ = 0.2 and `scipy_shape() = −0.2`.
    fn scipy_conversion_flips_shape() {
        let p = GevParameters::from_scipy(-0.2, 10.0, 2.0).unwrap();
        assert_relative_eq!(p.shape(), 0.2);
        assert_relative_eq!(p.scipy_shape(), -0.2);
        assert_relative_eq!(p.location(), 10.0);
    }

    #[test]
    // Purpose
    // -------
    // θ mapping round-trips and enforces its layout.
    //
    // Given
    // -----
    // - (ξ, μ, σ) = (−0.1, 3, 0.5); then θ of length 2.
    //
    // Expect
    // ------
    // - `from_theta(to_theta(p)) ≈ p`; `ThetaLengthMismatch` for length 2.
    fn theta_mapping_round_trips() {
        let p = GevParameters::new(-0.1, 3.0, 0.5).unwrap();
        let back = GevParameters::from_theta(p.to_theta().view()).unwrap();
        assert_relative_eq!(back.shape(), p.shape(), epsilon = 1e-12);
        assert_relative_eq!(back.location(), p.location(), epsilon = 1e-12);
        assert_relative_eq!(back.scale(), p.scale(), epsilon = 1e-12);

        assert!(matches!(
            GevParameters::from_theta(array![0.0, 1.0].view()),
            Err(GevError::ThetaLengthMismatch { expected: 3, actual: 2 })
        ));
    }
}
