//! Numerical stability utilities.
//!
//! Safe versions of the nonlinear transforms the GEV likelihood leans on.
//! Each helper keeps `f64` arithmetic in a well-conditioned regime with an
//! explicit guard rather than relying on the naïve formula.
//!
//! # Provided items
//! - [`safe_softplus`] / [`safe_softplus_inv`] / [`safe_logistic`]: the
//!   positive-scale reparameterization `σ = ln(1 + e^t)` and its derivative.
//! - [`log1p_ratio`]: `ln(1 + ξz)/ξ`, continuous through `ξ = 0`.
//! - [`expm1_ratio`]: `(e^{ξa} − 1)/ξ`, continuous through `ξ = 0`.
//! - Tolerances [`GUMBEL_EPS`], [`EIGEN_EPS`] and [`GENERAL_TOL`].

/// Below this `|ξ|` the GEV formulas switch to their Gumbel limits.
pub const GUMBEL_EPS: f64 = 1e-8;

/// Eigenvalues at or below this are treated as zero in pseudo-inverses.
pub const EIGEN_EPS: f64 = 1e-10;

/// Generic relative tolerance for degeneracy checks (e.g. a sample whose
/// spread is negligible against its magnitude).
pub const GENERAL_TOL: f64 = 1e-12;

/// Numerically stable softplus: `softplus(x) = ln(1 + exp(x))`.
///
/// Uses `x` directly above a cutoff of `20.0` and `ln1p(exp(x))` below it.
pub fn safe_softplus(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp().ln_1p() }
}

/// Stable inverse of softplus on `(0, ∞)`: `t = ln(exp(x) − 1)`.
///
/// `x` must be finite and `> 0`.
pub fn safe_softplus_inv(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp_m1().ln() }
}

/// Logistic function `1 / (1 + e^{-x})`, the derivative of softplus.
///
/// Evaluated on the branch that never exponentiates a large positive number.
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// `ln(1 + ξz)/ξ`, with the limit `z` for `|ξ| < GUMBEL_EPS`.
///
/// Callers must already have checked `1 + ξz > 0`.
pub fn log1p_ratio(xi: f64, z: f64) -> f64 {
    if xi.abs() < GUMBEL_EPS { z } else { (xi * z).ln_1p() / xi }
}

/// `(exp(ξa) − 1)/ξ`, with the limit `a` for `|ξ| < GUMBEL_EPS`.
pub fn expm1_ratio(xi: f64, a: f64) -> f64 {
    if xi.abs() < GUMBEL_EPS { a } else { (xi * a).exp_m1() / xi }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Agreement with naïve formulas on safe inputs and continuity of the
    // ratio helpers through ξ = 0.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // softplus and its inverse round-trip and match the naïve formula.
    //
    // Given
    // -----
    // - A grid of moderate inputs and one large input.
    //
    // Expect
    // ------
    // - `safe_softplus_inv(safe_softplus(x)) ≈ x`.
    fn softplus_round_trips() {
        for &x in &[-5.0, -0.3, 0.0, 1.7, 12.0, 40.0] {
            assert_relative_eq!(safe_softplus_inv(safe_softplus(x)), x, epsilon = 1e-9);
        }
        assert_relative_eq!(safe_softplus(1.0), (1.0f64.exp() + 1.0).ln(), epsilon = 1e-14);
    }

    #[test]
    // Purpose
    // -------
    // The logistic helper is the derivative of softplus.
    //
    // Given
    // -----
    // - A central difference of softplus at x = 0.8 and x = -3.
    //
    // Expect
    // ------
    // - Agreement to 1e-7.
    fn logistic_is_softplus_derivative() {
        let h = 1e-6;
        for &x in &[0.8, -3.0] {
            let fd = (safe_softplus(x + h) - safe_softplus(x - h)) / (2.0 * h);
            assert_relative_eq!(safe_logistic(x), fd, epsilon = 1e-7);
        }
    }

    #[test]
    // Purpose
    // -------
    // The ratio helpers are continuous through ξ = 0.
    //
    // Given
    // -----
    // - ξ = 1e-7 (general branch) and ξ = 0 (limit branch).
    //
    // Expect
    // ------
    // - Values agree to 1e-6.
    fn ratio_helpers_continuous_at_zero() {
        assert_relative_eq!(log1p_ratio(1e-7, 1.3), log1p_ratio(0.0, 1.3), epsilon = 1e-6);
        assert_relative_eq!(expm1_ratio(1e-7, -0.7), expm1_ratio(0.0, -0.7), epsilon = 1e-6);
    }
}
