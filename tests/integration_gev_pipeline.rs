//! Integration tests for the GEV extreme-value pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end workflow on seeded synthetic block maxima:
//!   empirical table → stationary fit → return levels → bootstrap band,
//!   and covariate fits → model comparison.
//! - Check the statistical properties the stack promises rather than
//!   individual helpers.
//!
//! Coverage
//! --------
//! - `extremes::core`: `BlockMaxima`, `Covariate`, `GevParameters`
//!   (quantile / CDF round trip, Gumbel limit, bounded tail), empirical
//!   plotting positions.
//! - `extremes::models`: `fit_gev`, `fit_windows`, `fit_nonstationary`,
//!   `return_levels`, `bootstrap_return_levels`, `compare_models`,
//!   `likelihood_ratio_test`.
//! - `extremes::errors`: error kinds for degenerate and mismatched input.
//!
//! Exclusions
//! ----------
//! - Optimizer internals and numerical-stability helpers (unit tests).
//! - Python bindings.
//! - Bootstrap coverage runs thousands of fits and is `#[ignore]`d; run it
//!   with `cargo test -- --ignored`.
use approx::assert_relative_eq;
use ndarray::Array1;
use rand::{SeedableRng, distributions::Distribution, rngs::StdRng};
use rust_extremes::extremes::{
    core::{
        covariates::{Covariate, CovariatePoint, GevCovariates},
        data::BlockMaxima,
        empirical::EmpiricalReturnLevels,
        options::{BootstrapOptions, FitOptions},
        params::GevParameters,
    },
    errors::GevErrorKind,
    models::{
        FittedGev, bootstrap_return_levels, compare_models, fit_gev, fit_nonstationary,
        fit_windows, likelihood_ratio_test, return_levels,
    },
};

/// Purpose
/// -------
/// Draw `n` i.i.d. block maxima from `truth` with a fixed seed.
fn draw(truth: GevParameters, n: usize, seed: u64) -> BlockMaxima {
    let mut rng = StdRng::seed_from_u64(seed);
    BlockMaxima::new(Array1::from_iter((0..n).map(|_| truth.sample(&mut rng))))
        .expect("finite draws form a valid sample")
}

/// Purpose
/// -------
/// Draw a sample whose location drifts linearly with the block index:
/// `μᵢ = mu0 + slope·i`, `σ = 2`, `ξ = 0.1`.
///
/// Returns
/// -------
/// - The sample and the `0..n` time-index covariate.
fn draw_trend(n: usize, mu0: f64, slope: f64, seed: u64) -> (BlockMaxima, Covariate) {
    let mut rng = StdRng::seed_from_u64(seed);
    let values = (0..n).map(|i| {
        GevParameters::new(0.1, mu0 + slope * i as f64, 2.0)
            .expect("valid parameters")
            .sample(&mut rng)
    });
    (
        BlockMaxima::new(Array1::from_iter(values)).expect("finite draws form a valid sample"),
        Covariate::time_index(n).expect("non-empty index"),
    )
}

#[test]
// Purpose
// -------
// The empirical table's period column increases with the level column.
//
// Given
// -----
// - 75 draws from GEV(0.1, 10, 2).
//
// Expect
// ------
// - Non-decreasing levels, strictly increasing periods, and the largest
//   observation carrying period n + 1.
fn empirical_periods_increase_with_level() {
    let data = draw(GevParameters::new(0.1, 10.0, 2.0).unwrap(), 75, 1);
    let table = EmpiricalReturnLevels::from_sample(&data);

    assert_eq!(table.len(), 75);
    for k in 1..table.len() {
        assert!(table.levels[k] >= table.levels[k - 1]);
        assert!(table.periods[k] > table.periods[k - 1]);
    }
    assert_relative_eq!(table.periods[74], 76.0);
}

#[test]
// Purpose
// -------
// A fitted distribution inverts its own quantile function.
//
// Given
// -----
// - A stationary fit to 200 draws from GEV(0.1, 10, 2).
//
// Expect
// ------
// - `CDF(Q(p)) = p` within 1e-9 for p from 0.01 to 0.99.
fn fitted_quantile_round_trips_through_cdf() {
    let data = draw(GevParameters::new(0.1, 10.0, 2.0).unwrap(), 200, 2);
    let fit = fit_gev(&data, &FitOptions::default()).unwrap();

    for k in 1..=99 {
        let p = k as f64 / 100.0;
        let x = fit.params.quantile(p).unwrap();
        assert_relative_eq!(fit.params.cdf(x), p, epsilon = 1e-9);
    }
}

#[test]
// Purpose
// -------
// The general quantile formula converges to the explicit Gumbel branch.
//
// Given
// -----
// - (μ, σ) = (10, 2) with ξ = 1e-6 and ξ = 0.
//
// Expect
// ------
// - Quantiles agree within 1e-4 across p ∈ {0.01, 0.5, 0.99, 0.999}.
fn gumbel_limit_is_continuous() {
    let near = GevParameters::new(1e-6, 10.0, 2.0).unwrap();
    let gumbel = GevParameters::gumbel(10.0, 2.0).unwrap();
    for p in [0.01, 0.5, 0.99, 0.999] {
        assert_relative_eq!(
            near.quantile(p).unwrap(),
            gumbel.quantile(p).unwrap(),
            epsilon = 1e-4
        );
    }
}

#[test]
// Purpose
// -------
// Return levels increase with T, without bound for ξ ≥ 0 and below
// μ − σ/ξ for ξ < 0.
//
// Given
// -----
// - ξ ∈ {0.2, 0, −0.25} with μ = 10, σ = 2 and T from 2 to 1e8.
//
// Expect
// ------
// - Strictly increasing curves; the bounded curve stays below 18 and
//   approaches it.
fn return_levels_are_monotone_and_bounded() {
    let periods = [2.0, 5.0, 10.0, 50.0, 100.0, 1e3, 1e8];
    for xi in [0.2, 0.0, -0.25] {
        let params = GevParameters::new(xi, 10.0, 2.0).unwrap();
        let curve = return_levels(&params, &periods).unwrap();
        for k in 1..curve.len() {
            assert!(curve.levels[k] > curve.levels[k - 1], "ξ = {xi}");
        }
        if xi < 0.0 {
            let bound = params.upper_bound();
            assert_relative_eq!(bound, 18.0);
            assert!(curve.levels.iter().all(|&x| x < bound));
            assert!(bound - curve.levels[6] < 0.1);
        }
    }
}

#[test]
// Purpose
// -------
// With the slope forced to zero the non-stationary fit is the stationary fit.
//
// Given
// -----
// - 150 stationary draws; no linked parameters, then location linked to an
//   all-zero covariate.
//
// Expect
// ------
// - Log-likelihood and (ξ, μ, σ) match the stationary fit.
fn nonstationary_with_zero_slope_matches_stationary() {
    let data = draw(GevParameters::new(0.05, 30.0, 4.0).unwrap(), 150, 3);
    let stationary = fit_gev(&data, &FitOptions::default()).unwrap();

    let covs = [
        GevCovariates::none(),
        GevCovariates::none().with_location(Covariate::new(Array1::zeros(150)).unwrap()),
    ];
    for cov in covs {
        let fit = fit_nonstationary(&data, &cov, &FitOptions::default()).unwrap();
        let p = fit.params_at(&CovariatePoint::default()).unwrap();
        assert_relative_eq!(fit.log_likelihood, stationary.log_likelihood, epsilon = 1e-4);
        assert_relative_eq!(p.location(), stationary.params.location(), epsilon = 1e-2);
        assert_relative_eq!(p.scale(), stationary.params.scale(), epsilon = 1e-2);
        assert_relative_eq!(p.shape(), stationary.params.shape(), epsilon = 1e-2);
    }
}

#[test]
// Purpose
// -------
// AIC decisively prefers a location trend that is present in the data.
//
// Given
// -----
// - 100 draws with μᵢ = 10 + 0.08·i; stationary, location-trend and
//   scale-trend fits.
//
// Expect
// ------
// - The location model ranks first with ΔAIC > 2 over the stationary fit;
//   the deviance test rejects the stationary model at 1%.
fn aic_prefers_location_trend() {
    let (data, t) = draw_trend(100, 10.0, 0.08, 4);
    let opts = FitOptions::default();

    let stationary = fit_gev(&data, &opts).unwrap();
    let location = fit_nonstationary(&data, &GevCovariates::none().with_location(t.clone()), &opts).unwrap();
    let scale = fit_nonstationary(&data, &GevCovariates::none().with_scale(t), &opts).unwrap();

    let models: [(&str, &dyn FittedGev); 3] =
        [("stationary", &stationary), ("location", &location), ("scale", &scale)];
    let cmp = compare_models(&models).unwrap();

    assert_eq!(cmp.best().unwrap().name, "location");
    assert!(cmp.get("stationary").unwrap().delta_aic > 2.0);
    assert_eq!(cmp.get("location").unwrap().k, 4);

    let lr = likelihood_ratio_test(&stationary, &location).unwrap();
    assert_eq!(lr.df, 1);
    assert!(lr.p_value < 0.01);
}

#[test]
// Purpose
// -------
// Fits to three consecutive 30-year climate normals show the rising
// location of a warming record.
//
// Given
// -----
// - 90 annual sea-level maxima (mm): three 30-year blocks drawn from
//   GEV(0.05, μ_b, 20) with μ_b = 7000, 7050, 7100.
//
// Expect
// ------
// - Three fits with strictly increasing location.
fn climate_normals_show_rising_location() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut values = Vec::with_capacity(90);
    for mu in [7000.0, 7050.0, 7100.0] {
        let block = GevParameters::new(0.05, mu, 20.0).unwrap();
        values.extend((0..30).map(|_| block.sample(&mut rng)));
    }
    let data = BlockMaxima::from_slice(&values).unwrap();

    let fits = fit_windows(&data, 30, &FitOptions::default()).unwrap();

    assert_eq!(fits.len(), 3);
    assert!(fits[0].params.location() < fits[1].params.location());
    assert!(fits[1].params.location() < fits[2].params.location());
}

#[test]
// Purpose
// -------
// Degenerate and mismatched inputs raise the documented error kinds.
//
// Given
// -----
// - Ten identical values; an empty sample; fits of two different samples
//   passed to `compare_models`; T = 1.
//
// Expect
// ------
// - `FitConvergence`, `InsufficientData`, `ComparisonMismatch`,
//   `InvalidArgument`.
fn degenerate_inputs_raise_documented_kinds() {
    let flat = BlockMaxima::from_slice(&[12.5; 10]).unwrap();
    let err = fit_gev(&flat, &FitOptions::default()).unwrap_err();
    assert_eq!(err.kind(), GevErrorKind::FitConvergence);

    let err = BlockMaxima::from_slice(&[]).unwrap_err();
    assert_eq!(err.kind(), GevErrorKind::InsufficientData);

    let truth = GevParameters::new(0.1, 10.0, 2.0).unwrap();
    let a = fit_gev(&draw(truth, 60, 6), &FitOptions::default()).unwrap();
    let b = fit_gev(&draw(truth, 60, 7), &FitOptions::default()).unwrap();
    let models: [(&str, &dyn FittedGev); 2] = [("a", &a), ("b", &b)];
    assert_eq!(compare_models(&models).unwrap_err().kind(), GevErrorKind::ComparisonMismatch);

    assert_eq!(a.return_level(1.0).unwrap_err().kind(), GevErrorKind::InvalidArgument);
}

#[test]
// Purpose
// -------
// The bootstrap band brackets the fitted curve.
//
// Given
// -----
// - 50 draws from GEV(0.1, 10, 2), 200 replicates, α = 0.05.
//
// Expect
// ------
// - lower ≤ central ≤ upper at T ∈ {10, 50, 100}; few failed refits.
fn bootstrap_band_brackets_central_curve() {
    let data = draw(GevParameters::new(0.1, 10.0, 2.0).unwrap(), 50, 8);
    let boot = BootstrapOptions::new(200, 0.05, 9, 0.5, true).unwrap();

    let band = bootstrap_return_levels(&data, &[10.0, 50.0, 100.0], &FitOptions::default(), &boot)
        .unwrap();

    for j in 0..3 {
        assert!(band.lower[j] <= band.central[j] && band.central[j] <= band.upper[j]);
    }
    assert!(band.n_failed < 20);
}

#[test]
#[ignore = "runs 1000 bootstraps; enable with --ignored"]
// Purpose
// -------
// Percentile bands have roughly nominal coverage of the true 100-year level.
//
// Given
// -----
// - 1000 samples of size 50 from GEV(0.1, 10, 2); 200 replicates each,
//   α = 0.05.
//
// Expect
// ------
// - The true 100-year level falls inside the band in 85%–100% of samples.
fn bootstrap_coverage_is_near_nominal() {
    let truth = GevParameters::new(0.1, 10.0, 2.0).unwrap();
    let target = truth.return_level(100.0).unwrap();
    let n_samples = 1000;

    let mut covered = 0;
    let mut attempted = 0;
    for s in 0..n_samples {
        let data = draw(truth, 50, 1_000 + s);
        let boot = BootstrapOptions::new(200, 0.05, s, 0.5, true).unwrap();
        let Ok(band) = bootstrap_return_levels(&data, &[100.0], &FitOptions::default(), &boot) else {
            continue;
        };
        attempted += 1;
        if band.lower[0] <= target && target <= band.upper[0] {
            covered += 1;
        }
    }

    let coverage = covered as f64 / attempted as f64;
    assert!(attempted > 900);
    assert!((0.85..=1.0).contains(&coverage), "coverage = {coverage}");
}
