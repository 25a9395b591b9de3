//! Case-resampling bootstrap for return-level confidence bands.
//!
//! Purpose
//! -------
//! Quantify the sampling uncertainty of a stationary fit without a
//! parametric approximation: resample the block maxima with replacement,
//! refit each resample, and read the band off the empirical
//! `[α/2, 1 − α/2]` quantiles of the refitted return levels.
//!
//! Key behaviors
//! -------------
//! - Replicate `i` draws its indices from `StdRng::seed_from_u64(seed + i)`
//!   (wrapping), so results are reproducible and identical with or without
//!   `parallel`.
//! - Replicates run on the rayon pool when `parallel` is set; results are
//!   gathered by index, no shared accumulator.
//! - A refit that fails is discarded and counted (`log::warn!` with the
//!   total, `log::debug!` per failure). More than `max_failure_fraction`
//!   failures, or none succeeding, is an error.
//!
//! Invariants & assumptions
//! ------------------------
//! - Block maxima are treated as independent draws (i.i.d. case resampling).
//! - The central curve is the return-level curve of the fit to the full
//!   sample; its failure is propagated, never replaced by a default.
use crate::{
    extremes::{
        core::{
            data::BlockMaxima,
            options::{BootstrapOptions, FitOptions},
            params::GevParameters,
            validation::validate_return_period,
        },
        errors::{GevError, GevResult},
        models::{
            return_levels::return_levels,
            stationary::{GevModel, StationaryFit},
        },
    },
    inference::percentile::percentile_interval,
};
use ndarray::Array1;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::prelude::*;

/// Percentile intervals of the replicate parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterInterval {
    pub shape: (f64, f64),
    pub location: (f64, f64),
    pub scale: (f64, f64),
}

/// `BootstrapResult` — central curve, envelope, and replicate fits.
///
/// Fields
/// ------
/// - `periods`: the requested return periods.
/// - `central`: return levels of the full-sample fit.
/// - `lower`, `upper`: `α/2` and `1 − α/2` quantiles per period.
/// - `fit`: the full-sample fit.
/// - `replicates`: successful refits, in replicate order.
/// - `n_failed`: discarded refits.
/// - `parameter_intervals`: percentile intervals for `(ξ, μ, σ)`.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapResult {
    pub periods: Array1<f64>,
    pub central: Array1<f64>,
    pub lower: Array1<f64>,
    pub upper: Array1<f64>,
    pub fit: StationaryFit,
    pub replicates: Vec<GevParameters>,
    pub n_failed: usize,
    pub parameter_intervals: ParameterInterval,
    pub alpha: f64,
}

/// Bootstrap confidence envelope of the return-level curve.
///
/// # Errors
/// - Option and period validation errors (InvalidArgument).
/// - Any error of the full-sample fit.
/// - `GevError::BootstrapFailureRate` when too many refits fail.
pub fn bootstrap_return_levels(
    data: &BlockMaxima, periods: &[f64], fit_opts: &FitOptions, boot_opts: &BootstrapOptions,
) -> GevResult<BootstrapResult> {
    boot_opts.validate()?;
    for &t in periods {
        validate_return_period(t)?;
    }
    let model = GevModel::new(fit_opts.clone());
    let fit = model.fit(data)?;
    let central = return_levels(&fit.params, periods)?.levels;

    let n_boot = boot_opts.n_boot;
    let refit = |i: usize| refit_replicate(&model, data, boot_opts.seed, i);
    let outcomes: Vec<GevResult<GevParameters>> = if boot_opts.parallel {
        (0..n_boot).into_par_iter().map(refit).collect()
    } else {
        (0..n_boot).map(refit).collect()
    };

    let mut replicates = Vec::with_capacity(n_boot);
    let mut n_failed = 0;
    for (i, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(params) => replicates.push(params),
            Err(e) => {
                n_failed += 1;
                log::debug!("bootstrap replicate {i} discarded: {e}");
            }
        }
    }
    if n_failed > 0 {
        log::warn!("{n_failed} of {n_boot} bootstrap refits failed and were discarded");
    }
    check_failure_rate(n_failed, n_boot, boot_opts.max_failure_fraction)?;

    let alpha = boot_opts.alpha;
    let mut lower = Array1::zeros(periods.len());
    let mut upper = Array1::zeros(periods.len());
    for (j, &t) in periods.iter().enumerate() {
        let levels = replicates.iter().map(|p| p.return_level(t)).collect::<GevResult<Vec<f64>>>()?;
        let (lo, hi) = percentile_interval(&levels, alpha)?;
        lower[j] = lo;
        upper[j] = hi;
    }

    let interval = |get: fn(&GevParameters) -> f64| -> GevResult<(f64, f64)> {
        let values: Vec<f64> = replicates.iter().map(get).collect();
        Ok(percentile_interval(&values, alpha)?)
    };
    let parameter_intervals = ParameterInterval {
        shape: interval(GevParameters::shape)?,
        location: interval(GevParameters::location)?,
        scale: interval(GevParameters::scale)?,
    };

    Ok(BootstrapResult {
        periods: Array1::from(periods.to_vec()),
        central,
        lower,
        upper,
        fit,
        replicates,
        n_failed,
        parameter_intervals,
        alpha,
    })
}

// ---- Helper methods ----

fn refit_replicate(
    model: &GevModel, data: &BlockMaxima, seed: u64, i: usize,
) -> GevResult<GevParameters> {
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
    let n = data.len();
    let indices: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
    model.fit(&data.resample(&indices)).map(|fit| fit.params)
}

fn check_failure_rate(failed: usize, total: usize, max_fraction: f64) -> GevResult<()> {
    if failed == total || failed as f64 > max_fraction * total as f64 {
        return Err(GevError::BootstrapFailureRate { failed, total, max_fraction });
    }
    Ok(())
}
