//! Model comparison by information criteria and likelihood-ratio tests.
//!
//! Purpose
//! -------
//! Rank competing fits of the *same* sample (stationary vs. any combination
//! of covariate-linked parameters) so the caller can decide which
//! parameters should depend on the covariate.
//!
//! Key behaviors
//! -------------
//! - `AIC = 2k − 2ℓ̂`, `BIC = k ln n − 2ℓ̂`, `ΔAIC = AIC − min AIC`, and
//!   Akaike weights `wᵢ ∝ exp(−ΔAICᵢ/2)`.
//! - `k` is the fit's own free-parameter count: `3` stationary, `3 + m` with
//!   `m` covariate-linked parameters.
//! - [`likelihood_ratio_test`] compares a restricted fit nested in a fuller
//!   one with the deviance `2(ℓ̂_full − ℓ̂_restricted) ~ χ²(k_full − k_restricted)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every compared fit must carry the same [`SampleFingerprint`]
//!   (length and bit-exact values); otherwise the comparison is rejected
//!   with `GevError::SampleMismatch`.
//! - Nesting itself is the caller's claim; only the parameter counts are
//!   checked.
use crate::extremes::{
    core::data::SampleFingerprint,
    errors::{GevError, GevResult},
    models::FittedGev,
};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// One row of a model-comparison table.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelScore {
    pub name: String,
    pub k: usize,
    pub n: usize,
    pub log_likelihood: f64,
    pub aic: f64,
    pub bic: f64,
    pub delta_aic: f64,
    pub akaike_weight: f64,
}

/// Scores sorted by ascending AIC (best first).
#[derive(Debug, Clone, PartialEq)]
pub struct ModelComparison {
    pub scores: Vec<ModelScore>,
}

impl ModelComparison {
    pub fn best(&self) -> Option<&ModelScore> {
        self.scores.first()
    }

    pub fn get(&self, name: &str) -> Option<&ModelScore> {
        self.scores.iter().find(|s| s.name == name)
    }
}

/// Rank named fits of one sample by AIC.
///
/// `k` is each fit's [`FittedGev::n_params`]: `3` for a stationary fit and
/// `3 + m` for `m` covariate-linked parameters. A linked parameter adds only
/// its slope, since its intercept is already one of the three; counting
/// `3 + 2m` would charge every linked parameter one phantom degree of
/// freedom.
///
/// # Errors
/// - `GevError::TooFewModels` for fewer than two candidates.
/// - `GevError::SampleMismatch` naming the first fit whose sample differs
///   from the first candidate's.
pub fn compare_models(models: &[(&str, &dyn FittedGev)]) -> GevResult<ModelComparison> {
    if models.len() < 2 {
        return Err(GevError::TooFewModels { count: models.len() });
    }
    let reference: SampleFingerprint = models[0].1.fingerprint();
    if let Some((name, _)) = models.iter().find(|(_, m)| m.fingerprint() != reference) {
        return Err(GevError::SampleMismatch { model: (*name).to_string() });
    }

    let n = reference.len;
    let mut scores: Vec<ModelScore> = models
        .iter()
        .map(|(name, m)| {
            let k = m.n_params();
            let ll = m.log_likelihood();
            ModelScore {
                name: (*name).to_string(),
                k,
                n,
                log_likelihood: ll,
                aic: 2.0 * k as f64 - 2.0 * ll,
                bic: k as f64 * (n as f64).ln() - 2.0 * ll,
                delta_aic: 0.0,
                akaike_weight: 0.0,
            }
        })
        .collect();
    scores.sort_by(|a, b| a.aic.total_cmp(&b.aic));

    let min_aic = scores[0].aic;
    let mut total = 0.0;
    for s in scores.iter_mut() {
        s.delta_aic = s.aic - min_aic;
        s.akaike_weight = (-0.5 * s.delta_aic).exp();
        total += s.akaike_weight;
    }
    for s in scores.iter_mut() {
        s.akaike_weight /= total;
    }

    log::debug!("lowest AIC: {} ({:.3})", scores[0].name, min_aic);
    Ok(ModelComparison { scores })
}

/// Deviance test of a restricted fit against a fuller one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LikelihoodRatioTest {
    pub statistic: f64,
    pub df: usize,
    pub p_value: f64,
}

/// `D = 2(ℓ̂_full − ℓ̂_restricted)` with a `χ²(df)` p-value.
///
/// A negative `D` (the fuller fit stopped below the restricted optimum) is
/// reported as `0` with `p = 1`.
///
/// # Errors
/// - `GevError::SampleMismatch` when the fits saw different samples.
/// - `GevError::NotNested` unless `full` has more parameters.
pub fn likelihood_ratio_test(
    restricted: &dyn FittedGev, full: &dyn FittedGev,
) -> GevResult<LikelihoodRatioTest> {
    if restricted.fingerprint() != full.fingerprint() {
        return Err(GevError::SampleMismatch { model: "full".to_string() });
    }
    let (kr, kf) = (restricted.n_params(), full.n_params());
    if kf <= kr {
        return Err(GevError::NotNested { restricted: kr, full: kf });
    }
    let df = kf - kr;
    let statistic = (2.0 * (full.log_likelihood() - restricted.log_likelihood())).max(0.0);
    let chi2 = ChiSquared::new(df as f64)
        .map_err(|e| GevError::Inference { reason: e.to_string() })?;
    Ok(LikelihoodRatioTest { statistic, df, p_value: chi2.sf(statistic) })
}
