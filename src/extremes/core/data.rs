//! Block-maxima data containers for GEV models.
//!
//! Purpose
//! -------
//! Provide the validated sample type every fitter consumes, plus a compact
//! fingerprint that lets model comparison verify two fits saw the same data.
//!
//! Key behaviors
//! -------------
//! - [`BlockMaxima`] enforces non-empty, finite observations at construction.
//! - [`SampleFingerprint`] records the length and a hash of the exact `f64`
//!   bit patterns, so a truncated or perturbed copy never compares equal.
//! - [`BlockMaxima::windows`] splits a record into consecutive
//!   non-overlapping blocks (e.g. 30-year climate normals).
//!
//! Invariants & assumptions
//! ------------------------
//! - Observations are finite; order is preserved (index semantics belong to
//!   the caller and only matter once a covariate is supplied).
//!
//! Downstream usage
//! ----------------
//! - Construct a [`BlockMaxima`] at the boundary where raw maxima enter the
//!   stack; fitters, the empirical table, and the bootstrap rely on its
//!   invariants without re-validating.
use crate::extremes::{
    core::validation::validate_sample,
    errors::{GevError, GevResult},
};
use ndarray::{Array1, ArrayView1};
use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

/// `BlockMaxima` — validated sample of block maxima.
///
/// Fields
/// ------
/// - `values`: `Array1<f64>`
///   Observed maxima in caller order; non-empty and finite.
///
/// Invariants
/// ----------
/// - `values.len() > 0` and every entry is finite.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockMaxima {
    values: Array1<f64>,
}

impl BlockMaxima {
    /// Construct a validated sample.
    ///
    /// # Errors
    /// - [`GevError::EmptySample`] for an empty array.
    /// - [`GevError::NonFiniteData`] for the first NaN/±∞.
    pub fn new(values: Array1<f64>) -> GevResult<Self> {
        validate_sample(values.view())?;
        Ok(Self { values })
    }

    /// Convenience constructor from a slice.
    pub fn from_slice(values: &[f64]) -> GevResult<Self> {
        Self::new(Array1::from(values.to_vec()))
    }

    pub fn values(&self) -> ArrayView1<'_, f64> {
        self.values.view()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false` for a constructed sample; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn fingerprint(&self) -> SampleFingerprint {
        SampleFingerprint::of(self.values.view())
    }

    /// Consecutive non-overlapping blocks of `window` observations.
    ///
    /// A trailing remainder shorter than `window` is dropped.
    ///
    /// # Errors
    /// [`GevError::InvalidWindow`] unless `3 <= window <= len`.
    pub fn windows(&self, window: usize) -> GevResult<Vec<BlockMaxima>> {
        let len = self.len();
        if window < 3 || window > len {
            return Err(GevError::InvalidWindow { window, len });
        }
        Ok(self
            .values
            .exact_chunks(window)
            .into_iter()
            .map(|chunk| BlockMaxima { values: chunk.to_owned() })
            .collect())
    }

    /// Sample with observations taken at `indices` (bootstrap resampling).
    pub(crate) fn resample(&self, indices: &[usize]) -> BlockMaxima {
        BlockMaxima { values: indices.iter().map(|&i| self.values[i]).collect() }
    }
}

/// `SampleFingerprint` — identity of the sample a model was fitted to.
///
/// Two fingerprints are equal iff the samples have the same length and the
/// same sequence of `f64` bit patterns (up to hash collisions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleFingerprint {
    pub len: usize,
    pub hash: u64,
}

impl SampleFingerprint {
    pub fn of(values: ArrayView1<f64>) -> Self {
        let mut hasher = DefaultHasher::new();
        values.len().hash(&mut hasher);
        for v in values.iter() {
            v.to_bits().hash(&mut hasher);
        }
        Self { len: values.len(), hash: hasher.finish() }
    }
}
