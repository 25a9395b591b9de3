//! Python-boundary helpers: array extraction and option builders.
//!
//! Everything here is compiled only with `python-bindings`; the functions
//! turn loosely typed Python arguments into the validated Rust types of
//! `extremes::core` and `optimization`, mapping failures to `ValueError`.
#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    extremes::{
        core::{
            covariates::{Covariate, GevCovariates},
            data::BlockMaxima,
            init::Init,
            options::FitOptions,
            params::GevParameters,
        },
        errors::GevError,
    },
    optimization::loglik_optimizer::traits::{LineSearcher, MLEOptions, OptimMethod, Tolerances},
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

/// Borrow a contiguous `float64` view of a NumPy array, pandas Series, or
/// Python sequence, copying only when no contiguous buffer is available.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray_bound(py).readonly())
}

/// Copy an array-like into an owned `Array1<f64>`.
#[cfg(feature = "python-bindings")]
pub fn extract_owned_array<'py>(
    py: Python<'py>, raw: &Bound<'py, PyAny>, name: &str,
) -> PyResult<Array1<f64>> {
    let arr = extract_f64_array(py, raw)?;
    let slice = arr.as_slice().map_err(|_| {
        PyValueError::new_err(format!("{name} must be a 1-D contiguous float64 array or sequence"))
    })?;
    Ok(Array1::from(slice.to_vec()))
}

#[cfg(feature = "python-bindings")]
pub fn extract_block_maxima<'py>(py: Python<'py>, data: &Bound<'py, PyAny>) -> PyResult<BlockMaxima> {
    Ok(BlockMaxima::new(extract_owned_array(py, data, "data")?)?)
}

/// Build the covariate design from up to three optional array-likes.
#[cfg(feature = "python-bindings")]
pub fn extract_covariates<'py>(
    py: Python<'py>, location: Option<&Bound<'py, PyAny>>, scale: Option<&Bound<'py, PyAny>>,
    shape: Option<&Bound<'py, PyAny>>,
) -> PyResult<GevCovariates> {
    let one = |raw: Option<&Bound<'py, PyAny>>, name: &str| -> PyResult<Option<Covariate>> {
        match raw {
            Some(raw) => Ok(Some(Covariate::new(extract_owned_array(py, raw, name)?)?)),
            None => Ok(None),
        }
    };
    Ok(GevCovariates::new(
        one(location, "location_covariate")?,
        one(scale, "scale_covariate")?,
        one(shape, "shape_covariate")?,
    ))
}

/// Fit options from the keyword arguments shared by the Python entry points.
#[cfg(feature = "python-bindings")]
pub fn build_fit_options(
    init: Option<&str>, init_fixed: Option<(f64, f64, f64)>, method: Option<&str>,
    tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    restarts: Option<usize>,
) -> PyResult<FitOptions> {
    let init_policy = extract_init(init, init_fixed)?;
    let mle_opts = extract_mle_opts(method, tol_grad, tol_cost, max_iter, restarts)?;
    Ok(FitOptions::new(init_policy, mle_opts))
}

#[cfg(feature = "python-bindings")]
fn extract_init(init: Option<&str>, init_fixed: Option<(f64, f64, f64)>) -> PyResult<Init> {
    let policy = match init.unwrap_or("moments").to_lowercase().as_str() {
        "moments" => Init::moments(),
        "lmoments" | "l_moments" => Init::l_moments(),
        "fixed" => {
            let (shape, location, scale) = init_fixed.ok_or_else(|| {
                PyValueError::new_err("init_fixed=(shape, location, scale) must be provided when init='fixed'")
            })?;
            Init::fixed(GevParameters::new(shape, location, scale)?)
        }
        other => {
            return Err(PyValueError::new_err(format!(
                "invalid init policy {:?} (expected 'moments', 'lmoments', or 'fixed')",
                other
            )));
        }
    };
    Ok(policy)
}

#[cfg(feature = "python-bindings")]
fn extract_mle_opts(
    method: Option<&str>, tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    restarts: Option<usize>,
) -> PyResult<MLEOptions> {
    use std::str::FromStr;

    let defaults = MLEOptions::default();
    let tols = Tolerances::new(
        tol_grad.or(defaults.tols.tol_grad),
        tol_cost.or(defaults.tols.tol_cost),
        max_iter.or(defaults.tols.max_iter),
    )
    .map_err(GevError::from)?;
    let method = match method {
        Some(name) => OptimMethod::from_str(name).map_err(GevError::from)?,
        None => defaults.method,
    };
    let opts = MLEOptions::new(tols, method, LineSearcher::MoreThuente, None)
        .map_err(GevError::from)?
        .with_restarts(restarts.unwrap_or(defaults.restarts));
    Ok(opts)
}
