//! rust_extremes — extreme-value statistics for block maxima with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the GEV stack to Python via the `_rust_extremes` extension module. When the
//! `python-bindings` feature is enabled, this module defines the
//! Python-facing functions, classes and the `extremes` submodule.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`extremes`, `optimization`,
//!   `inference`) as the public crate surface.
//! - Define `#[pyfunction]` / `#[pyclass]` wrappers and the `#[pymodule]`
//!   initializer for the `_rust_extremes` Python extension.
//! - Register the `rust_extremes.extremes` submodule in `sys.modules` so that
//!   dot-notation imports work.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner Rust modules; this file performs
//!   only FFI glue, argument conversion and error mapping.
//! - Every `GevError` surfaces in Python as `ValueError`.
//!
//! Conventions
//! -----------
//! - Shape sign follows `extremes`: `ξ > 0` is the heavy upper tail (SciPy's
//!   `genextreme` uses `c = −ξ`).
//! - Arrays are returned as Python lists (`Vec<f64>` / `Vec<Vec<f64>>`).
//!
//! Testing notes
//! -------------
//! - Numerical behavior is covered by unit tests in the inner modules and by
//!   `tests/integration_gev_pipeline.rs`.

pub mod extremes;
pub mod inference;
pub mod optimization;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    extremes::{
        core::{
            covariates::CovariatePoint, empirical::EmpiricalReturnLevels, options::BootstrapOptions,
            params::GevParameters,
        },
        models::{
            FittedGev,
            bootstrap::bootstrap_return_levels as bootstrap_rs,
            nonstationary::{NonStationaryFit, NonStationaryGevModel},
            return_levels::return_levels as return_levels_rs,
            stationary::{StationaryFit, fit_gev as fit_gev_rs},
        },
    },
    utils::{build_fit_options, extract_block_maxima, extract_covariates, extract_owned_array},
};

/// GevFit — Python-facing result of a stationary GEV fit.
///
/// Exposes the fitted `(shape, location, scale)`, the maximized
/// log-likelihood and optimizer diagnostics, and evaluates return levels.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_extremes.extremes")]
pub struct GevFit {
    inner: StationaryFit,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl GevFit {
    #[getter]
    pub fn shape(&self) -> f64 {
        self.inner.params.shape()
    }

    #[getter]
    pub fn location(&self) -> f64 {
        self.inner.params.location()
    }

    #[getter]
    pub fn scale(&self) -> f64 {
        self.inner.params.scale()
    }

    /// SciPy `genextreme` shape `c = −ξ`.
    #[getter]
    pub fn scipy_shape(&self) -> f64 {
        self.inner.params.scipy_shape()
    }

    #[getter]
    pub fn log_likelihood(&self) -> f64 {
        self.inner.log_likelihood
    }

    #[getter]
    pub fn aic(&self) -> f64 {
        2.0 * self.inner.n_params() as f64 - 2.0 * self.inner.log_likelihood
    }

    #[getter]
    pub fn iterations(&self) -> usize {
        self.inner.outcome.iterations
    }

    #[getter]
    pub fn status(&self) -> String {
        self.inner.outcome.status.clone()
    }

    #[pyo3(signature = (periods), text_signature = "(self, periods, /)")]
    pub fn return_levels<'py>(&self, py: Python<'py>, periods: &Bound<'py, PyAny>) -> PyResult<Vec<f64>> {
        let periods = extract_owned_array(py, periods, "periods")?;
        let curve = return_levels_rs(&self.inner.params, &periods.to_vec())?;
        Ok(curve.levels.to_vec())
    }

    /// `(shape, location, scale)` standard errors on the fitted sample.
    #[pyo3(signature = (data), text_signature = "(self, data, /)")]
    pub fn standard_errors<'py>(
        &self, py: Python<'py>, data: &Bound<'py, PyAny>,
    ) -> PyResult<(f64, f64, f64)> {
        let data = extract_block_maxima(py, data)?;
        let se = self.inner.standard_errors(&data)?;
        Ok((se.shape, se.location, se.scale))
    }
}

/// Fit a stationary GEV by maximum likelihood.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (
        data,
        init = None,
        init_fixed = None,
        method = None,
        tol_grad = None,
        tol_cost = None,
        max_iter = None,
        restarts = None,
    ),
    text_signature = "(data, /, init='moments', init_fixed=None, method='NelderMead', \
                      tol_grad=None, tol_cost=None, max_iter=None, restarts=None)"
)]
pub fn fit_gev<'py>(
    py: Python<'py>, data: &Bound<'py, PyAny>, init: Option<&str>,
    init_fixed: Option<(f64, f64, f64)>, method: Option<&str>, tol_grad: Option<f64>,
    tol_cost: Option<f64>, max_iter: Option<usize>, restarts: Option<usize>,
) -> PyResult<GevFit> {
    let data = extract_block_maxima(py, data)?;
    let opts = build_fit_options(init, init_fixed, method, tol_grad, tol_cost, max_iter, restarts)?;
    Ok(GevFit { inner: fit_gev_rs(&data, &opts)? })
}

/// Weibull plotting-position table as `(periods, levels)`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (data), text_signature = "(data, /)")]
pub fn empirical_return_levels<'py>(
    py: Python<'py>, data: &Bound<'py, PyAny>,
) -> PyResult<(Vec<f64>, Vec<f64>)> {
    let table = EmpiricalReturnLevels::from_sample(&extract_block_maxima(py, data)?);
    Ok((table.periods.to_vec(), table.levels.to_vec()))
}

/// Return levels of a given `(shape, location, scale)`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (shape, location, scale, periods), text_signature = "(shape, location, scale, periods, /)")]
pub fn return_levels<'py>(
    py: Python<'py>, shape: f64, location: f64, scale: f64, periods: &Bound<'py, PyAny>,
) -> PyResult<Vec<f64>> {
    let params = GevParameters::new(shape, location, scale)?;
    let periods = extract_owned_array(py, periods, "periods")?;
    Ok(return_levels_rs(&params, &periods.to_vec())?.levels.to_vec())
}

/// Bootstrap band as `(central, lower, upper, n_failed)`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (data, periods, n_boot = 1000, alpha = 0.05, seed = 42, max_failure_fraction = 0.5, parallel = true),
    text_signature = "(data, periods, /, n_boot=1000, alpha=0.05, seed=42, max_failure_fraction=0.5, parallel=True)"
)]
pub fn bootstrap_return_levels<'py>(
    py: Python<'py>, data: &Bound<'py, PyAny>, periods: &Bound<'py, PyAny>, n_boot: usize,
    alpha: f64, seed: u64, max_failure_fraction: f64, parallel: bool,
) -> PyResult<(Vec<f64>, Vec<f64>, Vec<f64>, usize)> {
    let data = extract_block_maxima(py, data)?;
    let periods = extract_owned_array(py, periods, "periods")?.to_vec();
    let boot_opts = BootstrapOptions::new(n_boot, alpha, seed, max_failure_fraction, parallel)?;
    let fit_opts = build_fit_options(None, None, None, None, None, None, None)?;
    let band = py.allow_threads(|| bootstrap_rs(&data, &periods, &fit_opts, &boot_opts))?;
    Ok((band.central.to_vec(), band.lower.to_vec(), band.upper.to_vec(), band.n_failed))
}

/// NonStationaryGev — Python-facing non-stationary GEV model.
///
/// Constructed with the covariates that drive each parameter (any subset of
/// `location`, `scale`, `shape`); `fit(data)` estimates intercepts and
/// slopes, after which parameters and return levels can be evaluated at any
/// covariate value.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_extremes.extremes")]
pub struct NonStationaryGev {
    model: NonStationaryGevModel,
    fit: Option<NonStationaryFit>,
}

#[cfg(feature = "python-bindings")]
impl NonStationaryGev {
    fn fitted(&self) -> PyResult<&NonStationaryFit> {
        self.fit
            .as_ref()
            .ok_or_else(|| pyo3::exceptions::PyValueError::new_err("model has not been fitted"))
    }
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl NonStationaryGev {
    #[new]
    #[pyo3(
        signature = (
            location = None,
            scale = None,
            shape = None,
            init = None,
            method = None,
            tol_cost = None,
            max_iter = None,
            restarts = None,
        ),
        text_signature = "(location=None, scale=None, shape=None, init='moments', \
                          method='NelderMead', tol_cost=None, max_iter=None, restarts=None)"
    )]
    pub fn new<'py>(
        py: Python<'py>, location: Option<&Bound<'py, PyAny>>, scale: Option<&Bound<'py, PyAny>>,
        shape: Option<&Bound<'py, PyAny>>, init: Option<&str>, method: Option<&str>,
        tol_cost: Option<f64>, max_iter: Option<usize>, restarts: Option<usize>,
    ) -> PyResult<Self> {
        let covariates = extract_covariates(py, location, scale, shape)?;
        let opts = build_fit_options(init, None, method, None, tol_cost, max_iter, restarts)?;
        Ok(NonStationaryGev { model: NonStationaryGevModel::new(covariates, opts), fit: None })
    }

    #[pyo3(signature = (data), text_signature = "(self, data, /)")]
    pub fn fit<'py>(&mut self, py: Python<'py>, data: &Bound<'py, PyAny>) -> PyResult<()> {
        let data = extract_block_maxima(py, data)?;
        self.fit = Some(self.model.fit(&data)?);
        Ok(())
    }

    /// Fitted values in the order of `parameter_names`.
    #[getter]
    pub fn params(&self) -> PyResult<Vec<f64>> {
        Ok(self.fitted()?.params.to_natural().to_vec())
    }

    #[getter]
    pub fn parameter_names(&self) -> PyResult<Vec<&'static str>> {
        Ok(self.fitted()?.parameter_names())
    }

    #[getter]
    pub fn log_likelihood(&self) -> PyResult<f64> {
        Ok(self.fitted()?.log_likelihood)
    }

    #[getter]
    pub fn aic(&self) -> PyResult<f64> {
        let fit = self.fitted()?;
        Ok(2.0 * fit.n_params() as f64 - 2.0 * fit.log_likelihood)
    }

    /// `(shape, location, scale)` at covariate value `c`.
    #[pyo3(signature = (c), text_signature = "(self, c, /)")]
    pub fn params_at(&self, c: f64) -> PyResult<(f64, f64, f64)> {
        let p = self.fitted()?.params_at(&CovariatePoint::uniform(c))?;
        Ok((p.shape(), p.location(), p.scale()))
    }

    #[pyo3(signature = (period), text_signature = "(self, period, /)")]
    pub fn return_level_path(&self, period: f64) -> PyResult<Vec<f64>> {
        Ok(self.fitted()?.return_level_path(period)?.to_vec())
    }

    /// Rows follow `covariate_values`, columns follow `periods`.
    #[pyo3(signature = (covariate_values, periods), text_signature = "(self, covariate_values, periods, /)")]
    pub fn return_level_surface<'py>(
        &self, py: Python<'py>, covariate_values: &Bound<'py, PyAny>, periods: &Bound<'py, PyAny>,
    ) -> PyResult<Vec<Vec<f64>>> {
        let cov = extract_owned_array(py, covariate_values, "covariate_values")?.to_vec();
        let periods = extract_owned_array(py, periods, "periods")?.to_vec();
        let surface = self.fitted()?.return_level_surface(&cov, &periods)?;
        Ok(surface.rows().into_iter().map(|r| r.to_vec()).collect())
    }
}

/// Initialize the `_rust_extremes` extension module.
///
/// Creates the `extremes` submodule, attaches it to the parent module, and
/// registers it in `sys.modules` so `rust_extremes.extremes` is importable.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_extremes<'py>(py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let extremes_mod = PyModule::new_bound(py, "extremes")?;
    extremes_module(m, &extremes_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    py.import_bound("sys")?
        .getattr("modules")?
        .set_item("rust_extremes.extremes", extremes_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn extremes_module<'py>(parent: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(fit_gev, m)?)?;
    m.add_function(wrap_pyfunction!(empirical_return_levels, m)?)?;
    m.add_function(wrap_pyfunction!(return_levels, m)?)?;
    m.add_function(wrap_pyfunction!(bootstrap_return_levels, m)?)?;
    m.add_class::<GevFit>()?;
    m.add_class::<NonStationaryGev>()?;
    parent.add_submodule(m)?;
    Ok(())
}
