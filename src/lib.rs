//! bg_retention — Beta-Geometric retention models with Python bindings.
//!
//! Purpose
//! -------
//! Crate root. Rust callers reach the retention stack through the re-exported
//! modules below; Python callers reach it through the `_bg_retention`
//! extension module compiled when the `python-bindings` feature is on. The
//! PyO3 items in this file are the entire binding surface: wrapper classes,
//! conversion helpers, and the module initializer.
//!
//! Key behaviors
//! -------------
//! - Expose `retention`, `optimization`, and `inference` as the public Rust
//!   API of the crate.
//! - Wrap the BG model and its result types in `#[pyclass]` shims that accept
//!   NumPy arrays and hand back plain Python scalars and lists.
//! - Register the `retention_models` submodule in `sys.modules` so that
//!   `from bg_retention.retention_models import BG` resolves without import
//!   hooks on the Python side.
//!
//! Invariants & assumptions
//! ------------------------
//! - No numerics live in this file: every computation is delegated to the
//!   inner modules, and the shims restrict themselves to argument conversion
//!   and error translation.
//! - A Python-visible method has the same contract as the Rust method it
//!   forwards to; the wrapper adds no behavior beyond type conversion.
//! - Once a Python argument has been turned into a Rust type, the validation
//!   performed by that type's constructor has already run.
//!
//! Conventions
//! -----------
//! - Python-exposed classes live under `_bg_retention.retention_models`; the
//!   pure-Python package re-exports them under friendlier paths.
//! - Indexing and counting conventions follow the documentation of the
//!   underlying Rust modules (`retention::core`, `retention::models`): raw
//!   count series include the period-0 cohort at index 0.
//! - Rust errors cross the boundary through the `From` impls in
//!   `retention::errors`, which pick the Python exception type per variant.
//!
//! Downstream usage
//! ----------------
//! - Rust consumers should use the inner modules directly and ignore
//!   everything gated behind `python-bindings`.
//! - The pure-Python package imports `_bg_retention` and re-exports its
//!   classes; nothing else in the crate is reachable from Python.
//!
//! Testing notes
//! -------------
//! - Numerical behavior is tested inside the inner modules and by the
//!   integration suite under `tests/`, which drives the public `retention`
//!   API end to end.
//! - Binding smoke tests (construct, fit, project, read results back) belong
//!   to the Python package's own test suite.

pub mod inference;
pub mod optimization;
pub mod retention;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    optimization::loglik_optimizer::traits::OptimOutcome,
    retention::{
        core::{forecasts::ForecastTable, params::BGParams},
        errors::RetentionError,
        models::bg::{BGModel, FitReport},
    },
    utils::{build_bg_model, extract_survival_table},
};

/// BG — Python-facing wrapper for BG retention models.
///
/// Purpose
/// -------
/// Python handle on a [`BGModel`]. Every method converts its arguments,
/// forwards to the Rust model, and maps errors; the model's invariants and
/// error taxonomy carry over unchanged.
///
/// Key behaviors
/// -------------
/// - Build a [`BGModel`] with a chosen variant and optimizer options from
///   Python-friendly arguments.
/// - Turn the array handed to `fit` and `standard_errors` into a
///   [`SurvivalTable`] before touching the model, so validation happens in
///   one place.
/// - Cache optimization and fitted-parameter results for inspection from
///   Python via property getters.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `BG(periods, variant='static', tol_sd=None, max_iter=None, step=None,
/// verbose=False, restarts=1)`:
/// - `periods`: `usize`
///   Number of observed periods in the fitting data (raw series length minus
///   the period-0 entry); used to size internal buffers.
/// - `variant`: `Option<&str>`
///   `'static'` (two parameters) or `'time_varying'` (adds a decay slope).
/// - `tol_sd`, `max_iter`, `step`, `verbose`
///   Simplex configuration used to build [`SimplexOptions`]; defaults apply
///   when omitted.
/// - `restarts`: `Option<usize>`
///   Length of the deterministic multi-start seed ladder (≥ 1).
///
/// Fields
/// ------
/// - `inner`: [`BGModel`]
///   Fully configured BG model that owns scratch buffers and cached results.
///
/// Invariants
/// ----------
/// - `inner` is always a well-formed [`BGModel`] created through
///   [`build_bg_model`]; variant and buffer sizes are consistent with
///   `periods`.
///
/// Performance
/// -----------
/// - The cost of a call is the cost of the underlying model method plus one
///   array conversion; the wrapper itself does no numerical work.
///
/// Notes
/// -----
/// - From Rust, construct [`BGModel`] directly; this type exists for the
///   extension module and nothing else.
///
/// [`SurvivalTable`]: crate::retention::core::data::SurvivalTable
/// [`SimplexOptions`]: crate::optimization::loglik_optimizer::SimplexOptions
#[cfg(feature = "python-bindings")]
#[pyclass(module = "bg_retention.retention_models", unsendable)]
pub struct BG {
    /// Model instance all methods forward to.
    pub inner: BGModel,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl BG {
    #[new]
    #[pyo3(
        signature = (
            periods,
            variant = None,
            tol_sd = None,
            max_iter = None,
            step = None,
            verbose = None,
            restarts = None,
        ),
        text_signature = "(periods, /, variant='static', tol_sd=None, max_iter=None, \
                          step=None, verbose=False, restarts=1)"
    )]
    #[allow(clippy::self_named_constructors)]
    pub fn bg(
        periods: usize, variant: Option<&str>, tol_sd: Option<f64>, max_iter: Option<usize>,
        step: Option<f64>, verbose: Option<bool>, restarts: Option<usize>,
    ) -> PyResult<Self> {
        let inner = build_bg_model(variant, tol_sd, max_iter, step, verbose, restarts, periods)?;
        Ok(BG { inner })
    }

    #[pyo3(signature = (counts), text_signature = "(self, counts, /)")]
    pub fn fit<'py>(
        &mut self, py: Python<'py>, counts: &Bound<'py, PyAny>,
    ) -> PyResult<BGFitReport> {
        let table = extract_survival_table(py, counts)?;
        let report = self.inner.fit(&table)?;
        Ok(BGFitReport { inner: report })
    }

    #[pyo3(
        signature = (initial_population, horizon),
        text_signature = "(self, initial_population, horizon, /)"
    )]
    pub fn project(&self, initial_population: f64, horizon: usize) -> PyResult<BGForecast> {
        let forecast = self.inner.project(initial_population, horizon)?;
        Ok(BGForecast { inner: forecast })
    }

    #[pyo3(signature = (counts), text_signature = "(self, counts, /)")]
    pub fn standard_errors<'py>(
        &self, py: Python<'py>, counts: &Bound<'py, PyAny>,
    ) -> PyResult<Vec<f64>> {
        let table = extract_survival_table(py, counts)?;
        let se = self.inner.standard_errors(&table)?;
        Ok(se.to_vec())
    }

    #[getter]
    pub fn results(&self) -> PyResult<BGOptimOutcome> {
        match &self.inner.results {
            Some(outcome) => Ok(BGOptimOutcome { inner: outcome.clone() }),
            None => Err(RetentionError::ModelNotFitted.into()),
        }
    }

    #[getter]
    pub fn fitted_params(&self) -> PyResult<BGFittedParams> {
        match &self.inner.fitted_params {
            Some(params) => Ok(BGFittedParams { inner: params.clone() }),
            None => Err(RetentionError::ModelNotFitted.into()),
        }
    }
}

/// BGFitReport — fit summary for a BG model exposed to Python.
///
/// Purpose
/// -------
/// Read-only view of a [`FitReport`] for Python: the fitted parameters, the
/// convergence flag, and the objective at the optimum.
///
/// Key behaviors
/// -------------
/// - Hold the fitted model-space parameters plus the convergence flag and the
///   negative log-likelihood at the optimum.
/// - Each getter copies its value out; the report itself is never mutated
///   from Python.
///
/// Parameters
/// ----------
/// Instances are returned by `BG.fit(...)` and are not created directly by
/// user code.
///
/// Fields
/// ------
/// - `inner`: [`FitReport`]
///   Rust-side fit summary produced by [`BGModel::fit`].
///
/// Invariants
/// ----------
/// - `inner` always corresponds to the most recent call to `fit` on the
///   model that produced it.
///
/// Performance
/// -----------
/// - Accessors are O(1) scalar copies except `params`, which clones the
///   small parameter struct.
///
/// Notes
/// -----
/// - The full optimizer outcome (status string, counters) remains available
///   through the owning model's `results` getter.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "bg_retention.retention_models")]
pub struct BGFitReport {
    /// Fit summary the getters read from.
    pub inner: FitReport,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl BGFitReport {
    #[getter]
    pub fn params(&self) -> BGFittedParams {
        BGFittedParams { inner: self.inner.params.clone() }
    }

    #[getter]
    pub fn converged(&self) -> bool {
        self.inner.converged
    }

    #[getter]
    pub fn nll(&self) -> f64 {
        self.inner.nll
    }
}

/// BGOptimOutcome — optimization outcome for a BG model exposed to Python.
///
/// Purpose
/// -------
/// Read-only view of an [`OptimOutcome`] for Python, carrying the optimizer
/// diagnostics a caller might want to inspect after `fit`.
///
/// Key behaviors
/// -------------
/// - Hold the final parameter vector `theta_hat` and scalar diagnostics such
///   as objective value, convergence flag, status string, iteration count,
///   and gradient norm.
/// - Copy every field into a fresh Python-owned value on access; nothing is
///   borrowed across the FFI boundary.
///
/// Parameters
/// ----------
/// Instances are constructed internally by the `BG.results` getter and are
/// not created directly by user code.
///
/// Fields
/// ------
/// - `inner`: [`OptimOutcome`]
///   Complete result of the simplex run that produced the fit.
///
/// Invariants
/// ----------
/// - `inner` always corresponds to the most recent call to [`BGModel::fit`]
///   on the owning model.
///
/// Performance
/// -----------
/// - Accessors are O(n) only in the length of `theta_hat` and `fn_evals`
///   when cloning into Python; other fields are scalar copies.
///
/// Notes
/// -----
/// - Rust code has no reason to touch this type; it exists only so optimizer
///   diagnostics are inspectable from Python.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "bg_retention.retention_models")]
pub struct BGOptimOutcome {
    /// Optimizer result the getters read from.
    pub inner: OptimOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl BGOptimOutcome {
    #[getter]
    pub fn theta_hat(&self) -> Vec<f64> {
        self.inner.theta_hat.to_vec()
    }

    #[getter]
    pub fn value(&self) -> f64 {
        self.inner.value
    }

    #[getter]
    pub fn converged(&self) -> bool {
        self.inner.converged
    }

    #[getter]
    pub fn status(&self) -> String {
        self.inner.status.clone()
    }

    #[getter]
    pub fn iterations(&self) -> usize {
        self.inner.iterations
    }

    #[getter]
    pub fn grad_norm(&self) -> Option<f64> {
        self.inner.grad_norm
    }

    #[getter]
    pub fn fn_evals(&self) -> Vec<(String, u64)> {
        self.inner.fn_evals.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }
}

/// BGFittedParams — fitted model-space parameters for a BG model.
///
/// Purpose
/// -------
/// Provide Python access to the model-space parameters obtained at the
/// fitted optimum of a [`BGModel`].
///
/// Key behaviors
/// -------------
/// - Hand out `gamma`, `delta`, and the optional `decay` slope as plain
///   floats, copied on every access.
/// - Keep the shape of [`BGParams`] while hiding its constructors and
///   validation from Python.
///
/// Parameters
/// ----------
/// Instances are constructed internally by the `BG.fitted_params` getter
/// (and by `BGFitReport.params`) and are not created directly by user code.
///
/// Fields
/// ------
/// - `inner`: [`BGParams`]
///   Validated model-space parameters corresponding to the last fitted
///   model.
///
/// Invariants
/// ----------
/// - `inner` satisfies all invariants documented on [`BGParams`], including
///   positivity of both shape parameters.
///
/// Performance
/// -----------
/// - All getters are O(1) scalar copies.
///
/// Notes
/// -----
/// - Rust callers should work with [`BGParams`] itself; this wrapper only
///   serves the Python boundary.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "bg_retention.retention_models")]
pub struct BGFittedParams {
    pub inner: BGParams,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl BGFittedParams {
    #[getter]
    pub fn gamma(&self) -> f64 {
        self.inner.gamma
    }

    #[getter]
    pub fn delta(&self) -> f64 {
        self.inner.delta
    }

    #[getter]
    pub fn decay(&self) -> Option<f64> {
        self.inner.decay
    }
}

/// BGForecast — projected retention path for a BG model.
///
/// Purpose
/// -------
/// Provide Python access to the forward projection produced by
/// [`BGModel::project`].
///
/// Key behaviors
/// -------------
/// - Expose the projected `remaining` and `lost` paths along with the
///   initial population, each copied out on access.
/// - Follow [`ForecastTable`] field for field so Python sees the same
///   projection Rust computed.
///
/// Parameters
/// ----------
/// Instances are returned by `BG.project(...)` and are not created directly
/// by user code.
///
/// Fields
/// ------
/// - `inner`: [`ForecastTable`]
///   Rust-side projection with per-period remaining and lost counts.
///
/// Invariants
/// ----------
/// - `inner` satisfies the projection invariants documented on
///   [`ForecastTable`]: non-increasing remaining counts bounded by the
///   initial population, with non-negative per-period losses.
///
/// Performance
/// -----------
/// - The path getters clone one `ndarray` vector into a `Vec<f64>` per call;
///   the scalar getters are copies.
///
/// Notes
/// -----
/// - From Rust, call [`BGModel::project`] and keep the [`ForecastTable`];
///   nothing here adds to it.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "bg_retention.retention_models")]
pub struct BGForecast {
    pub inner: ForecastTable,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl BGForecast {
    #[getter]
    pub fn initial_population(&self) -> f64 {
        self.inner.initial_population
    }

    #[getter]
    pub fn remaining(&self) -> Vec<f64> {
        self.inner.remaining.to_vec()
    }

    #[getter]
    pub fn lost(&self) -> Vec<f64> {
        self.inner.lost.to_vec()
    }

    #[getter]
    pub fn final_remaining(&self) -> f64 {
        self.inner.final_remaining()
    }
}

/// _bg_retention — entry point PyO3 compiles the extension module from.
///
/// Purpose
/// -------
/// Assemble the `_bg_retention` Python module: create `retention_models`,
/// fill it with the wrapper classes, and make it importable by dotted path.
///
/// Key behaviors
/// -------------
/// - Create the `retention_models` submodule.
/// - Attach the submodule to the parent `_bg_retention` module.
/// - Register the submodule in `sys.modules` so it is importable via a
///   dotted path from Python.
///
/// Parameters
/// ----------
/// - `_py`: [`Python`]
///   GIL token PyO3 passes in while the interpreter imports the extension.
/// - `m`: `&Bound<PyModule>`
///   The `_bg_retention` module being populated.
///
/// Returns
/// -------
/// `PyResult<()>`
///   `Ok(())` once the classes and submodule are in place.
///
/// Errors
/// ------
/// - `PyErr`
///   If the submodule cannot be created or `sys.modules` rejects the entry.
///
/// Panics
/// ------
/// - Does not panic; every failure path surfaces as a `PyErr` to the
///   importing interpreter.
///
/// Notes
/// -----
/// - The interpreter runs this during `import _bg_retention`; user code
///   never calls it.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _bg_retention<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let retention_models_mod = PyModule::new(_py, "retention_models")?;
    retention_models(_py, m, &retention_models_mod)?;

    // sys.modules needs the dotted name or a direct
    // `import bg_retention.retention_models` would fail.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("bg_retention.retention_models", retention_models_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn retention_models<'py>(
    _py: Python, bg_retention: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<BG>()?;
    m.add_class::<BGFitReport>()?;
    m.add_class::<BGOptimOutcome>()?;
    m.add_class::<BGFittedParams>()?;
    m.add_class::<BGForecast>()?;
    bg_retention.add_submodule(m)?;
    Ok(())
}
