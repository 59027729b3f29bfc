#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    optimization::loglik_optimizer::traits::{SimplexOptions, Tolerances},
    retention::{
        core::{data::SurvivalTable, options::BGOptions, params::BGVariant},
        errors::RetentionError,
        models::bg::BGModel,
    },
};

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArrayMethods, PyReadonlyArray1};

/// Coerce a Python object into a read-only 1-D float64 numpy array.
///
/// Tries the cheapest route first: a contiguous `numpy.ndarray` is borrowed
/// as-is, a `pandas.Series` is asked for its numpy view via `to_numpy(False)`,
/// and anything else that extracts as a float sequence is copied into a fresh
/// array.
#[cfg(feature = "python-bindings")]
fn coerce_f64_array<'py>(
    py: Python<'py>, obj: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr) = obj.extract::<PyReadonlyArray1<f64>>() {
        if arr.as_slice().is_ok() {
            return Ok(arr);
        }
    }

    if let Ok(converted) = obj.call_method("to_numpy", (false,), None) {
        if let Ok(arr) = converted.extract::<PyReadonlyArray1<f64>>() {
            if arr.as_slice().is_ok() {
                return Ok(arr);
            }
        }
    }

    let copied: Vec<f64> = obj.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "counts must be a 1-D numpy.ndarray, pandas.Series, or sequence of floats",
        )
    })?;
    Ok(copied.into_pyarray(py).readonly())
}

#[cfg(feature = "python-bindings")]
pub fn build_bg_model(
    variant: Option<&str>, tol_sd: Option<f64>, max_iter: Option<usize>, step: Option<f64>,
    verbose: Option<bool>, restarts: Option<usize>, periods: usize,
) -> PyResult<BGModel> {
    let variant = extract_variant(variant)?;
    let simplex = extract_simplex_opts(tol_sd, max_iter, step, verbose)?;

    // A single seed unless the caller asks for a restart ladder.
    let options = BGOptions::new(simplex, restarts.unwrap_or(1))?;

    Ok(BGModel::new(variant, options, periods))
}

#[cfg(feature = "python-bindings")]
fn extract_variant(variant: Option<&str>) -> PyResult<BGVariant> {
    let variant_str = variant.unwrap_or("static").to_lowercase();
    match variant_str.as_str() {
        "static" => Ok(BGVariant::Static),
        "time_varying" | "time-varying" | "tv" => Ok(BGVariant::TimeVarying),
        other => Err(PyValueError::new_err(format!(
            "invalid variant {:?} (expected 'static' or 'time_varying')",
            other
        ))),
    }
}

#[cfg(feature = "python-bindings")]
fn extract_simplex_opts(
    tol_sd: Option<f64>, max_iter: Option<usize>, step: Option<f64>, verbose: Option<bool>,
) -> PyResult<SimplexOptions> {
    // With neither tolerance supplied, fall back to the documented defaults
    // instead of surfacing `NoTolerancesProvided` to Python.
    let tols = match (tol_sd, max_iter) {
        (None, None) => SimplexOptions::default().tols,
        _ => Tolerances::new(tol_sd, max_iter).map_err(RetentionError::from)?,
    };

    let opts =
        SimplexOptions::new(tols, step, verbose.unwrap_or(false)).map_err(RetentionError::from)?;

    Ok(opts)
}

#[cfg(feature = "python-bindings")]
pub fn extract_survival_table<'py>(
    py: Python<'py>, counts: &Bound<'py, PyAny>,
) -> PyResult<SurvivalTable> {
    let counts_arr = coerce_f64_array(py, counts)?;
    let counts_slice = counts_arr
        .as_slice()
        .map_err(|_| PyValueError::new_err("counts must be a contiguous 1-D float64 array"))?;
    let counts_vec = Array1::from(counts_slice.to_vec());
    Ok(SurvivalTable::from_counts(counts_vec.view())?)
}
