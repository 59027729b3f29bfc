//! Errors for BG retention models (survival-series validation, projection
//! inputs, fit options, and optimizer failures).
//!
//! This module defines a model error type, [`RetentionError`], and a parameter
//! error type, [`ParamError`], used across the Python-facing API and the
//! internal Rust core. Both implement `Display`/`Error` and convert to `PyErr`
//! for PyO3 when the `python-bindings` feature is enabled.
//!
//! ## Conventions
//! - **Indices are 0-based** (match Rust/NumPy); index 0 of the raw series is
//!   the initial cohort count, index `t` the count remaining after period `t`.
//! - Remaining counts must be **finite, non-negative, and non-increasing**
//!   (churn is irreversible; a rise between periods is rejected, not clamped).
//! - Optimizer/backend errors are normalized to
//!   [`RetentionError::OptimizationFailed`] with a human-readable status.
#[cfg(feature = "python-bindings")]
use pyo3::exceptions::PyValueError;
#[cfg(feature = "python-bindings")]
use pyo3::prelude::*;

use crate::optimization::errors::OptError;

/// Crate-wide result alias for retention-model operations that may produce
/// [`RetentionError`].
pub type RetentionResult<T> = Result<T, RetentionError>;

/// Result alias for parameter-construction/validation paths that may produce
/// [`ParamError`].
pub type ParamResult<T> = Result<T, ParamError>;

/// Unified error type for BG retention modeling.
///
/// Covers survival-series validation, projection-input checks, fit-option
/// checks, and estimation/optimizer failures. Implements `Display`/`Error`
/// and converts to a Python `ValueError` at PyO3 boundaries.
#[derive(Debug, Clone, PartialEq)]
pub enum RetentionError {
    // ---- Input/data validation ----
    /// Series needs the initial cohort count plus at least one follow-up.
    SeriesTooShort { len: usize },

    /// A remaining count is NaN/±inf.
    NonFiniteCount { index: usize, value: f64 },

    /// A remaining count is negative.
    NegativeCount { index: usize, value: f64 },

    /// Remaining counts rose between consecutive periods.
    IncreasingCount { index: usize, previous: f64, value: f64 },

    // ---- Projection inputs ----
    /// Projection horizon must cover at least one period.
    ZeroHorizon,

    /// Initial population for projection must be finite and non-negative.
    InvalidInitialPopulation { value: f64 },

    // ---- Fit options ----
    /// Restart count must be at least 1 (restart 0 is the canonical seed).
    InvalidRestarts { restarts: usize },

    // ---- Estimation / optimizer ----
    /// Optimizer failed; include a human-readable status/reason.
    OptimizationFailed { status: String },

    /// Model hasn't been fitted yet.
    ModelNotFitted,

    // ---- Parameter validation ----
    /// Theta length mismatch for BGParams.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// Gamma must be finite and > 0.
    InvalidGamma { value: f64 },

    /// Delta must be finite and > 0.
    InvalidDelta { value: f64 },

    /// Decay slope must be finite.
    InvalidDecay { value: f64 },

    /// Unconstrained optimization input must have finite values.
    InvalidThetaInput { index: usize, value: f64 },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for RetentionError {}

impl std::fmt::Display for RetentionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            RetentionError::SeriesTooShort { len } => {
                write!(
                    f,
                    "Survival series needs at least 2 entries (initial cohort plus one follow-up); got {len}."
                )
            }
            RetentionError::NonFiniteCount { index, value } => {
                write!(f, "Remaining count at index {index} is non-finite: {value}")
            }
            RetentionError::NegativeCount { index, value } => {
                write!(f, "Remaining count at index {index} is negative: {value}")
            }
            RetentionError::IncreasingCount { index, previous, value } => {
                write!(
                    f,
                    "Remaining count at index {index} rose from {previous} to {value}; counts must be non-increasing."
                )
            }
            // ---- Projection inputs ----
            RetentionError::ZeroHorizon => {
                write!(f, "Projection horizon must be at least 1 period.")
            }
            RetentionError::InvalidInitialPopulation { value } => {
                write!(f, "Initial population must be finite and non-negative; got: {value}")
            }
            // ---- Fit options ----
            RetentionError::InvalidRestarts { restarts } => {
                write!(f, "Restart count must be at least 1; got: {restarts}")
            }
            // ---- Estimation / optimizer ----
            RetentionError::OptimizationFailed { status } => {
                write!(f, "Optimizer failed with status: {status}")
            }
            RetentionError::ModelNotFitted => {
                write!(f, "Model hasn't been fitted yet.")
            }
            // ---- Parameter validation ----
            RetentionError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, got {actual}")
            }
            RetentionError::InvalidGamma { value } => {
                write!(f, "Gamma must be finite and > 0, got {value}")
            }
            RetentionError::InvalidDelta { value } => {
                write!(f, "Delta must be finite and > 0, got {value}")
            }
            RetentionError::InvalidDecay { value } => {
                write!(f, "Decay slope must be finite, got {value}")
            }
            RetentionError::InvalidThetaInput { index, value } => {
                write!(f, "Theta input at index {index} must be finite, got {value}")
            }
            RetentionError::UnknownError => {
                write!(f, "An unknown error occurred in retention modeling.")
            }
        }
    }
}

/// Convert a [`RetentionError`] into a Python `ValueError` with the error
/// message.
///
/// This is used at the Rust↔Python boundary to surface domain errors cleanly.
#[cfg(feature = "python-bindings")]
impl std::convert::From<RetentionError> for PyErr {
    fn from(err: RetentionError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// Normalize optimizer-layer failures into [`RetentionError::OptimizationFailed`]
/// with the optimizer error's message as the status string.
impl From<OptError> for RetentionError {
    fn from(err: OptError) -> RetentionError {
        RetentionError::OptimizationFailed { status: err.to_string() }
    }
}

impl From<ParamError> for RetentionError {
    fn from(err: ParamError) -> RetentionError {
        match err {
            ParamError::ThetaLengthMismatch { expected, actual } => {
                RetentionError::ThetaLengthMismatch { expected, actual }
            }
            ParamError::InvalidGamma { value } => RetentionError::InvalidGamma { value },
            ParamError::InvalidDelta { value } => RetentionError::InvalidDelta { value },
            ParamError::InvalidDecay { value } => RetentionError::InvalidDecay { value },
            ParamError::InvalidThetaInput { index, value } => {
                RetentionError::InvalidThetaInput { index, value }
            }
        }
    }
}

/// Errors specific to parameter construction and validation.
///
/// Typical causes include non-positive Beta shapes, a non-finite decay slope,
/// and length mismatches or non-finite coordinates in the optimizer vector.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    /// Theta length mismatch for BGParams.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// Gamma must be finite and > 0.
    InvalidGamma { value: f64 },

    /// Delta must be finite and > 0.
    InvalidDelta { value: f64 },

    /// Decay slope must be finite.
    InvalidDecay { value: f64 },

    /// Unconstrained optimization input must have finite values.
    InvalidThetaInput { index: usize, value: f64 },
}

impl std::error::Error for ParamError {}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, got {actual}")
            }
            ParamError::InvalidGamma { value } => {
                write!(f, "Gamma must be finite and > 0, got {value}")
            }
            ParamError::InvalidDelta { value } => {
                write!(f, "Delta must be finite and > 0, got {value}")
            }
            ParamError::InvalidDecay { value } => {
                write!(f, "Decay slope must be finite, got {value}")
            }
            ParamError::InvalidThetaInput { index, value } => {
                write!(f, "Theta input at index {index} must be finite, got {value}")
            }
        }
    }
}

/// Convert a [`ParamError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl std::convert::From<ParamError> for PyErr {
    fn from(err: ParamError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
