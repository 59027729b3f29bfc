use argmin::core::{ArgminError, Error};

use crate::retention::errors::ParamError;

/// Result alias every optimizer routine returns.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// Model supplies no analytic gradient; callers fall back to finite
    /// differences.
    GradientNotImplemented,

    /// Gradient length differs from the parameter length.
    GradientDimMismatch {
        expected: usize,
        found: usize,
    },

    /// A gradient entry is NaN or infinite.
    InvalidGradient {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    // ---- Simplex options ----
    /// Simplex standard deviation tolerance outside (0, ∞).
    InvalidTolSd {
        tol: f64,
        reason: &'static str,
    },
    /// Iteration cap of zero.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },
    /// Neither an sd tolerance nor an iteration cap was supplied.
    NoTolerancesProvided,

    /// Simplex displacement step outside (0, ∞).
    InvalidSimplexStep {
        step: f64,
        reason: &'static str,
    },

    // ---- Cost function ----
    /// Cost came back NaN or infinite.
    NonFiniteCost {
        value: f64,
    },

    // ---- Optimizer outcome ----
    /// A fitted parameter coordinate is NaN or infinite.
    InvalidThetaHat {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// Solver finished without a best parameter vector.
    MissingThetaHat,

    // ---- Argmin ----
    /// Argmin `InvalidParameter`.
    InvalidParameter {
        text: String,
    },
    /// Argmin `NotImplemented`.
    NotImplemented {
        text: String,
    },
    /// Argmin `NotInitialized`.
    NotInitialized {
        text: String,
    },
    /// Argmin `ConditionViolated`.
    ConditionViolated {
        text: String,
    },
    /// Argmin `CheckpointNotFound`.
    CheckPointNotFound {
        text: String,
    },
    /// Argmin `PotentialBug`.
    PotentialBug {
        text: String,
    },
    /// Argmin `ImpossibleError`.
    ImpossibleError {
        text: String,
    },
    /// Any other error surfaced through Argmin's `anyhow` wrapper.
    BackendError {
        text: String,
    },

    // ---- Finite differences ----
    /// Hessian shape differs from `dim × dim`.
    HessianDimMismatch {
        expected: usize,
        found: (usize, usize),
    },

    /// A Hessian entry is NaN or infinite.
    InvalidHessian {
        row: usize,
        col: usize,
        value: f64,
    },

    // ---- Parameter mapping ----
    /// Theta length mismatch for BGParams.
    ThetaLengthMismatch {
        expected: usize,
        actual: usize,
    },

    /// Gamma must be finite and > 0.
    InvalidGamma {
        value: f64,
    },

    /// Delta must be finite and > 0.
    InvalidDelta {
        value: f64,
    },

    /// Decay slope must be finite.
    InvalidDecay {
        value: f64,
    },

    /// A caller-supplied theta coordinate was NaN or infinite.
    InvalidThetaInput {
        index: usize,
        value: f64,
    },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            OptError::GradientNotImplemented => {
                write!(f, "Analytic gradient not implemented")
            }
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient length must match theta: expected {expected}, got {found}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Gradient entry {index} must be finite, got {value}: {reason}")
            }

            // ---- Simplex options ----
            OptError::InvalidTolSd { tol, reason } => {
                write!(f, "Simplex sd tolerance must be positive and finite, got {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Iteration cap must be positive, got {max_iter}: {reason}")
            }
            OptError::NoTolerancesProvided => {
                write!(f, "At least one stopping tolerance must be provided")
            }
            OptError::InvalidSimplexStep { step, reason } => {
                write!(f, "Simplex step must be positive and finite, got {step}: {reason}")
            }

            // ---- Cost function ----
            OptError::NonFiniteCost { value } => {
                write!(f, "Cost evaluated to a non-finite value: {value}")
            }

            // ---- Optimizer outcome ----
            OptError::InvalidThetaHat { index, value, reason } => {
                write!(f, "Fitted parameter {index} must be finite, got {value}: {reason}")
            }
            OptError::MissingThetaHat => {
                write!(f, "Solver returned no parameter estimate")
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => {
                write!(f, "Argmin invalid parameter: {text}")
            }
            OptError::NotImplemented { text } => {
                write!(f, "Argmin not implemented: {text}")
            }
            OptError::NotInitialized { text } => {
                write!(f, "Argmin not initialized: {text}")
            }
            OptError::ConditionViolated { text } => {
                write!(f, "Argmin condition violated: {text}")
            }
            OptError::CheckPointNotFound { text } => {
                write!(f, "Argmin checkpoint not found: {text}")
            }
            OptError::PotentialBug { text } => {
                write!(f, "Argmin potential bug: {text}")
            }
            OptError::ImpossibleError { text } => {
                write!(f, "Argmin impossible error: {text}")
            }
            OptError::BackendError { text } => {
                write!(f, "Optimizer backend error: {text}")
            }

            // ---- Finite differences ----
            OptError::HessianDimMismatch { expected, found } => {
                write!(f, "Hessian must be {expected}x{expected}, got {found:?}")
            }
            OptError::InvalidHessian { row, col, value } => {
                write!(f, "Hessian entry ({row}, {col}) must be finite, got {value}")
            }

            // ---- Parameter mapping ----
            OptError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, got {actual}")
            }
            OptError::InvalidGamma { value } => {
                write!(f, "Gamma must be finite and > 0, got {value}")
            }
            OptError::InvalidDelta { value } => {
                write!(f, "Delta must be finite and > 0, got {value}")
            }
            OptError::InvalidDecay { value } => {
                write!(f, "Decay slope must be finite, got {value}")
            }
            OptError::InvalidThetaInput { index, value } => {
                write!(f, "Theta input at index {index} must be finite, got {value}")
            }

            // ---- Fallback ----
            OptError::UnknownError => {
                write!(f, "An unknown optimizer error occurred")
            }
        }
    }
}

/// Unpack Argmin's `anyhow`-style [`Error`] into the matching [`OptError`]
/// variant, or [`OptError::BackendError`] when the inner error is not an
/// [`ArgminError`].
impl From<Error> for OptError {
    fn from(err: Error) -> Self {
        match err.downcast() {
            Ok(argmin_err) => match argmin_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(other) => OptError::BackendError { text: other.to_string() },
        }
    }
}

/// Lift parameter-validation failures into the optimizer error space so that
/// `check`/`value` implementations can use `?` on [`ParamError`] results.
impl From<ParamError> for OptError {
    fn from(err: ParamError) -> Self {
        match err {
            ParamError::ThetaLengthMismatch { expected, actual } => {
                OptError::ThetaLengthMismatch { expected, actual }
            }
            ParamError::InvalidGamma { value } => OptError::InvalidGamma { value },
            ParamError::InvalidDelta { value } => OptError::InvalidDelta { value },
            ParamError::InvalidDecay { value } => OptError::InvalidDecay { value },
            ParamError::InvalidThetaInput { index, value } => {
                OptError::InvalidThetaInput { index, value }
            }
        }
    }
}
