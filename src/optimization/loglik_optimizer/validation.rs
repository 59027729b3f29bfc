//! Consistency checks shared across the optimizer surface.
//!
//! The checks live in one module so the
//! calling code stays uniform about what it accepts:
//!
//! - **Option checks**: [`verify_tol_sd`] and [`verify_simplex_step`] gate
//!   the optional stopping tolerance and simplex displacement, which must
//!   be finite and strictly positive whenever supplied.
//! - **Gradient checks**: [`validate_grad`] pins the length to the
//!   parameter dimension and rejects non-finite entries.
//! - **Estimate checks**: [`validate_theta_hat`] unwraps a candidate
//!   `theta_hat` and rejects missing or non-finite coordinates.
//! - **Objective checks**: [`validate_value`] rejects NaN and infinite
//!   log-likelihood values.
//!
//! Every failure maps to a dedicated [`OptError`] variant carrying the
//! offending index and value, which keeps diagnostics readable at the
//! layers above.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{Grad, Theta, types::Hessian},
};

/// Check the optional simplex standard deviation tolerance.
///
/// `None` is fine; the solver then stops on its iteration cap alone. A
/// supplied value must be finite and strictly positive.
///
/// # Errors
/// Returns [`OptError::InvalidTolSd`] for NaN, infinite, zero, or negative
/// values.
pub fn verify_tol_sd(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolSd { tol, reason: "non-finite" });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolSd { tol, reason: "not strictly positive" });
        }
    }
    Ok(())
}

/// Check the optional relative displacement used to spread the initial
/// simplex around its seed.
///
/// `None` is fine; the default displacement applies. A supplied value must
/// be finite and strictly positive.
///
/// # Errors
/// Returns [`OptError::InvalidSimplexStep`] for NaN, infinite, zero, or
/// negative values.
pub fn verify_simplex_step(step: Option<f64>) -> OptResult<()> {
    if let Some(step) = step {
        if !step.is_finite() {
            return Err(OptError::InvalidSimplexStep { step, reason: "non-finite" });
        }
        if step <= 0.0 {
            return Err(OptError::InvalidSimplexStep { step, reason: "not strictly positive" });
        }
    }
    Ok(())
}

/// Check a gradient vector for the expected length and finite entries.
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] when `grad.len() != dim`.
/// - [`OptError::InvalidGradient`] carrying the index and value of the
///   first NaN or infinite entry.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient { index, value, reason: "non-finite entry" });
        }
    }
    Ok(())
}

/// Unwrap a candidate parameter estimate, rejecting absence and non-finite
/// coordinates.
///
/// # Returns
/// The owned `Theta` when present and fully finite.
///
/// # Errors
/// - [`OptError::MissingThetaHat`] when the solver produced no vector.
/// - [`OptError::InvalidThetaHat`] carrying the index and value of the
///   first NaN or infinite coordinate.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    let theta = theta_hat.ok_or(OptError::MissingThetaHat)?;
    for (index, &value) in theta.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidThetaHat {
                index,
                value,
                reason: "non-finite coordinate",
            });
        }
    }
    Ok(theta)
}

/// Check that a scalar objective value is finite.
///
/// Sign is irrelevant here; log-likelihoods are routinely negative.
///
/// # Errors
/// Returns [`OptError::NonFiniteCost`] for NaN or infinite values.
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

/// Check a Hessian matrix for the expected square shape and finite entries.
///
/// # Arguments
/// - `hessian`: matrix to check.
/// - `dim`: expected row and column count.
///
/// # Errors
/// - [`OptError::HessianDimMismatch`] when the shape is not `dim × dim`.
/// - [`OptError::InvalidHessian`] carrying the position and value of the
///   first NaN or infinite entry.
pub fn validate_hessian(hessian: &Hessian, dim: usize) -> OptResult<()> {
    if hessian.nrows() != dim || hessian.ncols() != dim {
        return Err(OptError::HessianDimMismatch {
            expected: dim,
            found: (hessian.nrows(), hessian.ncols()),
        });
    }
    for ((row, col), &value) in hessian.indexed_iter() {
        if !value.is_finite() {
            return Err(OptError::InvalidHessian { row, col, value });
        }
    }
    Ok(())
}
