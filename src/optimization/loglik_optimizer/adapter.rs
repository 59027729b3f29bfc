//! Adapter exposing a user `LogLikelihood` as an `argmin` problem.
//!
//! Maximizing `ℓ(θ)` becomes minimizing the cost `c(θ) = -ℓ(θ)`. The
//! Nelder–Mead search only ever touches the cost side; the gradient side
//! exists for curvature diagnostics (the finite-difference Hessians behind
//! standard errors) and for models that bring an analytic `∇ℓ(θ)`, which
//! is negated on the way through. Without an analytic gradient, the
//! **cost** closure is differenced directly, so that branch needs no sign
//! flip at all.
//!
//! Models in this crate keep infeasible regions *finite* by returning a
//! large penalty from `value` rather than `±∞`, so the `NonFiniteCost`
//! guard below only trips on genuine numerical corruption, such as a NaN
//! leaking out of the data.
use std::cell::RefCell;

use crate::optimization::{
    errors::OptError,
    loglik_optimizer::{
        finite_diff::fd_gradient,
        traits::LogLikelihood,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

/// Bridges a `LogLikelihood` and its data to `argmin`'s `CostFunction`
/// and `Gradient` traits.
///
/// - `CostFunction::cost` hands back `-ℓ(θ)`.
/// - `Gradient::gradient` hands back `-∇ℓ(θ)` when the model provides an
///   analytic gradient, and a finite difference of the cost otherwise.
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: LogLikelihood> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: LogLikelihood> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// Cost seen by the solver: `c(θ) = -ℓ(θ)`.
    ///
    /// The model's `value(θ, data)` runs first; a non-finite result is
    /// rejected before the sign flip.
    ///
    /// # Errors
    /// - Propagates any `OptError` the model raises from `value`.
    /// - Returns `NonFiniteCost` for NaN or infinite values.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let output = self.f.value(theta, self.data)?;
        if !output.is_finite() {
            return Err((OptError::NonFiniteCost { value: output }).into());
        }
        Ok(-output)
    }
}

impl<'a, F: LogLikelihood> Gradient for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// Gradient of the cost at `θ`.
    ///
    /// Behavior:
    /// - With an analytic `grad(θ, data)`: validate it, return `-grad`.
    /// - Without one, finite-difference the **cost**:
    ///   - central differences first;
    ///   - if any cost evaluation failed mid-difference (parked in
    ///     `closure_err`), retry with [`fd_gradient`], whose forward
    ///     scheme stays on the near side of a feasibility boundary;
    ///   - if the central gradient fails validation, same forward retry.
    ///
    /// Implementation notes:
    /// - The differencing closure must return `f64`, so `?` is out; the
    ///   first cost error lands in `closure_err` and the closure yields
    ///   `NaN` for that call. The parked error is rethrown afterwards.
    /// - On a penalty plateau the finite-difference gradient is
    ///   legitimately zero. Infeasibility shows up in the cost, not here.
    ///
    /// # Errors
    /// - Propagates model errors from `grad` other than
    ///   `GradientNotImplemented`.
    /// - Propagates cost errors raised during differencing.
    /// - Returns validation errors for wrong-length or non-finite
    ///   gradients.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = theta.len();
        match self.f.grad(theta, self.data) {
            Ok(g) => {
                validate_grad(&g, dim)?;
                Ok(-g)
            }
            Err(OptError::GradientNotImplemented) => {
                let closure_err: RefCell<Option<Error>> = RefCell::new(None);
                let cost_closure = |theta: &Theta| -> f64 {
                    match self.cost(theta) {
                        Ok(val) => val,
                        Err(e) => {
                            let mut slot = closure_err.borrow_mut();
                            if slot.is_none() {
                                *slot = Some(e);
                            }
                            f64::NAN
                        }
                    }
                };
                let central = theta.central_diff(&cost_closure);
                if closure_err.borrow().is_some() {
                    return Ok(fd_gradient(theta, &cost_closure, &closure_err)?);
                }
                match validate_grad(&central, dim) {
                    Ok(()) => Ok(central),
                    Err(_) => Ok(fd_gradient(theta, &cost_closure, &closure_err)?),
                }
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl<'a, F: LogLikelihood> ArgMinAdapter<'a, F> {
    /// Pair a model with the data it will be evaluated against.
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }
}
