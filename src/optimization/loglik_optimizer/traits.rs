//! Types a caller touches when maximizing a log-likelihood.
//!
//! - [`LogLikelihood`]: the trait a model implements to be fitted.
//! - [`SimplexOptions`] and [`Tolerances`]: per-run optimizer settings.
//! - [`OptimOutcome`]: normalized result handed back by the `maximize` API.
//!
//! Sign convention: callers think in terms of maximizing `ℓ(θ)`; the
//! machinery underneath minimizes the cost `c(θ) = -ℓ(θ)`. An analytic
//! gradient, when supplied, is the gradient of the log-likelihood; the
//! adapter takes care of the flip.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        Cost, FnEvalMap, Grad, Theta,
        validation::{validate_theta_hat, validate_value, verify_simplex_step, verify_tol_sd},
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;

/// Interface a model implements to be maximized.
///
/// Implementors think in log-likelihood terms; the optimizer minimizes
/// `c(θ) = -ℓ(θ)` internally. A supplied analytic gradient is `∇ℓ(θ)` and
/// gets its sign flipped by the adapter.
///
/// - `type Data`: per-model data threaded into `value`/`grad`/`check`.
///
/// Required:
/// - `value(&Theta, &Data) -> OptResult<Cost>`: evaluate `ℓ(θ)`. Infeasible
///   regions should come back as large finite penalties rather than errors
///   so the simplex can walk out of them.
/// - `check(&Theta, &Data) -> OptResult<()>`: cheap validation hook run
///   once per seed before the search starts.
///
/// Optional:
/// - `grad(&Theta, &Data) -> OptResult<Grad>`: analytic gradient. Left
///   unimplemented, finite differences stand in wherever a gradient is
///   requested; the simplex search itself never asks for one.
pub trait LogLikelihood {
    type Data: 'static;

    // Required methods
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    // Optional methods
    fn grad(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }
}

/// Per-run optimizer settings.
///
/// Fields:
/// - `tols: Tolerances` — stopping tolerance and iteration cap.
/// - `step: Option<f64>` — relative displacement spreading the initial
///   simplex around its seed; `None` falls back to `0.05`.
/// - `verbose: bool` — when `true`, attaches a progress observer (behind
///   the `obs_slog` feature).
///
/// The [`Default`] instance uses `tol_sd = 1e-8`, `max_iter = 1000`, the
/// default step, and no observer.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplexOptions {
    pub tols: Tolerances,
    pub step: Option<f64>,
    pub verbose: bool,
}

impl SimplexOptions {
    /// Build options from already-validated tolerances plus an optional
    /// simplex step.
    ///
    /// # Errors
    /// Returns [`OptError::InvalidSimplexStep`] when `step` is supplied but
    /// not finite and strictly positive.
    pub fn new(tols: Tolerances, step: Option<f64>, verbose: bool) -> OptResult<Self> {
        verify_simplex_step(step)?;
        Ok(Self { tols, step, verbose })
    }
}

impl Default for SimplexOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances::new(Some(1e-8), Some(1_000)).unwrap(),
            step: None,
            verbose: false,
        }
    }
}

/// Stopping tolerance and iteration cap for a simplex run.
///
/// - `tol_sd`: stop when the standard deviation of the cost across the
///   simplex vertices drops below this threshold.
/// - `max_iter`: hard cap on iterations.
///
/// Either field may be `None`, but not both; see [`Tolerances::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_sd: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Rules
    /// - At least one of `tol_sd` or `max_iter` must be `Some`.
    /// - A supplied `tol_sd` must be finite and strictly positive.
    /// - A supplied `max_iter` must be `> 0`.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] when both are `None`.
    /// - [`OptError::InvalidTolSd`] for a bad tolerance.
    /// - [`OptError::InvalidMaxIter`] for a zero cap.
    pub fn new(tol_sd: Option<f64>, max_iter: Option<usize>) -> OptResult<Self> {
        if tol_sd.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_sd(tol_sd)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "at least one iteration is required",
                });
            }
        }
        Ok(Self { tol_sd, max_iter })
    }
}

/// Normalized result of a maximization run.
///
/// - `theta_hat`: the best parameter vector the search visited.
/// - `value`: best **log-likelihood** `ℓ(θ̂)`, sign already flipped back
///   from the cost.
/// - `converged`: `true` only for genuine solver convergence
///   (`SolverConverged` or `TargetCostReached`). Running out of iterations
///   leaves this `false` with the reason recorded in `status`, so callers
///   can warn instead of failing.
/// - `status`: human-readable termination reason.
/// - `iterations`: iterations the solver actually performed.
/// - `fn_evals`: Argmin's function-evaluation counters, keyed by counter
///   name (`cost_count` and friends).
/// - `grad_norm`: L2 norm of the last gradient Argmin held, when any.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl OptimOutcome {
    /// Assemble a validated [`OptimOutcome`] from raw solver state.
    ///
    /// `theta_hat` must be present with all-finite coordinates and `value`
    /// must be finite; the termination status collapses into the
    /// `(converged, status)` pair described on the struct.
    ///
    /// # Errors
    /// Propagates [`validate_theta_hat`] and [`validate_value`] failures.
    pub fn new(
        theta_hat_opt: Option<Theta>, value: f64, term_status: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(value)?;
        let (converged, status) = match term_status {
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
            TerminationStatus::Terminated(ref reason) => (
                matches!(
                    reason,
                    TerminationReason::SolverConverged | TerminationReason::TargetCostReached
                ),
                format!("{reason:?}"),
            ),
        };
        let iterations = iterations as usize;
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self { theta_hat, value, converged, status, iterations, fn_evals, grad_norm })
    }
}
