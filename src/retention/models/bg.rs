//! BG retention model: multi-start MLE fit, projection, and classical SEs.
//!
//! This module wires the BG (beta-geometric) likelihood to the
//! [`LogLikelihood`] trait. The likelihood is evaluated allocation-free in
//! log space through a shared [`BGScratch`] workspace, maximized with a
//! derivative-free simplex search over a deterministic restart ladder, and
//! the fitted parameters drive forward population projections.
//!
//! Key ideas:
//! - θ is the identity embedding of model space (`[γ, δ]` or
//!   `[γ, δ, decay]`); the simplex roams unconstrained and the likelihood
//!   absorbs infeasible vertices into a large penalty instead of erroring.
//! - `value` returns the **log-likelihood** `ℓ(θ) = −NLL(θ)`, matching the
//!   maximizer's convention; it is total over all finite inputs.
//! - No analytic gradient is provided: the simplex search never needs one,
//!   and standard errors build the observed information from
//!   finite-difference gradients of the NLL at θ̂.
//!
//! This impl is designed to be optimizer-friendly (Argmin), reusing the
//! cumulative-exponent buffer across evaluations and allocating only for
//! returned results.
use crate::{
    inference::hessian::calc_standard_errors,
    optimization::{
        errors::OptResult,
        loglik_optimizer::{LogLikelihood, OptimOutcome, Theta, maximize_multistart},
    },
    retention::{
        core::{
            data::SurvivalTable,
            forecasts::{ForecastTable, project},
            loglik::negative_log_likelihood,
            options::BGOptions,
            params::{BGParams, BGScratch, BGVariant},
            validation::validate_theta,
        },
        errors::{RetentionError, RetentionResult},
        models::model_internals::{extract_theta, restart_seeds},
    },
};
use finitediff::FiniteDiff;
use ndarray::Array1;

/// BG retention model with penalty-absorbing log-likelihood.
///
/// Encapsulates the model variant (`variant`), runtime options (`options`),
/// and a preallocated scratch buffer (`scratch`) reused across likelihood
/// evaluations. After fitting, [`results`] stores the best optimization
/// outcome across restarts and [`fitted_params`] the materialized
/// model-space parameters.
///
/// # Notes
/// - Designed for allocation-free inner loops: the cumulative-exponent
///   series of the time-varying variant is filled in-place on `scratch`.
/// - Implements [`LogLikelihood`] so it plugs directly into Argmin-based
///   optimizers.
///
/// [`results`]: BGModel::results
/// [`fitted_params`]: BGModel::fitted_params
#[derive(Debug, Clone, PartialEq)]
pub struct BGModel {
    /// Model variant (static or time-varying hazard exponent).
    pub variant: BGVariant,
    /// Model options.
    pub options: BGOptions,
    /// Workspace buffer for the cumulative-exponent series.
    pub scratch: BGScratch,
    /// Fit results (populated after `fit`).
    pub results: Option<OptimOutcome>,
    /// Fitted parameters (populated after `fit`).
    pub fitted_params: Option<BGParams>,
}

/// Summary of a completed fit.
///
/// Carries the materialized parameters together with the fit diagnostics a
/// caller typically inspects first; the full optimizer outcome (status
/// string, iteration counts, evaluation counters) stays available on
/// [`BGModel::results`].
#[derive(Debug, Clone, PartialEq)]
pub struct FitReport {
    /// Fitted model-space parameters at θ̂.
    pub params: BGParams,
    /// `true` only if the winning restart genuinely converged.
    pub converged: bool,
    /// Negative log-likelihood at θ̂.
    pub nll: f64,
}

impl BGModel {
    /// Construct a new [`BGModel`] with a preallocated scratch buffer.
    ///
    /// # Arguments
    /// - `variant`: static (2-parameter) or time-varying (3-parameter)
    ///   hazard family.
    /// - `options`: run-time options (simplex configuration, restart count).
    /// - `periods`: number of observed periods in the fitting data; used to
    ///   size the cumulative-exponent buffer.
    ///
    /// # Returns
    /// A model instance whose scratch space accommodates survival tables
    /// with up to `periods` periods.
    pub fn new(variant: BGVariant, options: BGOptions, periods: usize) -> BGModel {
        let scratch = BGScratch::new(periods);
        BGModel { variant, options, scratch, results: None, fitted_params: None }
    }

    /// Fit the BG model by maximum likelihood over the restart ladder and
    /// cache results.
    ///
    /// ## Steps
    /// 1. Build the deterministic seed ladder from `options.restarts`
    ///    (canonical seed first, mirrored power-of-two spreads after).
    /// 2. Run the simplex search from every seed via `maximize_multistart`,
    ///    keeping the best outcome; ties go to the earlier seed.
    /// 3. Store the winning outcome (including `theta_hat`) in
    ///    `self.results`.
    /// 4. Materialize `theta_hat` into model space via
    ///    [`BGParams::from_theta`] and store in `self.fitted_params`.
    ///
    /// ## Arguments
    /// - `data`: observed survival table.
    ///
    /// ## Returns
    /// - `Ok(FitReport)` on success; `self.results` and
    ///   `self.fitted_params` are populated.
    ///
    /// ## Errors
    /// - Propagates optimizer failures (e.g., non-finite best value, a
    ///   failed restart run) converted into
    ///   [`RetentionError::OptimizationFailed`].
    /// - Propagates [`BGParams::from_theta`] domain errors if the winning
    ///   θ̂ lands outside the valid region (penalty plateaus).
    ///
    /// ## Notes
    /// - A fit that merely exhausts its iteration budget is **not** an
    ///   error: the report's `converged` flag is `false` and
    ///   `self.results.status` records the termination reason.
    /// - The scratch buffer must accommodate `data.periods()`; models are
    ///   sized at construction via the `periods` argument of
    ///   [`BGModel::new`].
    pub fn fit(&mut self, data: &SurvivalTable) -> RetentionResult<FitReport> {
        let seeds = restart_seeds(self.variant, self.options.restarts);
        self.results = Some(maximize_multistart(self, &seeds, data, &self.options.simplex)?);
        let outcome = self.results.as_ref().unwrap();
        let params = BGParams::from_theta(outcome.theta_hat.view(), self.variant)?;
        let converged = outcome.converged;
        let nll = -outcome.value;
        self.fitted_params = Some(params.clone());
        Ok(FitReport { params, converged, nll })
    }

    /// Project the retention curve `horizon` periods ahead from the fitted
    /// parameters.
    ///
    /// ## Inputs
    /// - `initial_population`: cohort size at period 0 (finite, ≥ 0).
    /// - `horizon`: number of periods to project (H ≥ 1).
    ///
    /// ## Behavior
    /// 1. Requires that the model has been fitted (`self.fitted_params`
    ///    present).
    /// 2. Evaluates the fitted survival function period by period and
    ///    splits the cohort into remaining and lost counts.
    ///
    /// ## Returns
    /// - `Ok(ForecastTable)` with `remaining` and `lost` paths of length
    ///   `horizon`.
    ///
    /// ## Errors
    /// - Returns [`RetentionError::ModelNotFitted`] if called before
    ///   fitting.
    /// - Propagates input validation errors for `horizon` and
    ///   `initial_population`.
    ///
    /// ## Notes
    /// - Projection horizons are independent of the fitted table's length;
    ///   the time-varying variant recomputes its cumulative exponents for
    ///   the requested horizon.
    pub fn project(
        &self, initial_population: f64, horizon: usize,
    ) -> RetentionResult<ForecastTable> {
        let fitted_params = self.fitted_params.as_ref().ok_or(RetentionError::ModelNotFitted)?;
        project(fitted_params, initial_population, horizon)
    }

    /// Classical standard errors for θ̂ from the observed information.
    ///
    /// ## Behavior
    /// 1. Requires that the model has been fitted.
    /// 2. Builds the finite-difference gradient map of the **total**
    ///    negative log-likelihood on `data`.
    /// 3. Forms the observed information `J(θ̂)` via finite-difference
    ///    Hessians and returns the square roots of the diagonal of its
    ///    eigen-truncated pseudoinverse.
    ///
    /// ## Arguments
    /// - `data`: the survival table the model was fitted on.
    ///
    /// ## Returns
    /// - `Ok(se)` — per-coordinate standard errors, aligned with θ̂
    ///   (`[γ, δ]` or `[γ, δ, decay]`).
    ///
    /// ## Errors
    /// - Returns [`RetentionError::ModelNotFitted`] if called before
    ///   fitting.
    /// - Propagates Hessian validation failures as
    ///   [`RetentionError::OptimizationFailed`].
    ///
    /// ## Notes
    /// - Weakly identified directions (eigenvalues at numerical zero) yield
    ///   an SE of 0.0 rather than blowing up; near-flat penalty plateaus
    ///   surface as Hessian validation errors instead.
    pub fn standard_errors(&self, data: &SurvivalTable) -> RetentionResult<Array1<f64>> {
        let theta_hat = extract_theta(self)?;
        let nll =
            |theta: &Theta| negative_log_likelihood(theta.view(), self.variant, data, &self.scratch);
        let grad_map = |theta: &Theta| theta.forward_diff(&nll);
        Ok(calc_standard_errors(&grad_map, theta_hat)?)
    }
}

impl LogLikelihood for BGModel {
    type Data = SurvivalTable;

    /// Log-likelihood evaluation at parameter vector `θ`.
    ///
    /// # Steps
    /// 1. Evaluate the negative log-likelihood in log space, filling the
    ///    cumulative-exponent scratch buffer for the time-varying variant.
    /// 2. Flip the sign to the maximizer's convention.
    ///
    /// # Arguments
    /// - `theta`: optimizer vector (len = 2 or 3 per variant).
    /// - `data`: observed survival table.
    ///
    /// # Returns
    /// - Scalar log-likelihood `ℓ(θ)`; infeasible `θ` yields the negated
    ///   penalty value rather than an error, keeping the simplex total.
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<f64> {
        Ok(-negative_log_likelihood(theta.view(), self.variant, data, &self.scratch))
    }

    /// Validate a seed parameter vector `θ`.
    ///
    /// # Behavior
    /// - Checks `θ.len()` against the variant's dimension.
    /// - Ensures all entries are finite.
    ///
    /// # Arguments
    /// - `theta`: optimizer seed vector.
    ///
    /// # Returns
    /// - `Ok(())` if valid, error otherwise.
    ///
    /// # Notes
    /// - Called once per restart on the seed only; mid-search vertices
    ///   bypass this hook, which is why `value` must absorb infeasibility
    ///   on its own.
    fn check(&self, theta: &Theta, _data: &Self::Data) -> OptResult<()> {
        validate_theta(theta.view(), self.variant.param_len())?;
        Ok(())
    }
}
