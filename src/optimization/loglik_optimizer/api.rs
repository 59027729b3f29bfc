//! High-level entry points for maximizing a user-provided `LogLikelihood`.
//!
//! Each entry point spreads an initial simplex around a seed, wraps the
//! model in an `ArgMinAdapter` (which *minimizes* `-ℓ(θ)`), and hands the
//! run to `run_nelder_mead`. The multi-start variant repeats that pipeline
//! over a seed list and keeps the best outcome.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::{build_initial_simplex, build_nelder_mead},
        run::run_nelder_mead,
        traits::{LogLikelihood, SimplexOptions},
    },
};
#[cfg(feature = "obs_slog")]
use crate::optimization::loglik_optimizer::run::log_initial_state;

/// Maximize a log-likelihood `ℓ(θ)` with a Nelder–Mead simplex search.
///
/// # Behavior
/// - Vets the seed through `f.check(theta0, data)`.
/// - Wraps `(f, data)` in an `ArgMinAdapter`, exposing the minimization
///   problem `c(θ) = -ℓ(θ)` to `argmin`.
/// - Spreads the initial simplex around `theta0`, one displaced
///   coordinate per vertex, and builds the solver over it.
/// - Delegates to `run_nelder_mead` for execution and outcome
///   normalization.
///
/// # Parameters
/// - `f`: the model implementing [`LogLikelihood`].
/// - `theta0`: seed parameter vector.
/// - `data`: payload threaded into `value`/`check`.
/// - `opts`: tolerances, simplex step, verbosity.
///
/// # Errors
/// - Propagates `f.check` rejections.
/// - Propagates builder errors from `build_nelder_mead`.
/// - Propagates runtime errors from `run_nelder_mead`.
///
/// # Returns
/// An [`OptimOutcome`] with `theta_hat`, the best value `ℓ(θ̂)`,
/// termination status, and iteration/evaluation counts.
///
/// # Example
/// ```no_run
/// use ndarray::array;
/// use bg_retention::optimization::errors::OptResult;
/// use bg_retention::optimization::loglik_optimizer::{
///     LogLikelihood, SimplexOptions, Tolerances, maximize,
/// };
///
/// struct ShiftedQuadratic;
/// impl LogLikelihood for ShiftedQuadratic {
///     type Data = ();
///     fn value(&self, theta: &ndarray::Array1<f64>, _: &()) -> OptResult<f64> {
///         // Concave with maximum at (2, -1).
///         Ok(-((theta[0] - 2.0).powi(2) + (theta[1] + 1.0).powi(2)))
///     }
///     fn check(&self, _: &ndarray::Array1<f64>, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let f = ShiftedQuadratic;
/// let theta0 = array![0.0, 0.0];
/// let opts = SimplexOptions {
///     tols: Tolerances { tol_sd: Some(1e-8), max_iter: Some(200) },
///     step: None,
///     verbose: false,
/// };
///
/// let out = maximize(&f, theta0, &(), &opts)?;
/// println!("theta_hat = {:?}", out.theta_hat);
/// # Ok::<(), bg_retention::optimization::errors::OptError>(())
/// ```
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &SimplexOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&theta0, &problem)?;
    }
    let simplex = build_initial_simplex(&theta0, opts);
    let solver = build_nelder_mead(simplex, opts)?;
    run_nelder_mead(opts, problem, solver)
}

/// Maximize a log-likelihood from several seeds and keep the best outcome.
///
/// # Behavior
/// - Runs the full [`maximize`] pipeline once per seed, in order.
/// - Keeps the outcome with the highest `ℓ(θ̂)`; on an exact tie the
///   earlier seed wins, so results are deterministic for a fixed seed
///   list.
///
/// # Parameters
/// - `f`: the model implementing [`LogLikelihood`].
/// - `seeds`: seed vectors, tried in order.
/// - `data`: payload threaded into `value`/`check`.
/// - `opts`: options shared by every run.
///
/// # Errors
/// - Propagates `f.check` rejections for any seed.
/// - Propagates builder and runtime errors from the underlying runs.
/// - Returns [`OptError::MissingThetaHat`] for an empty seed list, since
///   no estimate exists to return.
///
/// # Returns
/// The best [`OptimOutcome`] across all seeds.
pub fn maximize_multistart<F: LogLikelihood>(
    f: &F, seeds: &[Theta], data: &F::Data, opts: &SimplexOptions,
) -> OptResult<OptimOutcome> {
    let mut best: Option<OptimOutcome> = None;
    for theta0 in seeds {
        f.check(theta0, data)?;
        let problem = ArgMinAdapter::new(f, data);
        #[cfg(feature = "obs_slog")]
        if opts.verbose {
            log_initial_state(theta0, &problem)?;
        }
        let simplex = build_initial_simplex(theta0, opts);
        let solver = build_nelder_mead(simplex, opts)?;
        let outcome = run_nelder_mead(opts, problem, solver)?;
        let improved = best.as_ref().map_or(true, |b| outcome.value > b.value);
        if improved {
            best = Some(outcome);
        }
    }
    best.ok_or(OptError::MissingThetaHat)
}
