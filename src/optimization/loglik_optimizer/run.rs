//! Execution helper that drives an `argmin` solver over a log-likelihood
//! problem and hands back a crate-friendly [`OptimOutcome`].
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{LogLikelihood, OptimOutcome, SimplexOptions, Theta, adapter::ArgMinAdapter},
};
#[cfg(feature = "obs_slog")]
use argmin::core::{CostFunction, Gradient};
use argmin::core::{Executor, State};
#[cfg(feature = "obs_slog")]
use argmin_math::ArgminL2Norm;

/// Execute a Nelder–Mead run to completion.
///
/// This is the shared runner behind the `maximize` entry points. It builds
/// the executor from:
/// - the model wrapped in an [`ArgMinAdapter`],
/// - a fully constructed solver carrying its own initial simplex,
/// - an optional terminal observer (behind the `obs_slog` feature),
/// - an optional iteration cap from `opts.tols.max_iter`,
///
/// then runs it and normalizes the final state into an [`OptimOutcome`].
///
/// A simplex solver owns its starting point: the initial simplex was baked
/// in at construction, so this runner never writes a parameter vector onto
/// the optimizer state the way a gradient-based runner would.
///
/// # Type Parameters
/// - `F`: the model, implementing [`LogLikelihood`].
/// - `S`: any `argmin` solver over `ArgMinAdapter<'a, F>` whose `IterState`
///   carries `Theta` parameters, `f64` floats, and no gradient slot.
///
/// # Arguments
/// - `opts`: per-run options; only `max_iter` and `verbose` matter here.
/// - `problem`: adapter pairing the model with its data.
/// - `solver`: ready-made solver, typically from
///   [`build_nelder_mead`](crate::optimization::loglik_optimizer::builders::build_nelder_mead).
///
/// # Feature flags
/// With `obs_slog` enabled and `opts.verbose` set, a non-blocking terminal
/// slog observer is attached in `ObserverMode::Always`.
///
/// # Returns
/// An [`OptimOutcome`] with the best parameters, the best log-likelihood
/// `ℓ(θ̂)` (sign restored from the cost), termination status, iteration
/// count, and function-evaluation counters. `grad_norm` is always `None`
/// on this path; the simplex search never evaluates a gradient.
///
/// # Errors
/// - Propagates `argmin` runtime failures (degenerate simplex, observer
///   errors) through the crate's `From<argmin::core::Error>` conversion.
/// - Propagates [`OptimOutcome`] validation failures.
///
/// # Examples
/// ```ignore
/// let adapter = ArgMinAdapter::new(&model, &table);
/// let simplex = build_initial_simplex(&seed, &opts);
/// let outcome = run_nelder_mead(&opts, adapter, build_nelder_mead(simplex, &opts)?)?;
/// eprintln!("{} after {} iterations", outcome.status, outcome.iterations);
/// ```
pub fn run_nelder_mead<'a, F, S>(
    opts: &SimplexOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
    S: argmin::core::Solver<
            ArgMinAdapter<'a, F>,
            argmin::core::IterState<Theta, (), (), (), (), f64>,
        > + Send
        + 'static,
{
    let mut executor = Executor::new(problem, solver);
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        executor = executor.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        executor = executor.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut final_state = executor.run()?.state().clone();
    let iterations = final_state.get_iter();
    let function_counts = final_state.get_func_counts().clone();
    let termination = final_state.get_termination_status().clone();
    OptimOutcome::new(
        final_state.take_best_param(),
        -final_state.get_best_cost(),
        termination,
        iterations,
        function_counts,
        None,
    )
}

// ---- Helper Methods ----

#[cfg(feature = "obs_slog")]
pub(crate) fn log_initial_state<F>(theta0: &Theta, problem: &ArgMinAdapter<'_, F>) -> OptResult<()>
where
    F: LogLikelihood,
{
    let value0 = -problem.cost(theta0)?;
    let grad_norm0 = problem.gradient(theta0).ok().map(|g| g.l2_norm());

    match grad_norm0 {
        Some(norm) => eprintln!("seed: ell = {value0:.6}, |grad| = {norm:.6}"),
        None => eprintln!("seed: ell = {value0:.6}"),
    }
    Ok(())
}
