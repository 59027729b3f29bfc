//! loglik_optimizer::types — numeric aliases and simplex solver wiring.
//!
//! Purpose
//! -------
//! Collect the numeric type aliases and solver plumbing shared across the
//! log-likelihood optimizer in one module, so the surrounding code can
//! talk about parameter vectors and costs without spelling out `ndarray`
//! or Argmin generics at every use site.
//!
//! Key behaviors
//! -------------
//! - Name the canonical containers for parameters, gradients, Hessians,
//!   and scalar costs (`Theta`, `Grad`, `Hessian`, `Cost`).
//! - Name the counter map Argmin reports function evaluations through
//!   (`FnEvalMap`).
//! - Wire a ready-to-use Nelder–Mead alias over `(Theta, Cost)` and fix
//!   the default simplex geometry and stopping constants applied when a
//!   caller leaves the corresponding options unset.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every vector or matrix the optimizer touches is an `ndarray`
//!   container over `f64`.
//! - `Cost` always lives in negated log-likelihood space; sign handling
//!   between cost and log-likelihood belongs to the adapter, not to
//!   callers.
//! - The solver alias tracks Argmin's two-parameter Nelder–Mead form
//!   `(Param, Float)` as of the pinned Argmin version.
//!
//! Conventions
//! -----------
//! - `Theta` and `Grad` have one entry per free model parameter and are
//!   read as column vectors.
//! - `Hessian` is dense and square, `theta.len() × theta.len()`.
//! - `DEFAULT_SIMPLEX_STEP` is relative: vertex `i` scales coordinate `i`
//!   of the seed by `(1 + step)`. A seed coordinate at exactly zero moves
//!   by the absolute `ZERO_COORD_STEP` instead, since a relative step
//!   would leave that vertex on top of the seed.
//! - Nothing in this module executes at runtime; behavior emerges where
//!   the aliases are instantiated elsewhere.
//!
//! Downstream usage
//! ----------------
//! - Optimizer modules import the aliases here rather than naming
//!   `ndarray`/Argmin generics directly.
//! - Public entry points take and return [`Theta`] and [`Grad`].
//! - The builder layer instantiates [`NelderMeadSolver`] from a validated
//!   initial simplex.
//!
//! Testing notes
//! -------------
//! - Aliases and constants carry no logic of their own, so this module
//!   has no unit tests; the optimizer tests around it exercise every
//!   alias in use.
use argmin::solver::neldermead::NelderMead;
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Parameter vector `θ` over the model's free parameters.
pub type Theta = Array1<f64>;

/// Gradient vector paired with [`Theta`]; holds `∇ℓ(θ)` or `∇c(θ)`
/// depending on which side of the sign flip produced it.
pub type Grad = Array1<f64>;

/// Dense second-derivative matrix, `n × n` for `n = theta.len()`.
pub type Hessian = Array2<f64>;

/// Scalar objective; the solver minimizes the cost `c(θ) = -ℓ(θ)`.
pub type Cost = f64;

/// Argmin function-evaluation counters keyed by counter name
/// (`"cost_count"` and friends).
pub type FnEvalMap = HashMap<String, u64>;

/// Default simplex standard deviation tolerance for convergence.
pub const DEFAULT_SD_TOL: f64 = 1e-8;

/// Default iteration cap for a single Nelder–Mead run.
pub const DEFAULT_MAX_ITER: usize = 1_000;

/// Default relative displacement applied to each seed coordinate when
/// building the initial simplex.
pub const DEFAULT_SIMPLEX_STEP: f64 = 0.05;

/// Absolute displacement used for seed coordinates that are exactly zero,
/// where a relative step would collapse the vertex onto the seed.
pub const ZERO_COORD_STEP: f64 = 2.5e-4;

/// Nelder–Mead solver instantiated over this crate's numeric types.
pub type NelderMeadSolver = NelderMead<Theta, Cost>;
