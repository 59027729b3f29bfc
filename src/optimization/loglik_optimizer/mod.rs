//! loglik_optimizer — derivative-free log-likelihood maximization on argmin.
//!
//! Purpose
//! -------
//! A high-level layer for **maximizing log-likelihoods** `ℓ(θ)` from Rust
//! or Python. A model implements one trait, [`LogLikelihood`], and calls
//! [`maximize`] to get a Nelder–Mead simplex search with configurable
//! geometry and tolerances, plus finite-difference fallbacks for any
//! derivative-based diagnostics.
//!
//! Key behaviors
//! -------------
//! - Turn a log-likelihood `ℓ(θ)` into the Argmin-compatible cost
//!   `c(θ) = -ℓ(θ)` through [`adapter::ArgMinAdapter`].
//! - Offer the entry points [`maximize`] and [`maximize_multistart`],
//!   which:
//!   - vet each seed with [`LogLikelihood::check`],
//!   - spread an initial simplex and assemble the solver via [`builders`],
//!   - drive the run through [`run::run_nelder_mead`], and
//!   - normalize the result into an [`OptimOutcome`].
//! - Keep guarded finite-difference gradients and Hessians in
//!   [`finite_diff`] for the paths where no analytic derivative exists,
//!   validated and error-captured.
//! - Gather configuration ([`Tolerances`], [`SimplexOptions`]) and the
//!   shared sanity checks ([`validation`]) in one place so everything
//!   downstream can assume finite, consistent inputs.
//!
//! Invariants & assumptions
//! ------------------------
//! - The layer **always maximizes**: models implement `ℓ(θ)` and, when
//!   available, `∇ℓ(θ)`, never the cost; minimization is internal.
//! - [`LogLikelihood::value`] and [`LogLikelihood::grad`] report invalid
//!   inputs as recoverable [`OptError`] values rather than panicking.
//!   Models that keep infeasible regions finite through a penalty stay on
//!   the happy path and let the simplex walk back to feasibility.
//! - Vectors and matrices use the aliases [`Theta`], [`Grad`], and
//!   [`types::Hessian`], all finite wherever optimization proceeds.
//! - Configuration types are validated at construction and trusted
//!   afterwards.
//!
//! Conventions
//! -----------
//! - The solver sees only the unconstrained vector [`Theta`]
//!   (`Array1<f64>`); moving between constrained and unconstrained space
//!   is the model layer's job.
//! - Costs are internal; every user-facing number, including
//!   [`OptimOutcome::value`], is a log-likelihood.
//! - [`LogLikelihood::grad`] returns `∇ℓ(θ)`; the adapter owns the sign
//!   flip to `∇c(θ) = -∇ℓ(θ)`.
//! - Failures travel as [`OptResult<T>`] / [`OptError`]; no intentional
//!   panics, no `unsafe`.
//!
//! Downstream usage
//! ----------------
//! - Implement [`LogLikelihood`] for a model type, then call [`maximize`]
//!   (or [`maximize_multistart`] with a seed ladder) with:
//!   - the model instance `&M`,
//!   - one seed [`Theta`] (or several),
//!   - the data payload `&M::Data`, and
//!   - a [`SimplexOptions`] value.
//! - Front-ends such as the Python bindings stay on the re-exported
//!   surface: [`maximize`], [`maximize_multistart`], [`LogLikelihood`],
//!   [`SimplexOptions`], [`Tolerances`], [`OptimOutcome`], and the
//!   aliases from [`types`].
//! - Inside the layer, [`adapter`] bridges into Argmin, [`builders`]
//!   spreads the simplex and constructs the solver, [`run`] executes, and
//!   [`finite_diff`]/[`validation`] keep derivatives and state honest.
//!
//! Testing notes
//! -------------
//! - Submodule unit tests cover:
//!   - simplex layout and tolerance wiring in [`builders`],
//!   - finite-difference accuracy and failure paths in [`finite_diff`],
//!   - input checks in [`validation`],
//!   - configuration and outcome invariants in [`traits`].
//! - Integration tests reach [`maximize`] through a full retention-model
//!   fit, confirming that the seed ladder is honored, the penalty
//!   convention keeps infeasible evaluations finite, and [`OptimOutcome`]
//!   carries sensible diagnostics.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::{maximize, maximize_multistart};
pub use self::traits::{LogLikelihood, OptimOutcome, SimplexOptions, Tolerances};
pub use self::types::{Cost, DEFAULT_MAX_ITER, DEFAULT_SD_TOL, FnEvalMap, Grad, Theta};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use bg_retention::optimization::loglik_optimizer::prelude::*;
//
// to import the main optimizer surface in a single line.

pub mod prelude {
    pub use super::api::{maximize, maximize_multistart};
    pub use super::traits::{LogLikelihood, OptimOutcome, SimplexOptions, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
