//! models — high-level BG retention models and inference helpers.
//!
//! Purpose
//! -------
//! Collect the user-facing BG model API (fitting, projection, standard
//! errors) plus the low-level fitting helpers behind it. This layer sits on
//! top of `retention::core`, wiring together survival tables, the
//! penalty-absorbing log-likelihood, and the generic log-likelihood
//! optimizer.
//!
//! Key behaviors
//! -------------
//! - Expose a complete BG model type [`BGModel`] that implements
//!   [`LogLikelihood`] and provides `fit`, `project`, and
//!   `standard_errors` methods, with fit diagnostics summarized in
//!   [`FitReport`].
//! - Centralize the deterministic multi-start seed ladder
//!   ([`restart_seeds`]) and fitted-θ̂ access ([`extract_theta`]) in
//!   [`model_internals`].
//! - Reuse the shared cumulative-exponent scratch from `retention::core`
//!   to keep likelihood evaluations allocation-free.
//! - Provide a light-weight prelude so downstream code can import the main
//!   BG model surface in a single line.
//!
//! Invariants & assumptions
//! ------------------------
//! - Survival data are carried in validated [`SurvivalTable`] instances:
//!   non-negative, non-increasing remaining counts with a positive initial
//!   population.
//! - Optimizer vectors θ have length 2 (static) or 3 (time-varying) with
//!   finite entries at seed time; mid-search vertices may be infeasible
//!   and are absorbed by the likelihood's penalty value.
//! - Scratch buffers are sized at model construction for the fitting
//!   table's period count and are single-owner, non-thread-safe state;
//!   concurrent access to the same [`BGModel`] instance is not supported.
//!
//! Conventions
//! -----------
//! - Optimization runs directly in model space: `θ = [γ, δ]` or
//!   `θ = [γ, δ, decay]`, with no reparameterization.
//! - The restart ladder is deterministic and ordered; the multi-start
//!   runner keeps the best outcome with ties going to the earlier seed.
//! - Errors are reported as [`RetentionResult`] / [`OptResult`]; panics
//!   indicate programming errors (e.g., undersized scratch buffers), not
//!   bad user data or bad θ.
//!
//! Downstream usage
//! ----------------
//! - Build a [`BGModel`] via `BGModel::new(variant, options, periods)`
//!   with `periods = data.periods()`, then call `fit(&data)` to perform
//!   the multi-start MLE.
//! - After a successful fit:
//!   - use `project(initial_population, horizon)` for retention curves,
//!   - use `standard_errors(&data)` for classical SEs at θ̂.
//! - Front-ends (Python bindings, CLI tools) are expected to depend mainly
//!   on the items re-exported below or via the [`prelude`].
//!
//! Testing notes
//! -------------
//! - Unit tests in [`model_internals`] cover the seed-ladder layout and
//!   the `ModelNotFitted` error from θ̂ extraction.
//! - End-to-end `fit` / `project` / `standard_errors` behavior on
//!   synthetic cohorts is exercised by the crate's integration tests
//!   through the public [`BGModel`] API.
//!
//! [`LogLikelihood`]: crate::optimization::loglik_optimizer::LogLikelihood
//! [`OptResult`]: crate::optimization::errors::OptResult
//! [`SurvivalTable`]: crate::retention::core::data::SurvivalTable
//! [`RetentionResult`]: crate::retention::errors::RetentionResult

pub mod bg;
pub mod model_internals;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::bg::{BGModel, FitReport};
pub use self::model_internals::{extract_theta, restart_seeds};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use bg_retention::retention::models::prelude::*;
//
// to import the main BG model surface in a single line.

pub mod prelude {
    pub use super::bg::{BGModel, FitReport};
}
