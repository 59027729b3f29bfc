//! retention — BG retention stack: core numerics, models, and errors.
//!
//! Purpose
//! -------
//! Provide a cohesive BG (beta-geometric) retention layer that bundles
//! survival-data containers, log-space likelihood numerics, model-level
//! fitting / projection / inference, and shared error types under a single
//! namespace. This is the main entry point for discrete-time retention
//! modeling in the crate, and is the surface most consumers (including
//! Python bindings) should depend on.
//!
//! Key behaviors
//! -------------
//! - Collect core numerical and structural building blocks in [`core`]:
//!   survival tables, parameter and variant types, cumulative-exponent
//!   series, the penalty-absorbing negative log-likelihood, forward
//!   projection, options, and validation.
//! - Expose a user-facing BG model API in [`models`] via [`BGModel`],
//!   including multi-start MLE, retention-curve projection, and classical
//!   standard errors, with fit diagnostics in [`FitReport`].
//! - Centralize retention-specific error types in [`errors`]
//!   (`RetentionError`, `ParamError`, and the `RetentionResult` /
//!   `ParamResult` aliases) so callers see a uniform error surface across
//!   the retention stack.
//! - Re-export the core “everyday” types (data, options, parameters,
//!   forecasts, model, and errors) directly from this module and via
//!   [`prelude`] for ergonomic imports in downstream crates and bindings.
//!
//! Invariants & assumptions
//! ------------------------
//! - Survival data are carried in validated [`SurvivalTable`] instances:
//!   finite, non-negative, non-increasing remaining counts with a positive
//!   initial population; per-period losses are derived once at
//!   construction.
//! - The model variant fixes the optimizer dimension (`[γ, δ]` for
//!   [`BGVariant::Static`], `[γ, δ, decay]` for
//!   [`BGVariant::TimeVarying`]); parameter-space invariants (`γ > 0`,
//!   `δ > 0`, finite decay) are enforced at materialization via
//!   [`core::validation`].
//! - Likelihood evaluation is total: infeasible θ maps to a large finite
//!   penalty instead of an error or a NaN, so the derivative-free search
//!   never observes a poisoned objective.
//! - Internal scratch buffers are single-owner and not thread-safe;
//!   concurrent use of the same [`BGModel`] instance is not supported.
//!
//! Conventions
//! -----------
//! - Periods are 1-based in the model math (`remaining[0]` is the count
//!   after period 1); buffers holding cumulative exponents are index-
//!   aligned so that entry `t` covers periods `1..=t`.
//! - All Beta-function arithmetic happens in log space via `ln_gamma`;
//!   probabilities are only exponentiated at the projection boundary.
//! - Optimization runs directly in model space over a deterministic
//!   restart ladder; ties between restarts go to the earlier seed.
//! - The retention stack itself performs no I/O and no logging; callers
//!   orchestrate data loading / logging. Error conditions are surfaced as
//!   [`RetentionResult`] / [`ParamResult`] and, at the optimizer boundary,
//!   as optimizer result types; panics indicate programming errors such as
//!   undersized scratch buffers.
//!
//! Downstream usage
//! ----------------
//! - Typical end-to-end flow:
//!   1. Construct a [`SurvivalTable`] from observed per-period remaining
//!      counts.
//!   2. Build [`BGOptions`] (simplex configuration, restart count) and
//!      pick a [`BGVariant`].
//!   3. Construct a [`BGModel`] via
//!      `BGModel::new(variant, options, periods)` with
//!      `periods = data.periods()`.
//!   4. Fit by multi-start MLE using `BGModel::fit(&data)`.
//!   5. After a successful fit, use:
//!      - `project(initial_population, horizon)` for retention curves, and
//!      - `standard_errors(&data)` for classical SEs at θ̂.
//! - Python bindings are expected to import from this module (or its
//!   [`prelude`]) and rely on `RetentionError` conversions into `PyErr`
//!   defined in [`errors`].
//! - Advanced callers can work directly with submodules (e.g.,
//!   `core::loglik`, `models::model_internals`) when they need lower-level
//!   control over likelihood evaluation or seeding.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`core`] cover:
//!   - survival-table construction, derived losses, and rejection paths,
//!   - cumulative-exponent series under positive, zero, and clipping
//!     decay,
//!   - hand-computed likelihood values, the static reduction at zero
//!     decay, and penalty behavior, and
//!   - projection invariants (partition, monotonicity, bounds).
//! - Unit tests in [`models`] cover the restart-ladder layout and
//!   `ModelNotFitted` error paths.
//! - Unit tests in [`errors`] cover concrete variant mappings, `Display`
//!   behavior, and conversions from `ParamError` and `OptError` into
//!   [`RetentionError`]. Higher-level integration tests exercise full
//!   pipelines (table → fit → project → SEs) through the public
//!   [`retention`] API.
//!
//! [`retention`]: crate::retention

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------
//
// These are the “everyday” types most users need. More specialized items
// (validation helpers, low-level likelihood evaluation, seed ladders, etc.)
// remain under their respective submodules.

pub use self::core::{
    BGOptions, BGParams, BGScratch, BGVariant, ForecastTable, SurvivalTable, project,
};

pub use self::errors::{ParamError, ParamResult, RetentionError, RetentionResult};

pub use self::models::{BGModel, FitReport};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use bg_retention::retention::prelude::*;
//
// to import the main retention-model surface in a single line, without
// pulling in lower-level internals.

pub mod prelude {
    pub use super::{
        BGModel, BGOptions, BGParams, BGScratch, BGVariant, FitReport, ForecastTable, ParamError,
        ParamResult, RetentionError, RetentionResult, SurvivalTable, project,
    };
}
