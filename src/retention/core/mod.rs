//! core — shared beta-geometric retention data, parameters, and likelihoods.
//!
//! Purpose
//! -------
//! Collect the core building blocks for beta-geometric (BG) retention
//! models: the survival-table data container, parameter and scratch types,
//! the cumulative exponent series, the log-space likelihood, forward
//! projection, fit options, and validation helpers. The higher-level model
//! layer builds on top of these primitives.
//!
//! Key behaviors
//! -------------
//! - Shape raw remaining-count series into per-period observations
//!   ([`SurvivalTable`]) with single-pass validation.
//! - Represent model parameters and variants ([`BGParams`], [`BGVariant`])
//!   plus the reusable evaluation workspace ([`BGScratch`]).
//! - Build the cumulative clipped-exponent series for the time-varying
//!   variant ([`fill_cum_exponents`], [`cum_exponents`]) as an O(T) prefix
//!   sum.
//! - Evaluate the cohort negative log-likelihood in log space with finite
//!   penalties for infeasible proposals ([`negative_log_likelihood`]).
//! - Project expected cohort paths forward ([`ForecastTable`], [`project`])
//!   from fitted or hypothetical parameters.
//! - Bundle fit configuration ([`BGOptions`]) and expose the validation
//!   routines shared across the layer.
//!
//! Invariants & assumptions
//! ------------------------
//! - Count series stored in [`SurvivalTable`] are finite, non-negative, and
//!   non-increasing with at least two entries; violations are rejected at
//!   construction, never silently repaired.
//! - Successfully constructed [`BGParams`] always carry strictly positive,
//!   finite shapes and a finite decay slope when present; raw optimizer
//!   vectors are only interpreted through the penalty-absorbing likelihood.
//! - The cumulative exponent series is non-negative and non-decreasing, and
//!   counts periods exactly when the decay slope is zero.
//! - All numeric work is log-space `f64`; probabilities are exponentiated
//!   at most once per term.
//!
//! Conventions
//! -----------
//! - Periods are 1-based in formulas and 0-based in arrays: `lost[i]` and
//!   `remaining[i]` describe period `i + 1`.
//! - The optimizer vector is `θ = [γ, δ]` for the static variant and
//!   `θ = [γ, δ, decay]` for the time-varying one.
//! - This module avoids I/O and logging; error conditions are reported via
//!   `RetentionResult` / `ParamResult`, and the likelihood maps infeasible
//!   evaluations to a finite penalty instead of erroring.
//!
//! Downstream usage
//! ----------------
//! - Data preparation constructs a [`SurvivalTable`] from raw counts, then
//!   the model layer pairs it with a [`BGVariant`], [`BGOptions`], and a
//!   [`BGScratch`] sized to the table.
//! - Optimizer-facing code evaluates [`negative_log_likelihood`] on raw θ
//!   vectors; post-fit code materializes [`BGParams`] via
//!   [`BGParams::from_theta`] and projects with [`project`].
//! - Higher-level APIs (the model layer, Python bindings) are expected to
//!   depend on the types and functions re-exported below or via the
//!   [`prelude`] rather than reaching into submodules directly.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover: table shaping and rejection cases,
//!   prefix-sum and clipping behavior, likelihood closed forms and penalty
//!   substitution, projection invariants, and option validation.
//! - Integration tests at the model layer exercise the full pipeline
//!   (counts → table → fit → projection), treating this module as the
//!   numerical core.

pub mod data;
pub mod exponents;
pub mod forecasts;
pub mod loglik;
pub mod options;
pub mod params;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::data::SurvivalTable;
pub use self::exponents::{cum_exponents, fill_cum_exponents};
pub use self::forecasts::{ForecastTable, project};
pub use self::loglik::negative_log_likelihood;
pub use self::options::BGOptions;
pub use self::params::{BGParams, BGScratch, BGVariant};
pub use self::validation::{
    validate_counts, validate_decay, validate_delta, validate_gamma, validate_horizon,
    validate_initial_population, validate_theta,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use bg_retention::retention::core::prelude::*;
//
// to import the main BG core surface in a single line.

pub mod prelude {
    pub use super::data::SurvivalTable;
    pub use super::forecasts::{ForecastTable, project};
    pub use super::loglik::negative_log_likelihood;
    pub use super::options::BGOptions;
    pub use super::params::{BGParams, BGScratch, BGVariant};
}
