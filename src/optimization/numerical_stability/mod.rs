//! numerical_stability — log-space Beta primitives and shared numeric guards.
//!
//! Purpose
//! -------
//! Collect the numerically stable building blocks the retention likelihoods
//! and the inference layer share: log-Beta evaluation, stable log-space
//! differencing, and the small named constants that govern infeasibility
//! penalties and eigenvalue truncation. Keeping them in one place gives the
//! likelihood, projection, and inference code a single set of guards to
//! reason about.
//!
//! Key behaviors
//! -------------
//! - Evaluate `ln B(a, b)` through log-gamma differences ([`ln_beta`]) so
//!   Beta ratios never underflow for long horizons.
//! - Turn differences of Beta values into log-probabilities without
//!   catastrophic cancellation ([`ln_diff_exp`]).
//! - Centralize the infeasibility penalty ([`INFEASIBLE_PENALTY`]) the
//!   likelihood layer substitutes for out-of-domain parameter proposals.
//! - Centralize the eigenvalue truncation threshold ([`EIGEN_EPS`]) used
//!   when pseudo-inverting the observed information for standard errors.
//!
//! Invariants & assumptions
//! ------------------------
//! - All public helpers assume finite `f64` inputs; domain validation
//!   (positivity of Beta arguments) is enforced by callers, which substitute
//!   the penalty constant on violation rather than calling in.
//! - `ln_diff_exp(a, b)` assumes `a >= b` represents non-negative mass and
//!   maps touching or crossed arguments to `-inf` instead of NaN.
//!
//! Conventions
//! -----------
//! - Functions are pure, allocation-free, and never panic on numeric input.
//! - Errors are not used at this layer; out-of-domain combinations surface
//!   as `-inf` or the penalty constant, which higher layers interpret.
//!
//! Downstream usage
//! ----------------
//! - The retention likelihood builds every churn and survival term from
//!   [`ln_beta`] and [`ln_diff_exp`].
//! - The projection code exponentiates `ln_beta` differences once per
//!   period.
//! - The inference layer reads [`EIGEN_EPS`] when constructing
//!   pseudoinverse directions.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] pin `ln_beta` to closed-form values,
//!   verify the Beta recurrence through `ln_diff_exp`, and exercise the
//!   near-cancellation and zero-mass edge cases.
//! - Higher-level likelihood invariants (reduction at zero decay, penalty
//!   substitution) are tested in the retention core modules rather than
//!   re-tested here.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{EIGEN_EPS, INFEASIBLE_PENALTY, ln_beta, ln_diff_exp};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use bg_retention::optimization::numerical_stability::prelude::*;
//
// to import the main numerical-stability surface in a single line.

pub mod prelude {
    pub use super::transformations::{EIGEN_EPS, INFEASIBLE_PENALTY, ln_beta, ln_diff_exp};
}
