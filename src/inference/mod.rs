//! inference — standard errors for fitted models.
//!
//! Purpose
//! -------
//! Post-estimation uncertainty for a fitted model: classical
//! observed-information standard errors, computed from finite-difference
//! Hessians in the unconstrained optimizer space `θ`.
//!
//! Key behaviors
//! -------------
//! - Difference a gradient map into the observed information `J(θ̂)`
//!   using the optimizer's finite-difference helpers.
//! - Collapse `J(θ̂)` into per-parameter standard errors through an
//!   eigenvalue-truncated pseudoinverse via
//!   [`hessian::calc_standard_errors`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Gradient maps describe the **negative** log-likelihood, making the
//!   observed information positive semi-definite at an interior optimum.
//! - Every matrix in play is square in the parameter dimension; helpers
//!   trust upstream validation for shape and finiteness.
//! - Numerical failures come back as [`OptError`] values; nothing in this
//!   subtree panics on bad data.
//!
//! Conventions
//! -----------
//! - `θ` lives in unconstrained optimizer space; the mapping from model
//!   parameters happens in the estimation layer before calls arrive here.
//! - No logging, no global state, no `unsafe`.
//!
//! Downstream usage
//! ----------------
//! - With a fit in hand, callers pass a gradient callback and `θ̂` to
//!   [`hessian::calc_standard_errors`] and get per-parameter SEs back.
//! - The retention model layer wraps exactly that call in its
//!   `standard_errors` method.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`hessian`] cover the matrix bridging, analytic SE
//!   agreement on quadratic fixtures, and eigenvalue truncation.
//! - Integration tests run the whole chain on fitted cohort data.
//!
//! [`OptError`]: crate::optimization::errors::OptError

pub mod hessian;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::hessian::calc_standard_errors;

// ---- Optional convenience prelude for downstream crates ------------------
//
// Downstream crates can `use bg_retention::inference::prelude::*;` to
// import the primary inference surface in a single line.

pub mod prelude {
    pub use super::hessian::calc_standard_errors;
}
