//! optimization — simplex MLE machinery, log-space numerics, shared errors.
//!
//! Purpose
//! -------
//! Everything model fitting needs below the model layer: an Argmin-backed
//! log-likelihood optimizer, log-space numerical primitives, and one
//! error/result surface over both. A caller implements a log-likelihood,
//! picks tolerances, and receives fitted parameters and diagnostics with
//! no backend solver types in sight.
//!
//! Key behaviors
//! -------------
//! - Offer a high-level API for **maximizing log-likelihoods** `ℓ(θ)`
//!   (`loglik_optimizer`), covering simplex solver construction and
//!   stopping criteria.
//! - Supply shared numerical primitives (`numerical_stability`) for
//!   evaluating log-Beta terms and their differences without leaving log
//!   space, plus the shared penalty constant for infeasible parameters.
//! - Fold configuration mistakes, numerical failures, and backend solver
//!   errors into one enum (`errors::OptError`) behind the common alias
//!   `OptResult<T>`.
//!
//! Invariants & assumptions
//! ------------------------
//! - The optimizer works in an unconstrained space `θ` and treats inputs
//!   as finite once validation passed; anything invalid becomes an
//!   `OptError`, never a panic.
//! - Log-likelihood implementations are expected to keep domain violations
//!   (e.g., non-positive shape parameters) *finite* by returning the shared
//!   penalty value, so the simplex solver can walk back into the feasible
//!   region instead of aborting.
//! - Positivity and dimension checks run through shared validation and
//!   error conversions, so accepted parameters can be assumed to satisfy
//!   the basic domain constraints.
//!
//! Conventions
//! -----------
//! - Conceptually every solve maximizes `ℓ(θ)` while internally minimizing
//!   the cost `c(θ) = -ℓ(θ)`; outcomes and public APIs speak in `ℓ`.
//! - Parameters, gradients, and Hessians use the `ndarray`-based aliases
//!   (`Theta`, `Grad`, `Hessian`); mapping between unconstrained θ-space
//!   and structured model parameters (BG `(γ, δ)` or `(γ, δ, decay)`) is
//!   the model layer's business.
//! - Fallible entry points return `OptResult<T>`; raw Argmin errors and
//!   model-specific enums never cross this boundary.
//! - No I/O or logging happens in this subtree; progress reporting belongs
//!   to the layers above (Python bindings, notebooks).
//!
//! Downstream usage
//! ----------------
//! - Model code implements `LogLikelihood`, then calls `maximize` (or
//!   `maximize_multistart` with a seed ladder) with a guess, a data
//!   payload, and `SimplexOptions`, and gets an `OptimOutcome` back.
//! - Retention and inference code use `numerical_stability` for log-Beta
//!   evaluation and stable log-space differences when computing likelihoods
//!   and survival curves.
//! - Front-ends usually import `optimization::prelude::*`, which forwards
//!   the submodule preludes together with the error types; the per-module
//!   preludes remain available for a finer-grained import.
//!
//! Testing notes
//! -------------
//! - Submodule unit tests stay local:
//!   - `loglik_optimizer`: solver wiring, tolerance handling, and small
//!     MLE fixtures.
//!   - `numerical_stability`: agreement with closed-form Beta values and
//!     identities, plus stable behavior near cancellation.
//! - Integration tests drive complete fits and check that configuration
//!   mistakes, numerical trouble, and backend failures all arrive as
//!   sensible `OptError` values while clean runs produce stable
//!   `OptimOutcome`s.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use bg_retention::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
