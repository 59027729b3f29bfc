//! BG model internals — restart seed ladder and fitted-parameter access.
//!
//! Purpose
//! -------
//! Provide low-level helpers around [`BGModel`] that keep fitting logic
//! out of the model's public surface: constructing the deterministic
//! multi-start seed ladder and extracting the fitted optimizer vector.
//!
//! Key behaviors
//! -------------
//! - Build the ordered list of optimization seeds via [`restart_seeds`]:
//!   the canonical seed first, then ladder seeds that push γ and δ apart
//!   by growing powers of two.
//! - Centralize access to the fitted θ̂ via [`extract_theta`], so every
//!   post-fit consumer reports the same `ModelNotFitted` error.
//!
//! Invariants & assumptions
//! ------------------------
//! - `restarts ≥ 1` is guaranteed by [`BGOptions::new`], so the seed list
//!   is never empty.
//! - Every seed in the ladder is finite and strictly positive in its shape
//!   coordinates, so `LogLikelihood::check` accepts all of them.
//! - The decay coordinate, when present, is zero in every seed; only the
//!   optimizer moves it away from the reduction point.
//!
//! Conventions
//! -----------
//! - Ladder seeds come in mirrored pairs. For restart `k ≥ 1` with
//!   exponent `e = (k + 1) / 2` (integer division): odd `k` seeds
//!   `(γ, δ) = (2^-e, 2^e)` (low churn), even `k` seeds the transpose
//!   `(2^e, 2^-e)` (high churn).
//! - Seeds are tried in order; the multi-start runner keeps the best
//!   outcome and ties go to the earlier seed, so the list order is part of
//!   the contract.
//!
//! Downstream usage
//! ----------------
//! - [`BGModel::fit`] calls [`restart_seeds`] and hands the list to
//!   `maximize_multistart`.
//! - Standard-error and projection code paths use [`extract_theta`] when
//!   they need the raw optimizer vector rather than the materialized
//!   [`BGParams`].
//!
//! Testing notes
//! -------------
//! - Unit tests pin the ladder layout (length, canonical head, the first
//!   two mirrored pairs, and the zero decay coordinate) and the
//!   `ModelNotFitted` error from [`extract_theta`] on an unfitted model.
//!
//! [`BGOptions::new`]: crate::retention::core::options::BGOptions::new
//! [`BGModel::fit`]: crate::retention::models::bg::BGModel::fit
//! [`BGParams`]: crate::retention::core::params::BGParams
use crate::{
    optimization::loglik_optimizer::Theta,
    retention::{
        core::params::BGVariant,
        errors::{RetentionError, RetentionResult},
        models::bg::BGModel,
    },
};

/// Build the ordered multi-start seed list for a fit.
///
/// Parameters
/// ----------
/// - `variant`: [`BGVariant`]
///   Determines the seed dimension (2 or 3) and the canonical seed.
/// - `restarts`: `usize`
///   Total number of seeds to produce; must be ≥ 1.
///
/// Returns
/// -------
/// `Vec<Theta>`
///   `restarts` seed vectors. Index 0 is the canonical seed
///   (γ = δ = 1, decay = 0 where present); index `k ≥ 1` is the ladder
///   seed with exponent `e = (k + 1) / 2`, alternating between
///   `(2^-e, 2^e)` for odd `k` and `(2^e, 2^-e)` for even `k`. The decay
///   coordinate stays 0 in every seed.
///
/// Notes
/// -----
/// - The ladder is deterministic, so repeated fits with the same options
///   walk exactly the same seeds.
pub fn restart_seeds(variant: BGVariant, restarts: usize) -> Vec<Theta> {
    let mut seeds = Vec::with_capacity(restarts);
    seeds.push(variant.canonical_seed());
    for k in 1..restarts {
        let exponent = ((k + 1) / 2) as i32;
        let spread = 2.0_f64.powi(exponent);
        let mut seed = variant.canonical_seed();
        if k % 2 == 1 {
            seed[0] = 1.0 / spread;
            seed[1] = spread;
        } else {
            seed[0] = spread;
            seed[1] = 1.0 / spread;
        }
        seeds.push(seed);
    }
    seeds
}

/// Extract the fitted optimizer vector θ̂ from a [`BGModel`].
///
/// Returns
/// -------
/// `RetentionResult<&Theta>`
///   A reference to the θ̂ stored in the model's fit results.
///
/// Errors
/// ------
/// - [`RetentionError::ModelNotFitted`] if the model has not been fitted.
///
/// Notes
/// -----
/// - Centralizing θ̂ extraction keeps the `ModelNotFitted` check in one
///   place for every post-fit consumer.
pub fn extract_theta(model: &BGModel) -> RetentionResult<&Theta> {
    match model.results {
        Some(ref outcome) => Ok(&outcome.theta_hat),
        None => Err(RetentionError::ModelNotFitted),
    }
}
