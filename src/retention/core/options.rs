//! BG options — configuration for the retention-model fitting workflow.
//!
//! Purpose
//! -------
//! Collect the configuration knobs for fitting a beta-geometric retention
//! model in one place, making the workflow explicit and reproducible. This
//! covers the simplex optimizer settings and the multi-start ladder depth
//! used to escape poor local optima.
//!
//! Key behaviors
//! -------------
//! - Represent fit configuration via [`BGOptions`], bundling the Nelder–Mead
//!   optimizer options and the number of optimization starts.
//! - Validate the restart count at construction time so the fitting code can
//!   assume a well-formed seed ladder.
//! - Keep cross-cutting configuration out of the likelihood and projection
//!   code, so call sites pass explicit, validated options instead of ad-hoc
//!   flags.
//!
//! Invariants & assumptions
//! ------------------------
//! - [`BGOptions`] assumes its `simplex` component has already been validated
//!   by [`SimplexOptions::new`] (or taken from `SimplexOptions::default()`);
//!   it does not re-check tolerances or the simplex step.
//! - `restarts` is always ≥ 1: restart 0 is the canonical seed
//!   (γ = δ = 1, decay = 0 where present), and additional restarts perturb it
//!   along a deterministic ladder.
//!
//! Conventions
//! -----------
//! - `restarts` counts optimization *runs*, not extra seeds: `restarts = 1`
//!   means a single run from the canonical seed, `restarts = 3` means the
//!   canonical seed plus two ladder seeds.
//! - This module provides plain data carriers and builders that never panic;
//!   invalid configuration is rejected with a [`RetentionError`] at
//!   construction.
//!
//! Downstream usage
//! ----------------
//! - At model setup time, construct a [`BGOptions`] with the desired
//!   optimizer settings and restart depth, and pass it to the model
//!   constructor in [`bg`].
//! - Treat this module as the public configuration surface for tuning BG
//!   estimation; low-level code should depend on these types rather than on
//!   ad-hoc arguments.
//!
//! Testing notes
//! -------------
//! - Unit tests for this module:
//!   - verify that `BGOptions::new` preserves its inputs without mutation,
//!   - verify that a zero restart count is rejected,
//!   - verify that `BGOptions::default` sets fields as documented.
//! - Behavioral tests (e.g., that the seed ladder is actually walked, or that
//!   optimizer tolerances are honored) are covered by integration tests in
//!   the model and optimization modules rather than here.
//!
//! [`bg`]: crate::retention::models::bg
use crate::optimization::loglik_optimizer::SimplexOptions;
use crate::retention::errors::{RetentionError, RetentionResult};

/// BGOptions — fit-time configuration for beta-geometric retention models.
///
/// Purpose
/// -------
/// Bundle the configuration components required to fit a BG model: the
/// Nelder–Mead simplex optimizer options and the multi-start ladder depth.
///
/// Key behaviors
/// -------------
/// - Carries optimizer options (`simplex`) used by the derivative-free
///   Nelder–Mead backend during likelihood maximization.
/// - Holds the number of optimization starts (`restarts`); values above 1
///   enable a deterministic seed ladder that perturbs γ and δ away from the
///   canonical seed.
///
/// Parameters
/// ----------
/// Constructed via:
/// - `BGOptions::new(simplex: SimplexOptions, restarts: usize)`
///   Provide an already-validated `SimplexOptions`; the restart count is
///   validated here.
/// - `BGOptions::default()`
///   Default optimizer settings with a single start from the canonical seed.
///
/// Fields
/// ------
/// - `simplex`: [`SimplexOptions`]
///   Optimizer configuration (tolerances, iteration cap, simplex step,
///   verbosity) used during MLE.
/// - `restarts`: `usize`
///   Total number of optimization runs. Must be ≥ 1; run 0 always starts
///   from the canonical seed.
///
/// Invariants
/// ----------
/// - `restarts ≥ 1`, enforced by [`BGOptions::new`].
/// - `simplex` is assumed to have been constructed via its own validated
///   builder or default; no additional checks are performed here.
///
/// Performance
/// -----------
/// - Struct is small and `Clone`/`PartialEq`, making it cheap to pass by
///   value or store as part of a model.
///
/// Notes
/// -----
/// - This type is intended to be the primary fit-configuration handle for BG
///   models. Public APIs should accept `BGOptions` rather than separate
///   `simplex` and `restarts` parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct BGOptions {
    /// Nelder–Mead optimizer options (tolerances, simplex step, verbosity).
    pub simplex: SimplexOptions,
    /// Total number of optimization starts; run 0 is the canonical seed.
    pub restarts: usize,
}

impl BGOptions {
    /// Construct a validated [`BGOptions`].
    ///
    /// Parameters
    /// ----------
    /// - `simplex`: `SimplexOptions`
    ///   Nelder–Mead optimizer configuration (tolerances, iteration caps,
    ///   simplex step, verbosity). Must be a validated instance created via
    ///   `SimplexOptions::new` or `SimplexOptions::default`.
    /// - `restarts`: `usize`
    ///   Total number of optimization starts. `1` runs only the canonical
    ///   seed; larger values add deterministic ladder seeds.
    ///
    /// Returns
    /// -------
    /// `RetentionResult<BGOptions>`
    ///   A configuration struct bundling the provided optimizer options and
    ///   restart depth.
    ///
    /// Errors
    /// ------
    /// - [`RetentionError::InvalidRestarts`] if `restarts == 0`; a fit with
    ///   zero starts could never produce an estimate.
    ///
    /// Panics
    /// ------
    /// - Never panics.
    ///
    /// Notes
    /// -----
    /// - This constructor performs no validation of `simplex` beyond what its
    ///   own builder already guarantees.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use bg_retention::retention::core::options::BGOptions;
    /// # use bg_retention::optimization::loglik_optimizer::{SimplexOptions, Tolerances};
    ///
    /// let tols = Tolerances::new(Some(1e-8), Some(500)).unwrap();
    /// let simplex = SimplexOptions::new(tols, None, false).unwrap();
    ///
    /// let opts = BGOptions::new(simplex, 3).unwrap();
    /// # assert_eq!(opts.restarts, 3);
    /// ```
    pub fn new(simplex: SimplexOptions, restarts: usize) -> RetentionResult<BGOptions> {
        if restarts == 0 {
            return Err(RetentionError::InvalidRestarts { restarts });
        }
        Ok(BGOptions { simplex, restarts })
    }
}

impl Default for BGOptions {
    /// Construct default fit options: default optimizer settings and a
    /// single start from the canonical seed.
    ///
    /// Returns
    /// -------
    /// `BGOptions`
    ///   A configuration with:
    ///   - `simplex = SimplexOptions::default()`
    ///     (`tol_sd = 1e-8`, `max_iter = 1000`, default simplex step,
    ///     `verbose = false`),
    ///   - `restarts = 1`.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use bg_retention::retention::core::options::BGOptions;
    ///
    /// let opts = BGOptions::default();
    /// assert_eq!(opts.restarts, 1);
    /// ```
    fn default() -> Self {
        BGOptions { simplex: SimplexOptions::default(), restarts: 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::loglik_optimizer::{SimplexOptions, Tolerances};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - That `BGOptions::new` preserves its inputs without modification.
    // - That a zero restart count is rejected with the documented error.
    // - That `BGOptions::default` sets fields as documented.
    //
    // They intentionally DO NOT cover:
    // - The behavior of the optimizer (Nelder–Mead), which is tested in the
    //   optimization module.
    // - The seed-ladder semantics during fitting; those are covered by tests
    //   in the model module.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `BGOptions::new` preserves its input components exactly.
    //
    // Given
    // -----
    // - A non-default `SimplexOptions` and a restart count of 4.
    //
    // Expect
    // ------
    // - The returned `BGOptions` contains the same values in each field and
    //   does not mutate or reconstruct its inputs.
    fn new_preserves_fields() {
        // Arrange
        let tols = Tolerances::new(Some(1e-6), Some(250)).unwrap();
        let simplex = SimplexOptions::new(tols, Some(0.1), true).unwrap();

        // Act
        let opts = BGOptions::new(simplex.clone(), 4).unwrap();

        // Assert
        assert_eq!(opts.simplex, simplex);
        assert_eq!(opts.restarts, 4);
    }

    #[test]
    // Purpose
    // -------
    // Verify that a zero restart count is rejected.
    //
    // Given
    // -----
    // - Default optimizer options and `restarts = 0`.
    //
    // Expect
    // ------
    // - `BGOptions::new` returns `RetentionError::InvalidRestarts`.
    fn zero_restarts_rejected() {
        // Arrange
        let simplex = SimplexOptions::default();

        // Act
        let err = BGOptions::new(simplex, 0).unwrap_err();

        // Assert
        assert_eq!(err, RetentionError::InvalidRestarts { restarts: 0 });
    }

    #[test]
    // Purpose
    // -------
    // Verify that `BGOptions::default` matches the documented default values.
    //
    // Given
    // -----
    // - The `Default` implementation for `BGOptions`.
    //
    // Expect
    // ------
    // - `simplex = SimplexOptions::default()` and `restarts = 1`.
    fn default_matches_documented_defaults() {
        // Arrange + Act
        let opts = BGOptions::default();

        // Assert
        assert_eq!(opts.simplex, SimplexOptions::default());
        assert_eq!(opts.restarts, 1);
    }
}
