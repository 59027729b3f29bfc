//! BG validation helpers — reusable checks for survival counts, parameters,
//! and projection inputs.
//!
//! Purpose
//! -------
//! Centralize small, reusable validation routines used across the BG retention
//! stack. These helpers enforce the survival-table invariants (finite,
//! non-negative, non-increasing counts), the parameter domains (Beta shapes
//! strictly positive, decay slope finite), and the shape/finiteness of
//! unconstrained optimizer inputs, so higher-level constructors and models can
//! fail fast with structured errors.
//!
//! Key behaviors
//! -------------
//! - Validate a raw remaining-count series before it is shaped into a
//!   survival table (length, finiteness, sign, monotonicity).
//! - Validate model-space parameters (γ, δ, decay) against their domains.
//! - Validate unconstrained optimizer inputs θ before mapping into model
//!   space.
//! - Validate projection inputs (horizon, initial population).
//!
//! Invariants & assumptions
//! ------------------------
//! - A survival series holds the initial cohort count at index 0 followed by
//!   the counts remaining after each period; it must have length ≥ 2 so at
//!   least one churn transition is observed.
//! - Counts are non-negative and non-increasing; churn is irreversible, so a
//!   rise between consecutive periods is a data error, not zero loss.
//! - γ and δ are shapes of a Beta prior and must be finite and strictly
//!   positive; the decay slope is unconstrained in sign but must be finite.
//!
//! Conventions
//! -----------
//! - Indices are 0-based and follow the usual Rust/ndarray conventions.
//! - Validation functions return [`RetentionResult`] or [`ParamResult`] and
//!   never panic on invalid *inputs*; panics are reserved for programming
//!   errors elsewhere.
//! - This module contains no I/O and no logging; it only inspects numeric
//!   values and array lengths.
//!
//! Downstream usage
//! ----------------
//! - Call these helpers from constructors ([`SurvivalTable`], [`BGParams`],
//!   [`BGOptions`], etc.) to enforce documented invariants at the boundaries
//!   of the API.
//! - Use [`validate_theta`] in the optimizer mapping (`LogLikelihood::check`
//!   and `BGParams::from_theta`) to fail fast on malformed search vectors.
//!
//! Testing notes
//! -------------
//! - Unit tests exercise each helper on representative valid and invalid
//!   inputs, including boundary cases (zeros, infinities, NaNs, length
//!   off-by-1, and equal consecutive counts, which are allowed).
//! - Integration tests rely on the higher-level constructors that *call*
//!   these helpers rather than re-testing the raw validation logic.
//!
//! [`SurvivalTable`]: crate::retention::core::data::SurvivalTable
//! [`BGParams`]: crate::retention::core::params::BGParams
//! [`BGOptions`]: crate::retention::core::options::BGOptions
use crate::retention::errors::{ParamError, ParamResult, RetentionError, RetentionResult};
use ndarray::ArrayView1;

/// Validate a raw remaining-count series.
///
/// Parameters
/// ----------
/// - `counts`: `ArrayView1<'_, f64>`
///   Ordered remaining-population counts, index 0 holding the initial cohort
///   size. Must have length ≥ 2 and be finite, non-negative, and
///   non-increasing.
///
/// Returns
/// -------
/// `RetentionResult<()>`
///   - `Ok(())` if every invariant holds.
///   - `Err(RetentionError)` describing the first violation encountered.
///
/// Errors
/// ------
/// - `RetentionError::SeriesTooShort`
///   - Returned if `counts.len() < 2` (no churn transition observed).
/// - `RetentionError::NonFiniteCount`
///   - Returned if any entry is NaN or ±∞, with the offending index and value.
/// - `RetentionError::NegativeCount`
///   - Returned if any entry is < 0.
/// - `RetentionError::IncreasingCount`
///   - Returned if any entry exceeds its predecessor. Equal consecutive
///     counts (zero loss in a period) are allowed.
///
/// Panics
/// ------
/// - Never panics.
///
/// Notes
/// -----
/// - Checks are ordered per index: finiteness, then sign, then monotonicity,
///   so a NaN is reported as `NonFiniteCount` rather than tripping the
///   monotonicity comparison.
///
/// Examples
/// --------
/// ```rust
/// # use bg_retention::retention::core::validation::validate_counts;
/// # use bg_retention::retention::errors::RetentionError;
/// use ndarray::array;
///
/// let counts = array![1000.0, 800.0, 275.0, 250.0, 220.0];
/// assert!(validate_counts(counts.view()).is_ok());
///
/// let bad = array![1000.0, 800.0, 900.0];
/// assert!(matches!(
///     validate_counts(bad.view()),
///     Err(RetentionError::IncreasingCount { .. })
/// ));
/// ```
pub fn validate_counts(counts: ArrayView1<f64>) -> RetentionResult<()> {
    if counts.len() < 2 {
        return Err(RetentionError::SeriesTooShort { len: counts.len() });
    }
    let mut previous = f64::INFINITY;
    for (index, &value) in counts.iter().enumerate() {
        if !value.is_finite() {
            return Err(RetentionError::NonFiniteCount { index, value });
        }
        if value < 0.0 {
            return Err(RetentionError::NegativeCount { index, value });
        }
        if value > previous {
            return Err(RetentionError::IncreasingCount { index, previous, value });
        }
        previous = value;
    }
    Ok(())
}

/// Validate the Beta shape parameter γ.
///
/// Parameters
/// ----------
/// - `gamma`: `f64`
///   First shape of the Beta prior over the latent churn probability. Must be
///   finite and strictly > 0.
///
/// Returns
/// -------
/// `ParamResult<()>`
///   - `Ok(())` if `gamma` is finite and strictly > 0.
///   - `Err(ParamError::InvalidGamma)` otherwise.
///
/// Errors
/// ------
/// - `ParamError::InvalidGamma`
///   - Returned if `gamma` is NaN, ±∞, or ≤ 0.
///
/// Panics
/// ------
/// - Never panics.
///
/// Examples
/// --------
/// ```rust
/// # use bg_retention::retention::core::validation::validate_gamma;
/// use bg_retention::retention::errors::ParamError;
///
/// assert!(validate_gamma(1.0).is_ok());
/// assert!(matches!(validate_gamma(0.0), Err(ParamError::InvalidGamma { .. })));
/// ```
pub fn validate_gamma(gamma: f64) -> ParamResult<()> {
    if gamma <= 0.0 || !gamma.is_finite() {
        return Err(ParamError::InvalidGamma { value: gamma });
    }
    Ok(())
}

/// Validate the Beta shape parameter δ.
///
/// Parameters
/// ----------
/// - `delta`: `f64`
///   Second shape of the Beta prior over the latent churn probability. Must
///   be finite and strictly > 0.
///
/// Returns
/// -------
/// `ParamResult<()>`
///   - `Ok(())` if `delta` is finite and strictly > 0.
///   - `Err(ParamError::InvalidDelta)` otherwise.
///
/// Errors
/// ------
/// - `ParamError::InvalidDelta`
///   - Returned if `delta` is NaN, ±∞, or ≤ 0.
///
/// Panics
/// ------
/// - Never panics.
///
/// Examples
/// --------
/// ```rust
/// # use bg_retention::retention::core::validation::validate_delta;
/// use bg_retention::retention::errors::ParamError;
///
/// assert!(validate_delta(2.5).is_ok());
/// assert!(matches!(validate_delta(f64::NAN), Err(ParamError::InvalidDelta { .. })));
/// ```
pub fn validate_delta(delta: f64) -> ParamResult<()> {
    if delta <= 0.0 || !delta.is_finite() {
        return Err(ParamError::InvalidDelta { value: delta });
    }
    Ok(())
}

/// Validate the decay/growth slope of the time-varying variant.
///
/// Parameters
/// ----------
/// - `decay`: `f64`
///   Slope of the per-period survival-exponent increments
///   `max(0, 1 + decay·t)`. Any finite real value is allowed; negative slopes
///   model loyalty (churn decays), positive slopes novelty (churn grows).
///
/// Returns
/// -------
/// `ParamResult<()>`
///   - `Ok(())` if `decay` is finite.
///   - `Err(ParamError::InvalidDecay)` otherwise.
///
/// Errors
/// ------
/// - `ParamError::InvalidDecay`
///   - Returned if `decay` is NaN or ±∞.
///
/// Panics
/// ------
/// - Never panics.
///
/// Examples
/// --------
/// ```rust
/// # use bg_retention::retention::core::validation::validate_decay;
/// use bg_retention::retention::errors::ParamError;
///
/// assert!(validate_decay(-0.05).is_ok());
/// assert!(validate_decay(0.0).is_ok());
/// assert!(matches!(
///     validate_decay(f64::INFINITY),
///     Err(ParamError::InvalidDecay { .. })
/// ));
/// ```
pub fn validate_decay(decay: f64) -> ParamResult<()> {
    if !decay.is_finite() {
        return Err(ParamError::InvalidDecay { value: decay });
    }
    Ok(())
}

/// Validate unconstrained optimizer parameters θ.
///
/// Parameters
/// ----------
/// - `theta`: `ArrayView1<'_, f64>`
///   Unconstrained parameter vector θ, laid out as `[γ, δ]` for the static
///   variant or `[γ, δ, decay]` for the time-varying variant. All entries
///   must be finite.
/// - `expected_len`: `usize`
///   Expected length of θ (2 or 3, depending on the variant).
///
/// Returns
/// -------
/// `ParamResult<()>`
///   - `Ok(())` if `theta.len() == expected_len` and all entries are finite.
///   - `Err(ParamError)` otherwise.
///
/// Errors
/// ------
/// - `ParamError::ThetaLengthMismatch`
///   - Returned if `theta.len() != expected_len`.
/// - `ParamError::InvalidThetaInput`
///   - Returned if any entry of θ is NaN or ±∞, with its index and value.
///
/// Panics
/// ------
/// - Never panics.
///
/// Notes
/// -----
/// - This helper does **not** check positivity of γ or δ; the simplex search
///   is allowed to propose infeasible coordinates, which the likelihood maps
///   to a penalty value instead of an error.
///
/// Examples
/// --------
/// ```rust
/// # use bg_retention::retention::core::validation::validate_theta;
/// # use bg_retention::retention::errors::ParamError;
/// use ndarray::array;
///
/// let theta = array![1.0, 1.0];
/// assert!(validate_theta(theta.view(), 2).is_ok());
///
/// let bad_theta = array![1.0, f64::NAN];
/// assert!(matches!(
///     validate_theta(bad_theta.view(), 2),
///     Err(ParamError::InvalidThetaInput { .. })
/// ));
/// ```
pub fn validate_theta(theta: ArrayView1<f64>, expected_len: usize) -> ParamResult<()> {
    if theta.len() != expected_len {
        return Err(ParamError::ThetaLengthMismatch {
            expected: expected_len,
            actual: theta.len(),
        });
    }
    for (index, &value) in theta.iter().enumerate() {
        if !value.is_finite() {
            return Err(ParamError::InvalidThetaInput { index, value });
        }
    }
    Ok(())
}

/// Validate a projection horizon.
///
/// Parameters
/// ----------
/// - `horizon`: `usize`
///   Number of future periods to project. Must be ≥ 1.
///
/// Returns
/// -------
/// `RetentionResult<()>`
///   - `Ok(())` if `horizon >= 1`.
///   - `Err(RetentionError::ZeroHorizon)` otherwise.
///
/// Errors
/// ------
/// - `RetentionError::ZeroHorizon`
///   - Returned if `horizon == 0`.
///
/// Panics
/// ------
/// - Never panics.
pub fn validate_horizon(horizon: usize) -> RetentionResult<()> {
    if horizon == 0 {
        return Err(RetentionError::ZeroHorizon);
    }
    Ok(())
}

/// Validate an initial population for projection.
///
/// Parameters
/// ----------
/// - `initial_population`: `f64`
///   Cohort size to project from. Must be finite and non-negative; zero is
///   allowed and yields an all-zero projection.
///
/// Returns
/// -------
/// `RetentionResult<()>`
///   - `Ok(())` if `initial_population` is finite and ≥ 0.
///   - `Err(RetentionError::InvalidInitialPopulation)` otherwise.
///
/// Errors
/// ------
/// - `RetentionError::InvalidInitialPopulation`
///   - Returned if `initial_population` is NaN, ±∞, or < 0.
///
/// Panics
/// ------
/// - Never panics.
pub fn validate_initial_population(initial_population: f64) -> RetentionResult<()> {
    if !initial_population.is_finite() || initial_population < 0.0 {
        return Err(RetentionError::InvalidInitialPopulation { value: initial_population });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retention::errors::{ParamError, RetentionError};
    use ndarray::{Array1, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Validation of raw remaining-count series (length, finiteness, sign,
    //   monotonicity, and the allowed equal-count edge case).
    // - Validation of γ, δ, and the decay slope against their documented
    //   domains.
    // - Validation of θ against expected length and finiteness.
    // - Validation of projection inputs (horizon, initial population).
    //
    // They intentionally DO NOT cover:
    // - Survival-table construction or derived lost counts (data module).
    // - Likelihood values or penalty behavior (loglik module).
    // - Optimizer convergence or Hessian/covariance behavior.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // `validate_counts` accepts a finite, non-negative, non-increasing series.
    //
    // Given
    // -----
    // - `counts = [1000, 800, 275, 250, 220]`.
    //
    // Expect
    // ------
    // - `Ok(())` is returned.
    fn validate_counts_with_non_increasing_series_returns_ok() {
        // Arrange
        let counts = array![1000.0_f64, 800.0, 275.0, 250.0, 220.0];

        // Act
        let result = validate_counts(counts.view());

        // Assert
        assert!(result.is_ok());
    }

    #[test]
    // Purpose
    // -------
    // `validate_counts` accepts equal consecutive counts (zero loss periods).
    //
    // Given
    // -----
    // - `counts = [100, 100, 90]`.
    //
    // Expect
    // ------
    // - `Ok(())` is returned; a flat stretch is not an increase.
    fn validate_counts_with_equal_consecutive_counts_returns_ok() {
        // Arrange
        let counts = array![100.0_f64, 100.0, 90.0];

        // Act
        let result = validate_counts(counts.view());

        // Assert
        assert!(result.is_ok());
    }

    #[test]
    // Purpose
    // -------
    // `validate_counts` rejects series shorter than 2 entries.
    //
    // Given
    // -----
    // - `counts = [1000]` and `counts = []`.
    //
    // Expect
    // ------
    // - `Err(RetentionError::SeriesTooShort { len })` for each.
    fn validate_counts_with_short_series_returns_series_too_short() {
        // Arrange
        let single = array![1000.0_f64];
        let empty = Array1::<f64>::zeros(0);

        // Act
        let result_single = validate_counts(single.view());
        let result_empty = validate_counts(empty.view());

        // Assert
        match result_single {
            Err(RetentionError::SeriesTooShort { len }) => assert_eq!(len, 1),
            other => panic!("expected SeriesTooShort error, got: {other:?}"),
        }
        match result_empty {
            Err(RetentionError::SeriesTooShort { len }) => assert_eq!(len, 0),
            other => panic!("expected SeriesTooShort error, got: {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // `validate_counts` rejects NaN/±∞ entries with NonFiniteCount.
    //
    // Given
    // -----
    // - `counts = [1000, NaN, 800]`.
    //
    // Expect
    // ------
    // - `Err(RetentionError::NonFiniteCount { index: 1, .. })`, reported
    //   before any monotonicity comparison involving the NaN.
    fn validate_counts_with_non_finite_value_returns_non_finite_count() {
        // Arrange
        let counts = array![1000.0_f64, f64::NAN, 800.0];

        // Act
        let result = validate_counts(counts.view());

        // Assert
        match result {
            Err(RetentionError::NonFiniteCount { index, value }) => {
                assert_eq!(index, 1);
                assert!(value.is_nan());
            }
            other => panic!("expected NonFiniteCount error at index 1, got: {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // `validate_counts` rejects negative entries with NegativeCount.
    //
    // Given
    // -----
    // - `counts = [1000, 800, -5]`.
    //
    // Expect
    // ------
    // - `Err(RetentionError::NegativeCount { index: 2, value: -5.0 })`.
    fn validate_counts_with_negative_value_returns_negative_count() {
        // Arrange
        let counts = array![1000.0_f64, 800.0, -5.0];

        // Act
        let result = validate_counts(counts.view());

        // Assert
        match result {
            Err(RetentionError::NegativeCount { index, value }) => {
                assert_eq!(index, 2);
                assert_eq!(value, -5.0);
            }
            other => panic!("expected NegativeCount error at index 2, got: {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // `validate_counts` rejects a rise between consecutive periods.
    //
    // Given
    // -----
    // - `counts = [1000, 800, 900]`.
    //
    // Expect
    // ------
    // - `Err(RetentionError::IncreasingCount { index: 2, previous: 800.0,
    //   value: 900.0 })`.
    fn validate_counts_with_increase_returns_increasing_count() {
        // Arrange
        let counts = array![1000.0_f64, 800.0, 900.0];

        // Act
        let result = validate_counts(counts.view());

        // Assert
        match result {
            Err(RetentionError::IncreasingCount { index, previous, value }) => {
                assert_eq!(index, 2);
                assert_eq!(previous, 800.0);
                assert_eq!(value, 900.0);
            }
            other => panic!("expected IncreasingCount error at index 2, got: {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // `validate_gamma` and `validate_delta` accept finite, strictly positive
    // shapes and reject NaN, ±∞, and non-positive values.
    //
    // Given
    // -----
    // - Valid shapes 1.0 and 2.5; invalid values {0.0, -1.0, NaN, ±∞}.
    //
    // Expect
    // ------
    // - `Ok(())` for valid shapes, `InvalidGamma`/`InvalidDelta` otherwise.
    fn validate_shapes_enforce_positive_finite_domain() {
        // Arrange
        let invalid = [0.0_f64, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY];

        // Act & Assert
        assert!(validate_gamma(1.0).is_ok());
        assert!(validate_delta(2.5).is_ok());
        for &value in &invalid {
            assert!(matches!(validate_gamma(value), Err(ParamError::InvalidGamma { .. })));
            assert!(matches!(validate_delta(value), Err(ParamError::InvalidDelta { .. })));
        }
    }

    #[test]
    // Purpose
    // -------
    // `validate_decay` accepts any finite slope, including negative and zero,
    // and rejects NaN/±∞.
    //
    // Given
    // -----
    // - Slopes {-10.0, -0.05, 0.0, 0.3} (valid) and {NaN, ±∞} (invalid).
    //
    // Expect
    // ------
    // - `Ok(())` for finite slopes, `InvalidDecay` otherwise.
    fn validate_decay_accepts_any_finite_slope() {
        // Arrange
        let valid = [-10.0_f64, -0.05, 0.0, 0.3];
        let invalid = [f64::NAN, f64::INFINITY, f64::NEG_INFINITY];

        // Act & Assert
        for &value in &valid {
            assert!(validate_decay(value).is_ok());
        }
        for &value in &invalid {
            assert!(matches!(validate_decay(value), Err(ParamError::InvalidDecay { .. })));
        }
    }

    #[test]
    // Purpose
    // -------
    // `validate_theta` rejects length mismatches with ThetaLengthMismatch.
    //
    // Given
    // -----
    // - θ of length 2 checked against an expected length of 3.
    //
    // Expect
    // ------
    // - `Err(ParamError::ThetaLengthMismatch { expected: 3, actual: 2 })`.
    fn validate_theta_with_length_mismatch_returns_theta_length_mismatch() {
        // Arrange
        let theta = array![1.0_f64, 1.0];

        // Act
        let result = validate_theta(theta.view(), 3);

        // Assert
        match result {
            Err(ParamError::ThetaLengthMismatch { expected, actual }) => {
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("expected ThetaLengthMismatch error, got: {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // `validate_theta` accepts finite entries of the expected length,
    // including non-positive coordinates (the likelihood penalizes those).
    //
    // Given
    // -----
    // - `theta = [-1.0, 0.5, 0.0]` with expected length 3.
    //
    // Expect
    // ------
    // - `Ok(())` is returned; only finiteness and length are enforced here.
    fn validate_theta_with_finite_entries_returns_ok() {
        // Arrange
        let theta = array![-1.0_f64, 0.5, 0.0];

        // Act
        let result = validate_theta(theta.view(), 3);

        // Assert
        assert!(result.is_ok());
    }

    #[test]
    // Purpose
    // -------
    // `validate_theta` rejects non-finite coordinates with InvalidThetaInput.
    //
    // Given
    // -----
    // - θ length 2, with ∞ at index 0.
    //
    // Expect
    // ------
    // - `Err(ParamError::InvalidThetaInput { index: 0, .. })`.
    fn validate_theta_with_non_finite_value_returns_invalid_theta_input() {
        // Arrange
        let theta = array![f64::INFINITY, 1.0_f64];

        // Act
        let result = validate_theta(theta.view(), 2);

        // Assert
        match result {
            Err(ParamError::InvalidThetaInput { index, value }) => {
                assert_eq!(index, 0);
                assert!(value.is_infinite());
            }
            other => panic!("expected InvalidThetaInput error at index 0, got: {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // `validate_horizon` rejects a zero horizon and accepts any H ≥ 1.
    //
    // Given
    // -----
    // - Horizons 0, 1, and 60.
    //
    // Expect
    // ------
    // - `Err(RetentionError::ZeroHorizon)` for 0; `Ok(())` otherwise.
    fn validate_horizon_rejects_zero() {
        // Arrange + Act + Assert
        assert!(matches!(validate_horizon(0), Err(RetentionError::ZeroHorizon)));
        assert!(validate_horizon(1).is_ok());
        assert!(validate_horizon(60).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // `validate_initial_population` accepts finite non-negative populations
    // (zero included) and rejects NaN, ±∞, and negatives.
    //
    // Given
    // -----
    // - Populations {0.0, 1000.0} (valid) and {-1.0, NaN, ∞} (invalid).
    //
    // Expect
    // ------
    // - `Ok(())` for valid inputs, `InvalidInitialPopulation` otherwise.
    fn validate_initial_population_enforces_finite_non_negative() {
        // Arrange
        let invalid = [-1.0_f64, f64::NAN, f64::INFINITY];

        // Act & Assert
        assert!(validate_initial_population(0.0).is_ok());
        assert!(validate_initial_population(1000.0).is_ok());
        for &value in &invalid {
            assert!(matches!(
                validate_initial_population(value),
                Err(RetentionError::InvalidInitialPopulation { .. })
            ));
        }
    }
}
