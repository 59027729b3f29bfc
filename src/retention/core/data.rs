//! Survival-table container for BG retention models.
//!
//! Purpose
//! -------
//! Provide the canonical, validated representation of an observed cohort's
//! attrition history. A raw series of remaining-population counts is shaped
//! once into a [`SurvivalTable`] holding the initial cohort size, the counts
//! remaining after each period, and the derived per-period losses; all
//! downstream likelihood and projection code consumes this table read-only.
//!
//! Key behaviors
//! -------------
//! - [`SurvivalTable::from_counts`] enforces the data invariants (length ≥ 2,
//!   finite, non-negative, non-increasing) and derives `lost[t] =
//!   remaining[t-1] - remaining[t]` in a single pass.
//! - The final observed period is the right-censoring boundary: customers
//!   still active there are "alive at least this long," not churned.
//!
//! Invariants & assumptions
//! ------------------------
//! - `0 ≤ remaining[t] ≤ initial_population` for every period.
//! - `lost[t] ≥ 0` (non-increasing counts, enforced at construction).
//! - Periods are equally spaced and contiguous by construction; index `t - 1`
//!   of the internal arrays holds period `t` for `t = 1..=T`.
//! - The table is never mutated after construction.
//!
//! Conventions
//! -----------
//! - Period labels are 1-based (`t = 1..=T`); period 0 is the cohort origin
//!   and lives in `initial_population`, not in the arrays.
//! - Counts are `f64` so fractional cohorts (e.g., rebuilt from a projection)
//!   round-trip without truncation.
//!
//! Downstream usage
//! ----------------
//! - Construct a [`SurvivalTable`] at the boundary where raw counts enter the
//!   modeling stack, then pass it by reference to the likelihood
//!   ([`negative_log_likelihood`]) and read `initial_population` for
//!   projections.
//! - Consumers may rely on the construction-time invariants and skip
//!   re-validation.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy path on the canonical example series, each
//!   rejection branch, and the derived accessors (`periods`,
//!   `is_final_period`, `final_remaining`).
//!
//! [`negative_log_likelihood`]: crate::retention::core::loglik::negative_log_likelihood
use crate::retention::{
    core::validation::validate_counts,
    errors::RetentionResult,
};
use ndarray::{Array1, ArrayView1, s};

/// `SurvivalTable` — validated attrition history of a single cohort.
///
/// Purpose
/// -------
/// Hold one cohort's observed retention curve in the shape the likelihood
/// consumes: the initial cohort size, the count still active after each
/// period, and the count lost during each period. Construction validates the
/// raw series once so downstream code can assume clean data.
///
/// Fields
/// ------
/// - `initial_population`: `f64`
///   Cohort size observed at period 0.
/// - `remaining`: `Array1<f64>`
///   Customers still active after each period `t = 1..=T`, stored at index
///   `t - 1`. Non-increasing and bounded by `initial_population`.
/// - `lost`: `Array1<f64>`
///   Customers lost during each period `t = 1..=T`, stored at index `t - 1`.
///   Derived as `remaining[t-1] - remaining[t]` with `remaining[0] =
///   initial_population`; non-negative by the monotonicity invariant.
///
/// Invariants
/// ----------
/// - `remaining.len() == lost.len() >= 1`.
/// - `remaining` is non-increasing and every entry lies in
///   `[0, initial_population]`.
/// - `lost.sum() + final_remaining() == initial_population` up to floating
///   point.
///
/// Performance
/// -----------
/// - Construction is O(T): one validation scan plus one derivation pass.
/// - After construction this type is a plain container; clones copy the two
///   arrays.
///
/// Notes
/// -----
/// - The last observed period is the right-censoring boundary; its
///   `remaining` mass enters the likelihood as survivors, not churners.
#[derive(Debug, Clone, PartialEq)]
pub struct SurvivalTable {
    /// Cohort size observed at period 0.
    pub initial_population: f64,
    /// Customers still active after each period `t = 1..=T` (index `t - 1`).
    pub remaining: Array1<f64>,
    /// Customers lost during each period `t = 1..=T` (index `t - 1`).
    pub lost: Array1<f64>,
}

impl SurvivalTable {
    /// Shape a raw remaining-count series into a validated [`SurvivalTable`].
    ///
    /// Parameters
    /// ----------
    /// - `counts`: `ArrayView1<'_, f64>`
    ///   Ordered remaining-population counts with the initial cohort size at
    ///   index 0 and one entry per subsequent period. Must have length ≥ 2
    ///   and be finite, non-negative, and non-increasing.
    ///
    /// Returns
    /// -------
    /// `RetentionResult<SurvivalTable>`
    ///   - `Ok(SurvivalTable)` with `lost` derived from consecutive
    ///     differences.
    ///   - `Err(RetentionError)` if validation fails.
    ///
    /// Errors
    /// ------
    /// - `RetentionError::SeriesTooShort`
    ///   Returned when fewer than 2 counts are supplied.
    /// - `RetentionError::NonFiniteCount` / `RetentionError::NegativeCount`
    ///   Returned on the first NaN/±∞ or negative entry.
    /// - `RetentionError::IncreasingCount`
    ///   Returned when a count exceeds its predecessor; rises are rejected
    ///   rather than clamped to zero loss, since churn is irreversible.
    ///
    /// Panics
    /// ------
    /// - Never panics. All invalid inputs are reported via `RetentionError`.
    ///
    /// Notes
    /// -----
    /// - The input is not retained; the table stores the post-period counts
    ///   and the derived losses.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use bg_retention::retention::core::data::SurvivalTable;
    /// use ndarray::array;
    ///
    /// let counts = array![1000.0, 800.0, 275.0, 250.0, 220.0];
    /// let table = SurvivalTable::from_counts(counts.view()).unwrap();
    /// assert_eq!(table.initial_population, 1000.0);
    /// assert_eq!(table.lost, array![200.0, 525.0, 25.0, 30.0]);
    /// assert_eq!(table.final_remaining(), 220.0);
    /// ```
    pub fn from_counts(counts: ArrayView1<f64>) -> RetentionResult<Self> {
        validate_counts(counts)?;
        let initial_population = counts[0];
        let remaining = counts.slice(s![1..]).to_owned();
        let lost = Array1::from_shape_fn(counts.len() - 1, |i| counts[i] - counts[i + 1]);
        Ok(SurvivalTable { initial_population, remaining, lost })
    }

    /// Number of observed periods `T` (excluding the period-0 origin).
    pub fn periods(&self) -> usize {
        self.remaining.len()
    }

    /// Whether 1-based period `t` is the censored final period.
    ///
    /// Returns `false` for period 0 (the cohort origin) and for any `t`
    /// beyond the table.
    pub fn is_final_period(&self, t: usize) -> bool {
        t == self.periods()
    }

    /// Censored mass: customers still active after the final observed period.
    pub fn final_remaining(&self) -> f64 {
        self.remaining[self.remaining.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retention::errors::RetentionError;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction behavior of `SurvivalTable::from_counts`.
    // - Derivation of `initial_population`, `remaining`, and `lost`.
    // - The derived accessors `periods`, `is_final_period`, and
    //   `final_remaining`.
    // - Enforcement of invariants (length, finiteness, sign, monotonicity).
    //
    // These tests intentionally DO NOT cover:
    // - Likelihood or projection semantics built on top of the table.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `from_counts` shapes the canonical example series into the
    // documented table.
    //
    // Given
    // -----
    // - `counts = [1000, 800, 275, 250, 220]` (periods 0..4).
    //
    // Expect
    // ------
    // - `initial_population = 1000`.
    // - `remaining = [800, 275, 250, 220]` for periods 1..4.
    // - `lost = [200, 525, 25, 30]` for periods 1..4.
    fn from_counts_shapes_canonical_series() {
        // Arrange
        let counts = array![1000.0_f64, 800.0, 275.0, 250.0, 220.0];

        // Act
        let table = SurvivalTable::from_counts(counts.view()).unwrap();

        // Assert
        assert_eq!(table.initial_population, 1000.0);
        assert_eq!(table.remaining, array![800.0, 275.0, 250.0, 220.0]);
        assert_eq!(table.lost, array![200.0, 525.0, 25.0, 30.0]);
    }

    #[test]
    // Purpose
    // -------
    // Verify the derived accessors on the canonical table.
    //
    // Given
    // -----
    // - The table built from `[1000, 800, 275, 250, 220]`.
    //
    // Expect
    // ------
    // - `periods() == 4`.
    // - `is_final_period` is true only at t = 4 (periods 1..3 and 0 are
    //   false, as is any t beyond the table).
    // - `final_remaining() == 220`.
    fn accessors_reflect_final_period_and_censored_mass() {
        // Arrange
        let counts = array![1000.0_f64, 800.0, 275.0, 250.0, 220.0];
        let table = SurvivalTable::from_counts(counts.view()).unwrap();

        // Act + Assert
        assert_eq!(table.periods(), 4);
        assert!(!table.is_final_period(0));
        assert!(!table.is_final_period(1));
        assert!(!table.is_final_period(3));
        assert!(table.is_final_period(4));
        assert!(!table.is_final_period(5));
        assert_eq!(table.final_remaining(), 220.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify that losses and the censored mass account for the whole cohort.
    //
    // Given
    // -----
    // - The table built from `[1000, 800, 275, 250, 220]`.
    //
    // Expect
    // ------
    // - `lost.sum() + final_remaining() == initial_population`.
    fn losses_and_censored_mass_partition_the_cohort() {
        // Arrange
        let counts = array![1000.0_f64, 800.0, 275.0, 250.0, 220.0];
        let table = SurvivalTable::from_counts(counts.view()).unwrap();

        // Act
        let accounted = table.lost.sum() + table.final_remaining();

        // Assert
        assert!((accounted - table.initial_population).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Ensure `from_counts` rejects a series with fewer than two entries.
    //
    // Given
    // -----
    // - `counts = [1000]`.
    //
    // Expect
    // ------
    // - `Err(RetentionError::SeriesTooShort { len: 1 })`.
    fn from_counts_returns_error_for_short_series() {
        // Arrange
        let counts = array![1000.0_f64];

        // Act
        let result = SurvivalTable::from_counts(counts.view());

        // Assert
        assert_eq!(result.unwrap_err(), RetentionError::SeriesTooShort { len: 1 });
    }

    #[test]
    // Purpose
    // -------
    // Ensure `from_counts` rejects non-finite counts and reports the index.
    //
    // Given
    // -----
    // - `counts = [1000, ∞, 500]`.
    //
    // Expect
    // ------
    // - `Err(RetentionError::NonFiniteCount { index: 1, .. })`.
    fn from_counts_returns_error_for_non_finite_count() {
        // Arrange
        let counts = array![1000.0_f64, f64::INFINITY, 500.0];

        // Act
        let result = SurvivalTable::from_counts(counts.view());

        // Assert
        assert_eq!(
            result.unwrap_err(),
            RetentionError::NonFiniteCount { index: 1, value: f64::INFINITY }
        );
    }

    #[test]
    // Purpose
    // -------
    // Ensure `from_counts` rejects negative counts and reports the index.
    //
    // Given
    // -----
    // - `counts = [1000, 500, -2]`.
    //
    // Expect
    // ------
    // - `Err(RetentionError::NegativeCount { index: 2, value: -2.0 })`.
    fn from_counts_returns_error_for_negative_count() {
        // Arrange
        let counts = array![1000.0_f64, 500.0, -2.0];

        // Act
        let result = SurvivalTable::from_counts(counts.view());

        // Assert
        assert_eq!(result.unwrap_err(), RetentionError::NegativeCount { index: 2, value: -2.0 });
    }

    #[test]
    // Purpose
    // -------
    // Ensure `from_counts` rejects a rise between consecutive counts instead
    // of clamping the loss to zero.
    //
    // Given
    // -----
    // - `counts = [1000, 800, 900]`.
    //
    // Expect
    // ------
    // - `Err(RetentionError::IncreasingCount { index: 2, previous: 800.0,
    //   value: 900.0 })`.
    fn from_counts_returns_error_for_increasing_count() {
        // Arrange
        let counts = array![1000.0_f64, 800.0, 900.0];

        // Act
        let result = SurvivalTable::from_counts(counts.view());

        // Assert
        assert_eq!(
            result.unwrap_err(),
            RetentionError::IncreasingCount { index: 2, previous: 800.0, value: 900.0 }
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify that zero-loss periods survive the round trip into the table.
    //
    // Given
    // -----
    // - `counts = [100, 100, 90]` with a flat first period.
    //
    // Expect
    // ------
    // - `lost = [0, 10]` and construction succeeds.
    fn from_counts_accepts_flat_periods_with_zero_loss() {
        // Arrange
        let counts = array![100.0_f64, 100.0, 90.0];

        // Act
        let table = SurvivalTable::from_counts(counts.view()).unwrap();

        // Assert
        assert_eq!(table.lost, array![0.0, 10.0]);
        assert_eq!(table.remaining, array![100.0, 90.0]);
    }
}
