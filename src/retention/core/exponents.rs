//! Cumulative survival-exponent prefix sums for the time-varying BG variant.
//!
//! Implements the clipped exponent series that generalizes the one-period
//! survival step of the static model.
//!
//! ## Model convention
//! Per-period increment: `max(0, 1 + decay·t)` for period `t = 1..=T`.
//! Cumulative exponent: `cum[t] = Σ_{i=1..t} max(0, 1 + decay·i)` with
//! `cum[0] = 0`.
//!
//! ## What this module does
//! - Fills the cumulative series **in place** into the model's preallocated
//!   [`BGScratch`] buffer as a single O(T) prefix-sum pass (no heap
//!   allocations in the likelihood hot path).
//! - Provides an allocating variant for projection, where the horizon is
//!   caller-chosen and may exceed the fitted table's length.
//!
//! ## Clipping invariant
//! - Increments are clamped at zero **before** accumulation, so `cum` is
//!   always non-negative and non-decreasing. A strongly negative slope
//!   freezes the series (survival stops decaying) rather than shrinking it;
//!   the surviving fraction never grows over time.
//! - At `decay = 0` every increment is 1, so `cum[t] = t` and the
//!   time-varying formulas collapse to the static ones.
use crate::retention::core::params::BGScratch;
use ndarray::Array1;

/// Fill the cumulative clipped-exponent series **in place**.
///
/// Writes `cum_buf[0] = 0` and `cum_buf[t] = cum_buf[t-1] +
/// max(0, 1 + decay·t)` for `t = 1..=periods` into the scratch buffer.
///
/// # Side effects
/// - Overwrites `scratch.cum_buf[..=periods]`. No heap allocations.
///
/// # Inputs
/// - `scratch`: workspace whose `cum_buf` has length ≥ `periods + 1`
///   (guaranteed when constructed via `BGScratch::new(periods)`).
/// - `decay`: finite slope of the per-period increments.
/// - `periods`: number of periods to accumulate over.
///
/// # Panics
/// - Indexes out of bounds if `scratch.cum_buf.len() < periods + 1`; sizing
///   is the constructor's responsibility.
pub fn fill_cum_exponents(scratch: &BGScratch, decay: f64, periods: usize) {
    let mut cum = scratch.cum_buf.borrow_mut();
    cum[0] = 0.0;
    let mut acc = 0.0;
    for t in 1..=periods {
        acc += (1.0 + decay * t as f64).max(0.0);
        cum[t] = acc;
    }
}

/// Allocate and fill a cumulative clipped-exponent series of length
/// `periods + 1`.
///
/// Same recurrence as [`fill_cum_exponents`], returning a fresh
/// `Array1<f64>` with `cum[0] = 0`. Used by projection, where the horizon is
/// independent of any fitted table and a scratch buffer may be absent or too
/// short.
pub fn cum_exponents(decay: f64, periods: usize) -> Array1<f64> {
    let mut cum = Array1::zeros(periods + 1);
    let mut acc = 0.0;
    for t in 1..=periods {
        acc += (1.0 + decay * t as f64).max(0.0);
        cum[t] = acc;
    }
    cum
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The prefix-sum recurrence for zero, positive, and negative slopes.
    // - The max(0, ·) clipping floor, including the total-freeze case.
    // - Agreement between the in-place fill and the allocating variant.
    // - Buffer reuse across fills with different slopes.
    //
    // They intentionally DO NOT cover:
    // - How the likelihood or projector consume the series.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // At decay = 0 the increments are all 1, so the cumulative series counts
    // periods: cum[t] = t.
    //
    // Given
    // -----
    // - `decay = 0.0`, `periods = 5`.
    //
    // Expect
    // ------
    // - `cum = [0, 1, 2, 3, 4, 5]`.
    fn zero_decay_counts_periods() {
        // Arrange
        let scratch = BGScratch::new(5);

        // Act
        fill_cum_exponents(&scratch, 0.0, 5);

        // Assert
        let cum = scratch.cum_buf.borrow();
        assert_eq!(*cum, array![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    // Purpose
    // -------
    // A positive slope grows the increments linearly: 1 + decay·t.
    //
    // Given
    // -----
    // - `decay = 0.5`, `periods = 3`, so increments are 1.5, 2.0, 2.5.
    //
    // Expect
    // ------
    // - `cum = [0, 1.5, 3.5, 6.0]`.
    fn positive_decay_accumulates_growing_increments() {
        // Arrange
        let scratch = BGScratch::new(3);

        // Act
        fill_cum_exponents(&scratch, 0.5, 3);

        // Assert
        let cum = scratch.cum_buf.borrow();
        let expected = array![0.0, 1.5, 3.5, 6.0];
        for (got, want) in cum.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-12, "got {got}, want {want}");
        }
    }

    #[test]
    // Purpose
    // -------
    // A negative slope clips increments at zero once 1 + decay·t goes
    // negative, so the series flattens instead of decreasing.
    //
    // Given
    // -----
    // - `decay = -0.4`, `periods = 5`, so increments are 0.6, 0.2, then 0.
    //
    // Expect
    // ------
    // - `cum = [0, 0.6, 0.8, 0.8, 0.8, 0.8]`, non-decreasing throughout.
    fn negative_decay_flattens_at_clipping_floor() {
        // Arrange
        let scratch = BGScratch::new(5);

        // Act
        fill_cum_exponents(&scratch, -0.4, 5);

        // Assert
        let cum = scratch.cum_buf.borrow();
        let expected = array![0.0, 0.6, 0.8, 0.8, 0.8, 0.8];
        for (got, want) in cum.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-12, "got {got}, want {want}");
        }
        for t in 1..cum.len() {
            assert!(cum[t] >= cum[t - 1]);
        }
    }

    #[test]
    // Purpose
    // -------
    // A severely negative slope clamps every increment to exactly 0 from the
    // first period, never producing a negative entry.
    //
    // Given
    // -----
    // - `decay = -10.0`, `periods = 8` (1 + decay·t = -9 already at t = 1).
    //
    // Expect
    // ------
    // - Every entry of `cum` is exactly 0.0.
    fn severe_negative_decay_clamps_to_exact_zero() {
        // Arrange
        let scratch = BGScratch::new(8);

        // Act
        fill_cum_exponents(&scratch, -10.0, 8);

        // Assert
        let cum = scratch.cum_buf.borrow();
        for &value in cum.iter() {
            assert_eq!(value, 0.0);
        }
    }

    #[test]
    // Purpose
    // -------
    // The allocating variant agrees with the in-place fill entry for entry.
    //
    // Given
    // -----
    // - `decay = -0.15`, `periods = 12`.
    //
    // Expect
    // ------
    // - `cum_exponents` and `fill_cum_exponents` produce identical series.
    fn allocating_variant_matches_in_place_fill() {
        // Arrange
        let scratch = BGScratch::new(12);

        // Act
        fill_cum_exponents(&scratch, -0.15, 12);
        let allocated = cum_exponents(-0.15, 12);

        // Assert
        let cum = scratch.cum_buf.borrow();
        assert_eq!(*cum, allocated);
    }

    #[test]
    // Purpose
    // -------
    // Refilling the same scratch with a different slope overwrites every
    // entry; no stale values leak between evaluations.
    //
    // Given
    // -----
    // - One fill at `decay = 0.5`, then a refill at `decay = -10.0`.
    //
    // Expect
    // ------
    // - After the refill the buffer matches a fresh `decay = -10.0` series
    //   (all zeros), not a mixture.
    fn refill_overwrites_previous_series() {
        // Arrange
        let scratch = BGScratch::new(4);
        fill_cum_exponents(&scratch, 0.5, 4);

        // Act
        fill_cum_exponents(&scratch, -10.0, 4);

        // Assert
        let cum = scratch.cum_buf.borrow();
        for &value in cum.iter() {
            assert_eq!(value, 0.0);
        }
    }
}
