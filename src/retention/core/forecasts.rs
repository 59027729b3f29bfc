//! Forward cohort projection for beta-geometric retention models.
//!
//! Purpose
//! -------
//! Turn fitted (or hypothetical) BG parameters into an expected cohort path:
//! how many of an initial population remain after each future period, and
//! how many are lost within each period. Projection is a free function over
//! [`BGParams`] so counterfactual scenarios do not require a fitted model.
//!
//! Key behaviors
//! -------------
//! - Compute expected survival fractions `S(t) = B(γ, δ + e(t)) / B(γ, δ)`
//!   in log space, where the exponent `e(t)` is `t` for the static variant
//!   and the cumulative clipped series for the time-varying one.
//! - Scale fractions by the initial population and derive per-period losses
//!   as differences of consecutive remaining counts.
//! - Clamp each remaining count by its predecessor so the projected path is
//!   non-increasing and losses are non-negative even under floating-point
//!   wobble.
//!
//! Invariants & assumptions
//! ------------------------
//! - `params` comes from [`BGParams::new`] or [`BGParams::from_theta`], so
//!   γ and δ are strictly positive and any decay slope is finite.
//! - `horizon ≥ 1` and the initial population is finite and non-negative;
//!   both are validated here. A zero initial population is legal and yields
//!   an all-zero projection.
//! - For every `t`, `0 ≤ remaining[t] ≤ initial_population` and
//!   `lost[t] ≥ 0`; losses and the final remaining count partition the
//!   initial population exactly.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based on the output arrays: `remaining[i]` is the
//!   expected count remaining after period `i + 1`, and `lost[i]` is the
//!   expected loss within period `i + 1`.
//! - Projections are expectations and are reported as fractional counts;
//!   no rounding to whole customers is applied.
//! - A frozen time-varying regime (all increments clipped to zero) projects
//!   a flat path at the initial population.
//!
//! Downstream usage
//! ----------------
//! - After fitting, call the model's projection entry point, which reads the
//!   cached parameters and delegates here.
//! - For what-if analysis, construct [`BGParams`] directly and call
//!   [`project`] with any population and horizon.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the projected path to the closed form available at
//!   γ = δ = 1, check the partition and monotonicity invariants, verify the
//!   zero-decay reduction against the static variant, and exercise the
//!   frozen-regime and invalid-input edge cases.
use crate::optimization::numerical_stability::ln_beta;
use crate::retention::{
    core::{
        exponents::cum_exponents,
        params::BGParams,
        validation::{validate_horizon, validate_initial_population},
    },
    errors::RetentionResult,
};
use ndarray::Array1;

/// ForecastTable — projected cohort path over a fixed horizon.
///
/// Purpose
/// -------
/// Hold the output of [`project`]: the expected remaining count after each
/// projected period and the expected loss within each period, alongside the
/// initial population they were scaled from.
///
/// Fields
/// ------
/// - `initial_population`: `f64`
///   The cohort size the projection starts from (period 0 count).
/// - `remaining`: `Array1<f64>`
///   `remaining[i]` is the expected count remaining after period `i + 1`;
///   length equals the projection horizon.
/// - `lost`: `Array1<f64>`
///   `lost[i]` is the expected loss within period `i + 1`; same length as
///   `remaining`.
///
/// Invariants
/// ----------
/// - `remaining` is non-increasing, bounded by `initial_population` above
///   and 0 below.
/// - `lost[i] = remaining[i - 1] - remaining[i]` (with `remaining[-1]`
///   read as `initial_population`), so `lost.sum() + final_remaining()`
///   reproduces the initial population.
///
/// Notes
/// -----
/// - Counts are expectations and therefore fractional; consumers decide
///   whether and how to round.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastTable {
    /// Cohort size at period 0.
    pub initial_population: f64,
    /// Expected count remaining after each projected period.
    pub remaining: Array1<f64>,
    /// Expected loss within each projected period.
    pub lost: Array1<f64>,
}

impl ForecastTable {
    /// Number of projected periods.
    pub fn periods(&self) -> usize {
        self.remaining.len()
    }

    /// Expected count remaining at the end of the projection horizon.
    pub fn final_remaining(&self) -> f64 {
        self.remaining[self.remaining.len() - 1]
    }
}

/// Project an initial population forward under BG parameters.
///
/// Parameters
/// ----------
/// - `params`: `&BGParams`
///   Validated model parameters. The decay slope, when present, selects the
///   time-varying survival exponents; otherwise the static closed form is
///   used.
/// - `initial_population`: `f64`
///   Cohort size at period 0. Must be finite and non-negative; zero is
///   legal and produces an all-zero path.
/// - `horizon`: `usize`
///   Number of future periods to project. Must be at least 1.
///
/// Returns
/// -------
/// `RetentionResult<ForecastTable>`
///   The projected cohort path, with `remaining` and `lost` of length
///   `horizon`.
///
/// Errors
/// ------
/// - [`RetentionError::ZeroHorizon`] if `horizon == 0`.
/// - [`RetentionError::InvalidInitialPopulation`] if the initial population
///   is non-finite or negative.
///
/// Panics
/// ------
/// - Never panics.
///
/// Notes
/// -----
/// - Survival fractions are assembled once per period from log-Beta
///   differences and exponentiated once, so long horizons neither overflow
///   nor underflow.
/// - Each remaining count is clamped by its predecessor; the clamp is a
///   no-op analytically but keeps the non-increasing invariant exact under
///   floating-point rounding.
///
/// Examples
/// --------
/// ```rust
/// # use bg_retention::retention::core::forecasts::project;
/// # use bg_retention::retention::core::params::BGParams;
///
/// // At γ = δ = 1, survival past period t is 1 / (t + 1).
/// let params = BGParams::new(1.0, 1.0, None).unwrap();
/// let forecast = project(&params, 1000.0, 3).unwrap();
///
/// assert!((forecast.remaining[0] - 500.0).abs() < 1e-9);
/// assert!((forecast.remaining[2] - 250.0).abs() < 1e-9);
/// assert!((forecast.lost[0] - 500.0).abs() < 1e-9);
/// ```
///
/// [`RetentionError::ZeroHorizon`]: crate::retention::errors::RetentionError::ZeroHorizon
/// [`RetentionError::InvalidInitialPopulation`]: crate::retention::errors::RetentionError::InvalidInitialPopulation
pub fn project(
    params: &BGParams, initial_population: f64, horizon: usize,
) -> RetentionResult<ForecastTable> {
    validate_horizon(horizon)?;
    validate_initial_population(initial_population)?;
    let gamma = params.gamma;
    let delta = params.delta;
    let cum = params.decay.map(|slope| cum_exponents(slope, horizon));
    let prior = ln_beta(gamma, delta);
    let mut remaining = Array1::zeros(horizon);
    let mut lost = Array1::zeros(horizon);
    let mut previous = initial_population;
    for t in 1..=horizon {
        let exponent = match &cum {
            Some(series) => series[t],
            None => t as f64,
        };
        let survival = (ln_beta(gamma, delta + exponent) - prior).exp();
        let level = (initial_population * survival).min(previous);
        remaining[t - 1] = level;
        lost[t - 1] = previous - level;
        previous = level;
    }
    Ok(ForecastTable { initial_population, remaining, lost })
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
    // - The projected path against the closed form available at γ = δ = 1.
    // - Monotonicity, bounds, and the loss/remaining partition.
    // - The zero-decay reduction of the time-varying projection.
    // - Frozen-regime flattening under a severely negative decay.
    // - Input validation for horizon and initial population.
    //
    // They intentionally DO NOT cover:
    // - Fitting, or the round trip from fitted parameters to projection
    //   (covered by integration tests).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Pin the static projection to its closed form. At γ = δ = 1, survival
    // past period t is 1 / (t + 1).
    //
    // Given
    // -----
    // - `params = (1, 1)`, `initial_population = 1000`, `horizon = 4`.
    //
    // Expect
    // ------
    // - `remaining = [500, 333.33.., 250, 200]` within 1e-9.
    // - `lost[0] = 500` and subsequent losses are the expected differences.
    fn static_projection_matches_closed_form() {
        // Arrange
        let params = BGParams::new(1.0, 1.0, None).unwrap();

        // Act
        let forecast = project(&params, 1000.0, 4).unwrap();

        // Assert
        let expected = array![500.0, 1000.0 / 3.0, 250.0, 200.0];
        for (got, want) in forecast.remaining.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-9, "got {got}, want {want}");
        }
        assert!((forecast.lost[0] - 500.0).abs() < 1e-9);
        assert!((forecast.lost[1] - (500.0 - 1000.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Verify the structural invariants of a projected path: bounded by the
    // initial population, non-increasing, non-negative losses, and an exact
    // partition of the initial population.
    //
    // Given
    // -----
    // - Arbitrary feasible parameters with a mild negative decay and a long
    //   horizon.
    //
    // Expect
    // ------
    // - `0 ≤ remaining[t] ≤ initial_population` and `remaining` is
    //   non-increasing.
    // - Every loss is non-negative.
    // - `lost.sum() + final_remaining() == initial_population` within 1e-9.
    fn projection_invariants_hold() {
        // Arrange
        let params = BGParams::new(0.7, 2.1, Some(-0.05)).unwrap();
        let initial_population = 2500.0;

        // Act
        let forecast = project(&params, initial_population, 60).unwrap();

        // Assert
        let mut previous = initial_population;
        for (&level, &loss) in forecast.remaining.iter().zip(forecast.lost.iter()) {
            assert!(level >= 0.0 && level <= initial_population);
            assert!(level <= previous);
            assert!(loss >= 0.0);
            previous = level;
        }
        let partition = forecast.lost.sum() + forecast.final_remaining();
        assert!((partition - initial_population).abs() < 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Verify the zero-decay reduction at the projection level: a
    // time-varying model with decay = 0 projects the same path as the
    // static model with the same shapes.
    //
    // Given
    // -----
    // - Shapes γ = 0.8, δ = 1.7 under both variants, `horizon = 12`.
    //
    // Expect
    // ------
    // - The two `remaining` paths agree within 1e-9 at every period.
    fn zero_decay_projection_matches_static() {
        // Arrange
        let static_params = BGParams::new(0.8, 1.7, None).unwrap();
        let tv_params = BGParams::new(0.8, 1.7, Some(0.0)).unwrap();

        // Act
        let static_path = project(&static_params, 1000.0, 12).unwrap();
        let tv_path = project(&tv_params, 1000.0, 12).unwrap();

        // Assert
        for (a, b) in static_path.remaining.iter().zip(tv_path.remaining.iter()) {
            assert!((a - b).abs() < 1e-9, "static {a} vs time-varying {b}");
        }
    }

    #[test]
    // Purpose
    // -------
    // A severely negative decay freezes the cumulative exponents at zero,
    // so survival is exactly 1 in every period and nobody is ever lost.
    //
    // Given
    // -----
    // - `decay = -10`, so every increment clips to zero from period 1.
    //
    // Expect
    // ------
    // - `remaining` is flat at the initial population and `lost` is all
    //   zeros.
    fn frozen_regime_projects_flat_path() {
        // Arrange
        let params = BGParams::new(1.3, 0.9, Some(-10.0)).unwrap();

        // Act
        let forecast = project(&params, 750.0, 6).unwrap();

        // Assert
        for &level in forecast.remaining.iter() {
            assert_eq!(level, 750.0);
        }
        for &loss in forecast.lost.iter() {
            assert_eq!(loss, 0.0);
        }
    }

    #[test]
    // Purpose
    // -------
    // A zero initial population is legal and projects an all-zero path.
    //
    // Given
    // -----
    // - `initial_population = 0`, any feasible parameters.
    //
    // Expect
    // ------
    // - `remaining` and `lost` are all zeros.
    fn zero_population_projects_zero_path() {
        // Arrange
        let params = BGParams::new(1.0, 2.0, None).unwrap();

        // Act
        let forecast = project(&params, 0.0, 5).unwrap();

        // Assert
        assert!(forecast.remaining.iter().all(|&v| v == 0.0));
        assert!(forecast.lost.iter().all(|&v| v == 0.0));
    }

    #[test]
    // Purpose
    // -------
    // Invalid projection inputs are rejected with the documented errors.
    //
    // Given
    // -----
    // - A zero horizon, a negative population, and a NaN population.
    //
    // Expect
    // ------
    // - `ZeroHorizon` for the former, `InvalidInitialPopulation` for the
    //   latter two.
    fn invalid_inputs_rejected() {
        // Arrange
        let params = BGParams::new(1.0, 1.0, None).unwrap();

        // Act
        let zero_horizon = project(&params, 100.0, 0).unwrap_err();
        let negative_population = project(&params, -5.0, 3).unwrap_err();
        let nan_population = project(&params, f64::NAN, 3).unwrap_err();

        // Assert
        assert_eq!(zero_horizon, RetentionError::ZeroHorizon);
        assert_eq!(
            negative_population,
            RetentionError::InvalidInitialPopulation { value: -5.0 }
        );
        match nan_population {
            RetentionError::InvalidInitialPopulation { value } => assert!(value.is_nan()),
            other => panic!("expected InvalidInitialPopulation, got {other:?}"),
        }
    }
}
