//! Numerical stability utilities.
//!
//! Provides log-space implementations of the Beta-function quantities the
//! retention likelihoods are built from, plus the shared numeric constants
//! used across the optimizer and inference layers. Everything here works in
//! log-space so that Beta ratios for large cohort horizons never overflow
//! or underflow in naïve form.
//!
//! # Provided items
//! - [`ln_beta(a, b)`]: `ln B(a, b)` via log-gamma differences.
//! - [`ln_diff_exp(a, b)`]: stable `ln(exp(a) - exp(b))` for `a ≥ b`,
//!   used to turn differences of Beta values into log-probabilities.
//! - [`INFEASIBLE_PENALTY`]: large finite objective value substituted for
//!   likelihood evaluations at infeasible parameters.
//! - [`EIGEN_EPS`]: eigenvalue truncation threshold for the
//!   observed-information pseudoinverse.
//!
//! # Rationale
//! The likelihood and projection code never forms `B(a, b)` directly; all
//! churn and survival probabilities are assembled from `ln_beta` and
//! exponentiated at most once per term. The penalty constant lets the
//! derivative-free simplex wander through infeasible parameter regions
//! without aborting the run on a non-finite cost.
use statrs::function::gamma::ln_gamma;

/// Objective value reported for infeasible parameter proposals.
///
/// The simplex search has no box constraints, so it will occasionally
/// propose `gamma <= 0`, `delta <= 0`, or a decay regime that assigns zero
/// probability to an observed loss. Those evaluations return this constant
/// instead of raising or producing `±inf`: the vertex sorts as the worst in
/// the simplex and the search contracts away from it. The value is far
/// above any negative log-likelihood a realistic cohort can produce while
/// staying comfortably inside `f64` range.
pub const INFEASIBLE_PENALTY: f64 = 1e12;

/// Eigenvalue truncation threshold for pseudoinverse construction.
///
/// Eigenvalues of the observed information with magnitude at or below this
/// threshold are treated as numerically zero when inverting for standard
/// errors, inflating uncertainty along weakly identified directions instead
/// of dividing by noise.
pub const EIGEN_EPS: f64 = 1e-12;

/// Natural log of the Beta function, `ln B(a, b)`.
///
/// Computed as `lnΓ(a) + lnΓ(b) - lnΓ(a + b)`, which stays finite and
/// well-conditioned for the argument ranges the retention likelihoods
/// produce (shapes up to a few hundred, horizons in the thousands), where
/// `B(a, b)` itself underflows quickly.
///
/// # Parameters
/// - `a`, `b`: Beta arguments, both must be strictly positive and finite.
///   Callers are responsible for guarding the domain; see
///   [`INFEASIBLE_PENALTY`] for how the likelihood layer handles violations.
///
/// # Returns
/// - `ln B(a, b)` as `f64`.
pub fn ln_beta(a: f64, b: f64) -> f64 {
    ln_gamma(a) + ln_gamma(b) - ln_gamma(a + b)
}

/// Stable `ln(exp(a) - exp(b))` for `a ≥ b`.
///
/// Factors the larger term out and evaluates the remainder with `exp_m1`,
/// so the result keeps full precision even when `a` and `b` are close (the
/// common case for adjacent-period Beta values late in a cohort).
///
/// - For `b < a`: returns `a + ln(-expm1(b - a))`.
/// - For `b >= a`: the represented difference is zero or negative mass;
///   returns `-inf` so the caller can decide whether that is a hard zero
///   (no churn possible) or a guard violation.
///
/// # Parameters
/// - `a`: log of the minuend.
/// - `b`: log of the subtrahend.
///
/// # Returns
/// - `ln(exp(a) - exp(b))` as `f64`, or `-inf` when the difference is not
///   strictly positive.
pub fn ln_diff_exp(a: f64, b: f64) -> f64 {
    if b >= a {
        return f64::NEG_INFINITY;
    }
    a + (-(b - a).exp_m1()).ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `ln_beta` against closed-form Beta values.
    // - The Beta recurrence the likelihood reduction relies on, evaluated
    //   through `ln_diff_exp`.
    // - `ln_diff_exp` edge behavior for equal and crossed arguments.
    //
    // They intentionally DO NOT cover:
    // - Likelihood assembly or penalty substitution (tested in the retention
    //   core modules).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify `ln_beta` against Beta values with exact closed forms.
    //
    // Given
    // -----
    // - B(1, 1) = 1, B(2, 3) = 1/12, B(0.5, 0.5) = π.
    //
    // Expect
    // ------
    // - `ln_beta` matches the exact logs to tight tolerance.
    fn ln_beta_matches_closed_forms() {
        // Arrange / Act / Assert
        assert!(ln_beta(1.0, 1.0).abs() < 1e-12);
        assert!((ln_beta(2.0, 3.0) - (1.0_f64 / 12.0).ln()).abs() < 1e-12);
        assert!((ln_beta(0.5, 0.5) - std::f64::consts::PI.ln()).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Check the recurrence B(a, b) - B(a, b+1) = B(a+1, b) in log space.
    // This identity is what makes the static and time-varying likelihoods
    // agree when the decay parameter is zero.
    //
    // Given
    // -----
    // - Several (a, b) pairs spanning small and moderate shapes.
    //
    // Expect
    // ------
    // - `ln_diff_exp(ln_beta(a, b), ln_beta(a, b + 1))` equals
    //   `ln_beta(a + 1, b)` within 1e-10.
    fn ln_diff_exp_satisfies_beta_recurrence() {
        // Arrange
        let cases = [(1.0, 1.0), (0.7, 2.3), (3.5, 0.9), (12.0, 45.0)];

        for &(a, b) in &cases {
            // Act
            let lhs = ln_diff_exp(ln_beta(a, b), ln_beta(a, b + 1.0));
            let rhs = ln_beta(a + 1.0, b);

            // Assert
            assert!(
                (lhs - rhs).abs() < 1e-10,
                "recurrence violated for a = {a}, b = {b}: {lhs} vs {rhs}"
            );
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure `ln_diff_exp` reports zero mass as `-inf` rather than NaN when
    // the arguments touch or cross.
    //
    // Given
    // -----
    // - Equal arguments and a subtrahend exceeding the minuend.
    //
    // Expect
    // ------
    // - Both cases return `-inf`.
    fn ln_diff_exp_equal_or_crossed_arguments_yield_neg_infinity() {
        // Arrange / Act / Assert
        assert_eq!(ln_diff_exp(-1.5, -1.5), f64::NEG_INFINITY);
        assert_eq!(ln_diff_exp(-2.0, -1.0), f64::NEG_INFINITY);
    }

    #[test]
    // Purpose
    // -------
    // Confirm `ln_diff_exp` keeps precision for nearly equal arguments,
    // where naive `ln(exp(a) - exp(b))` would cancel catastrophically.
    //
    // Given
    // -----
    // - `a` and `b = a - 1e-9`, so the true difference is
    //   `exp(a) * (1 - exp(-1e-9)) ≈ exp(a) * 1e-9`.
    //
    // Expect
    // ------
    // - The result matches `a + ln(1e-9)` to first order.
    fn ln_diff_exp_is_stable_for_nearly_equal_arguments() {
        // Arrange
        let a = -3.0;
        let eps = 1e-9_f64;
        let b = a - eps;

        // Act
        let got = ln_diff_exp(a, b);

        // Assert
        assert!(got.is_finite());
        assert!((got - (a + eps.ln())).abs() < 1e-6);
    }
}
