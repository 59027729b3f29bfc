//! Negative log-likelihood of a beta-geometric retention model.
//!
//! Evaluates the cohort likelihood in log space from a [`SurvivalTable`],
//! for both the static and time-varying model variants.
//!
//! ## Model convention
//! With `prior = ln B(γ, δ)`:
//! - Static churn:    `ln P(t) = ln B(γ + 1, δ + t − 1) − prior`
//! - Static survival: `ln S(T) = ln B(γ, δ + T) − prior`
//! - Time-varying churn, via the cumulative exponents `cum`:
//!   `ln P(t) = ln(exp(ln B(γ, δ + cum[t−1])) − exp(ln B(γ, δ + cum[t]))) − prior`
//! - Time-varying survival: `ln S(T) = ln B(γ, δ + cum[T]) − prior`
//!
//! The negative log-likelihood is
//! `−Σ_t lost[t]·ln P(t) − remaining[T]·ln S(T)`, with zero-count terms
//! skipped so that `0·ln 0` never forms.
//!
//! ## Penalty convention
//! The simplex search is unconstrained, so the driver must stay total:
//! every infeasible evaluation returns the finite [`INFEASIBLE_PENALTY`]
//! instead of an error or `±inf`. This covers
//! - non-finite or wrongly sized θ,
//! - `γ ≤ 0` or `δ ≤ 0`,
//! - a zero churn probability in a period with observed losses (a frozen
//!   time-varying regime cannot explain a loss),
//! - any non-finite accumulation.
//!
//! At `decay = 0` the cumulative exponents count periods and the Beta
//! recurrence `B(a, b) − B(a, b + 1) = B(a + 1, b)` makes the two variants
//! agree; the static closed form is still evaluated directly because it
//! avoids the log-space differencing entirely.
use crate::optimization::numerical_stability::{INFEASIBLE_PENALTY, ln_beta, ln_diff_exp};
use crate::retention::core::{
    data::SurvivalTable,
    exponents::fill_cum_exponents,
    params::{BGScratch, BGVariant},
};
use ndarray::ArrayView1;

/// Evaluate the negative log-likelihood of θ on a survival table.
///
/// # Parameters
/// - `theta`: raw optimizer vector, `[γ, δ]` or `[γ, δ, decay]` per
///   `variant`. May be arbitrarily infeasible; see the penalty convention.
/// - `variant`: selects the static or time-varying likelihood.
/// - `table`: validated cohort observations.
/// - `scratch`: workspace whose `cum_buf` covers `table.periods()`; only
///   touched by the time-varying variant.
///
/// # Returns
/// - The finite negative log-likelihood, or [`INFEASIBLE_PENALTY`] when θ
///   is outside the model's domain or assigns zero mass to an observation.
pub fn negative_log_likelihood(
    theta: ArrayView1<f64>, variant: BGVariant, table: &SurvivalTable, scratch: &BGScratch,
) -> f64 {
    if theta.len() != variant.param_len() || theta.iter().any(|v| !v.is_finite()) {
        return INFEASIBLE_PENALTY;
    }
    let gamma = theta[0];
    let delta = theta[1];
    if gamma <= 0.0 || delta <= 0.0 {
        return INFEASIBLE_PENALTY;
    }
    let periods = table.periods();
    let prior = ln_beta(gamma, delta);
    let nll = match variant {
        BGVariant::Static => {
            let ln_survival = ln_beta(gamma, delta + periods as f64) - prior;
            accumulate_nll(
                table,
                |t| ln_beta(gamma + 1.0, delta + t as f64 - 1.0) - prior,
                ln_survival,
            )
        }
        BGVariant::TimeVarying => {
            fill_cum_exponents(scratch, theta[2], periods);
            let cum = scratch.cum_buf.borrow();
            let ln_survival = ln_beta(gamma, delta + cum[periods]) - prior;
            accumulate_nll(
                table,
                |t| {
                    ln_diff_exp(ln_beta(gamma, delta + cum[t - 1]), ln_beta(gamma, delta + cum[t]))
                        - prior
                },
                ln_survival,
            )
        }
    };
    if nll.is_finite() { nll } else { INFEASIBLE_PENALTY }
}

// ---- Helper Methods ----

/// Accumulate `−Σ lost[t]·ln P(t) − remaining[T]·ln S(T)`.
///
/// `ln_churn(t)` is the log churn probability for 1-based period `t`.
/// Zero-count terms are skipped; a `−inf` log-probability paired with a
/// positive count short-circuits to the penalty.
fn accumulate_nll<F>(table: &SurvivalTable, ln_churn: F, ln_survival: f64) -> f64
where
    F: Fn(usize) -> f64,
{
    let mut nll = 0.0;
    for (idx, &lost) in table.lost.iter().enumerate() {
        if lost == 0.0 {
            continue;
        }
        let ln_p = ln_churn(idx + 1);
        if ln_p == f64::NEG_INFINITY {
            return INFEASIBLE_PENALTY;
        }
        nll -= lost * ln_p;
    }
    let survivors = table.final_remaining();
    if survivors > 0.0 {
        if ln_survival == f64::NEG_INFINITY {
            return INFEASIBLE_PENALTY;
        }
        nll -= survivors * ln_survival;
    }
    nll
}
