//! BG parameterization and scratch workspace.
//!
//! This module provides the **model-space** parameter container [`BGParams`],
//! the variant selector [`BGVariant`], and a reusable workspace [`BGScratch`]
//! used by the likelihood and projection routines elsewhere in the crate. It
//! also implements the mapping between model space and the **optimizer-space
//! vector** θ (as `ndarray::Array1<f64>`).
//!
//! ## What this module defines
//! - [`BGVariant`]: static vs time-varying churn, with the θ layout and the
//!   canonical simplex seed for each.
//! - [`BGParams`]: validated model-space parameters `(γ, δ[, decay])`, plus
//!   mappings to and from θ.
//! - [`BGScratch`]: a reusable buffer for the clipped survival-exponent
//!   prefix sums so NLL evaluations inside one fit run allocation-free.
//!
//! ## Mapping conventions
//! - θ is the identity embedding of model space: `θ = [γ, δ]` for the static
//!   variant and `θ = [γ, δ, decay]` for the time-varying one. The simplex
//!   search is unconstrained, so infeasible proposals (γ ≤ 0 or δ ≤ 0) occur
//!   mid-run; the likelihood absorbs them into a penalty value instead of
//!   erroring, and [`BGParams::from_theta`] re-validates at post-fit
//!   materialization.
//!
//! ## Invariants validated by constructors
//! - `γ > 0` and `δ > 0`, both finite.
//! - `decay` finite when present (any sign; negative models loyalty,
//!   positive novelty).
//!
//! ## Scratch buffer (size)
//! - `cum_buf`: length `T + 1`, where `T` is the number of observed periods.
//!   Entry 0 stays 0 and entry `t` holds the cumulative clipped exponent
//!   through period `t` after a fill pass.
use crate::retention::{
    core::validation::{validate_decay, validate_delta, validate_gamma, validate_theta},
    errors::ParamResult,
};
use ndarray::{Array1, ArrayView1, array};
use std::cell::RefCell;

/// Model variant selector: static or time-varying churn.
///
/// The static variant integrates a Beta-distributed churn probability over
/// the cohort; the time-varying variant layers clipped per-period survival
/// exponents `max(0, 1 + decay·t)` on top of the same heterogeneity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BGVariant {
    /// Latent churn probability fixed over time; `θ = [γ, δ]`.
    Static,
    /// Clipped per-period survival exponents with slope `decay`;
    /// `θ = [γ, δ, decay]`.
    TimeVarying,
}

impl BGVariant {
    /// Length of the optimizer vector θ for this variant (2 or 3).
    pub fn param_len(&self) -> usize {
        match self {
            BGVariant::Static => 2,
            BGVariant::TimeVarying => 3,
        }
    }

    /// Canonical starting point for the simplex search: `γ = 1, δ = 1`
    /// (a uniform Beta prior), plus `decay = 0` for the time-varying
    /// variant so the search starts at the static model.
    pub fn canonical_seed(&self) -> Array1<f64> {
        match self {
            BGVariant::Static => array![1.0, 1.0],
            BGVariant::TimeVarying => array![1.0, 1.0, 0.0],
        }
    }
}

/// Reusable workspace for BG likelihood evaluation.
///
/// Holds the cumulative clipped-exponent buffer reused across NLL evaluations
/// within one fit so the simplex search's hot path runs allocation-free. The
/// buffer is zero-initialized at construction and refilled per evaluation by
/// the exponents module.
#[derive(Debug, Clone, PartialEq)]
pub struct BGScratch {
    /// Cumulative clipped survival exponents; entry 0 is always 0.
    pub cum_buf: RefCell<Array1<f64>>,
}

impl BGScratch {
    /// Construct a [`BGScratch`] sized for `periods` observed periods.
    ///
    /// `cum_buf` has length `periods + 1`; entry `t` holds the cumulative
    /// clipped exponent through period `t` after a fill pass. No further
    /// allocations are performed when reusing this workspace in inner loops.
    pub fn new(periods: usize) -> BGScratch {
        let cum_buf = RefCell::new(Array1::zeros(periods + 1));
        BGScratch { cum_buf }
    }
}

/// Constrained **model-space** parameters for a BG retention model.
///
/// Invariants are validated at construction; use this type to evaluate
/// likelihoods at known parameters and to generate projections.
///
/// See [`BGParams::from_theta`] / [`BGParams::to_theta`] for the
/// optimizer-space mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct BGParams {
    /// γ > 0, first shape of the Beta prior over the latent churn
    /// probability.
    pub gamma: f64,
    /// δ > 0, second shape of the Beta prior.
    pub delta: f64,
    /// Decay slope of the time-varying variant; `None` selects static churn.
    pub decay: Option<f64>,
}

impl BGParams {
    /// Create validated model-space parameters.
    ///
    /// Validates:
    /// - `gamma` finite and > 0
    /// - `delta` finite and > 0
    /// - `decay` finite when `Some`
    ///
    /// Returns an error if any check fails.
    pub fn new(gamma: f64, delta: f64, decay: Option<f64>) -> ParamResult<Self> {
        validate_gamma(gamma)?;
        validate_delta(delta)?;
        if let Some(slope) = decay {
            validate_decay(slope)?;
        }
        Ok(BGParams { gamma, delta, decay })
    }

    /// Build validated model-space parameters from an optimizer-space vector
    /// θ.
    ///
    /// ### Inputs
    /// - `theta`: optimizer-space parameters with layout `[γ, δ]` (static) or
    ///   `[γ, δ, decay]` (time-varying), checked against `variant`.
    /// - `variant`: which θ layout to expect.
    ///
    /// ### Behavior
    /// 1. Checks θ's length and finiteness against the variant.
    /// 2. Validates the parameter domains (`γ, δ > 0`, finite decay).
    ///
    /// ### Returns
    /// A fully validated [`BGParams`]. On invalid input, returns a
    /// descriptive error.
    ///
    /// ### Notes
    /// - Intended for post-fit materialization: the simplex is free to roam
    ///   infeasible regions mid-run, but the final θ̂ must land in the valid
    ///   domain or this conversion reports which coordinate did not.
    pub fn from_theta(theta: ArrayView1<f64>, variant: BGVariant) -> ParamResult<Self> {
        validate_theta(theta, variant.param_len())?;
        let decay = match variant {
            BGVariant::Static => None,
            BGVariant::TimeVarying => Some(theta[2]),
        };
        BGParams::new(theta[0], theta[1], decay)
    }

    /// Map model-space parameters to **optimizer-space** θ.
    ///
    /// Layout: `[γ, δ]` for the static variant, `[γ, δ, decay]` for the
    /// time-varying one. Returns a newly allocated `Array1<f64>`.
    pub fn to_theta(&self) -> Array1<f64> {
        match self.decay {
            Some(slope) => array![self.gamma, self.delta, slope],
            None => array![self.gamma, self.delta],
        }
    }

    /// Variant implied by the presence of the decay slope.
    pub fn variant(&self) -> BGVariant {
        match self.decay {
            Some(_) => BGVariant::TimeVarying,
            None => BGVariant::Static,
        }
    }

    /// Mean of the Beta prior, `γ / (γ + δ)`.
    ///
    /// Under the static variant this equals the model-implied probability of
    /// churning in the first period, `B(γ+1, δ) / B(γ, δ)`. Useful as a
    /// baseline sanity check on a fit.
    pub fn mean_churn_probability(&self) -> f64 {
        self.gamma / (self.gamma + self.delta)
    }
}
