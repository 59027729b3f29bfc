//! loglik_optimizer::finite_diff — finite-difference gradients and Hessians.
//!
//! Purpose
//! -------
//! House the numerical differentiation used when no analytic derivative is
//! available: a guarded forward-difference gradient and a Hessian built by
//! differencing a gradient map. Everything funnels through validation, so
//! callers receive either a fully finite result or a descriptive error,
//! never a silently poisoned array.
//!
//! Key behaviors
//! -------------
//! - [`fd_gradient`] takes a forward difference of a scalar objective,
//!   with an error-capture protocol for closures that cannot return
//!   `Result`, and validates the outcome.
//! - [`fd_hessian`] differences a gradient map with a central scheme,
//!   drops to a forward scheme when the central result fails validation,
//!   and symmetrizes whatever survives.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs and outputs use the crate-wide `ndarray` aliases `Theta`,
//!   `Grad`, and `Hessian` over `f64`.
//! - Objective closures signal failure by writing into the shared
//!   `closure_err` cell and returning `NaN`; the first captured error wins
//!   and aborts the gradient.
//! - A returned gradient satisfies [`validate_grad`]; a returned Hessian
//!   satisfies [`validate_hessian`] and is exactly symmetric.
//!
//! Conventions
//! -----------
//! - Differencing happens in the unconstrained optimizer space; models
//!   that reparameterize do so before calling in.
//! - The central scheme is the first choice for Hessians; the forward
//!   scheme exists as the fallback, and only its validation verdict is
//!   surfaced when both run.
//! - Failures travel as [`OptError`] through `OptResult<T>`; Argmin's
//!   [`Error`] appears only at the closure-capture boundary.
//!
//! Downstream usage
//! ----------------
//! - The Argmin adapter falls back to [`fd_gradient`] when its central
//!   difference of the cost is poisoned or fails validation.
//! - The inference layer builds the observed information through
//!   [`fd_hessian`] at the fitted optimum before inverting it for
//!   standard errors.
//! - Nothing here is exposed to the Python bindings directly.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the numerical accuracy of both helpers on smooth
//!   fixtures with known derivatives and walk the error paths (captured
//!   closure failures, non-finite results, fallback validation).
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Grad, Theta,
        types::Hessian,
        validation::{validate_grad, validate_hessian},
    },
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// fd_gradient — guarded forward-difference gradient of a scalar objective.
///
/// Purpose
/// -------
/// Approximate `∇f(θ)` by one-sided differences while honoring the
/// error-capture protocol used throughout the optimizer: the closure
/// cannot return `Result`, so it parks any failure in `closure_err` and
/// returns `NaN`, and this helper turns that parked failure back into a
/// real error afterwards.
///
/// Parameters
/// ----------
/// - `theta`: `&Theta`
///   Evaluation point; its length fixes the expected gradient dimension.
/// - `func`: `&G`
///   Scalar objective. Expected to write any evaluation failure into
///   `closure_err` and return `NaN` for that call.
/// - `closure_err`: `&RefCell<Option<Error>>`
///   Capture cell shared with `func`. Cleared on entry and inspected
///   once the differencing finishes.
///
/// Returns
/// -------
/// `OptResult<Grad>`
///   - `Ok(grad)` when no error was captured and the gradient passes
///     [`validate_grad`].
///   - `Err(e)` otherwise.
///
/// Errors
/// ------
/// - The captured error, converted through `From<Error> for OptError`,
///   when `func` failed during differencing.
/// - `OptError::GradientDimMismatch` when the gradient length disagrees
///   with `theta.len()`.
/// - `OptError::InvalidGradient` when any entry is NaN or infinite.
///
/// Panics
/// ------
/// - Never panics.
///
/// Safety
/// ------
/// - No `unsafe` code is used.
///
/// Notes
/// -----
/// - The forward scheme evaluates at `θ` and `θ + h·eᵢ` only, which is
///   what makes it the right fallback when a central difference stepped
///   below a feasibility boundary at `θ - h·eᵢ`.
/// - An empty capture cell after differencing is taken to mean every
///   evaluation succeeded.
///
/// Examples
/// --------
/// ```rust
/// # use std::cell::RefCell;
/// # use argmin::core::Error;
/// # use ndarray::Array1;
/// # use bg_retention::optimization::loglik_optimizer::Theta;
/// # use bg_retention::optimization::loglik_optimizer::finite_diff::fd_gradient;
/// let theta: Theta = Array1::from(vec![2.0_f64, -1.0]);
/// let captured: RefCell<Option<Error>> = RefCell::new(None);
///
/// // Objective with known gradient (3θ₀², 1).
/// let f = |x: &Theta| x[0].powi(3) + x[1];
///
/// let grad = fd_gradient(&theta, &f, &captured).unwrap();
/// assert!((grad[0] - 12.0).abs() < 1e-4);
/// assert!((grad[1] - 1.0).abs() < 1e-5);
/// ```
pub fn fd_gradient<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

/// fd_hessian — finite-difference Hessian of a gradient map.
///
/// Purpose
/// -------
/// Approximate the Jacobian of a gradient map `g(θ)` at `theta`, which is
/// the Hessian of the underlying scalar objective. A central scheme runs
/// first; when its result fails validation the forward scheme gets one
/// attempt, and whichever matrix survives is symmetrized before being
/// handed back.
///
/// Parameters
/// ----------
/// - `f`: `&F`
///   Gradient map from `Theta` to `Grad`; each component is differenced
///   numerically.
/// - `theta`: `&Theta`
///   Evaluation point; its length fixes the expected `dim × dim` shape.
///
/// Returns
/// -------
/// `OptResult<Hessian>`
///   - `Ok(h)` with `h` finite, square, and symmetric.
///   - `Err(e)` when both schemes fail validation.
///
/// Errors
/// ------
/// - `OptError::HessianDimMismatch` when the forward-scheme matrix is not
///   `dim × dim`.
/// - `OptError::InvalidHessian` when it contains NaN or infinite entries.
///
/// Panics
/// ------
/// - Never panics.
///
/// Safety
/// ------
/// - No `unsafe` code is used.
///
/// Notes
/// -----
/// - The central scheme's own validation verdict is discarded once the
///   fallback runs; callers see only the forward scheme's diagnostics, so
///   they stay ignorant of the two-stage strategy.
/// - Symmetrization happens after validation so that an `InvalidHessian`
///   error still points at the raw offending entry.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::Array1;
/// # use bg_retention::optimization::loglik_optimizer::Theta;
/// # use bg_retention::optimization::loglik_optimizer::finite_diff::fd_hessian;
/// // Gradient map of a quadratic with curvature diag(2, 6).
/// let grad_fn = |theta: &Theta| Array1::from(vec![2.0 * theta[0], 6.0 * theta[1]]);
///
/// let theta: Theta = Array1::from(vec![0.5_f64, -0.25]);
/// let hess = fd_hessian(&grad_fn, &theta).unwrap();
/// assert!((hess[[0, 0]] - 2.0).abs() < 1e-4);
/// assert!((hess[[1, 1]] - 6.0).abs() < 1e-4);
/// ```
pub fn fd_hessian<F: Fn(&Theta) -> Grad>(f: &F, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let mut hess = theta.central_hessian(f);
    match validate_hessian(&hess, dim) {
        Ok(_) => {
            symmetrize(&mut hess);
            Ok(hess)
        }
        Err(_) => {
            let mut fallback = theta.forward_hessian(f);
            validate_hessian(&fallback, dim)?;
            symmetrize(&mut fallback);
            Ok(fallback)
        }
    }
}

// ---- Helper methods ----

/// Average each off-diagonal pair in place, leaving the diagonal alone.
///
/// Runs only on matrices that already passed [`validate_hessian`], so no
/// shape or finiteness checks happen here.
fn symmetrize(hess: &mut Hessian) {
    for i in 0..hess.nrows() {
        for j in 0..i {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;
    use argmin::core::ArgminError;
    use ndarray::{Array1, Array2};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Numerical accuracy of the forward-difference gradient on a smooth
    //   objective with a known analytic gradient.
    // - The closure error-capture protocol and its conversion into OptError.
    // - Rejection of non-finite gradients and Hessians.
    // - Curvature recovery and symmetry of the finite-difference Hessian.
    // - In-place symmetrization of off-diagonal pairs.
    //
    // They intentionally DO NOT cover:
    // - End-to-end simplex runs (handled by the optimizer integration tests).
    // - The standard-error pipeline built on fd_hessian (covered in the
    //   inference tests).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `fd_gradient` reproduces the analytic gradient of a smooth
    // cubic objective to forward-difference accuracy.
    //
    // Given
    // -----
    // - θ = (1.5, -0.5).
    // - f(θ) = Σᵢ θᵢ³ with analytic gradient (3θ₀², 3θ₁²) = (6.75, 0.75).
    //
    // Expect
    // ------
    // - `Ok(grad)` with both entries within 1e-5 of the analytic values.
    fn fd_gradient_matches_analytic_gradient_on_smooth_objective() {
        // Arrange
        let theta: Theta = Array1::from(vec![1.5_f64, -0.5]);
        let captured: RefCell<Option<Error>> = RefCell::new(None);
        let f = |x: &Theta| x.iter().map(|v| v.powi(3)).sum::<f64>();

        // Act
        let grad = fd_gradient(&theta, &f, &captured)
            .expect("gradient of a smooth cubic should be computed");

        // Assert
        assert_eq!(grad.len(), 2);
        assert!((grad[0] - 6.75).abs() < 1e-5);
        assert!((grad[1] - 0.75).abs() < 1e-5);
    }

    #[test]
    // Purpose
    // -------
    // Ensure that an error parked in the capture cell during differencing
    // aborts `fd_gradient` and surfaces as the matching OptError variant.
    //
    // Given
    // -----
    // - θ = (1.0,).
    // - An objective that writes ArgminError::InvalidParameter into the cell
    //   and returns NaN on every call.
    //
    // Expect
    // ------
    // - `Err(OptError::InvalidParameter { .. })` after downcasting.
    fn fd_gradient_surfaces_error_captured_during_evaluation() {
        // Arrange
        let theta: Theta = Array1::from(vec![1.0_f64]);
        let captured: RefCell<Option<Error>> = RefCell::new(None);
        let f = |_: &Theta| {
            let argmin_err =
                ArgminError::InvalidParameter { text: "seed outside feasible cone".to_string() };
            captured.replace(Some(argmin_err.into()));
            f64::NAN
        };

        // Act
        let result = fd_gradient(&theta, &f, &captured);

        // Assert
        let err = result.expect_err("captured closure error should abort the gradient");
        match err {
            OptError::InvalidParameter { .. } | OptError::BackendError { .. } => {}
            other => panic!("unexpected variant from captured error: {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Confirm that a silently non-finite objective (no captured error) is
    // still rejected by post-hoc gradient validation.
    //
    // Given
    // -----
    // - θ = (0.0, 1.0).
    // - An objective returning NaN without touching the capture cell.
    //
    // Expect
    // ------
    // - `Err(OptError::InvalidGradient { .. })`.
    fn fd_gradient_rejects_non_finite_objective() {
        // Arrange
        let theta: Theta = Array1::from(vec![0.0_f64, 1.0]);
        let captured: RefCell<Option<Error>> = RefCell::new(None);
        let f = |_: &Theta| f64::NAN;

        // Act
        let result = fd_gradient(&theta, &f, &captured);

        // Assert
        let err = result.expect_err("an all-NaN gradient should fail validation");
        match err {
            OptError::InvalidGradient { .. } => {}
            other => panic!("expected InvalidGradient, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that `fd_hessian` recovers the full curvature matrix of an
    // anisotropic quadratic, including the off-diagonal coupling.
    //
    // Given
    // -----
    // - Gradient map g(θ) = (2θ₀ + θ₁, θ₀ + 4θ₁), the gradient of a
    //   quadratic with Hessian [[2, 1], [1, 4]].
    // - θ = (0.3, -0.7).
    //
    // Expect
    // ------
    // - `Ok(hess)` with every entry within 1e-4 of the true matrix.
    // - Exactly equal off-diagonal entries after symmetrization.
    fn fd_hessian_recovers_curvature_of_anisotropic_quadratic() {
        // Arrange
        let theta: Theta = Array1::from(vec![0.3_f64, -0.7]);
        let grad_fn =
            |t: &Theta| Array1::from(vec![2.0 * t[0] + t[1], t[0] + 4.0 * t[1]]);

        // Act
        let hess = fd_hessian(&grad_fn, &theta)
            .expect("Hessian of a quadratic gradient map should be computed");

        // Assert
        assert_eq!(hess.shape(), &[2, 2]);
        assert!((hess[[0, 0]] - 2.0).abs() < 1e-4);
        assert!((hess[[0, 1]] - 1.0).abs() < 1e-4);
        assert!((hess[[1, 1]] - 4.0).abs() < 1e-4);
        assert_eq!(hess[[0, 1]], hess[[1, 0]]);
    }

    #[test]
    // Purpose
    // -------
    // Ensure that a gradient map returning non-finite entries fails both
    // differencing schemes and surfaces as InvalidHessian.
    //
    // Given
    // -----
    // - θ = (0.0,).
    // - A gradient map returning (NaN,) everywhere.
    //
    // Expect
    // ------
    // - `Err(OptError::InvalidHessian { .. })`.
    fn fd_hessian_rejects_non_finite_gradient_map() {
        // Arrange
        let theta: Theta = Array1::from(vec![0.0_f64]);
        let grad_fn = |_: &Theta| Array1::from(vec![f64::NAN]);

        // Act
        let result = fd_hessian(&grad_fn, &theta);

        // Assert
        let err = result.expect_err("a NaN gradient map should fail both schemes");
        match err {
            OptError::InvalidHessian { .. } => {}
            other => panic!("expected InvalidHessian, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that `symmetrize` replaces each off-diagonal pair with its
    // average and leaves the diagonal untouched.
    //
    // Given
    // -----
    // - A 3x3 matrix with three unequal off-diagonal pairs.
    //
    // Expect
    // ------
    // - Every (i, j)/(j, i) pair ends up equal to the pair average.
    // - Diagonal entries are unchanged.
    fn symmetrize_averages_mirror_entries() {
        // Arrange
        let mut hess: Hessian = Array2::from_shape_vec(
            (3, 3),
            vec![1.0_f64, 4.0, 8.0, 2.0, 5.0, 10.0, 6.0, 12.0, 9.0],
        )
        .unwrap();
        let diag = (hess[[0, 0]], hess[[1, 1]], hess[[2, 2]]);

        // Act
        symmetrize(&mut hess);

        // Assert
        assert_eq!((hess[[0, 0]], hess[[1, 1]], hess[[2, 2]]), diag);
        assert_eq!(hess[[0, 1]], 3.0);
        assert_eq!(hess[[1, 0]], 3.0);
        assert_eq!(hess[[0, 2]], 7.0);
        assert_eq!(hess[[2, 0]], 7.0);
        assert_eq!(hess[[1, 2]], 11.0);
        assert_eq!(hess[[2, 1]], 11.0);
    }
}
