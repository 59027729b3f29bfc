//! inference::hessian — standard errors from the observed information.
//!
//! Purpose
//! -------
//! Turn a finite-difference Hessian at the fitted optimum into classical
//! standard errors. This is where the crate crosses from `ndarray` into
//! `nalgebra`: the observed information is differenced as an `ndarray`
//! matrix, re-homed as a `DMatrix`, and decomposed with a symmetric
//! eigensolver.
//!
//! Key behaviors
//! -------------
//! - Build the observed information `J(θ̂)` by calling [`fd_hessian`] on
//!   a gradient map of the negative log-likelihood.
//! - Re-home the matrix into `nalgebra` via [`to_dmatrix`].
//! - Convert eigenpairs into per-parameter standard errors through an
//!   eigenvalue-truncated pseudoinverse ([`se_from_information`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - [`fd_hessian`] hands over a finite, square, already-symmetrized
//!   `n×n` matrix with `n = θ̂.len()`; nothing here re-symmetrizes.
//! - Eigenvalues at or below [`EIGEN_EPS`] count as numerically zero and
//!   contribute nothing to the variance sums.
//! - At an interior optimum of the *negative* log-likelihood, `J(θ̂)` is
//!   positive semi-definite, so the surviving eigenvalues are positive.
//!
//! Conventions
//! -----------
//! - Callers supply the gradient of the **negative** log-likelihood; a
//!   sign slip makes every eigenvalue negative and every SE zero.
//! - Standard errors are the square roots of the pseudoinverse diagonal;
//!   the full covariance matrix stays internal.
//! - No explicit inverse is formed anywhere in this module.
//! - Failures surface as [`OptResult<T>`].
//!
//! Downstream usage
//! ----------------
//! - The retention model layer calls [`calc_standard_errors`] after a
//!   fit to report classical SEs at the MLE.
//! - [`to_dmatrix`] and [`se_from_information`] are internal plumbing.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the `ndarray` → `DMatrix` copy, agreement with
//!   analytic pseudoinverse diagonals for diagonal and correlated
//!   information matrices, and the truncation of near-zero eigenvalues.
//! - Model-level integration tests check that SEs on fitted cohort data
//!   are finite and scale sensibly with cohort size.
use crate::optimization::{
    errors::OptResult, loglik_optimizer::finite_diff::fd_hessian,
    numerical_stability::transformations::EIGEN_EPS,
};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

/// calc_standard_errors — classical SEs at a fitted optimum.
///
/// Purpose
/// -------
/// Difference the supplied gradient map into the observed information
/// `J(θ̂)` and convert it into per-parameter standard errors via an
/// eigen-based pseudoinverse.
///
/// Parameters
/// ----------
/// - `f`: `&F`
///   Gradient map `θ ↦ ∇(-ℓ)(θ)` of the negative log-likelihood, smooth
///   enough around `theta_hat` for finite differencing to behave.
/// - `theta_hat`: `&Array1<f64>`
///   Fitted parameter vector `θ̂`; its length `n` fixes the Hessian shape
///   and the length of the returned vector.
///
/// Returns
/// -------
/// `OptResult<Array1<f64>>`
///   Length-`n` standard errors aligned with `theta_hat`, or the error
///   [`fd_hessian`] raised while building the information matrix.
///
/// Errors
/// ------
/// - `OptError`
///   Whatever [`fd_hessian`] reports: dimension mismatches or non-finite
///   entries caught by validation.
///
/// Panics
/// ------
/// - Never panics under the documented invariants; a non-square matrix
///   escaping validation would be a programming error.
///
/// Safety
/// ------
/// - No `unsafe` code is used.
///
/// Notes
/// -----
/// - Weakly identified directions (eigenvalues at or below
///   [`EIGEN_EPS`]) are truncated rather than inverted, so flat
///   directions produce small SEs instead of dividing by zero.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use bg_retention::inference::hessian::calc_standard_errors;
/// // Constant information diag(16, 4) via the linear gradient map g(θ) = A θ.
/// let a = array![[16.0, 0.0],
///                [0.0, 4.0]];
/// let f = |theta: &ndarray::Array1<f64>| a.dot(theta);
/// let theta_hat = array![0.4, -2.0];
///
/// let se = calc_standard_errors(&f, &theta_hat).unwrap();
/// assert!((se[0] - 0.25).abs() < 1e-6);
/// assert!((se[1] - 0.5).abs() < 1e-6);
/// ```
pub fn calc_standard_errors<F: Fn(&Array1<f64>) -> Array1<f64>>(
    f: &F, theta_hat: &Array1<f64>,
) -> OptResult<Array1<f64>> {
    let obs_info = fd_hessian(f, theta_hat)?;
    Ok(se_from_information(to_dmatrix(&obs_info), theta_hat.len()))
}

// ---- Helper methods ----

/// to_dmatrix — re-home an `ndarray` information matrix in `nalgebra`.
///
/// Purpose
/// -------
/// Produce a `DMatrix<f64>` with the same entries as the square `ndarray`
/// input so the symmetric eigensolver can run on it. Entries are copied
/// verbatim; any residual asymmetry in the input is preserved.
///
/// Parameters
/// ----------
/// - `obs_info`: `&Array2<f64>`
///   Square `n×n` observed information, already symmetrized upstream.
///
/// Returns
/// -------
/// `DMatrix<f64>`
///   Freshly allocated `n×n` matrix with identical entries.
///
/// Panics
/// ------
/// - Never panics for square input; `from_fn` indexes strictly inside
///   the `n×n` bounds.
///
/// Notes
/// -----
/// - `DMatrix::from_fn` fills column by column, matching `nalgebra`'s
///   column-major storage.
fn to_dmatrix(obs_info: &Array2<f64>) -> DMatrix<f64> {
    let n = obs_info.ncols();
    DMatrix::from_fn(n, n, |i, j| obs_info[[i, j]])
}

/// se_from_information — pseudoinverse diagonal square roots.
///
/// Purpose
/// -------
/// Decompose a symmetric observed information matrix `J = Q Λ Qᵀ` and
/// return `sqrt` of the diagonal of the Moore–Penrose pseudoinverse,
/// which is the classical standard error of each parameter.
///
/// Parameters
/// ----------
/// - `obs_info`: `DMatrix<f64>`
///   Symmetric `n×n` information matrix; consumed by the decomposition.
/// - `n`: `usize`
///   Parameter dimension, matching the matrix.
///
/// Returns
/// -------
/// `Array1<f64>`
///   Length-`n` vector with `SE(θ̂_i) = sqrt(Σ_{k: λ_k > EIGEN_EPS}
///   Q[i,k]² / λ_k)`.
///
/// Panics
/// ------
/// - May panic on a dimension mismatch between `obs_info` and `n`; that
///   mismatch cannot arise from [`calc_standard_errors`].
///
/// Notes
/// -----
/// - Truncating `λ_k ≤ EIGEN_EPS` implements the pseudoinverse
///   convention of zeroing reciprocals of null directions.
fn se_from_information(obs_info: DMatrix<f64>, n: usize) -> Array1<f64> {
    let eigen_decomp = obs_info.symmetric_eigen();
    let q = eigen_decomp.eigenvectors;
    let eigenvals = eigen_decomp.eigenvalues;
    let mut se = Array1::<f64>::zeros(n);
    for i in 0..n {
        let variance: f64 = eigenvals
            .iter()
            .enumerate()
            .filter(|(_, lambda)| **lambda > EIGEN_EPS)
            .map(|(k, &lambda)| q[(i, k)] * q[(i, k)] / lambda)
            .sum();
        se[i] = variance.sqrt();
    }
    se
}
