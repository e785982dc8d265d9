//! Least squares through the Moore–Penrose pseudo-inverse.
//!
//! Curve fitting solves, for a fixed design matrix `M` (`n × m`, `n >= m`) and a
//! right-hand side `P` (`n × c`):
//!
//! ```text
//! minimize Σ_i ||M_i Q - P_i||²
//! ```
//!
//! whose minimum-norm solution is `Q = pinv(M) P`.
//!
//! Implementation choices:
//! - The pseudo-inverse comes from an SVD, never from the normal equations
//!   `(MᵀM)⁻¹Mᵀ`, which square the condition number.
//! - Singular values below `σ_max · max(n, m) · ε` are treated as zero. The
//!   number of values above that cutoff is the effective rank, which callers
//!   use to detect degenerate fits.

use nalgebra::DMatrix;

use crate::error::FitError;

/// Solution of a least-squares problem plus the conditioning facts callers need.
#[derive(Debug, Clone)]
pub struct LeastSquares {
    /// `m × c` solution matrix.
    pub solution: DMatrix<f64>,
    /// Number of singular values above `tolerance`.
    pub rank: usize,
    /// Cutoff below which singular values were discarded.
    pub tolerance: f64,
    pub sigma_max: f64,
    pub sigma_min: f64,
}

impl LeastSquares {
    /// `σ_max / σ_min`, or `None` when the matrix is exactly singular.
    pub fn condition_number(&self) -> Option<f64> {
        if self.sigma_min > 0.0 {
            let c = self.sigma_max / self.sigma_min;
            c.is_finite().then_some(c)
        } else {
            None
        }
    }
}

/// Relative rank tolerance for an `rows × cols` matrix with largest singular value `sigma_max`.
pub fn rank_tolerance(sigma_max: f64, rows: usize, cols: usize) -> f64 {
    sigma_max * rows.max(cols) as f64 * f64::EPSILON
}

/// Solve `design · Q ≈ rhs` in the least-squares sense via `pinv(design)`.
pub fn solve_least_squares(design: &DMatrix<f64>, rhs: &DMatrix<f64>) -> Result<LeastSquares, FitError> {
    if design.nrows() != rhs.nrows() {
        return Err(FitError::Solver("design matrix and right-hand side row counts differ"));
    }
    if design.ncols() == 0 || design.nrows() == 0 {
        return Err(FitError::Solver("empty design matrix"));
    }

    let svd = design.clone().svd(true, true);

    let sigma_max = svd.singular_values.iter().copied().fold(0.0_f64, f64::max);
    let sigma_min = svd
        .singular_values
        .iter()
        .copied()
        .fold(f64::INFINITY, f64::min);
    if !sigma_max.is_finite() {
        return Err(FitError::Solver("non-finite singular value"));
    }

    let tolerance = rank_tolerance(sigma_max, design.nrows(), design.ncols());
    let rank = svd.singular_values.iter().filter(|&&s| s > tolerance).count();

    let pinv = svd.pseudo_inverse(tolerance).map_err(FitError::Solver)?;
    let solution = pinv * rhs;

    if solution.iter().any(|v| !v.is_finite()) {
        return Err(FitError::Solver("non-finite least-squares solution"));
    }

    Ok(LeastSquares {
        solution,
        rank,
        tolerance,
        sigma_max,
        sigma_min,
    })
}
