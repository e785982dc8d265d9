//! Bézier curve model.
//!
//! The fitter relies on two primitive operations:
//! - build a design row for a given parameter `t` and degree (for least squares)
//! - evaluate the curve at `t` given its control points (for residuals/plots)

use nalgebra::DMatrix;

use crate::domain::{ControlPoint, Point};
use crate::math::bernstein_row;

/// Fill a design row: the `degree + 1` Bernstein basis values at `t`.
///
/// # Panics
/// Panics if `out` does not have length `degree + 1`.
pub fn fill_design_row(degree: usize, t: f64, out: &mut [f64]) {
    bernstein_row(degree, t, out);
}

/// Build the `n × (degree + 1)` design matrix `M[i][k] = b_{k,degree}(t_i)`.
pub fn design_matrix(params: &[f64], degree: usize) -> DMatrix<f64> {
    let mut m = DMatrix::<f64>::zeros(params.len(), degree + 1);
    let mut row = vec![0.0; degree + 1];
    for (i, &t) in params.iter().enumerate() {
        fill_design_row(degree, t, &mut row);
        for (k, &v) in row.iter().enumerate() {
            m[(i, k)] = v;
        }
    }
    m
}

/// Evaluate `B(t) = Σ b_{k,d}(t) P_k` for `d = control_points.len() - 1`.
///
/// Returns the origin for an empty control polygon; callers validate that case.
pub fn point_at(control_points: &[ControlPoint], t: f64) -> Point {
    let Some(degree) = control_points.len().checked_sub(1) else {
        return Point::default();
    };
    let mut row = vec![0.0; degree + 1];
    fill_design_row(degree, t, &mut row);

    let mut x = 0.0;
    let mut y = 0.0;
    for (w, p) in row.iter().zip(control_points) {
        x += w * p.x;
        y += w * p.y;
    }
    Point::new(x, y)
}
