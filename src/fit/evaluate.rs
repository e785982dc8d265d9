//! Curve evaluation: control points + parameters → points on the curve.
//!
//! Used for rendering, exports and for checking fits against their samples.

use crate::domain::{ControlPoint, SamplePoint};
use crate::error::FitError;
use crate::fit::parameters::uniform_parameters;
use crate::models::point_at;

/// Evaluate the curve at `num_samples` uniformly spaced parameters over `[0, 1]`.
///
/// The degree is `control_points.len() - 1`. The first returned point is
/// exactly `control_points[0]`, and when `num_samples >= 2` the last is exactly
/// the last control point.
pub fn evaluate(control_points: &[ControlPoint], num_samples: usize) -> Result<Vec<SamplePoint>, FitError> {
    if num_samples < 1 {
        return Err(FitError::InvalidSampleCount { count: num_samples });
    }
    evaluate_at(control_points, &uniform_parameters(num_samples))
}

/// Evaluate the curve at explicit parameters.
pub fn evaluate_at(control_points: &[ControlPoint], params: &[f64]) -> Result<Vec<SamplePoint>, FitError> {
    if control_points.is_empty() {
        return Err(FitError::NoControlPoints);
    }
    Ok(params.iter().map(|&t| point_at(control_points, t)).collect())
}
