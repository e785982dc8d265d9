//! Reporting utilities: residuals, worst-fitted samples, and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::{BezierFit, Profile, SampleResidual};
use crate::error::AppError;
use crate::models::point_at;

/// Compute the fitted point and distance for each sample.
pub fn compute_residuals(profile: &Profile, fit: &BezierFit) -> Result<Vec<SampleResidual>, AppError> {
    if fit.parameters.len() != profile.len() {
        return Err(AppError::new(
            4,
            format!(
                "Fit has {} parameters but the profile has {} points.",
                fit.parameters.len(),
                profile.len()
            ),
        ));
    }

    let mut out = Vec::with_capacity(profile.len());
    for (index, (sample, &t)) in profile.points().into_iter().zip(&fit.parameters).enumerate() {
        let fitted = point_at(&fit.control_points, t);
        if !fitted.is_finite() {
            return Err(AppError::new(4, "Non-finite curve point during residual computation."));
        }
        out.push(SampleResidual {
            index,
            t,
            sample,
            fitted,
            error: sample.distance(&fitted),
        });
    }
    Ok(out)
}

/// The `top_n` samples farthest from the curve, largest first.
///
/// Ties keep profile order.
pub fn worst_residuals(residuals: &[SampleResidual], top_n: usize) -> Vec<SampleResidual> {
    let mut sorted = residuals.to_vec();
    sorted.sort_by(|a, b| b.error.partial_cmp(&a.error).unwrap_or(std::cmp::Ordering::Equal));
    sorted.truncate(top_n);
    sorted
}
