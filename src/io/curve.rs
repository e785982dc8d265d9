//! Read/write curve JSON files.
//!
//! Curve JSON is the "portable" representation of a fitted curve:
//! - degree, parametrization and control points
//! - fit diagnostics (rank, conditioning, errors)
//! - a precomputed curve grid for quick plotting
//!
//! The schema is defined by `domain::CurveFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::domain::{BezierFit, CurveFile, Profile};
use crate::error::AppError;
use crate::fit::evaluate;

/// Build the curve file for a fit, evaluating `grid_samples` curve points.
pub fn curve_file(fit: &BezierFit, profile: &Profile, grid_samples: usize) -> Result<CurveFile, AppError> {
    let grid = evaluate(&fit.control_points, grid_samples)?;
    Ok(CurveFile {
        tool: "bzfit".to_string(),
        generated_at: Utc::now(),
        profile: profile.name().map(str::to_string),
        degree: fit.degree,
        parametrization: fit.parametrization,
        control_points: fit.control_points.clone(),
        diagnostics: fit.diagnostics.clone(),
        grid,
    })
}

/// Write a curve JSON file.
pub fn write_curve_json(path: &Path, curve: &CurveFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create curve JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, curve)
        .map_err(|e| AppError::new(2, format!("Failed to write curve JSON: {e}")))?;

    Ok(())
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open curve JSON '{}': {e}", path.display())))?;
    let curve: CurveFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid curve JSON: {e}")))?;

    let implied_degree = curve.control_points.len().checked_sub(1);
    if implied_degree != Some(curve.degree) {
        return Err(AppError::new(
            2,
            format!(
                "Invalid curve JSON: degree {} does not match {} control points.",
                curve.degree,
                curve.control_points.len()
            ),
        ));
    }
    Ok(curve)
}
