//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON / `.dat`
//! - reloaded later for plotting or re-evaluation

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::FitError;

/// A 2D point. Used for both input samples and fitted control points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// A point sampled from an airfoil surface (or from a curve).
pub type SamplePoint = Point;

/// A Bézier control point.
pub type ControlPoint = Point;

/// An ordered airfoil outline.
///
/// A profile is built once by the caller and never mutated; substituting a
/// different outline means building a new value (see [`Profile::with_coordinates`]).
/// The order of the coordinates is the order along the surface, not a sort
/// order, and is preserved as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    name: Option<String>,
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Profile {
    /// Build a profile from separate X and Y sequences.
    pub fn new(name: Option<String>, xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, FitError> {
        if xs.len() != ys.len() {
            return Err(FitError::MismatchedLength {
                x_len: xs.len(),
                y_len: ys.len(),
            });
        }
        Ok(Self { name, xs, ys })
    }

    /// Build a profile from ordered points.
    pub fn from_points(name: Option<String>, points: &[SamplePoint]) -> Self {
        Self {
            name,
            xs: points.iter().map(|p| p.x).collect(),
            ys: points.iter().map(|p| p.y).collect(),
        }
    }

    /// A new profile with the same name and different coordinates.
    pub fn with_coordinates(&self, xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, FitError> {
        Self::new(self.name.clone(), xs, ys)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Display name, falling back to a placeholder for unnamed profiles.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed profile")
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn point(&self, index: usize) -> Option<SamplePoint> {
        Some(Point::new(*self.xs.get(index)?, *self.ys.get(index)?))
    }

    pub fn points(&self) -> Vec<SamplePoint> {
        self.xs
            .iter()
            .zip(self.ys.iter())
            .map(|(&x, &y)| Point::new(x, y))
            .collect()
    }

    /// Coordinate bounds `(x_min, x_max, y_min, y_max)`, or `None` when empty.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        bounds_of(&self.points())
    }
}

/// Coordinate bounds of a point set, ignoring non-finite points.
pub fn bounds_of(points: &[Point]) -> Option<(f64, f64, f64, f64)> {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for p in points.iter().filter(|p| p.is_finite()) {
        x_min = x_min.min(p.x);
        x_max = x_max.max(p.x);
        y_min = y_min.min(p.y);
        y_max = y_max.max(p.y);
    }
    if x_min.is_finite() && y_min.is_finite() {
        Some((x_min, x_max, y_min, y_max))
    } else {
        None
    }
}

/// How curve parameters are assigned to samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Parametrization {
    /// `t_i = i / (n - 1)`.
    #[default]
    Uniform,
    /// Cumulative polyline length, normalized to `[0, 1]`.
    #[value(name = "chord")]
    #[serde(rename = "chord")]
    ChordLength,
}

impl Parametrization {
    pub fn display_name(&self) -> &'static str {
        match self {
            Parametrization::Uniform => "uniform",
            Parametrization::ChordLength => "chord-length",
        }
    }
}

/// What to do when the design matrix is rank deficient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SingularPolicy {
    /// Return the minimum-norm solution, flag it in the diagnostics and log a warning.
    #[default]
    Warn,
    /// Fail with `FitError::SingularFit`.
    Reject,
}

/// Quality and conditioning of a single fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitDiagnostics {
    /// Effective rank of the design matrix.
    pub rank: usize,
    /// Number of control points (`degree + 1`).
    pub required_rank: usize,
    /// `σ_max / σ_min` of the design matrix; `None` when `σ_min` is zero.
    pub condition_number: Option<f64>,
    /// Sum of squared distances between samples and the pinned curve.
    pub sse: f64,
    pub rmse: f64,
    pub max_error: f64,
}

impl FitDiagnostics {
    pub fn is_singular(&self) -> bool {
        self.rank < self.required_rank
    }
}

/// Output of one fit call.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierFit {
    pub degree: usize,
    pub parametrization: Parametrization,
    pub control_points: Vec<ControlPoint>,
    /// Curve parameter assigned to each sample.
    pub parameters: Vec<f64>,
    pub diagnostics: FitDiagnostics,
}

/// Distance from one sample to the fitted curve at its parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleResidual {
    pub index: usize,
    pub t: f64,
    pub sample: SamplePoint,
    pub fitted: SamplePoint,
    pub error: f64,
}

/// Where the profile for a run comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileSource {
    File(PathBuf),
    Naca(String),
    Synthetic(SyntheticSpec),
}

/// Settings for a random synthetic Bézier profile.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticSpec {
    pub degree: usize,
    pub sample_count: usize,
    /// Standard deviation of the Gaussian noise added to interior samples.
    pub noise: f64,
    pub seed: u64,
}

/// Fully resolved configuration for `bzfit fit` / `bzfit sweep`.
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub source: ProfileSource,
    pub degree: usize,
    pub min_degree: usize,
    pub max_degree: usize,
    pub parametrization: Parametrization,
    pub singular: SingularPolicy,
    pub naca_points: usize,

    pub curve_samples: usize,
    pub top_n: usize,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_curve: Option<PathBuf>,
    pub export_dat: Option<PathBuf>,
}

/// Portable curve file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub profile: Option<String>,
    pub degree: usize,
    pub parametrization: Parametrization,
    pub control_points: Vec<ControlPoint>,
    pub diagnostics: FitDiagnostics,
    /// Curve evaluated on a uniform parameter grid, for quick plotting.
    pub grid: Vec<SamplePoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_rejects_mismatched_lengths() {
        let err = Profile::new(None, vec![0.0, 1.0], vec![0.0]).unwrap_err();
        assert_eq!(err, FitError::MismatchedLength { x_len: 2, y_len: 1 });
    }

    #[test]
    fn profile_preserves_order() {
        let pts = [Point::new(1.0, 0.0), Point::new(0.0, 0.1), Point::new(1.0, -0.1)];
        let profile = Profile::from_points(Some("loop".into()), &pts);
        assert_eq!(profile.points(), pts.to_vec());
        assert_eq!(profile.xs(), &[1.0, 0.0, 1.0]);
    }

    #[test]
    fn with_coordinates_builds_a_new_value() {
        let profile = Profile::new(Some("a".into()), vec![0.0, 1.0], vec![0.0, 0.0]).unwrap();
        let replaced = profile.with_coordinates(vec![0.0, 0.5, 1.0], vec![0.0, 1.0, 0.0]).unwrap();
        assert_eq!(profile.len(), 2);
        assert_eq!(replaced.len(), 3);
        assert_eq!(replaced.name(), Some("a"));
    }

    #[test]
    fn parametrization_serializes_lowercase() {
        let json = serde_json::to_string(&Parametrization::ChordLength).unwrap();
        assert_eq!(json, "\"chord\"");
    }
}
