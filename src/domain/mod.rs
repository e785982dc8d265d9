//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - points and profiles (`Point`, `Profile`)
//! - fit configuration enums (`Parametrization`, `SingularPolicy`)
//! - fit outputs (`BezierFit`, `FitDiagnostics`, `CurveFile`, etc.)

pub mod types;

pub use types::*;
