//! Bézier model implementation.
//!
//! Kept as small, pure functions so that fitting, evaluation and reporting
//! code can share one definition of the curve.

pub mod bezier;

pub use bezier::*;
