//! Curve fitting.
//!
//! Responsibilities:
//!
//! - assign curve parameters to samples (uniform / chord length)
//! - solve the pinned-end least-squares fit for one degree
//! - evaluate fitted curves
//! - sweep a degree range (parallel) and select one using BIC

pub mod evaluate;
pub mod fitter;
pub mod parameters;
pub mod selection;

pub use evaluate::*;
pub use fitter::*;
pub use parameters::*;
pub use selection::*;
