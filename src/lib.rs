//! `bezier-airfoil` library crate.
//!
//! The binary (`bzfit`) is a thin wrapper around this library so that:
//!
//! - the fitter is usable without the CLI (`fit::fit`, `fit::evaluate`)
//! - core logic is testable without spawning processes
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;

pub use error::{AppError, FitError};
pub use fit::{FitOptions, evaluate, fit};
