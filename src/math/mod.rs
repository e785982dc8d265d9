//! Mathematical utilities: Bernstein basis functions and pseudo-inverse least squares.

pub mod basis;
pub mod ols;

pub use basis::*;
pub use ols::*;
