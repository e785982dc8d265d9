//! Terminal rendering.

pub mod ascii;

pub use ascii::*;
