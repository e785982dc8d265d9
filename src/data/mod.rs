//! Built-in profile sources: NACA 4-digit outlines and seeded synthetic curves.

pub mod naca;
pub mod synthetic;

pub use naca::*;
pub use synthetic::*;
