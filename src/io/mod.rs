//! Input/output helpers.
//!
//! - profile ingest (Selig `.dat` / CSV) (`profile`)
//! - Selig coordinate export of evaluated curves (`export`)
//! - curve JSON read/write (`curve`)

pub mod curve;
pub mod export;
pub mod profile;

pub use curve::*;
pub use export::*;
pub use profile::*;
