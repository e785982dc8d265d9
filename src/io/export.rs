//! Export evaluated curves as Selig-style coordinate files.
//!
//! The output is a name line followed by one `x y` row per point, which is the
//! layout aerodynamic solvers such as XFOIL load directly.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::SamplePoint;
use crate::error::AppError;

/// Write `points` to `path` in Selig layout.
pub fn write_selig_dat(path: &Path, name: &str, points: &[SamplePoint]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create coordinate file '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);

    write_selig(&mut out, name, points)
        .map_err(|e| AppError::new(2, format!("Failed to write coordinate file '{}': {e}", path.display())))?;
    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to write coordinate file '{}': {e}", path.display())))?;
    Ok(())
}

/// Write Selig rows to any writer.
pub fn write_selig<W: Write>(out: &mut W, name: &str, points: &[SamplePoint]) -> std::io::Result<()> {
    // A blank name would make the first row look like the header.
    let name = name.lines().next().map(str::trim).filter(|s| !s.is_empty()).unwrap_or("bezier");
    writeln!(out, "{name}")?;
    for p in points {
        writeln!(out, "{:>10.6} {:>10.6}", p.x, p.y)?;
    }
    Ok(())
}
