//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::domain::{BezierFit, ControlPoint, FitConfig, Profile, SampleResidual};
use crate::fit::selection::DegreeSweep;

/// Format the run summary (profile stats + fit diagnostics + control points).
pub fn format_fit_summary(profile: &Profile, fit: &BezierFit, config: &FitConfig) -> String {
    let mut out = String::new();

    out.push_str("=== bzfit - Bezier profile fit ===\n");
    out.push_str(&format!("Profile: {}\n", profile.display_name()));
    match profile.bounds() {
        Some((x0, x1, y0, y1)) => out.push_str(&format!(
            "Points: n={} | x=[{x0:.4}, {x1:.4}] | y=[{y0:.4}, {y1:.4}]\n",
            profile.len()
        )),
        None => out.push_str(&format!("Points: n={}\n", profile.len())),
    }
    out.push_str(&format!(
        "Degree: {} ({} control points) | parameters: {}\n",
        fit.degree,
        fit.control_points.len(),
        fit.parametrization.display_name()
    ));

    let d = &fit.diagnostics;
    out.push_str("\nDiagnostics:\n");
    out.push_str(&format!(
        "- rank: {}/{}{}\n",
        d.rank,
        d.required_rank,
        if d.is_singular() { " (SINGULAR: control points not unique)" } else { "" }
    ));
    out.push_str(&format!("- condition: {}\n", fmt_condition(d.condition_number)));
    out.push_str(&format!(
        "- SSE={:.3e} RMSE={:.3e} max={:.3e}\n",
        d.sse, d.rmse, d.max_error
    ));

    out.push_str("\nControl points:\n");
    out.push_str(&format_control_points(&fit.control_points));

    if config.export_curve.is_some() || config.export_dat.is_some() {
        out.push('\n');
    }
    if let Some(path) = &config.export_curve {
        out.push_str(&format!("Curve JSON: {}\n", path.display()));
    }
    if let Some(path) = &config.export_dat {
        out.push_str(&format!(
            "Coordinates: {} ({} points)\n",
            path.display(),
            config.curve_samples
        ));
    }

    out
}

/// Format a control-point table.
pub fn format_control_points(points: &[ControlPoint]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>4} {:>12} {:>12}\n", "k", "x", "y"));
    out.push_str(&format!("{:->4} {:->12} {:->12}\n", "", "", ""));
    for (k, p) in points.iter().enumerate() {
        out.push_str(&format!("{k:>4} {:>12.6} {:>12.6}\n", p.x, p.y));
    }
    out
}

/// Format the worst-fitted samples.
pub fn format_worst(rows: &[SampleResidual]) -> String {
    let mut out = String::new();
    out.push_str("Worst-fitted samples:\n");
    out.push_str(&format!(
        "{:>6} {:>8} {:>10} {:>10} {:>10} {:>10} {:>10}\n",
        "i", "t", "x", "y", "x_fit", "y_fit", "error"
    ));
    out.push_str(&format!(
        "{:->6} {:->8} {:->10} {:->10} {:->10} {:->10} {:->10}\n",
        "", "", "", "", "", "", ""
    ));
    for r in rows {
        out.push_str(&format!(
            "{:>6} {:>8.4} {:>10.6} {:>10.6} {:>10.6} {:>10.6} {:>10.3e}\n",
            r.index, r.t, r.sample.x, r.sample.y, r.fitted.x, r.fitted.y, r.error
        ));
    }
    out
}

/// Format a degree sweep table, marking the selected degree.
pub fn format_sweep(profile: &Profile, sweep: &DegreeSweep) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "=== bzfit - degree sweep ({}, n={}) ===\n",
        profile.display_name(),
        profile.len()
    ));
    out.push_str(&format!(
        "  {:>6} {:>10} {:>10} {:>10} {:>6} {:>12}\n",
        "degree", "SSE", "RMSE", "max", "rank", "BIC"
    ));
    for f in &sweep.fits {
        let chosen = if f.fit.degree == sweep.best.fit.degree { "*" } else { " " };
        let d = &f.fit.diagnostics;
        out.push_str(&format!(
            "{chosen} {:>6} {:>10.3e} {:>10.3e} {:>10.3e} {:>6} {:>12.3}\n",
            f.fit.degree,
            d.sse,
            d.rmse,
            d.max_error,
            format!("{}/{}", d.rank, d.required_rank),
            f.bic
        ));
    }
    for (degree, reason) in &sweep.skipped {
        out.push_str(&format!("  (skipped degree {degree}) {reason}\n"));
    }
    out.push_str(&format!("\nSelected degree: {}\n", sweep.best.fit.degree));
    out.push_str(&format_control_points(&sweep.best.fit.control_points));
    out
}

fn fmt_condition(c: Option<f64>) -> String {
    match c {
        Some(v) => format!("{v:.3e}"),
        None => "inf".to_string(),
    }
}
