//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements, in drawing order (later ones overwrite earlier ones):
//! - fitted curve: `-`
//! - samples: `o`
//! - control points: `x`

use crate::domain::{ControlPoint, CurveFile, Point, SamplePoint, bounds_of};

/// Render samples, control polygon and curve in one plot.
pub fn render_fit_plot(
    samples: &[SamplePoint],
    control_points: &[ControlPoint],
    curve: &[SamplePoint],
    width: usize,
    height: usize,
) -> String {
    render_plot(samples, control_points, curve, width, height)
}

/// Render a plot from a saved curve JSON file (curve + control points, no samples).
pub fn render_curve_file(curve: &CurveFile, width: usize, height: usize) -> String {
    render_plot(&[], &curve.control_points, &curve.grid, width, height)
}

fn render_plot(
    samples: &[SamplePoint],
    control_points: &[ControlPoint],
    curve: &[SamplePoint],
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let all: Vec<Point> = samples
        .iter()
        .chain(control_points)
        .chain(curve)
        .copied()
        .collect();
    let (x_min, x_max, y_min, y_max) = bounds_of(&all).unwrap_or((0.0, 1.0, 0.0, 1.0));
    let (x_min, x_max) = pad_range(x_min, x_max, 0.0);
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw curve first (so points can overlay).
    draw_polyline(&mut grid, curve, (x_min, x_max), (y_min, y_max));

    for (points, ch) in [(samples, 'o'), (control_points, 'x')] {
        for p in points.iter().filter(|p| p.is_finite()) {
            let col = map_x(p.x, x_min, x_max, width);
            let row = map_y(p.y, y_min, y_max, height);
            grid[row][col] = ch;
        }
    }

    // Build final string. We include a small header with ranges.
    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.3}, {y_max:.3}]\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

/// Pad a range by `frac` of its span; degenerate ranges get a fixed half-width.
fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    if span < 1e-12 {
        return (min - 0.5, max + 0.5);
    }
    let pad = span * frac;
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_polyline(grid: &mut [Vec<char>], curve: &[SamplePoint], xr: (f64, f64), yr: (f64, f64)) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for p in curve.iter().filter(|p| p.is_finite()) {
        let col = map_x(p.x, xr.0, xr.1, width);
        let row = map_y(p.y, yr.0, yr.1, height);
        if let Some((c0, r0)) = prev {
            draw_line(grid, c0, r0, col, row, '-');
        } else {
            grid[row][col] = '-';
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_golden_snapshot_small() {
        let samples = [Point::new(0.0, 0.0), Point::new(9.0, 0.0)];
        let control_points = [Point::new(0.0, 0.0), Point::new(4.5, 1.0), Point::new(9.0, 0.0)];
        let curve = [Point::new(0.0, 0.0), Point::new(9.0, 0.0)];

        let txt = render_fit_plot(&samples, &control_points, &curve, 10, 5);
        let expected = concat!(
            "Plot: x=[0.000, 9.000] | y=[-0.050, 1.050]\n",
            "     x    \n",
            "          \n",
            "          \n",
            "          \n",
            "x--------x\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn empty_plot_has_fixed_size() {
        let txt = render_fit_plot(&[], &[], &[], 12, 6);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[1..].iter().all(|l| l.chars().count() == 12));
    }
}
