//! Curve parameter assignment.
//!
//! Each sample gets a parameter `t_i ∈ [0, 1]`. The fit treats these as fixed,
//! which is what makes the control points a linear least-squares problem.
//!
//! - uniform: `t_i = i / (n - 1)`
//! - chord length: cumulative polyline length over total length
//!
//! Both assign exactly `0.0` to the first sample and exactly `1.0` to the last.

use crate::domain::{Parametrization, Point};

/// Assign parameters to `points` with the given scheme.
pub fn assign_parameters(points: &[Point], scheme: Parametrization) -> Vec<f64> {
    match scheme {
        Parametrization::Uniform => uniform_parameters(points.len()),
        Parametrization::ChordLength => chord_length_parameters(points),
    }
}

/// `n` uniformly spaced parameters over `[0, 1]`. A single sample gets `t = 0`.
pub fn uniform_parameters(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let last = (n - 1) as f64;
            (0..n).map(|i| i as f64 / last).collect()
        }
    }
}

/// Chord-length parameters.
///
/// Repeated points get repeated parameters. When the whole polyline has zero
/// length there is nothing to normalize by, so uniform spacing is used.
pub fn chord_length_parameters(points: &[Point]) -> Vec<f64> {
    if points.len() < 2 {
        return uniform_parameters(points.len());
    }

    let mut cumulative = Vec::with_capacity(points.len());
    let mut total = 0.0;
    cumulative.push(0.0);
    for pair in points.windows(2) {
        total += pair[0].distance(&pair[1]);
        cumulative.push(total);
    }

    if !(total.is_finite() && total > 0.0) {
        tracing::debug!(n = points.len(), "zero-length polyline; using uniform parameters");
        return uniform_parameters(points.len());
    }

    cumulative.iter().map(|&s| s / total).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_spacing() {
        assert_eq!(uniform_parameters(0), Vec::<f64>::new());
        assert_eq!(uniform_parameters(1), vec![0.0]);
        assert_eq!(uniform_parameters(5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn chord_length_follows_distances() {
        let pts = [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(4.0, 0.0)];
        assert_eq!(chord_length_parameters(&pts), vec![0.0, 0.25, 1.0]);
    }

    #[test]
    fn chord_length_duplicates_share_a_parameter() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
        ];
        let t = chord_length_parameters(&pts);
        assert_eq!(t[1], t[2]);
        assert_eq!(t[0], 0.0);
        assert_eq!(t[3], 1.0);
    }

    #[test]
    fn zero_length_polyline_falls_back_to_uniform() {
        let pts = [Point::new(0.5, 0.5); 3];
        assert_eq!(chord_length_parameters(&pts), vec![0.0, 0.5, 1.0]);
    }
}
