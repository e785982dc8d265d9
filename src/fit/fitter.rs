//! Least-squares Bézier fitting for a single degree.
//!
//! Given:
//! - ordered samples `P_i`
//! - a degree `d`
//! - a parameter `t_i` per sample (uniform unless configured otherwise)
//!
//! we solve `M · Q ≈ P` for the `(d + 1) × 2` control-point matrix `Q`, where
//! `M` is the Bernstein design matrix, via `Q = pinv(M) · P`. Rows 0 and `d` of
//! `Q` are then overwritten with the first and last samples, so the curve
//! always passes through both ends of the profile.
//!
//! Everything here is a pure function of its arguments: no caching, no global
//! state, bit-identical output for identical input.

use nalgebra::DMatrix;

use crate::domain::{
    BezierFit, ControlPoint, FitDiagnostics, Parametrization, Point, Profile, SamplePoint, SingularPolicy,
};
use crate::error::FitError;
use crate::fit::parameters::assign_parameters;
use crate::math::solve_least_squares;
use crate::models::{design_matrix, point_at};

/// Options that affect how a fit is calibrated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FitOptions {
    pub parametrization: Parametrization,
    pub singular: SingularPolicy,
}

impl FitOptions {
    /// Same options, but rank-deficient fits become errors.
    pub fn strict(self) -> Self {
        Self {
            singular: SingularPolicy::Reject,
            ..self
        }
    }
}

/// Fit a degree-`degree` Bézier curve to `samples` with default options.
pub fn fit(samples: &[SamplePoint], degree: usize) -> Result<BezierFit, FitError> {
    fit_with(samples, degree, &FitOptions::default())
}

/// Fit a degree-`degree` Bézier curve to `samples`.
pub fn fit_with(samples: &[SamplePoint], degree: usize, opts: &FitOptions) -> Result<BezierFit, FitError> {
    validate_degree(degree)?;
    validate_sample_count(samples.len(), degree)?;
    fit_points(samples, degree, opts)
}

/// Fit from separate X and Y sequences.
pub fn fit_xy(xs: &[f64], ys: &[f64], degree: usize, opts: &FitOptions) -> Result<BezierFit, FitError> {
    validate_degree(degree)?;
    if xs.len() != ys.len() {
        return Err(FitError::MismatchedLength {
            x_len: xs.len(),
            y_len: ys.len(),
        });
    }
    validate_sample_count(xs.len(), degree)?;

    let samples: Vec<SamplePoint> = xs.iter().zip(ys).map(|(&x, &y)| Point::new(x, y)).collect();
    fit_points(&samples, degree, opts)
}

/// Fit a loaded profile.
pub fn fit_profile(profile: &Profile, degree: usize, opts: &FitOptions) -> Result<BezierFit, FitError> {
    fit_xy(profile.xs(), profile.ys(), degree, opts)
}

fn validate_degree(degree: usize) -> Result<(), FitError> {
    if degree < 1 {
        return Err(FitError::InvalidDegree { degree });
    }
    Ok(())
}

fn validate_sample_count(n: usize, degree: usize) -> Result<(), FitError> {
    if n <= degree {
        return Err(FitError::InsufficientSamples { degree, actual: n });
    }
    Ok(())
}

/// Core solve; callers have already validated degree and sample count.
fn fit_points(samples: &[SamplePoint], degree: usize, opts: &FitOptions) -> Result<BezierFit, FitError> {
    if let Some(index) = samples.iter().position(|p| !p.is_finite()) {
        return Err(FitError::NonFiniteSample { index });
    }

    let n = samples.len();
    // n > degree, so this cannot overflow.
    let required = degree + 1;

    let params = assign_parameters(samples, opts.parametrization);
    let m = design_matrix(&params, degree);

    let mut p = DMatrix::<f64>::zeros(n, 2);
    for (i, s) in samples.iter().enumerate() {
        p[(i, 0)] = s.x;
        p[(i, 1)] = s.y;
    }

    let ls = solve_least_squares(&m, &p)?;

    if ls.rank < required {
        match opts.singular {
            SingularPolicy::Reject => {
                return Err(FitError::SingularFit {
                    rank: ls.rank,
                    required,
                });
            }
            SingularPolicy::Warn => {
                tracing::warn!(
                    degree,
                    rank = ls.rank,
                    required,
                    n,
                    "design matrix is rank deficient; returning minimum-norm control points"
                );
            }
        }
    }

    let mut control_points: Vec<ControlPoint> = (0..required)
        .map(|k| Point::new(ls.solution[(k, 0)], ls.solution[(k, 1)]))
        .collect();

    // Pin the ends: B(0) = Q_0 and B(1) = Q_d, so this makes the curve
    // interpolate the first and last samples exactly.
    control_points[0] = samples[0];
    control_points[degree] = samples[n - 1];

    let diagnostics = diagnose(samples, &params, &control_points, ls.rank, ls.condition_number());

    tracing::debug!(
        degree,
        n,
        rank = diagnostics.rank,
        rmse = diagnostics.rmse,
        parametrization = opts.parametrization.display_name(),
        "fitted bezier curve"
    );

    Ok(BezierFit {
        degree,
        parametrization: opts.parametrization,
        control_points,
        parameters: params,
        diagnostics,
    })
}

fn diagnose(
    samples: &[SamplePoint],
    params: &[f64],
    control_points: &[ControlPoint],
    rank: usize,
    condition_number: Option<f64>,
) -> FitDiagnostics {
    let mut sse = 0.0;
    let mut max_error = 0.0_f64;
    for (s, &t) in samples.iter().zip(params) {
        let e = point_at(control_points, t).distance(s);
        sse += e * e;
        max_error = max_error.max(e);
    }
    let n = samples.len().max(1) as f64;

    FitDiagnostics {
        rank,
        required_rank: control_points.len(),
        condition_number,
        sse,
        rmse: (sse / n).sqrt(),
        max_error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::evaluate::evaluate;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().map(|&p| p.into()).collect()
    }

    #[test]
    fn cubic_through_four_points_matches_closed_form() {
        // x is linear in t, so its control points are 0,1,2,3.
        // y: (4/9) q1 + (2/9) q2 = 2 and (2/9) q1 + (4/9) q2 = 2 gives q1 = q2 = 3.
        let samples = pts(&[(0.0, 0.0), (1.0, 2.0), (2.0, 2.0), (3.0, 0.0)]);
        let fit = fit(&samples, 3).unwrap();

        assert_eq!(fit.control_points.len(), 4);
        assert_eq!(fit.control_points[0], Point::new(0.0, 0.0));
        assert_eq!(fit.control_points[3], Point::new(3.0, 0.0));
        let expected = [(1.0, 3.0), (2.0, 3.0)];
        for (cp, (ex, ey)) in fit.control_points[1..3].iter().zip(expected) {
            assert!((cp.x - ex).abs() < 1e-9, "{cp:?}");
            assert!((cp.y - ey).abs() < 1e-9, "{cp:?}");
        }
        assert!(!fit.diagnostics.is_singular());
        assert!(fit.diagnostics.rmse < 1e-9);
    }

    #[test]
    fn degree_zero_is_rejected() {
        let samples = pts(&[(0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(fit(&samples, 0).unwrap_err(), FitError::InvalidDegree { degree: 0 });
    }

    #[test]
    fn too_few_samples_reports_degree_and_actual() {
        let samples = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        assert_eq!(
            fit(&samples, 3).unwrap_err(),
            FitError::InsufficientSamples { degree: 3, actual: 3 }
        );
    }

    #[test]
    fn largest_degree_is_too_few_samples_not_overflow() {
        let samples = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        assert_eq!(
            fit(&samples, usize::MAX).unwrap_err(),
            FitError::InsufficientSamples { degree: usize::MAX, actual: 3 }
        );
        let err = fit_xy(&[0.0, 1.0], &[0.0, 1.0], usize::MAX, &FitOptions::default()).unwrap_err();
        assert_eq!(err, FitError::InsufficientSamples { degree: usize::MAX, actual: 2 });
    }

    #[test]
    fn mismatched_xy_is_rejected_before_counting() {
        let err = fit_xy(&[0.0, 1.0, 2.0], &[0.0, 1.0], 1, &FitOptions::default()).unwrap_err();
        assert_eq!(err, FitError::MismatchedLength { x_len: 3, y_len: 2 });
    }

    #[test]
    fn validation_order_puts_degree_first() {
        let err = fit_xy(&[0.0], &[], 0, &FitOptions::default()).unwrap_err();
        assert_eq!(err, FitError::InvalidDegree { degree: 0 });
    }

    #[test]
    fn non_finite_samples_are_rejected() {
        let samples = pts(&[(0.0, 0.0), (f64::NAN, 1.0), (2.0, 0.0)]);
        assert_eq!(fit(&samples, 1).unwrap_err(), FitError::NonFiniteSample { index: 1 });
    }

    #[test]
    fn endpoints_are_pinned_exactly_for_noisy_data() {
        let samples: Vec<Point> = (0..40)
            .map(|i| {
                let x = i as f64 / 39.0;
                Point::new(x, (7.0 * x).sin() * 0.1 + 0.013 * (i % 3) as f64)
            })
            .collect();
        for degree in 1..=8 {
            let fit = fit(&samples, degree).unwrap();
            assert_eq!(fit.control_points.len(), degree + 1);
            assert_eq!(fit.control_points[0], samples[0]);
            assert_eq!(fit.control_points[degree], samples[39]);
        }
    }

    #[test]
    fn linear_fit_is_the_chord() {
        let samples = pts(&[(0.0, 0.0), (0.5, 0.3), (1.0, 0.0)]);
        let fit = fit(&samples, 1).unwrap();
        assert_eq!(fit.control_points, pts(&[(0.0, 0.0), (1.0, 0.0)]));
        assert!((fit.diagnostics.max_error - 0.3).abs() < 1e-12);
    }

    #[test]
    fn recovers_true_control_points() {
        let truth = pts(&[(1.0, 0.0), (0.6, 0.15), (0.0, 0.1), (0.1, -0.12), (1.0, -0.01)]);
        let samples = evaluate(&truth, 60).unwrap();
        let fit = fit(&samples, 4).unwrap();
        for (a, b) in fit.control_points.iter().zip(&truth) {
            assert!((a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9, "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn repeated_fits_are_bit_identical() {
        let samples: Vec<Point> = (0..25).map(|i| Point::new(i as f64, ((i * i) % 7) as f64)).collect();
        let a = fit(&samples, 5).unwrap();
        let b = fit(&samples, 5).unwrap();
        let bits = |f: &BezierFit| -> Vec<u64> {
            f.control_points
                .iter()
                .flat_map(|p| [p.x.to_bits(), p.y.to_bits()])
                .chain(f.parameters.iter().map(|t| t.to_bits()))
                .chain([f.diagnostics.sse.to_bits(), f.diagnostics.max_error.to_bits()])
                .collect()
        };
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn duplicated_chord_parameters_are_flagged_singular() {
        // Chord-length parameters collapse to 2 distinct values; a cubic needs 4.
        let samples = pts(&[(0.0, 0.0), (0.0, 0.0), (1.0, 1.0), (1.0, 1.0), (1.0, 1.0)]);
        let opts = FitOptions {
            parametrization: Parametrization::ChordLength,
            ..FitOptions::default()
        };

        let fit = fit_with(&samples, 3, &opts).unwrap();
        assert!(fit.diagnostics.is_singular());
        assert_eq!(fit.diagnostics.rank, 2);
        assert_eq!(fit.control_points[0], samples[0]);
        assert_eq!(fit.control_points[3], samples[4]);

        let err = fit_with(&samples, 3, &opts.strict()).unwrap_err();
        assert_eq!(err, FitError::SingularFit { rank: 2, required: 4 });
    }

    #[test]
    fn uniform_parameters_stay_full_rank_with_duplicate_points() {
        let samples = pts(&[(0.0, 0.0), (0.0, 0.0), (1.0, 1.0), (1.0, 1.0), (2.0, 0.0)]);
        let fit = fit_with(&samples, 3, &FitOptions::default().strict()).unwrap();
        assert_eq!(fit.diagnostics.rank, 4);
    }
}
