//! Synthetic profiles sampled from random Bézier curves.
//!
//! Useful for checking the fitter end to end: the generating control points
//! are known, so a noise-free fit at the same degree must recover them.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{ControlPoint, Point, Profile, SyntheticSpec};
use crate::error::AppError;
use crate::fit::evaluate;

/// Vertical extent of generated control points.
const Y_SPAN: f64 = 0.2;

#[derive(Debug, Clone)]
pub struct SyntheticProfile {
    pub profile: Profile,
    /// Control points the samples were drawn from.
    pub control_points: Vec<ControlPoint>,
}

/// Generate a profile from a seeded random curve of `spec.degree`.
///
/// Control-point x values are sorted over `[0, 1]` and pinned to 0 and 1 at the
/// ends; y values are uniform in `[-Y_SPAN, Y_SPAN]`. Noise is only added to
/// interior samples so the endpoints stay on the generating curve.
pub fn random_bezier_profile(spec: &SyntheticSpec) -> Result<SyntheticProfile, AppError> {
    if spec.degree == 0 {
        return Err(AppError::new(2, "Synthetic degree must be >= 1."));
    }
    if spec.sample_count == 0 {
        return Err(AppError::new(2, "Synthetic sample count must be > 0."));
    }
    if !(spec.noise.is_finite() && spec.noise >= 0.0) {
        return Err(AppError::new(2, format!("Invalid noise level: {}.", spec.noise)));
    }

    let mut rng = StdRng::seed_from_u64(spec.seed);
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let control_points = random_control_points(spec.degree, &mut rng);
    let mut samples = evaluate(&control_points, spec.sample_count)?;

    if spec.noise > 0.0 && samples.len() > 2 {
        let last = samples.len() - 1;
        for p in &mut samples[1..last] {
            p.x += spec.noise * normal.sample(&mut rng);
            p.y += spec.noise * normal.sample(&mut rng);
        }
    }

    let name = format!(
        "synthetic degree {} (seed {}, noise {})",
        spec.degree, spec.seed, spec.noise
    );
    Ok(SyntheticProfile {
        profile: Profile::from_points(Some(name), &samples),
        control_points,
    })
}

fn random_control_points(degree: usize, rng: &mut StdRng) -> Vec<ControlPoint> {
    let mut xs: Vec<f64> = (0..=degree).map(|_| rng.gen_range(0.0..=1.0)).collect();
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    xs[0] = 0.0;
    xs[degree] = 1.0;

    xs.into_iter()
        .map(|x| Point::new(x, rng.gen_range(-Y_SPAN..=Y_SPAN)))
        .collect()
}
