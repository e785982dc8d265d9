//! Degree selection using BIC with a simplicity preference.
//!
//! The sweep fits every degree in a range and computes:
//! - SSE / RMSE of the pinned curve against the samples
//! - BIC = n * ln(SSE/n) + k * ln(n), with `k = 2 (d - 1)` free coordinates
//!   (the two end control points are pinned, not estimated)
//!
//! Selection rules:
//! 1. Skip degrees the profile cannot determine (`n < d + 1`), and singular
//!    fits when those are configured as errors
//! 2. Choose the degree with minimum BIC
//! 3. Prefer the lowest degree whose BIC is within 2 of the minimum

use std::ops::RangeInclusive;

use rayon::prelude::*;

use crate::domain::{BezierFit, Profile};
use crate::error::FitError;
use crate::fit::fitter::{FitOptions, fit_profile};

/// BIC margin within which a lower degree is preferred.
const BIC_MARGIN: f64 = 2.0;

/// One fitted degree with its score.
#[derive(Debug, Clone, PartialEq)]
pub struct DegreeFit {
    pub fit: BezierFit,
    pub bic: f64,
}

/// Output of a degree sweep.
#[derive(Debug, Clone)]
pub struct DegreeSweep {
    pub best: DegreeFit,
    /// Every successful fit, in increasing degree order.
    pub fits: Vec<DegreeFit>,
    /// Degrees that were skipped and why (for diagnostics).
    pub skipped: Vec<(usize, String)>,
}

/// Fit every degree in `degrees` (in parallel) and select one.
pub fn sweep_degrees(
    profile: &Profile,
    degrees: RangeInclusive<usize>,
    opts: &FitOptions,
) -> Result<DegreeSweep, FitError> {
    let (lo, hi) = (*degrees.start(), *degrees.end());
    if lo < 1 || hi < lo {
        return Err(FitError::InvalidDegree { degree: lo.min(hi) });
    }

    let n = profile.len();
    let outcomes: Vec<(usize, Result<BezierFit, FitError>)> = (lo..=hi)
        .into_par_iter()
        .map(|degree| (degree, fit_profile(profile, degree, opts)))
        .collect();

    let mut fits = Vec::new();
    let mut skipped = Vec::new();
    let mut first_singular = None;
    let mut first_insufficient = None;
    for (degree, outcome) in outcomes {
        match outcome {
            Ok(fit) => {
                let bic = bic(n, fit.diagnostics.sse, free_parameters(degree));
                fits.push(DegreeFit { fit, bic });
            }
            Err(err @ FitError::SingularFit { .. }) => {
                skipped.push((degree, err.to_string()));
                first_singular.get_or_insert(err);
            }
            Err(err @ FitError::InsufficientSamples { .. }) => {
                skipped.push((degree, err.to_string()));
                first_insufficient.get_or_insert(err);
            }
            Err(err) => return Err(err),
        }
    }

    if fits.is_empty() {
        // A rank-deficient degree had enough samples, so report that first.
        return Err(first_singular
            .or(first_insufficient)
            .unwrap_or(FitError::InsufficientSamples { degree: lo, actual: n }));
    }

    let best = select_by_bic(&fits);
    tracing::debug!(
        degree = best.fit.degree,
        bic = best.bic,
        fitted = fits.len(),
        skipped = skipped.len(),
        "degree sweep complete"
    );

    Ok(DegreeSweep { best, fits, skipped })
}

/// Number of estimated scalars for a pinned-end curve of this degree.
fn free_parameters(degree: usize) -> usize {
    2 * degree.saturating_sub(1)
}

fn bic(n: usize, sse: f64, k: usize) -> f64 {
    let n_f = n as f64;
    let sse_per = (sse / n_f).max(1e-12);
    n_f * sse_per.ln() + (k as f64) * n_f.ln()
}

/// `fits` must be non-empty and sorted by degree.
fn select_by_bic(fits: &[DegreeFit]) -> DegreeFit {
    let mut best = &fits[0];
    for f in &fits[1..] {
        if f.bic < best.bic {
            best = f;
        }
    }

    let best_bic = best.bic;
    fits.iter()
        .find(|f| f.bic <= best_bic + BIC_MARGIN)
        .unwrap_or(best)
        .clone()
}
