//! Shared "fit pipeline" logic used by the CLI subcommands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! profile source -> fit -> curve evaluation -> residuals -> worst samples
//!
//! The subcommands can then focus on presentation (printing and exports).

use crate::data::{SyntheticProfile, naca4, random_bezier_profile};
use crate::domain::{BezierFit, FitConfig, Profile, ProfileSource, SampleResidual, SamplePoint};
use crate::error::AppError;
use crate::fit::{DegreeSweep, FitOptions, evaluate, fit_profile, sweep_degrees};
use crate::io::load_profile;
use crate::report::{compute_residuals, worst_residuals};

/// All computed outputs of a single `bzfit fit` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub profile: Profile,
    pub fit: BezierFit,
    /// Curve evaluated at `config.curve_samples` uniform parameters.
    pub curve: Vec<SamplePoint>,
    pub residuals: Vec<SampleResidual>,
    pub worst: Vec<SampleResidual>,
}

pub fn fit_options(config: &FitConfig) -> FitOptions {
    FitOptions {
        parametrization: config.parametrization,
        singular: config.singular,
    }
}

/// Resolve the configured profile source into a profile.
pub fn load_source(config: &FitConfig) -> Result<Profile, AppError> {
    match &config.source {
        ProfileSource::File(path) => load_profile(path),
        ProfileSource::Naca(code) => naca4(code, config.naca_points),
        ProfileSource::Synthetic(spec) => {
            let SyntheticProfile { profile, control_points } = random_bezier_profile(spec)?;
            tracing::debug!(?control_points, "generated synthetic profile");
            Ok(profile)
        }
    }
}

/// Execute the full fitting pipeline and return the computed outputs.
pub fn run_fit(config: &FitConfig) -> Result<RunOutput, AppError> {
    let profile = load_source(config)?;
    run_fit_with_profile(config, profile)
}

/// Execute the fitting pipeline on an already loaded profile.
pub fn run_fit_with_profile(config: &FitConfig, profile: Profile) -> Result<RunOutput, AppError> {
    let fit = fit_profile(&profile, config.degree, &fit_options(config))?;
    let curve = evaluate(&fit.control_points, config.curve_samples)?;
    let residuals = compute_residuals(&profile, &fit)?;
    let worst = worst_residuals(&residuals, config.top_n);

    Ok(RunOutput {
        profile,
        fit,
        curve,
        residuals,
        worst,
    })
}

/// Load the profile and sweep the configured degree range.
pub fn run_sweep(config: &FitConfig) -> Result<(Profile, DegreeSweep), AppError> {
    let profile = load_source(config)?;
    let sweep = sweep_degrees(
        &profile,
        config.min_degree..=config.max_degree,
        &fit_options(config),
    )?;
    Ok((profile, sweep))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Parametrization, SingularPolicy, SyntheticSpec};

    fn config(source: ProfileSource) -> FitConfig {
        FitConfig {
            source,
            degree: 5,
            min_degree: 2,
            max_degree: 8,
            parametrization: Parametrization::Uniform,
            singular: SingularPolicy::Warn,
            naca_points: 41,
            curve_samples: 50,
            top_n: 3,
            plot: false,
            plot_width: 60,
            plot_height: 20,
            export_curve: None,
            export_dat: None,
        }
    }

    #[test]
    fn naca_pipeline_pins_trailing_edge() {
        let run = run_fit(&config(ProfileSource::Naca("2412".into()))).unwrap();
        assert_eq!(run.fit.control_points.len(), 6);
        assert_eq!(run.fit.control_points[0], run.profile.point(0).unwrap());
        assert_eq!(run.fit.control_points[5], run.profile.point(run.profile.len() - 1).unwrap());
        assert_eq!(run.curve.len(), 50);
        assert_eq!(run.residuals.len(), run.profile.len());
        assert_eq!(run.worst.len(), 3);
    }

    #[test]
    fn synthetic_sweep_selects_generating_degree() {
        let spec = SyntheticSpec {
            degree: 5,
            sample_count: 100,
            noise: 0.0,
            seed: 3,
        };
        let (profile, sweep) = run_sweep(&config(ProfileSource::Synthetic(spec))).unwrap();
        assert_eq!(profile.len(), 100);
        assert_eq!(sweep.best.fit.degree, 5);
    }

    #[test]
    fn missing_profile_file_is_an_app_error() {
        let err = run_fit(&config(ProfileSource::File("/nonexistent/foil.dat".into()))).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn degree_too_high_for_profile_exits_with_insufficient_data() {
        let mut cfg = config(ProfileSource::Naca("0012".into()));
        cfg.naca_points = 3;
        cfg.degree = 8;
        let err = run_fit(&cfg).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
