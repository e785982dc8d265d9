//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` defaults and sets up logging
//! - parses CLI arguments
//! - loads or generates the profile
//! - runs the fit or degree sweep
//! - prints reports/plots and writes optional exports

use std::io::Write;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, EvalArgs, FitArgs, PlotArgs, SourceArgs, SweepArgs};
use crate::domain::{FitConfig, ProfileSource, SingularPolicy, SyntheticSpec};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `bzfit` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Sweep(args) => handle_sweep(args),
        Command::Eval(args) => handle_eval(args),
        Command::Plot(args) => handle_plot(args),
    }
}

/// Log to stderr so stdout stays clean for reports and coordinates.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args)?;
    let run = pipeline::run_fit(&config)?;

    println!(
        "{}",
        crate::report::format_fit_summary(&run.profile, &run.fit, &config)
    );
    if config.top_n > 0 {
        println!("{}", crate::report::format_worst(&run.worst));
    }

    if config.plot {
        let plot = crate::plot::render_fit_plot(
            &run.profile.points(),
            &run.fit.control_points,
            &run.curve,
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    // Optional exports.
    if let Some(path) = &config.export_curve {
        let curve = crate::io::curve_file(&run.fit, &run.profile, config.curve_samples)?;
        crate::io::write_curve_json(path, &curve)?;
    }
    if let Some(path) = &config.export_dat {
        crate::io::write_selig_dat(path, run.profile.display_name(), &run.curve)?;
    }

    Ok(())
}

fn handle_sweep(args: SweepArgs) -> Result<(), AppError> {
    let config = sweep_config_from_args(&args)?;
    let (profile, sweep) = pipeline::run_sweep(&config)?;
    println!("{}", crate::report::format_sweep(&profile, &sweep));
    Ok(())
}

fn handle_eval(args: EvalArgs) -> Result<(), AppError> {
    let curve = crate::io::read_curve_json(&args.curve)?;
    let points = crate::fit::evaluate(&curve.control_points, args.samples)?;
    let name = curve.profile.as_deref().unwrap_or("bezier");

    match &args.out {
        Some(path) => crate::io::write_selig_dat(path, name, &points),
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            crate::io::write_selig(&mut out, name, &points)
                .and_then(|()| out.flush())
                .map_err(|e| AppError::new(2, format!("Failed to write coordinates: {e}")))
        }
    }
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let curve = crate::io::read_curve_json(&args.curve)?;
    let plot = crate::plot::render_curve_file(&curve, args.width, args.height);
    println!("{plot}");
    Ok(())
}

/// Resolve which profile source the user asked for.
pub fn profile_source_from_args(args: &SourceArgs) -> Result<ProfileSource, AppError> {
    if let Some(path) = &args.profile {
        return Ok(ProfileSource::File(path.clone()));
    }
    if let Some(code) = &args.naca {
        return Ok(ProfileSource::Naca(code.clone()));
    }
    if args.synthetic {
        return Ok(ProfileSource::Synthetic(SyntheticSpec {
            degree: args.synthetic_degree,
            sample_count: args.synthetic_samples,
            noise: args.noise,
            seed: args.seed,
        }));
    }
    Err(AppError::new(
        2,
        "No profile given. Use --profile <PATH>, --naca <MPTT>, or --synthetic (or set BZFIT_PROFILE).",
    ))
}

fn singular_policy(strict: bool) -> SingularPolicy {
    if strict {
        SingularPolicy::Reject
    } else {
        SingularPolicy::Warn
    }
}

pub fn fit_config_from_args(args: &FitArgs) -> Result<FitConfig, AppError> {
    Ok(FitConfig {
        source: profile_source_from_args(&args.source)?,
        degree: args.degree,
        min_degree: args.degree,
        max_degree: args.degree,
        parametrization: args.parametrization,
        singular: singular_policy(args.strict),
        naca_points: args.source.naca_points,
        curve_samples: args.curve_samples,
        top_n: args.top,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_curve: args.export_curve.clone(),
        export_dat: args.export_dat.clone(),
    })
}

pub fn sweep_config_from_args(args: &SweepArgs) -> Result<FitConfig, AppError> {
    Ok(FitConfig {
        source: profile_source_from_args(&args.source)?,
        degree: args.min_degree,
        min_degree: args.min_degree,
        max_degree: args.max_degree,
        parametrization: args.parametrization,
        singular: singular_policy(args.strict),
        naca_points: args.source.naca_points,
        curve_samples: 0,
        top_n: 0,
        plot: false,
        plot_width: 0,
        plot_height: 0,
        export_curve: None,
        export_dat: None,
    })
}
