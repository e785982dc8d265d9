//! Command-line parsing for the Bézier profile fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fitting/math code.
//!
//! Defaults for the most common settings can also come from the environment
//! (or a `.env` file): `BZFIT_PROFILE`, `BZFIT_DEGREE`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::Parametrization;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "bzfit", version, about = "Least-squares Bezier control points for airfoil profiles")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit one degree, print diagnostics and control points, and optionally plot/export.
    Fit(FitArgs),
    /// Fit a range of degrees and pick one by BIC.
    Sweep(SweepArgs),
    /// Evaluate a previously exported curve JSON into coordinates.
    Eval(EvalArgs),
    /// Plot a previously exported curve JSON.
    Plot(PlotArgs),
}

/// Where the profile comes from. Exactly one of `--profile`, `--naca`, `--synthetic`.
#[derive(Debug, Args, Clone)]
pub struct SourceArgs {
    /// Airfoil coordinate file (Selig `.dat`, or `.csv` with `x,y` columns).
    #[arg(short = 'p', long, env = "BZFIT_PROFILE", value_name = "PATH", conflicts_with_all = ["naca", "synthetic"])]
    pub profile: Option<PathBuf>,

    /// Generate a NACA 4-digit profile instead of reading a file (e.g. 2412).
    #[arg(long, value_name = "MPTT", conflicts_with = "synthetic")]
    pub naca: Option<String>,

    /// Stations per surface for `--naca`.
    #[arg(long, default_value_t = 61)]
    pub naca_points: usize,

    /// Use a seeded random Bezier profile instead of reading a file.
    #[arg(long)]
    pub synthetic: bool,

    /// Random seed for `--synthetic`.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Degree of the generating curve for `--synthetic`.
    #[arg(long, default_value_t = 6)]
    pub synthetic_degree: usize,

    /// Number of samples for `--synthetic`.
    #[arg(long, default_value_t = 120)]
    pub synthetic_samples: usize,

    /// Gaussian noise (standard deviation) added to interior synthetic samples.
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,
}

/// Options for fitting a single degree.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Bezier degree (number of control points minus one).
    #[arg(short = 'd', long, env = "BZFIT_DEGREE", default_value_t = 4)]
    pub degree: usize,

    /// How curve parameters are assigned to samples.
    #[arg(long = "param", value_enum, default_value_t = Parametrization::Uniform)]
    pub parametrization: Parametrization,

    /// Fail instead of warning when the design matrix is rank deficient.
    #[arg(long)]
    pub strict: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Number of curve points for plots and exports.
    #[arg(long, default_value_t = 200)]
    pub curve_samples: usize,

    /// Show the N worst-fitted samples.
    #[arg(long, default_value_t = 5)]
    pub top: usize,

    /// Export curve (degree + control points + diagnostics + grid) to JSON.
    #[arg(long = "export-curve", value_name = "JSON")]
    pub export_curve: Option<PathBuf>,

    /// Export the evaluated curve as a Selig `.dat` coordinate file.
    #[arg(long = "export-dat", value_name = "DAT")]
    pub export_dat: Option<PathBuf>,
}

/// Options for a degree sweep.
#[derive(Debug, Parser, Clone)]
pub struct SweepArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Lowest degree to try.
    #[arg(long, default_value_t = 1)]
    pub min_degree: usize,

    /// Highest degree to try.
    #[arg(long, default_value_t = 12)]
    pub max_degree: usize,

    /// How curve parameters are assigned to samples.
    #[arg(long = "param", value_enum, default_value_t = Parametrization::Uniform)]
    pub parametrization: Parametrization,

    /// Skip rank-deficient degrees instead of fitting them with a warning.
    #[arg(long)]
    pub strict: bool,
}

/// Options for evaluating a saved curve.
#[derive(Debug, Parser)]
pub struct EvalArgs {
    /// Curve JSON file produced by `bzfit fit --export-curve`.
    #[arg(long, value_name = "JSON")]
    pub curve: PathBuf,

    /// Number of points to evaluate.
    #[arg(short = 'n', long, default_value_t = 200)]
    pub samples: usize,

    /// Write a Selig `.dat` file instead of printing to stdout.
    #[arg(short = 'o', long, value_name = "DAT")]
    pub out: Option<PathBuf>,
}

/// Options for plotting a saved curve.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Curve JSON file produced by `bzfit fit --export-curve`.
    #[arg(long, value_name = "JSON")]
    pub curve: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}
