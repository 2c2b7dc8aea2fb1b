//! `diffuse`: command-line front end for the FTCS diffusion solver
//!
//! ```text
//! diffuse run --config run.json --csv final.csv --plot final.png
//! diffuse run --steps 1000 --snapshot-every 100 --plot evolution.svg
//! diffuse dt --diffusivity 100 --spacing 0.5
//! ```

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{LevelFilter, info, warn};

use diffusion_rs::config::SimulationConfig;
use diffusion_rs::output::export::{CsvConfig, CsvMetadata, export_profile_csv, export_snapshots_csv};
use diffusion_rs::output::visualization::{PlotConfig, plot_profile_comparison, plot_profile_evolution};
use diffusion_rs::solver::{FtcsSolver, Solver, StabilityConfig};

/// Explicit 1D diffusion solver
#[derive(Parser)]
#[command(name = "diffuse")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Explicit FTCS solver for the 1D diffusion equation", long_about = None)]
struct Cli {
    /// Log level; RUST_LOG directives are applied on top
    #[arg(short, long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run a step-profile simulation
    Run(RunArgs),
    /// Print the largest stable time step
    Dt(DtArgs),
}

#[derive(Args)]
struct RunArgs {
    /// JSON configuration file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Diffusivity D
    #[arg(long)]
    diffusivity: Option<f64>,

    /// Domain length Lx
    #[arg(long)]
    length: Option<f64>,

    /// Grid spacing dx
    #[arg(long)]
    spacing: Option<f64>,

    /// Concentration on the left half
    #[arg(long)]
    c_left: Option<f64>,

    /// Concentration on the right half
    #[arg(long)]
    c_right: Option<f64>,

    /// Number of time steps
    #[arg(short = 'n', long)]
    steps: Option<usize>,

    /// Fixed time step (default: stability bound)
    #[arg(long)]
    dt: Option<f64>,

    /// Record a snapshot every k steps
    #[arg(long)]
    snapshot_every: Option<usize>,

    /// Write the final profile (or all snapshots) to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Plot the initial and final profiles (or all snapshots) to PNG/SVG
    #[arg(long)]
    plot: Option<PathBuf>,

    /// Save the effective configuration as JSON
    #[arg(long)]
    save_config: Option<PathBuf>,
}

#[derive(Args)]
struct DtArgs {
    /// Diffusivity D
    #[arg(long)]
    diffusivity: f64,

    /// Grid spacing dx
    #[arg(long)]
    spacing: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.into())
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Run(args) => run(args),
        Commands::Dt(args) => dt(args),
    }
}

fn effective_config(args: &RunArgs) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_json_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    if let Some(v) = args.diffusivity {
        config.diffusivity = v;
    }
    if let Some(v) = args.length {
        config.length = v;
    }
    if let Some(v) = args.spacing {
        config.spacing = v;
    }
    if let Some(v) = args.c_left {
        config.c_left = v;
    }
    if let Some(v) = args.c_right {
        config.c_right = v;
    }
    if let Some(v) = args.steps {
        config.time_steps = v;
    }
    if args.dt.is_some() {
        config.time_step = args.dt;
    }
    if args.snapshot_every.is_some() {
        config.snapshot_interval = args.snapshot_every;
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn path_str(path: &std::path::Path) -> Result<&str> {
    match path.to_str() {
        Some(s) => Ok(s),
        None => bail!("output path is not valid UTF-8: {}", path.display()),
    }
}

fn run(args: RunArgs) -> Result<()> {
    let config = effective_config(&args)?;

    if let Some(path) = &args.save_config {
        config
            .to_json_file(path)
            .with_context(|| format!("saving configuration to {}", path.display()))?;
        info!("configuration written to {}", path.display());
    }

    let scenario = config.scenario()?;
    let solver_config = config.solver_configuration();

    let start = Instant::now();
    let result = FtcsSolver
        .solve(&scenario, &solver_config)
        .context("simulation failed")?;
    let elapsed = start.elapsed();

    let x = scenario.grid().coordinates();
    let field = result.final_field.as_slice();
    let interior_min = field[1..field.len() - 1].iter().copied().fold(f64::INFINITY, f64::min);
    let interior_max = field[1..field.len() - 1]
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);

    println!("Solver       : {}", FtcsSolver.name());
    println!("Grid points  : {}", scenario.grid().len());
    println!("Time steps   : {}", config.time_steps);
    println!(
        "dt           : {}",
        result.metadata.get("dt").map(String::as_str).unwrap_or("?")
    );
    println!("Final time   : {}", result.final_time());
    println!("Interior min : {}", interior_min);
    println!("Interior max : {}", interior_max);
    println!("Wall time    : {:.3?}", elapsed);

    let with_snapshots = result.len() > 2;

    if let Some(path) = &args.csv {
        let csv_config = CsvConfig::default().with_metadata(CsvMetadata::from_result(&result));
        let path_str = path_str(path)?;
        let written = if with_snapshots {
            export_snapshots_csv(x, &result, path_str, Some(&csv_config))
        } else {
            export_profile_csv(x, field, path_str, Some(&csv_config))
        };
        written.with_context(|| format!("writing CSV to {}", path.display()))?;
        info!("CSV written to {}", path.display());
    }

    if let Some(path) = &args.plot {
        let path_str = path_str(path)?;
        let plotted = if with_snapshots {
            plot_profile_evolution(x, &result, 8, path_str, None)
        } else {
            let initial = scenario.initial_field().as_slice();
            let title = format!("{} steps, t = {}", config.time_steps, result.final_time());
            plot_profile_comparison(
                vec![("Initial", x, initial), ("Final", x, field)],
                path_str,
                Some(&PlotConfig::profile(title)),
            )
        };
        // plotters errors are boxed and not Send + Sync
        if let Err(e) = plotted {
            bail!("plotting to {} failed: {}", path.display(), e);
        }
        info!("plot written to {}", path.display());
    }

    if result.final_field.iter().any(|c| *c < config.c_left.min(config.c_right)) {
        warn!("final field undershoots the boundary values");
    }

    Ok(())
}

fn dt(args: DtArgs) -> Result<()> {
    let stability = StabilityConfig::new(args.diffusivity, args.spacing)?;
    println!("{}", stability.time_step());
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
