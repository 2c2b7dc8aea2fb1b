//! Relaxation of a concentration step
//!
//! ∂C/∂t = D·∂²C/∂x²  on [0, 300), C = 500 on the left half, 0 on the right,
//! both ends pinned at their initial values.
//!
//! This file lives in `demos/` because the workspace's `examples/` directory
//! holds unrelated reference material. Cargo.toml registers it as an
//! `[[example]]` with an explicit `path`, so the usual `--example` flag works.
//!
//! Run with:
//!
//! ```bash
//! cargo run --example step_profile
//! RUST_LOG=debug cargo run --example step_profile
//! ```

use diffusion_rs::{
    config::SimulationConfig,
    output::export::{CsvConfig, CsvMetadata, export_snapshots_csv},
    output::visualization::{PlotConfig, plot_profile_comparison, plot_profile_evolution},
    solver::{FtcsSolver, Solver, StabilityConfig},
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== Step Profile: FTCS Diffusion ===\n");

    let config = SimulationConfig {
        snapshot_interval: Some(1000),
        ..Default::default()
    };
    config.validate()?;

    let stability = StabilityConfig::new(config.diffusivity, config.spacing)?;

    println!("Physical Parameters:");
    println!("  Domain length: {}", config.length);
    println!("  Grid spacing dx: {}", config.spacing);
    println!("  Diffusivity D: {}", config.diffusivity);
    println!("\nBoundary Conditions:");
    println!("  Left (x=0): C = {}", config.c_left);
    println!("  Right (x=L): C = {}", config.c_right);
    println!("\nSimulation:");
    println!("  Stable dt: {}", stability.time_step());
    println!("  Time steps: {}\n", config.time_steps);

    let scenario = config.scenario()?;

    println!("Solving with FTCS...");
    let start = std::time::Instant::now();
    let result = FtcsSolver.solve(&scenario, &config.solver_configuration())?;
    println!("✓ FTCS completed in {:.3}s\n", start.elapsed().as_secs_f64());

    let x = scenario.grid().coordinates();
    let c_final = result.final_field.as_slice();
    let n = c_final.len();

    println!("Boundary values:");
    println!("  C(x=0) = {:.10}", c_final[0]);
    println!("  C(x=L) = {:.10}", c_final[n - 1]);
    println!("  C(x=L/2) = {:.6}", c_final[n / 2]);

    // Output next to the system temp files
    let out_dir = std::env::temp_dir().join("diffusion_step_profile");
    std::fs::create_dir_all(&out_dir)?;

    let comparison_path = out_dir.join("initial_vs_final.png");
    let evolution_path = out_dir.join("evolution.png");
    let csv_path = out_dir.join("snapshots.csv");
    let config_path = out_dir.join("run.json");

    plot_profile_comparison(
        vec![
            ("t = 0", x, scenario.initial_field().as_slice()),
            ("final", x, c_final),
        ],
        comparison_path.to_str().ok_or("non UTF-8 path")?,
        Some(&PlotConfig::profile("Initial vs Final Profile")),
    )?;

    plot_profile_evolution(
        x,
        &result,
        6,
        evolution_path.to_str().ok_or("non UTF-8 path")?,
        None,
    )?;

    let csv_config = CsvConfig::default().with_metadata(CsvMetadata::from_result(&result));
    export_snapshots_csv(
        x,
        &result,
        csv_path.to_str().ok_or("non UTF-8 path")?,
        Some(&csv_config),
    )?;

    config.to_json_file(&config_path)?;

    println!("\nOutput written to {}", out_dir.display());
    println!("  {}", comparison_path.display());
    println!("  {}", evolution_path.display());
    println!("  {}", csv_path.display());
    println!("  {}", config_path.display());

    Ok(())
}
