//! Output of simulation results
//!
//! - **Visualization**: PNG/SVG profile plots using plotters
//! - **Export**: CSV data export for external analysis
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs
//! ├── visualization/      ← Plots
//! │   ├── config.rs
//! │   └── profile.rs
//! └── export/             ← Data export
//!     └── csv.rs
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use diffusion_rs::output::{export_profile_csv, plot_profile};
//!
//! let x = scenario.grid().coordinates();
//! plot_profile(x, result.final_field.as_slice(), "final.png", None)?;
//! export_profile_csv(x, result.final_field.as_slice(), "final.csv", None)?;
//! ```
//!
//! Both sub-modules accept plain `&[f64]` slices; positions come from
//! [`Grid::coordinates`](crate::domain::Grid::coordinates).

pub mod export;
pub mod visualization;

pub use visualization::{PlotConfig, plot_profile, plot_profile_comparison, plot_profile_evolution};

pub use export::{CsvConfig, CsvError, CsvMetadata, export_profile_csv, export_snapshots_csv};
