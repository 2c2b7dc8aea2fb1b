//! Visualization of concentration profiles using `plotters`
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`)
//! - **profile**: Spatial plots (concentration vs position)
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use diffusion_rs::output::visualization::{plot_profile, PlotConfig};
//!
//! let result = FtcsSolver.solve(&scenario, &config)?;
//! let x = scenario.grid().coordinates();
//!
//! // Default config
//! plot_profile(x, result.final_field.as_slice(), "final.png", None)?;
//!
//! // Custom config
//! let config = PlotConfig::profile("After 5000 steps");
//! plot_profile(x, result.final_field.as_slice(), "final.svg", Some(&config))?;
//! ```
//!
//! # When to Use Which Function
//!
//! | Use Case | Function |
//! |----------|----------|
//! | One profile | `plot_profile` |
//! | Compare profiles | `plot_profile_comparison` |
//! | Snapshots of a run | `plot_profile_evolution` |

pub mod config;
pub mod profile;

pub use config::{IntoOptionalTitle, NO_TITLE, PlotConfig};

pub use profile::{plot_profile, plot_profile_comparison, plot_profile_evolution};
