//! Problem domain: grid and concentration profiles
//!
//! These are the data-preparation collaborators of the solver. The grid
//! supplies the point count and spacing, the profiles supply the initial
//! field. Neither carries any numerical contract of its own.
//!
//! # Example
//!
//! ```rust
//! use diffusion_rs::domain::{Grid, StepProfile};
//!
//! let grid = Grid::from_length(300.0, 0.5).unwrap();
//! let initial = StepProfile::centred(&grid, 500.0, 0.0).sample(&grid);
//!
//! assert_eq!(initial.len(), grid.len());
//! assert_eq!(initial[0], 500.0);
//! assert_eq!(initial[grid.len() - 1], 0.0);
//! ```

pub mod grid;
pub mod profile;

use nalgebra::DVector;

/// Concentration at each grid point for one time level
pub type ConcentrationField = DVector<f64>;

pub use grid::{Grid, MAX_POINTS};
pub use profile::{StepProfile, linear_profile, step_like};
