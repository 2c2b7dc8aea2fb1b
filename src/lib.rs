//! diffusion-rs: explicit 1D diffusion solver
//!
//! Evolves a concentration field `C(x, t)` under `∂C/∂t = D ∂²C/∂x²` on a
//! uniform grid with the Forward-Time Central-Space (FTCS) scheme and fixed
//! (Dirichlet) boundary values.
//!
//! # Architecture
//!
//! 1. **Stability is owned by the solver**
//!    - [`solver::compute_dt`] derives the largest stable time step
//!      `dt = 0.5 dx² / D`
//!    - Callers never pick `dt` by hand unless they ask for a fixed step
//!
//! 2. **The stepper owns its field**
//!    - [`solver::DiffusionStepper`] double-buffers the update, so every
//!      step reads one complete time level and writes the next
//!    - Boundary values are captured at construction and re-asserted after
//!      every step
//!    - NaN/Inf is reported as an error instead of silently propagating
//!
//! # Quick Start
//!
//! ```rust
//! use diffusion_rs::domain::{Grid, StepProfile};
//! use diffusion_rs::solver::{DiffusionStepper, ModelParameters};
//!
//! # fn main() -> diffusion_rs::Result<()> {
//! // 1. Grid and initial step profile
//! let grid = Grid::from_length(300.0, 0.5)?;
//! let initial = StepProfile::centred(&grid, 500.0, 0.0).sample(&grid);
//!
//! // 2. Stable time step for D = 100
//! let params = ModelParameters::stable(100.0, grid.spacing())?;
//! assert_eq!(params.time_step(), 0.00125);
//!
//! // 3. Advance 5000 steps
//! let mut stepper = DiffusionStepper::new(initial, params)?;
//! stepper.step(5000)?;
//!
//! // Boundaries never move
//! let field = stepper.field();
//! assert_eq!(field[0], 500.0);
//! assert_eq!(field[field.len() - 1], 0.0);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`domain`]: Grid and initial profiles
//! - [`solver`]: Stability bound, FTCS stepper, full-run solver
//! - [`config`]: JSON run configuration
//! - [`output`]: Profile plots and CSV export
//! - [`error`]: Error type shared by the library

pub mod error;

pub mod domain;
pub mod solver;

pub mod config;
pub mod output;

pub use error::{DiffusionError, Result};

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use diffusion_rs::prelude::*;
    //! ```
    pub use crate::config::SimulationConfig;
    pub use crate::domain::{ConcentrationField, Grid, StepProfile};
    pub use crate::error::{DiffusionError, Result};
    pub use crate::solver::{
        DiffusionStepper, FtcsSolver, ModelParameters, Scenario, SimulationResult, Solver,
        SolverConfiguration, StabilityConfig, TimeStepPolicy, compute_dt,
    };
}
