//! Forward-Time Central-Space solver
//!
//! Drives a [`DiffusionStepper`] through a full run and records snapshots.
//!
//! # Characteristics
//!
//! - **Order**: first order in time, second order in space
//! - **Stability**: conditional, `D dt / dx^2 <= 1/2`
//! - **Cost**: one 3-point stencil evaluation per interior point per step
//! - **Memory**: two field buffers plus the recorded snapshots
//!
//! # Example
//!
//! ```rust
//! use diffusion_rs::solver::{FtcsSolver, Scenario, Solver, SolverConfiguration};
//!
//! let scenario = Scenario::step(300.0, 0.5, 100.0, 500.0, 0.0).unwrap();
//! let config = SolverConfiguration::new(5000).with_snapshot_interval(1000);
//!
//! let result = FtcsSolver::new().solve(&scenario, &config).unwrap();
//! assert_eq!(result.len(), 6);   // t = 0 plus 5 snapshots
//! ```

use log::{debug, info};

use crate::error::Result;
use crate::solver::{
    DiffusionStepper, ModelParameters, Scenario, SimulationResult, Solver, SolverConfiguration,
    TimeStepPolicy,
};

// =================================================================================================
// FTCS Solver
// =================================================================================================

/// Explicit FTCS solver for the 1D diffusion equation
#[derive(Debug, Clone, Copy, Default)]
pub struct FtcsSolver;

impl FtcsSolver {
    /// Create a new FTCS solver
    ///
    /// # Example
    ///
    /// ```rust
    /// use diffusion_rs::solver::{FtcsSolver, Solver};
    ///
    /// let solver = FtcsSolver::new();
    /// assert_eq!(solver.name(), "FTCS");
    /// ```
    pub fn new() -> Self {
        Self
    }
}

impl Solver for FtcsSolver {
    fn solve(&self, scenario: &Scenario, config: &SolverConfiguration) -> Result<SimulationResult> {
        // ====== Step 1: Validation ======

        config.validate()?;

        let params = match config.time_step {
            TimeStepPolicy::Stable => {
                ModelParameters::stable(scenario.diffusivity(), scenario.spacing())?
            }
            TimeStepPolicy::Fixed(dt) => {
                ModelParameters::with_time_step(scenario.diffusivity(), scenario.spacing(), dt)?
            }
        };

        // ====== Step 2: Setup ======

        let mut stepper = DiffusionStepper::new(scenario.initial_field().clone(), params)?;

        info!(
            "FTCS run: N = {}, D = {}, dx = {}, dt = {}, alpha = {}, steps = {}",
            stepper.len(),
            params.diffusivity(),
            params.spacing(),
            params.time_step(),
            stepper.alpha(),
            config.time_steps
        );

        // Without an interval the whole run is a single chunk
        let interval = config
            .snapshot_interval
            .unwrap_or(config.time_steps)
            .max(1);

        let n_snapshots = config.time_steps.div_ceil(interval) + 1;
        let mut time_points = Vec::with_capacity(n_snapshots);
        let mut snapshots = Vec::with_capacity(n_snapshots);

        time_points.push(0.0);
        snapshots.push(stepper.field().clone());

        // ====== Step 3: Time Integration ======

        let mut remaining = config.time_steps;
        while remaining > 0 {
            let chunk = interval.min(remaining);
            stepper.step(chunk)?;
            remaining -= chunk;

            // t = steps * dt, computed from the count rather than accumulated
            time_points.push(stepper.elapsed_time());
            snapshots.push(stepper.field().clone());

            debug!(
                "snapshot at step {} (t = {})",
                stepper.steps_taken(),
                stepper.elapsed_time()
            );
        }

        // ====== Step 4: Build Result ======

        let steps_taken = stepper.steps_taken();
        let alpha = stepper.alpha();
        let final_field = stepper.into_field();

        let mut result = SimulationResult::new(time_points, snapshots, final_field);

        result.add_metadata("solver", self.name());
        result.add_metadata("time steps", &steps_taken.to_string());
        result.add_metadata("dt", &params.time_step().to_string());
        result.add_metadata("alpha", &alpha.to_string());
        result.add_metadata("diffusivity", &params.diffusivity().to_string());
        result.add_metadata("dx", &params.spacing().to_string());
        result.add_metadata("points", &scenario.grid().len().to_string());
        result.add_metadata("time step policy", config.time_step.name());

        info!("FTCS run completed: {} steps, t = {}", steps_taken, result.final_time());

        Ok(result)
    }

    fn name(&self) -> &str {
        "FTCS"
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Grid;
    use approx::assert_relative_eq;
    use nalgebra::DVector;

    fn small_scenario() -> Scenario {
        Scenario::step(10.0, 1.0, 1.0, 1.0, 0.0).unwrap()
    }

    // ====== Solver Creation Tests ======

    #[test]
    fn test_ftcs_solver_creation() {
        assert_eq!(FtcsSolver::new().name(), "FTCS");
        assert_eq!(FtcsSolver::default().name(), "FTCS");
    }

    // ====== Trajectory tests ======

    #[test]
    fn test_no_interval_keeps_initial_and_final() {
        let result = FtcsSolver
            .solve(&small_scenario(), &SolverConfiguration::new(100))
            .unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result.time_points.len(), 2);
        assert_eq!(result.snapshots.last(), Some(&result.final_field));
    }

    #[test]
    fn test_snapshot_interval() {
        let config = SolverConfiguration::new(10).with_snapshot_interval(3);
        let result = FtcsSolver.solve(&small_scenario(), &config).unwrap();

        // t = 0, after 3, 6, 9, 10 steps
        assert_eq!(result.len(), 5);
        let dt = 0.5;
        let expected = [0.0, 3.0 * dt, 6.0 * dt, 9.0 * dt, 10.0 * dt];
        for (actual, expected) in result.time_points.iter().zip(expected.iter()) {
            assert_relative_eq!(*actual, *expected, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_zero_steps_returns_initial_field() {
        let scenario = small_scenario();
        let result = FtcsSolver.solve(&scenario, &SolverConfiguration::new(0)).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(&result.final_field, scenario.initial_field());
        assert_eq!(result.final_time(), 0.0);
    }

    #[test]
    fn test_final_time_precision() {
        let scenario = Scenario::step(1.0, 0.1, 1.0, 1.0, 0.0).unwrap();
        let config = SolverConfiguration::new(1000).with_snapshot_interval(7);
        let result = FtcsSolver.solve(&scenario, &config).unwrap();

        let dt = 0.5 * 0.1 * 0.1;
        assert_relative_eq!(result.final_time(), 1000.0 * dt, max_relative = 1e-14);
    }

    // ====== Metadata Tests ======

    #[test]
    fn test_metadata() {
        let result = FtcsSolver
            .solve(&small_scenario(), &SolverConfiguration::new(20))
            .unwrap();

        assert_eq!(result.metadata.get("solver"), Some(&"FTCS".to_string()));
        assert_eq!(result.metadata.get("time steps"), Some(&"20".to_string()));
        assert_eq!(result.metadata.get("points"), Some(&"10".to_string()));
        assert_eq!(result.metadata.get("time step policy"), Some(&"Stable".to_string()));

        let dt: f64 = result.metadata.get("dt").unwrap().parse().unwrap();
        assert_relative_eq!(dt, 0.5, epsilon = 1e-15);
    }

    // ====== Time step policy ======

    #[test]
    fn test_fixed_time_step_is_used() {
        let config = SolverConfiguration::new(4).with_time_step(TimeStepPolicy::Fixed(0.25));
        let result = FtcsSolver.solve(&small_scenario(), &config).unwrap();

        assert_relative_eq!(result.final_time(), 1.0, epsilon = 1e-15);
        let alpha: f64 = result.metadata.get("alpha").unwrap().parse().unwrap();
        assert_relative_eq!(alpha, 0.25, epsilon = 1e-15);
    }

    #[test]
    fn test_oversized_fixed_step_reports_instability() {
        let grid = Grid::from_length(21.0, 1.0).unwrap();
        let initial = DVector::from_fn(grid.len(), |i, _| if i % 2 == 0 { 1.0 } else { 0.0 });
        let scenario = Scenario::new(grid, initial, 1.0).unwrap();

        let config = SolverConfiguration::new(5000).with_time_step(TimeStepPolicy::Fixed(1.0));
        let err = FtcsSolver.solve(&scenario, &config).unwrap_err();
        assert!(err.is_instability());
    }

    #[test]
    fn test_invalid_configuration_rejected() {
        let config = SolverConfiguration::new(4).with_snapshot_interval(0);
        let err = FtcsSolver.solve(&small_scenario(), &config).unwrap_err();
        assert!(err.is_invalid_parameter());
    }
}
