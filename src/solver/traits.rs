//! Solver trait and the types flowing through it
//!
//! - [`Solver`]: applies a numerical method to a [`Scenario`]
//! - [`SolverConfiguration`]: how many steps, which `dt`, how often to record
//! - [`SimulationResult`]: recorded snapshots, final field and run metadata

use std::collections::HashMap;

use crate::domain::ConcentrationField;
use crate::error::{DiffusionError, Result, ensure_positive};
use crate::solver::Scenario;

// =================================================================================================
// Time step policy
// =================================================================================================

/// Where the time step comes from
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TimeStepPolicy {
    /// Derived from the stability bound, `dt = 0.5 dx^2 / D`
    #[default]
    Stable,

    /// Supplied by the caller. Not checked against the bound; an oversized step
    /// ends in `NumericalInstability`.
    Fixed(f64),
}

impl TimeStepPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            TimeStepPolicy::Stable => "Stable",
            TimeStepPolicy::Fixed(_) => "Fixed",
        }
    }
}

// =================================================================================================
// Solver configuration
// =================================================================================================

/// HOW to run a scenario
///
/// # Examples
///
/// ```rust
/// use diffusion_rs::solver::{SolverConfiguration, TimeStepPolicy};
///
/// // 5000 steps with the stable dt, keep only the final field
/// let config = SolverConfiguration::new(5000);
///
/// // Same, recording a snapshot every 1000 steps
/// let config = SolverConfiguration::new(5000).with_snapshot_interval(1000);
///
/// // Caller-chosen dt
/// let config = SolverConfiguration::new(100).with_time_step(TimeStepPolicy::Fixed(1e-3));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfiguration {
    /// Number of time steps `nt`
    pub time_steps: usize,

    /// Source of `dt`
    pub time_step: TimeStepPolicy,

    /// Record the field every `k` steps (the initial and final fields are always kept)
    pub snapshot_interval: Option<usize>,
}

impl SolverConfiguration {
    /// `time_steps` iterations with the stable time step and no intermediate snapshots
    pub fn new(time_steps: usize) -> Self {
        Self {
            time_steps,
            time_step: TimeStepPolicy::Stable,
            snapshot_interval: None,
        }
    }

    /// Builder pattern: set the time step policy
    pub fn with_time_step(mut self, policy: TimeStepPolicy) -> Self {
        self.time_step = policy;
        self
    }

    /// Builder pattern: record a snapshot every `interval` steps
    pub fn with_snapshot_interval(mut self, interval: usize) -> Self {
        self.snapshot_interval = Some(interval);
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if let TimeStepPolicy::Fixed(dt) = self.time_step {
            ensure_positive("time_step", dt)?;
        }
        if self.snapshot_interval == Some(0) {
            return Err(DiffusionError::invalid(
                "snapshot_interval",
                "must be at least 1 step",
            ));
        }
        Ok(())
    }
}

// =================================================================================================
// Simulation result
// =================================================================================================

/// Outcome of a completed run
///
/// `time_points[k]` is the simulated time of `snapshots[k]`. The first
/// snapshot is the initial field and the last one equals `final_field`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub time_points: Vec<f64>,
    pub snapshots: Vec<ConcentrationField>,
    pub final_field: ConcentrationField,
    pub metadata: HashMap<String, String>,
}

impl SimulationResult {
    pub fn new(
        time_points: Vec<f64>,
        snapshots: Vec<ConcentrationField>,
        final_field: ConcentrationField,
    ) -> Self {
        Self {
            time_points,
            snapshots,
            final_field,
            metadata: HashMap::new(),
        }
    }

    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Number of recorded snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Initial field (first snapshot)
    pub fn initial_field(&self) -> Option<&ConcentrationField> {
        self.snapshots.first()
    }

    /// Simulated time of the final field
    pub fn final_time(&self) -> f64 {
        self.time_points.last().copied().unwrap_or(0.0)
    }
}

// =================================================================================================
// Solver trait
// =================================================================================================

/// Numerical method applied to a scenario
///
/// # Example
///
/// ```rust
/// use diffusion_rs::domain::{Grid, StepProfile};
/// use diffusion_rs::solver::{FtcsSolver, Scenario, Solver, SolverConfiguration};
///
/// let grid = Grid::from_length(10.0, 1.0).unwrap();
/// let initial = StepProfile::centred(&grid, 1.0, 0.0).sample(&grid);
/// let scenario = Scenario::new(grid, initial, 1.0).unwrap();
///
/// let result = FtcsSolver::new().solve(&scenario, &SolverConfiguration::new(100)).unwrap();
/// assert_eq!(result.len(), 2);
/// ```
pub trait Solver {
    /// Run the scenario to completion
    fn solve(&self, scenario: &Scenario, config: &SolverConfiguration) -> Result<SimulationResult>;

    /// Method name used in logs and metadata
    fn name(&self) -> &str;
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DVector;

    #[test]
    fn test_configuration_defaults() {
        let config = SolverConfiguration::new(10);
        assert_eq!(config.time_steps, 10);
        assert_eq!(config.time_step, TimeStepPolicy::Stable);
        assert_eq!(config.snapshot_interval, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_steps_is_valid() {
        assert!(SolverConfiguration::new(0).validate().is_ok());
    }

    #[test]
    fn test_fixed_time_step_must_be_positive() {
        let config = SolverConfiguration::new(10).with_time_step(TimeStepPolicy::Fixed(0.0));
        assert!(config.validate().unwrap_err().is_invalid_parameter());

        let config = SolverConfiguration::new(10).with_time_step(TimeStepPolicy::Fixed(-1.0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_snapshot_interval_rejected() {
        let config = SolverConfiguration::new(10).with_snapshot_interval(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(TimeStepPolicy::Stable.name(), "Stable");
        assert_eq!(TimeStepPolicy::Fixed(1.0).name(), "Fixed");
    }

    #[test]
    fn test_result_accessors() {
        let initial = DVector::from_vec(vec![1.0, 0.0, 0.0]);
        let last = DVector::from_vec(vec![1.0, 0.5, 0.0]);
        let mut result = SimulationResult::new(
            vec![0.0, 2.5],
            vec![initial.clone(), last.clone()],
            last,
        );
        result.add_metadata("solver", "FTCS");

        assert_eq!(result.len(), 2);
        assert!(!result.is_empty());
        assert_eq!(result.initial_field(), Some(&initial));
        assert_eq!(result.final_time(), 2.5);
        assert_eq!(result.metadata.get("solver"), Some(&"FTCS".to_string()));
    }
}
