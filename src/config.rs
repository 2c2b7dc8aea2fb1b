//! Run configuration
//!
//! All inputs of a simulation in one immutable struct, serialisable to JSON so
//! a run can be written next to its output and replayed.
//!
//! ```json
//! {
//!   "diffusivity": 100.0,
//!   "length": 300.0,
//!   "spacing": 0.5,
//!   "c_left": 500.0,
//!   "c_right": 0.0,
//!   "time_steps": 5000
//! }
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::DiffusionError;
use crate::solver::{Scenario, SolverConfiguration, StabilityConfig, TimeStepPolicy};

/// Errors raised while loading, saving or validating a [`SimulationConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] DiffusionError),
}

/// Parameters of one diffusion run
///
/// Missing fields fall back to [`SimulationConfig::default`], the reference
/// scenario (500 → 0 step over 300 m, `D = 100`, 5000 steps).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Diffusivity `D`
    pub diffusivity: f64,

    /// Domain length `Lx`; the grid spans `[0, Lx)`
    pub length: f64,

    /// Grid spacing `dx`
    pub spacing: f64,

    /// Concentration on the left half and pinned at x = 0
    pub c_left: f64,

    /// Concentration on the right half and pinned at the last point
    pub c_right: f64,

    /// Number of time steps `nt`
    pub time_steps: usize,

    /// Explicit `dt`; derived from the stability bound when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_step: Option<f64>,

    /// Record the field every `k` steps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_interval: Option<usize>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            diffusivity: 100.0,
            length: 300.0,
            spacing: 0.5,
            c_left: 500.0,
            c_right: 0.0,
            time_steps: 5000,
            time_step: None,
            snapshot_interval: None,
        }
    }
}

impl SimulationConfig {
    /// Load a configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// Parse a configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn to_json_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Check every parameter without building anything
    pub fn validate(&self) -> Result<(), ConfigError> {
        StabilityConfig::new(self.diffusivity, self.spacing)?;
        self.solver_configuration().validate()?;
        self.scenario()?;
        Ok(())
    }

    /// Time step policy implied by `time_step`
    pub fn time_step_policy(&self) -> TimeStepPolicy {
        match self.time_step {
            Some(dt) => TimeStepPolicy::Fixed(dt),
            None => TimeStepPolicy::Stable,
        }
    }

    /// Build the step-function scenario described by this configuration
    pub fn scenario(&self) -> Result<Scenario, DiffusionError> {
        Scenario::step(
            self.length,
            self.spacing,
            self.diffusivity,
            self.c_left,
            self.c_right,
        )
    }

    /// Build the solver configuration described by this configuration
    pub fn solver_configuration(&self) -> SolverConfiguration {
        SolverConfiguration {
            time_steps: self.time_steps,
            time_step: self.time_step_policy(),
            snapshot_interval: self.snapshot_interval,
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
