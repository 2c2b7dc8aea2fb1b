//! Numerical solver for the 1D diffusion equation
//!
//! # Core Concepts
//!
//! 1. **Stability** (`stability`) - the time step the explicit scheme can afford
//!    - [`compute_dt`]: `dt = 0.5 dx² / D`
//!    - [`StabilityConfig`]: validated `(D, dx)` pair, Fourier number
//!
//! 2. **Stepper** (`stepper`) - the FTCS update itself
//!    - [`compute_next`]: double-buffered stencil kernel
//!    - [`DiffusionStepper`]: owns the field, holds the boundaries, detects blow-up
//!
//! 3. **Solver** (`traits`, `scenario`, `methods`) - full runs
//!    - [`Scenario`]: WHAT to solve (grid, initial field, diffusivity)
//!    - [`SolverConfiguration`]: HOW to run it (steps, dt policy, snapshots)
//!    - [`FtcsSolver`]: the method, returning a [`SimulationResult`]
//!
//! # Workflow Diagram
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐
//! │ Grid + field │   │ StabilityConfig  │ ← dt = 0.5 dx² / D
//! └──────┬───────┘   └────────┬─────────┘
//!        │                    │
//!        └────────┬───────────┘
//!        ┌────────▼─────────┐
//!        │ DiffusionStepper │ ← step(nt)
//!        └────────┬─────────┘
//!        ┌────────▼─────────┐
//!        │   final field    │ → plots / CSV
//!        └──────────────────┘
//! ```
//!
//! # Error Handling
//!
//! Every fallible operation returns [`crate::error::Result`]:
//!
//! - `InvalidParameter`: non-positive `D`/`dx`/`dt`, fields shorter than 3 points
//! - `NumericalInstability`: NaN or Inf appeared after a step

// =================================================================================================
// Module Declarations
// =================================================================================================
mod traits;
mod boundary;
mod scenario;
mod stability;
mod stepper;
mod methods;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// The interior update of one step is data-parallel. Deciding when to hand it
// to rayon is an execution concern owned by the solver, stored in an
// AtomicUsize so benches and tests can move it at runtime. Relaxed ordering is
// enough: the value is a performance hint, not a synchronisation point.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of grid points above which [`compute_next`] goes parallel
///
/// A 3-point stencil is very cheap; below ~10k points the rayon dispatch
/// costs more than it saves.
const DEFAULT_PARALLEL_THRESHOLD: usize = 10_000;

static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// [`compute_next`] uses sequential iteration up to this many points and
/// switches to rayon above it, but only when the crate is compiled with the
/// `parallel` feature.
///
/// # Example
///
/// ```rust
/// use diffusion_rs::solver::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// # Example
///
/// ```rust
/// use diffusion_rs::solver::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(2048);
/// assert_eq!(parallel_threshold(), 2048);
///
/// // Restore so other tests are not affected.
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// Serialises tests that move the global threshold
#[cfg(test)]
static THRESHOLD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// RAII guard that saves the current threshold on construction and restores
/// it on drop.
///
/// Holds [`THRESHOLD_LOCK`] for its whole lifetime, so two tests never see
/// each other's value. Only compiled in test builds.
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
impl ThresholdGuard {
    /// Set the threshold to `new_value` and return a guard that will
    /// restore the previous value on drop.
    pub(crate) fn save(new_value: usize) -> Self {
        // A panicking holder poisons the lock; the threshold is restored by Drop anyway
        let lock = THRESHOLD_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self {
            previous,
            _lock: lock,
        }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use traits::{SimulationResult, Solver, SolverConfiguration, TimeStepPolicy};

pub use boundary::DirichletBoundaries;
pub use scenario::Scenario;
pub use stability::{STABILITY_FACTOR, StabilityConfig, compute_dt};
pub use stepper::{
    DiffusionStepper, MIN_POINTS, ModelParameters, compute_next, compute_next_with_threshold,
};

pub use methods::FtcsSolver;

// =================================================================================================
// Helper Functions
// =================================================================================================

use crate::error::{DiffusionError, Result};

/// Check a committed field for NaN or Inf values
///
/// # Arguments
///
/// * `field` - Field to validate
/// * `step` - Step that produced it (for error reporting)
///
/// # Returns
///
/// `Ok(())` if every value is finite, `NumericalInstability` pointing at the
/// first bad index otherwise.
pub(crate) fn validate_field(field: &[f64], step: usize) -> Result<()> {
    match field.iter().position(|x| !x.is_finite()) {
        Some(index) => Err(DiffusionError::NumericalInstability {
            step,
            index,
            value: field[index],
        }),
        None => Ok(()),
    }
}

// =================================================================================================
// Tests
// =================================================================================================
