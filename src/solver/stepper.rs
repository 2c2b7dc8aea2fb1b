//! FTCS time stepper
//!
//! # Scheme
//!
//! Forward difference in time, centred second difference in space:
//!
//! ```text
//! C_i^{n+1} = C_i^n + alpha * (C_{i-1}^n - 2 C_i^n + C_{i+1}^n),   alpha = D dt / dx^2
//! ```
//!
//! for every interior index `i in [1, N-2]`. Indices `0` and `N-1` hold the
//! Dirichlet values and are re-asserted after every step.
//!
//! # Simultaneity
//!
//! All three terms on the right-hand side are time level `n`. Updating the
//! buffer in place from left to right would read `C_{i-1}^{n+1}` instead and
//! produce a different scheme. The stepper therefore owns two buffers: the
//! kernel [`compute_next`] reads the current level and writes the next one,
//! then the buffers are swapped.
//!
//! ```text
//!   field (level n) ──read──▶ compute_next ──write──▶ next (level n+1)
//!          ▲                                               │
//!          └──────────────── swap + boundaries ◀───────────┘
//! ```

use log::{debug, error, warn};

use crate::domain::ConcentrationField;
use crate::error::{DiffusionError, Result, ensure_positive};
use crate::solver::boundary::DirichletBoundaries;
use crate::solver::stability::{STABILITY_FACTOR, StabilityConfig};
use crate::solver::{parallel_threshold, validate_field};

/// Smallest field that still has an interior point
pub const MIN_POINTS: usize = 3;

// =================================================================================================
// Model parameters
// =================================================================================================

/// Immutable `(D, dx, dt)` triple for one stepping run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParameters {
    diffusivity: f64,
    spacing: f64,
    time_step: f64,
}

impl ModelParameters {
    /// Parameters with `dt` derived from the stability bound
    ///
    /// # Example
    ///
    /// ```rust
    /// use diffusion_rs::solver::ModelParameters;
    ///
    /// let params = ModelParameters::stable(100.0, 0.5).unwrap();
    /// assert_eq!(params.time_step(), 0.00125);
    /// ```
    pub fn stable(diffusivity: f64, spacing: f64) -> Result<Self> {
        let stability = StabilityConfig::new(diffusivity, spacing)?;
        Ok(Self {
            diffusivity,
            spacing,
            time_step: stability.time_step(),
        })
    }

    /// Parameters with an explicitly supplied `dt`
    ///
    /// The step is only checked for positivity. A `dt` above the stability
    /// bound is accepted (and logged); stepping with it is expected to end in
    /// [`DiffusionError::NumericalInstability`].
    pub fn with_time_step(diffusivity: f64, spacing: f64, time_step: f64) -> Result<Self> {
        let stability = StabilityConfig::new(diffusivity, spacing)?;
        let time_step = ensure_positive("time_step", time_step)?;

        if !stability.is_stable(time_step) {
            warn!(
                "time step {} gives a Fourier number of {} (> {}); the explicit scheme will not be stable",
                time_step,
                stability.fourier_number(time_step),
                STABILITY_FACTOR
            );
        }

        Ok(Self {
            diffusivity,
            spacing,
            time_step,
        })
    }

    pub fn diffusivity(&self) -> f64 {
        self.diffusivity
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Fourier number `D dt / dx^2`
    pub fn alpha(&self) -> f64 {
        self.diffusivity * self.time_step / (self.spacing * self.spacing)
    }
}

// =================================================================================================
// Kernel
// =================================================================================================

#[inline(always)]
fn ftcs_point(window: &[f64], alpha: f64) -> f64 {
    window[1] + alpha * (window[0] - 2.0 * window[1] + window[2])
}

/// Compute the next time level of every interior point
///
/// Reads only `current` and writes `next[1..N-1]`. The boundary slots of
/// `next` are copied from `current` so that `next` is a complete field.
///
/// Above [`parallel_threshold()`] points, and with the `parallel` feature, the
/// interior is split across the rayon pool. Each worker reads the shared
/// immutable `current` slice, so no worker can observe a partially updated
/// level.
///
/// # Panics
///
/// Panics if the slices differ in length or hold fewer than 3 points.
///
/// # Example
///
/// ```rust
/// use diffusion_rs::solver::compute_next;
///
/// let current = [10.0, 10.0, 0.0, 0.0, 0.0];
/// let mut next = [0.0; 5];
/// compute_next(&current, &mut next, 0.5);
/// assert_eq!(next, [10.0, 5.0, 5.0, 0.0, 0.0]);
/// ```
pub fn compute_next(current: &[f64], next: &mut [f64], alpha: f64) {
    compute_next_with_threshold(current, next, alpha, parallel_threshold());
}

/// [`compute_next`] with an explicit parallel threshold instead of the
/// process-wide one
///
/// Fields longer than `threshold` points go to rayon when the `parallel`
/// feature is enabled. The result is the same on either path.
///
/// # Example
///
/// ```rust
/// use diffusion_rs::solver::compute_next_with_threshold;
///
/// let current = [10.0, 10.0, 0.0, 0.0, 0.0];
/// let mut next = [0.0; 5];
/// compute_next_with_threshold(&current, &mut next, 0.5, 1);
/// assert_eq!(next, [10.0, 5.0, 5.0, 0.0, 0.0]);
/// ```
pub fn compute_next_with_threshold(current: &[f64], next: &mut [f64], alpha: f64, threshold: usize) {
    let n = current.len();
    assert_eq!(n, next.len(), "current and next buffers must have the same length");
    assert!(n >= MIN_POINTS, "FTCS needs at least {} points, got {}", MIN_POINTS, n);

    let interior = &mut next[1..n - 1];

    if n > threshold {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            interior
                .par_iter_mut()
                .zip(current.par_windows(3))
                .for_each(|(out, window)| *out = ftcs_point(window, alpha));
        }
        // parallel feature not compiled in: fall through to sequential.
        #[cfg(not(feature = "parallel"))]
        {
            for (out, window) in interior.iter_mut().zip(current.windows(3)) {
                *out = ftcs_point(window, alpha);
            }
        }
    } else {
        for (out, window) in interior.iter_mut().zip(current.windows(3)) {
            *out = ftcs_point(window, alpha);
        }
    }

    next[0] = current[0];
    next[n - 1] = current[n - 1];
}

// =================================================================================================
// Stepper
// =================================================================================================

/// Owns a concentration field and advances it with the FTCS update
///
/// The boundary values are read from the initial field and held for the whole
/// run. Stepping needs `&mut self`, so nothing can read the field while a
/// step is in progress.
///
/// # Example
///
/// ```rust
/// use diffusion_rs::domain::{Grid, StepProfile};
/// use diffusion_rs::solver::{DiffusionStepper, ModelParameters};
///
/// let grid = Grid::from_length(300.0, 0.5).unwrap();
/// let initial = StepProfile::centred(&grid, 500.0, 0.0).sample(&grid);
/// let params = ModelParameters::stable(100.0, grid.spacing()).unwrap();
///
/// let mut stepper = DiffusionStepper::new(initial, params).unwrap();
/// stepper.step(5000).unwrap();
///
/// assert_eq!(stepper.steps_taken(), 5000);
/// assert_eq!(stepper.field()[0], 500.0);
/// assert_eq!(stepper.field()[grid.len() - 1], 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct DiffusionStepper {
    field: ConcentrationField,
    next: ConcentrationField,
    boundaries: DirichletBoundaries,
    params: ModelParameters,
    alpha: f64,
    steps_taken: usize,
    failure: Option<DiffusionError>,
}

impl DiffusionStepper {
    /// Take ownership of `field` and prepare to step it
    ///
    /// # Errors
    ///
    /// `InvalidParameter` when the field has fewer than 3 points or holds a
    /// non-finite value.
    pub fn new(field: ConcentrationField, params: ModelParameters) -> Result<Self> {
        if field.len() < MIN_POINTS {
            return Err(DiffusionError::invalid(
                "field",
                format!(
                    "needs at least {} points to have an interior, got {}",
                    MIN_POINTS,
                    field.len()
                ),
            ));
        }
        if let Some((index, value)) = field.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(DiffusionError::invalid(
                "field",
                format!("initial value at index {} is not finite ({})", index, value),
            ));
        }

        let boundaries = DirichletBoundaries::from_field(field.as_slice())?;
        let alpha = params.alpha();
        let next = field.clone();

        debug!(
            "FTCS stepper ready: N = {}, D = {}, dx = {}, dt = {}, alpha = {}",
            field.len(),
            params.diffusivity(),
            params.spacing(),
            params.time_step(),
            alpha
        );

        Ok(Self {
            field,
            next,
            boundaries,
            params,
            alpha,
            steps_taken: 0,
            failure: None,
        })
    }

    /// Convenience constructor deriving `dt` from the stability bound
    pub fn with_stable_step(
        field: ConcentrationField,
        diffusivity: f64,
        spacing: f64,
    ) -> Result<Self> {
        Self::new(field, ModelParameters::stable(diffusivity, spacing)?)
    }

    /// Advance the field by `n_steps` time levels
    ///
    /// Each step fully commits (interior and boundaries) before the next one
    /// reads the field. `step(0)` leaves the field untouched.
    ///
    /// # Errors
    ///
    /// `NumericalInstability` at the first step producing a non-finite value.
    /// The field keeps the state reached at that step and every later call
    /// returns the same error.
    pub fn step(&mut self, n_steps: usize) -> Result<()> {
        self.ensure_valid()?;

        for _ in 0..n_steps {
            self.step_once()?;
        }

        Ok(())
    }

    /// Advance by exactly one time level
    ///
    /// Lets a driving loop stop between iterations without breaking any
    /// invariant.
    pub fn step_once(&mut self) -> Result<()> {
        self.ensure_valid()?;

        compute_next(self.field.as_slice(), self.next.as_mut_slice(), self.alpha);
        std::mem::swap(&mut self.field, &mut self.next);
        self.boundaries.apply(self.field.as_mut_slice());
        self.steps_taken += 1;

        if let Err(err) = validate_field(self.field.as_slice(), self.steps_taken) {
            error!("FTCS run aborted: {}", err);
            self.failure = Some(err.clone());
            return Err(err);
        }

        Ok(())
    }

    fn ensure_valid(&self) -> Result<()> {
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    // ====================================== Accessors ============================================

    /// Current field (time level `steps_taken`)
    pub fn field(&self) -> &ConcentrationField {
        &self.field
    }

    /// Release the field, ending the run
    pub fn into_field(self) -> ConcentrationField {
        self.field
    }

    /// Number of grid points
    pub fn len(&self) -> usize {
        self.field.len()
    }

    /// Always false: a stepper holds at least 3 points
    pub fn is_empty(&self) -> bool {
        self.field.is_empty()
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Simulated time `steps_taken * dt`
    pub fn elapsed_time(&self) -> f64 {
        self.steps_taken as f64 * self.params.time_step()
    }

    /// Fourier number `D dt / dx^2` used by the kernel
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn parameters(&self) -> &ModelParameters {
        &self.params
    }

    pub fn boundaries(&self) -> DirichletBoundaries {
        self.boundaries
    }

    /// False once an instability has been detected
    pub fn is_valid(&self) -> bool {
        self.failure.is_none()
    }

    /// Instability that ended the run, if any
    pub fn failure(&self) -> Option<&DiffusionError> {
        self.failure.as_ref()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
