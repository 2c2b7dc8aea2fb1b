//! Simulation scenario definition
//!
//! A scenario is WHAT to solve: the grid, the initial field on it and the
//! diffusivity. The boundary values are the end points of the initial field.

use crate::domain::{ConcentrationField, Grid, StepProfile};
use crate::error::{DiffusionError, Result, ensure_positive};
use crate::solver::boundary::DirichletBoundaries;
use crate::solver::stepper::MIN_POINTS;

/// Simulation scenario
///
/// # Example
///
/// ```rust
/// use diffusion_rs::solver::Scenario;
///
/// // 300 m domain, dx = 0.5, C = 500 on the left half, 0 on the right half
/// let scenario = Scenario::step(300.0, 0.5, 100.0, 500.0, 0.0).unwrap();
/// assert_eq!(scenario.grid().len(), 600);
/// assert_eq!(scenario.boundaries().left, 500.0);
/// ```
#[derive(Debug, Clone)]
pub struct Scenario {
    grid: Grid,
    initial: ConcentrationField,
    diffusivity: f64,
}

impl Scenario {
    /// Create a scenario from a grid and an initial field on it
    ///
    /// # Errors
    ///
    /// `InvalidParameter` when the diffusivity is not strictly positive, when
    /// the field length differs from the grid, or when the grid has fewer than
    /// 3 points.
    pub fn new(grid: Grid, initial: ConcentrationField, diffusivity: f64) -> Result<Self> {
        let diffusivity = ensure_positive("diffusivity", diffusivity)?;

        if initial.len() != grid.len() {
            return Err(DiffusionError::invalid(
                "field",
                format!(
                    "length {} does not match the grid ({} points)",
                    initial.len(),
                    grid.len()
                ),
            ));
        }
        if grid.len() < MIN_POINTS {
            return Err(DiffusionError::invalid(
                "grid",
                format!("needs at least {} points, got {}", MIN_POINTS, grid.len()),
            ));
        }

        Ok(Self {
            grid,
            initial,
            diffusivity,
        })
    }

    /// Step-function scenario on `[0, length)`
    ///
    /// `c_left` where `x <= length / 2`, `c_right` elsewhere.
    pub fn step(
        length: f64,
        spacing: f64,
        diffusivity: f64,
        c_left: f64,
        c_right: f64,
    ) -> Result<Self> {
        let grid = Grid::from_length(length, spacing)?;
        let initial = StepProfile::centred(&grid, c_left, c_right).sample(&grid);
        Self::new(grid, initial, diffusivity)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn initial_field(&self) -> &ConcentrationField {
        &self.initial
    }

    pub fn diffusivity(&self) -> f64 {
        self.diffusivity
    }

    pub fn spacing(&self) -> f64 {
        self.grid.spacing()
    }

    /// Boundary values carried by the initial field
    pub fn boundaries(&self) -> DirichletBoundaries {
        DirichletBoundaries::new(self.initial[0], self.initial[self.initial.len() - 1])
    }
}

// ================================================================================================
// Tests
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DVector;

    #[test]
    fn test_step_scenario() {
        let scenario = Scenario::step(10.0, 1.0, 2.0, 1.0, 0.0).unwrap();
        assert_eq!(scenario.grid().len(), 10);
        assert_eq!(scenario.diffusivity(), 2.0);
        assert_eq!(scenario.spacing(), 1.0);
        // x = 0..9, step at x = 5 (inclusive)
        assert_eq!(
            scenario.initial_field().as_slice(),
            &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0]
        );
        assert_eq!(scenario.boundaries(), DirichletBoundaries::new(1.0, 0.0));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let grid = Grid::from_length(5.0, 1.0).unwrap();
        let field = DVector::from_vec(vec![1.0, 0.0, 0.0]);
        assert!(Scenario::new(grid, field, 1.0).unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn test_non_positive_diffusivity_rejected() {
        assert!(Scenario::step(10.0, 1.0, 0.0, 1.0, 0.0).is_err());
        assert!(Scenario::step(10.0, 1.0, -3.0, 1.0, 0.0).is_err());
    }

    #[test]
    fn test_two_point_grid_rejected() {
        let err = Scenario::step(2.0, 1.0, 1.0, 1.0, 0.0).unwrap_err();
        assert!(err.is_invalid_parameter());
    }
}
