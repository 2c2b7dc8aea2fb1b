//! Initial and reference concentration profiles

use nalgebra::DVector;

use super::{ConcentrationField, Grid};

/// Step-function profile: `high` up to and including `split`, `low` beyond it
///
/// # Example
///
/// ```rust
/// use diffusion_rs::domain::{Grid, StepProfile};
///
/// let grid = Grid::from_length(4.0, 1.0).unwrap();   // 0, 1, 2, 3
/// let field = StepProfile::centred(&grid, 500.0, 0.0).sample(&grid);
/// assert_eq!(field.as_slice(), &[500.0, 500.0, 500.0, 0.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepProfile {
    /// Value for `x <= split`
    pub high: f64,
    /// Value for `x > split`
    pub low: f64,
    /// Position of the discontinuity
    pub split: f64,
}

impl StepProfile {
    pub fn new(high: f64, low: f64, split: f64) -> Self {
        Self { high, low, split }
    }

    /// Step located at the centre of the grid's domain
    ///
    /// `left` is assigned where `x <= Lx / 2`, `right` elsewhere. The boundary
    /// values of the resulting field are therefore `left` and `right`.
    pub fn centred(grid: &Grid, left: f64, right: f64) -> Self {
        Self::new(left, right, grid.midpoint())
    }

    /// Value of the profile at `x`
    pub fn value_at(&self, x: f64) -> f64 {
        if x <= self.split { self.high } else { self.low }
    }

    /// Evaluate the profile on every grid coordinate
    pub fn sample(&self, grid: &Grid) -> ConcentrationField {
        self.sample_slice(grid.coordinates())
    }

    /// Evaluate the profile on arbitrary coordinates
    pub fn sample_slice(&self, coordinates: &[f64]) -> ConcentrationField {
        DVector::from_iterator(
            coordinates.len(),
            coordinates.iter().map(|&x| self.value_at(x)),
        )
    }
}

/// Unit step shaped like `coordinates`
///
/// Returns a field of the same length with `1.0` up to the midpoint of the
/// coordinate span (first to last value) and `0.0` beyond it.
pub fn step_like(coordinates: &[f64]) -> ConcentrationField {
    let (Some(&first), Some(&last)) = (coordinates.first(), coordinates.last()) else {
        return DVector::zeros(0);
    };

    StepProfile::new(1.0, 0.0, 0.5 * (first + last)).sample_slice(coordinates)
}

/// Linear profile joining `left` at index 0 to `right` at index N-1
///
/// This is the steady state of the Dirichlet problem on `n_points` nodes, the
/// profile an FTCS run converges to as the step count grows.
pub fn linear_profile(n_points: usize, left: f64, right: f64) -> ConcentrationField {
    if n_points < 2 {
        return DVector::from_element(n_points, left);
    }

    let last = (n_points - 1) as f64;
    DVector::from_fn(n_points, |i, _| {
        let t = i as f64 / last;
        left * (1.0 - t) + right * t
    })
}

// =================================================================================================
// Tests
// =================================================================================================
