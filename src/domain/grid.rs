//! Uniform 1D grid
//!
//! Coordinates follow the half-open range convention `[start, stop)` with a
//! fixed step, the same layout produced by an `arange(start, stop, step)` call:
//!
//! ```text
//! N   = ceil((stop - start) / step)
//! x_i = start + i * step,   i = 0 .. N-1
//! ```

use crate::error::{DiffusionError, Result, ensure_positive};

/// Largest number of points a grid may hold
///
/// Two field buffers of this size already take 64 GiB.
pub const MAX_POINTS: usize = u32::MAX as usize;

/// Immutable, uniformly spaced 1D grid
///
/// The solver core only ever consumes [`Grid::len`] and [`Grid::spacing`];
/// the coordinates themselves are used for initial profiles and output.
///
/// # Example
///
/// ```rust
/// use diffusion_rs::domain::Grid;
///
/// let grid = Grid::arange(0.0, 300.0, 0.5).unwrap();
/// assert_eq!(grid.len(), 600);
/// assert_eq!(grid.coordinates()[1], 0.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    start: f64,
    stop: f64,
    spacing: f64,
    coordinates: Vec<f64>,
}

impl Grid {
    /// Build the grid `start, start + step, ...` strictly below `stop`
    ///
    /// # Errors
    ///
    /// `InvalidParameter` when `step` is not strictly positive, when bounds are
    /// not finite, when the range is empty (`stop <= start`), or when the
    /// point count would exceed [`MAX_POINTS`].
    pub fn arange(start: f64, stop: f64, step: f64) -> Result<Self> {
        let spacing = ensure_positive("spacing", step)?;

        if !start.is_finite() || !stop.is_finite() {
            return Err(DiffusionError::invalid(
                "domain",
                format!("bounds must be finite, got [{}, {})", start, stop),
            ));
        }
        if stop <= start {
            return Err(DiffusionError::invalid(
                "domain",
                format!("stop ({}) must be greater than start ({})", stop, start),
            ));
        }

        let count = ((stop - start) / spacing).ceil();
        if !count.is_finite() || count > MAX_POINTS as f64 {
            return Err(DiffusionError::invalid(
                "spacing",
                format!(
                    "{} over [{}, {}) gives {} points, more than the limit of {}",
                    spacing, start, stop, count, MAX_POINTS
                ),
            ));
        }
        let n_points = count as usize;

        // Index-based coordinates, no accumulated rounding from repeated additions
        let coordinates = (0..n_points)
            .map(|i| start + i as f64 * spacing)
            .collect();

        Ok(Self {
            start,
            stop,
            spacing,
            coordinates,
        })
    }

    /// Grid on `[0, length)` with the given spacing
    pub fn from_length(length: f64, spacing: f64) -> Result<Self> {
        let length = ensure_positive("length", length)?;
        Self::arange(0.0, length, spacing)
    }

    /// Number of grid points
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    /// True when the grid holds no point (never the case for a constructed grid)
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Uniform spacing `dx`
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Lower bound (first coordinate)
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Exclusive upper bound of the range
    pub fn stop(&self) -> f64 {
        self.stop
    }

    /// Domain length `stop - start`
    pub fn length(&self) -> f64 {
        self.stop - self.start
    }

    /// Centre of the domain, `start + length / 2`
    pub fn midpoint(&self) -> f64 {
        self.start + 0.5 * self.length()
    }

    /// Coordinates in increasing order
    pub fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }

    /// Iterate over coordinates
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.coordinates.iter()
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
