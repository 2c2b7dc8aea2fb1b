//! Stable time-step selection for the explicit FTCS scheme
//!
//! # Mathematical Background
//!
//! For the update
//!
//! ```text
//! C_i^{n+1} = C_i^n + r * (C_{i-1}^n - 2 C_i^n + C_{i+1}^n),    r = D dt / dx^2
//! ```
//!
//! a von Neumann analysis gives the amplification factor
//! `g(k) = 1 - 4 r sin^2(k dx / 2)`. Requiring `|g| <= 1` for every
//! wavenumber reduces to `r <= 1/2`.
//!
//! The time step is derived from that bound, using the bound itself:
//!
//! ```text
//! dt = 0.5 * dx^2 / D
//! ```
//!
//! There is no extra safety margin: the Fourier number of the derived step is
//! exactly 0.5 up to floating-point rounding.

use crate::error::{Result, ensure_positive};

/// Largest Fourier number `D dt / dx^2` for which 1D FTCS is stable
pub const STABILITY_FACTOR: f64 = 0.5;

/// Compute the stable time step `dt = 0.5 * dx^2 / D`
///
/// # Errors
///
/// `InvalidParameter` when `diffusivity` or `spacing` is zero, negative or not
/// finite.
///
/// # Example
///
/// ```rust
/// use diffusion_rs::solver::compute_dt;
///
/// let dt = compute_dt(100.0, 0.5).unwrap();
/// assert_eq!(dt, 0.00125);
/// ```
pub fn compute_dt(diffusivity: f64, spacing: f64) -> Result<f64> {
    StabilityConfig::new(diffusivity, spacing).map(|config| config.time_step())
}

/// Validated `(D, dx)` pair from which the stable time step is derived
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityConfig {
    diffusivity: f64,
    spacing: f64,
}

impl StabilityConfig {
    /// Validate diffusivity and spacing
    ///
    /// Both must be finite and strictly positive. Values are never clamped.
    pub fn new(diffusivity: f64, spacing: f64) -> Result<Self> {
        Ok(Self {
            diffusivity: ensure_positive("diffusivity", diffusivity)?,
            spacing: ensure_positive("spacing", spacing)?,
        })
    }

    pub fn diffusivity(&self) -> f64 {
        self.diffusivity
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Stable time step `STABILITY_FACTOR * dx^2 / D`
    pub fn time_step(&self) -> f64 {
        STABILITY_FACTOR * self.spacing * self.spacing / self.diffusivity
    }

    /// Fourier number `D dt / dx^2` for an arbitrary time step
    pub fn fourier_number(&self, time_step: f64) -> f64 {
        self.diffusivity * time_step / (self.spacing * self.spacing)
    }

    /// True when `time_step` keeps the scheme inside the stability bound
    ///
    /// A small relative tolerance absorbs the rounding of the derived step,
    /// whose Fourier number can land one ulp above 0.5.
    pub fn is_stable(&self, time_step: f64) -> bool {
        self.fourier_number(time_step) <= STABILITY_FACTOR * (1.0 + 4.0 * f64::EPSILON)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_compute_dt_formula() {
        // dt = 0.5 * 0.5^2 / 100 = 0.00125
        assert_relative_eq!(compute_dt(100.0, 0.5).unwrap(), 0.00125, epsilon = 1e-15);
        assert_relative_eq!(compute_dt(1.0, 1.0).unwrap(), 0.5, epsilon = 1e-15);
        assert_relative_eq!(compute_dt(2.0, 0.1).unwrap(), 0.0025, epsilon = 1e-15);
    }

    #[test]
    fn test_compute_dt_is_float_and_positive() {
        let dt: f64 = compute_dt(1.0, 1.0).unwrap();
        assert!(dt > 0.0);
    }

    #[test]
    fn test_derived_step_sits_on_the_bound() {
        let config = StabilityConfig::new(100.0, 0.5).unwrap();
        let dt = config.time_step();
        assert_relative_eq!(config.fourier_number(dt), 0.5, epsilon = 1e-14);
        assert!(config.is_stable(dt));
    }

    #[test]
    fn test_oversized_step_is_unstable() {
        let config = StabilityConfig::new(1.0, 1.0).unwrap();
        assert!(!config.is_stable(0.6));
        assert!(config.is_stable(0.25));
    }

    #[test]
    fn test_zero_diffusivity_rejected() {
        let err = compute_dt(0.0, 1.0).unwrap_err();
        assert!(err.is_invalid_parameter());
        assert!(err.to_string().contains("diffusivity"));
    }

    #[test]
    fn test_zero_spacing_rejected() {
        let err = compute_dt(1.0, 0.0).unwrap_err();
        assert!(err.is_invalid_parameter());
        assert!(err.to_string().contains("spacing"));
    }

    #[test]
    fn test_negative_and_non_finite_rejected() {
        assert!(compute_dt(-1.0, 1.0).is_err());
        assert!(compute_dt(1.0, -0.5).is_err());
        assert!(compute_dt(f64::NAN, 1.0).is_err());
        assert!(compute_dt(1.0, f64::INFINITY).is_err());
    }
}
