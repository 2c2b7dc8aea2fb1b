//! Error types for the diffusion solver
//!
//! Two failure families exist in the numerical core:
//!
//! - [`DiffusionError::InvalidParameter`]: rejected input, detected eagerly at
//!   construction or call time before any computation happens.
//! - [`DiffusionError::NumericalInstability`]: a committed field value became
//!   NaN or infinite while stepping.
//!
//! Neither is retried internally. A stepper that reported an instability keeps
//! the field it reached and refuses to step further.

use thiserror::Error;

/// Errors raised by the stability computation and the time stepper
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiffusionError {
    /// A parameter is outside its admissible range
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name as seen by the caller (e.g. "diffusivity")
        name: &'static str,
        /// Human-readable constraint that was violated
        reason: String,
    },

    /// A field value became non-finite after a committed step
    #[error(
        "numerical instability at step {step}: field[{index}] = {value}. \
         The Fourier number D*dt/dx^2 likely exceeds 0.5; derive dt from the stability bound"
    )]
    NumericalInstability {
        /// 1-based step number whose commit produced the bad value
        step: usize,
        /// First grid index holding a non-finite value
        index: usize,
        /// The offending value (NaN or +/-Inf)
        value: f64,
    },
}

impl DiffusionError {
    /// Shorthand constructor for [`DiffusionError::InvalidParameter`]
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// True for [`DiffusionError::InvalidParameter`]
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }

    /// True for [`DiffusionError::NumericalInstability`]
    pub fn is_instability(&self) -> bool {
        matches!(self, Self::NumericalInstability { .. })
    }
}

/// Result alias used throughout the numerical core
pub type Result<T> = std::result::Result<T, DiffusionError>;

/// Check that a scalar parameter is finite and strictly positive
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(DiffusionError::invalid(
            name,
            format!("must be finite, got {}", value),
        ));
    }
    if value <= 0.0 {
        return Err(DiffusionError::invalid(
            name,
            format!("must be strictly positive, got {}", value),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message() {
        let err = DiffusionError::invalid("diffusivity", "must be strictly positive, got 0");
        assert_eq!(
            err.to_string(),
            "invalid parameter `diffusivity`: must be strictly positive, got 0"
        );
        assert!(err.is_invalid_parameter());
        assert!(!err.is_instability());
    }

    #[test]
    fn test_instability_message_mentions_step_and_index() {
        let err = DiffusionError::NumericalInstability {
            step: 42,
            index: 7,
            value: f64::INFINITY,
        };
        let message = err.to_string();
        assert!(message.contains("step 42"));
        assert!(message.contains("field[7]"));
        assert!(err.is_instability());
    }

    #[test]
    fn test_ensure_positive() {
        assert_eq!(ensure_positive("dx", 0.5), Ok(0.5));
        assert!(ensure_positive("dx", 0.0).unwrap_err().is_invalid_parameter());
        assert!(ensure_positive("dx", -1.0).unwrap_err().is_invalid_parameter());
        assert!(ensure_positive("dx", f64::NAN).unwrap_err().is_invalid_parameter());
        assert!(ensure_positive("dx", f64::INFINITY).unwrap_err().is_invalid_parameter());
    }
}
