//! Dirichlet boundary values
//!
//! The two boundary values are taken from the initial field (first and last
//! entries) and then pinned for the whole run. The FTCS kernel never writes
//! indices `0` and `N-1`, so [`DirichletBoundaries::apply`] is a re-assertion
//! rather than a correction.

use std::fmt;

use crate::error::{DiffusionError, Result};

/// Fixed concentrations at both ends of the domain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirichletBoundaries {
    /// Value pinned at index 0
    pub left: f64,
    /// Value pinned at index N-1
    pub right: f64,
}

impl DirichletBoundaries {
    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    /// Read the boundary values off a field
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for an empty field.
    pub fn from_field(field: &[f64]) -> Result<Self> {
        match (field.first(), field.last()) {
            (Some(&left), Some(&right)) => Ok(Self::new(left, right)),
            _ => Err(DiffusionError::invalid("field", "cannot read boundaries of an empty field")),
        }
    }

    /// Write both values into `field`
    pub fn apply(&self, field: &mut [f64]) {
        if let Some(first) = field.first_mut() {
            *first = self.left;
        }
        if let Some(last) = field.last_mut() {
            *last = self.right;
        }
    }

    /// True when `field` carries exactly these boundary values
    pub fn holds(&self, field: &[f64]) -> bool {
        field.first() == Some(&self.left) && field.last() == Some(&self.right)
    }
}

impl fmt::Display for DirichletBoundaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C(x=0) = {}, C(x=L) = {}", self.left, self.right)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
