//! Helper functions for integration tests

#![allow(dead_code)]

use diffusion_rs::domain::ConcentrationField;
use diffusion_rs::solver::Scenario;
use nalgebra::DVector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Assert that two fields agree pointwise within `tolerance`
pub fn assert_fields_close(
    field1: &[f64],
    field2: &[f64],
    tolerance: f64,
    message: &str,
) {
    assert_eq!(field1.len(), field2.len(), "{}: Dimension mismatch", message);

    for (i, (&v1, &v2)) in field1.iter().zip(field2.iter()).enumerate() {
        let diff = (v1 - v2).abs();
        assert!(
            diff < tolerance,
            "{}: Element {} differs by {} (tolerance {})",
            message, i, diff, tolerance
        );
    }
}

/// Root-mean-square difference between two fields
pub fn compute_l2_error(field1: &[f64], field2: &[f64]) -> f64 {
    if field1.is_empty() {
        return 0.0;
    }

    let sum_squared_diff: f64 = field1
        .iter()
        .zip(field2.iter())
        .map(|(v1, v2)| (v1 - v2).powi(2))
        .sum();

    (sum_squared_diff / field1.len() as f64).sqrt()
}

/// Largest pointwise difference between two fields
pub fn max_abs_diff(field1: &[f64], field2: &[f64]) -> f64 {
    field1
        .iter()
        .zip(field2.iter())
        .map(|(v1, v2)| (v1 - v2).abs())
        .fold(0.0, f64::max)
}

/// Step scenario on `[0, length)` with D = 1
pub fn create_step_scenario(length: f64, spacing: f64, c_left: f64, c_right: f64) -> Scenario {
    Scenario::step(length, spacing, 1.0, c_left, c_right).unwrap()
}

/// Reproducible random field with values in `[0, scale)`
pub fn random_field(n_points: usize, seed: u64, scale: f64) -> ConcentrationField {
    let mut rng = StdRng::seed_from_u64(seed);
    DVector::from_fn(n_points, |_, _| rng.gen_range(0.0..scale))
}
