//! Properties of the FTCS stepper
//!
//! Golden cases pin the exact arithmetic of the update; proptest covers the
//! invariants that must hold for every valid parameter combination.

use approx::assert_relative_eq;
use diffusion_rs::domain::{Grid, StepProfile, linear_profile, step_like};
use diffusion_rs::solver::{
    DiffusionStepper, ModelParameters, StabilityConfig, compute_dt, compute_next,
};
use nalgebra::DVector;
use proptest::prelude::*;

mod common;
use common::{assert_fields_close, max_abs_diff, random_field};

// =================================================================================================
// Stability formula
// =================================================================================================

#[test]
fn golden_reference_time_step() {
    // D = 100, dx = 0.5 → dt = 0.5 * 0.25 / 100
    assert_eq!(compute_dt(100.0, 0.5).unwrap(), 0.00125);
}

proptest! {
    #[test]
    fn prop_compute_dt_matches_formula(d in 1e-3_f64..1e3, dx in 1e-3_f64..10.0) {
        let dt = compute_dt(d, dx).unwrap();
        let expected = 0.5 * dx * dx / d;
        prop_assert!((dt - expected).abs() <= 4.0 * f64::EPSILON * expected);

        let r = d * dt / (dx * dx);
        prop_assert!((r - 0.5).abs() <= 1e-14, "r = {}", r);
        prop_assert!(StabilityConfig::new(d, dx).unwrap().is_stable(dt));
    }
}

#[test]
fn malformed_stability_input_is_rejected() {
    assert!(compute_dt(0.0, 1.0).unwrap_err().is_invalid_parameter());
    assert!(compute_dt(1.0, 0.0).unwrap_err().is_invalid_parameter());
    assert!(compute_dt(-1.0, 1.0).unwrap_err().is_invalid_parameter());
    assert!(compute_dt(f64::NAN, 1.0).unwrap_err().is_invalid_parameter());
}

// =================================================================================================
// Single step and zero steps
// =================================================================================================

#[test]
fn golden_single_step_five_points() {
    let params = ModelParameters::stable(1.0, 1.0).unwrap();
    assert_eq!(params.alpha(), 0.5);

    let mut stepper =
        DiffusionStepper::new(DVector::from_vec(vec![10.0, 10.0, 0.0, 0.0, 0.0]), params).unwrap();
    stepper.step(1).unwrap();

    assert_eq!(stepper.field().as_slice(), &[10.0, 5.0, 5.0, 0.0, 0.0]);
    assert_eq!(stepper.steps_taken(), 1);
}

#[test]
fn compute_next_reads_only_previous_level() {
    // An in-place sweep would read the already updated C[1] when computing C[2]
    let current = [10.0, 10.0, 0.0, 0.0, 0.0];
    let mut next = [0.0; 5];
    compute_next(&current, &mut next, 0.5);

    assert_eq!(next, [10.0, 5.0, 5.0, 0.0, 0.0]);
}

#[test]
fn zero_steps_is_bit_identical() {
    let initial = random_field(64, 7, 100.0);
    let params = ModelParameters::stable(3.0, 0.25).unwrap();
    let mut stepper = DiffusionStepper::new(initial.clone(), params).unwrap();

    stepper.step(0).unwrap();

    for (a, b) in stepper.field().iter().zip(initial.iter()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
    assert_eq!(stepper.steps_taken(), 0);
}

#[test]
fn split_runs_match_single_run() {
    let params = ModelParameters::stable(1.0, 1.0).unwrap();
    let initial = random_field(40, 11, 1.0);

    let mut once = DiffusionStepper::new(initial.clone(), params).unwrap();
    once.step(300).unwrap();

    let mut split = DiffusionStepper::new(initial, params).unwrap();
    split.step(100).unwrap();
    split.step(150).unwrap();
    for _ in 0..50 {
        split.step_once().unwrap();
    }

    assert_eq!(once.field(), split.field());
    assert_eq!(once.steps_taken(), split.steps_taken());
}

// =================================================================================================
// Boundary invariance and maximum principle
// =================================================================================================

proptest! {
    #[test]
    fn prop_boundaries_never_move(
        n_points in 3_usize..80,
        seed in any::<u64>(),
        d in 0.1_f64..10.0,
        dx in 0.05_f64..2.0,
        n_steps in 0_usize..200,
    ) {
        let initial = random_field(n_points, seed, 50.0);
        let (left, right) = (initial[0], initial[n_points - 1]);

        let mut stepper = DiffusionStepper::with_stable_step(initial, d, dx).unwrap();
        stepper.step(n_steps).unwrap();

        let field = stepper.field();
        prop_assert_eq!(field[0].to_bits(), left.to_bits());
        prop_assert_eq!(field[n_points - 1].to_bits(), right.to_bits());
    }

    #[test]
    fn prop_stable_step_respects_initial_bounds(
        n_points in 3_usize..60,
        seed in any::<u64>(),
        n_steps in 1_usize..300,
    ) {
        let initial = random_field(n_points, seed, 10.0);
        let lo = initial.min();
        let hi = initial.max();

        let mut stepper = DiffusionStepper::with_stable_step(initial, 2.0, 0.5).unwrap();
        stepper.step(n_steps).unwrap();

        let tol = 1e-12 * hi.abs().max(1.0);
        for &c in stepper.field().iter() {
            prop_assert!(c >= lo - tol && c <= hi + tol, "{} outside [{}, {}]", c, lo, hi);
        }
    }
}

// =================================================================================================
// Convergence to the linear steady state
// =================================================================================================

#[test]
fn step_profile_converges_to_linear_profile() {
    let grid = Grid::from_length(20.0, 1.0).unwrap();
    let n = grid.len();
    let initial = StepProfile::centred(&grid, 1.0, 0.0).sample(&grid);

    let mut stepper = DiffusionStepper::with_stable_step(initial, 1.0, grid.spacing()).unwrap();
    let target = linear_profile(n, 1.0, 0.0);

    // Sup-norm distance to the steady state never grows
    let mut previous = max_abs_diff(stepper.field().as_slice(), target.as_slice());
    for _ in 0..50 {
        stepper.step(100).unwrap();
        let distance = max_abs_diff(stepper.field().as_slice(), target.as_slice());
        assert!(distance <= previous + 1e-12, "{} > {}", distance, previous);
        previous = distance;
    }

    assert_fields_close(
        stepper.field().as_slice(),
        target.as_slice(),
        1e-6,
        "after 5000 steps",
    );

    let field = stepper.field();
    for i in 1..n - 1 {
        assert!(field[i] > 0.0 && field[i] < 1.0, "C[{}] = {}", i, field[i]);
        assert!(field[i] < field[i - 1], "not decreasing at {}", i);
    }
}

#[test]
fn reference_scenario_keeps_boundaries_and_stays_bounded() {
    let grid = Grid::from_length(300.0, 0.5).unwrap();
    assert_eq!(grid.len(), 600);

    let initial = StepProfile::centred(&grid, 500.0, 0.0).sample(&grid);
    let mut stepper = DiffusionStepper::with_stable_step(initial, 100.0, grid.spacing()).unwrap();
    stepper.step(5000).unwrap();

    assert_relative_eq!(stepper.elapsed_time(), 6.25, max_relative = 1e-12);

    let field = stepper.field();
    assert_eq!(field[0], 500.0);
    assert_eq!(field[599], 0.0);
    for i in 1..599 {
        assert!(field[i] >= -1e-9 && field[i] <= 500.0 + 1e-9, "C[{}] = {}", i, field[i]);
        assert!(field[i] <= field[i - 1] + 1e-9, "not monotonic at {}", i);
    }
}

// =================================================================================================
// Failure modes
// =================================================================================================

#[test]
fn oversized_alpha_raises_instability() {
    // alpha = 1, twice the stability bound
    let params = ModelParameters::with_time_step(1.0, 1.0, 1.0).unwrap();
    assert_eq!(params.alpha(), 1.0);

    let mut stepper = DiffusionStepper::new(random_field(32, 3, 1.0), params).unwrap();
    let err = stepper.step(10_000).unwrap_err();

    assert!(err.is_instability());
    assert!(!stepper.is_valid());
    assert!(stepper.steps_taken() < 10_000);

    // The stored failure is returned again, no further stepping
    let steps = stepper.steps_taken();
    assert!(stepper.step(1).unwrap_err().is_instability());
    assert_eq!(stepper.steps_taken(), steps);
}

#[test]
fn two_point_field_is_rejected() {
    let params = ModelParameters::stable(1.0, 1.0).unwrap();
    let err = DiffusionStepper::new(DVector::from_vec(vec![1.0, 0.0]), params).unwrap_err();
    assert!(err.is_invalid_parameter());
}

#[test]
fn non_finite_initial_field_is_rejected() {
    let params = ModelParameters::stable(1.0, 1.0).unwrap();
    let err = DiffusionStepper::new(DVector::from_vec(vec![1.0, f64::NAN, 0.0]), params)
        .unwrap_err();
    assert!(err.is_invalid_parameter());
}

// =================================================================================================
// Helpers shared with notebook-style drivers
// =================================================================================================

#[test]
fn step_like_matches_input_length() {
    let grid = Grid::arange(0.0, 100.0, 1.0).unwrap();
    let profile = step_like(grid.coordinates());

    assert_eq!(profile.len(), 100);
    assert_eq!(profile[0], 1.0);
    assert_eq!(profile[99], 0.0);
}

#[test]
fn stable_step_is_a_float() {
    let dt: f64 = compute_dt(1.0, 0.1).unwrap();
    assert!(dt.is_finite() && dt > 0.0);
}

#[test]
fn seeded_random_fields_are_reproducible_and_bounded() {
    let a = random_field(128, 42, 5.0);
    let b = random_field(128, 42, 5.0);
    assert_eq!(a, b);
    assert!(a.iter().all(|&v| (0.0..5.0).contains(&v)));
    assert_ne!(a, random_field(128, 43, 5.0));
}
