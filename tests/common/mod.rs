//! Common utilities for integration tests

pub mod test_helpers;

// Re-export commonly used items; each test binary uses a subset
#[allow(unused_imports)]
pub use test_helpers::{
    assert_fields_close,
    compute_l2_error,
    create_step_scenario,
    max_abs_diff,
    random_field,
};
