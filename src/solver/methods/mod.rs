//! Numerical methods implementing the [`Solver`](crate::solver::Solver) trait
//!
//! The abstract interface lives in `solver::traits`, the concrete schemes
//! here. A new scheme is a new file in this module; the trait does not change.
//!
//! # Available Methods
//!
//! - **[`FtcsSolver`]**: explicit Forward-Time Central-Space
//!   - Order: O(dt) in time, O(dx²) in space
//!   - Cost: one 3-point stencil per interior point per step
//!   - Stability: `D dt / dx² <= 1/2`

mod ftcs;

pub use ftcs::FtcsSolver;
