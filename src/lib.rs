//! rkgrid-rs: Explicit Runge-Kutta time stepping for cell-centered grid data
//!
//! A small, physics-agnostic engine for advancing a collection of named field
//! variables on a 2D cell-centered grid by one time step, using any explicit
//! Runge-Kutta method described by a Butcher tableau.
//!
//! # Architecture
//!
//! rkgrid-rs is built on two core principles:
//!
//! 1. **Separation of Physics and Numerics**
//!    - The caller owns the physics: it evaluates the right-hand side
//!      `f(t, y)` for each stage
//!    - The integrator owns the numerics: stage ordering, coefficient
//!      indexing, and the combination of stage states and derivatives
//!
//! 2. **Contract Enforcement over Convention**
//!    - Stage derivatives must be supplied in order; skipping one is a typed
//!      error, never a silent zero
//!    - Finalizing a step consumes the integrator, so there is exactly one
//!      logical state after each step
//!
//! # Quick Start
//!
//! ```rust
//! use rkgrid_rs::grid::{FieldState, Grid2d, GridState, GridVariable};
//! use rkgrid_rs::integrator::rk_step;
//!
//! # fn main() -> Result<(), rkgrid_rs::IntegratorError> {
//! // 1. Build a state: one density field on an 8x8 grid
//! let mut state = FieldState::new(Grid2d::new(8, 8));
//! state.register(GridVariable::Density, 1.0);
//!
//! // 2. Advance one midpoint (order 2) step of dy/dt = -0.5 y
//! let next = rk_step(0.0, 0.1, 2, state, |_t, y| {
//!     let mut k = y.clone_state();
//!     k.apply(|v| -0.5 * v);
//!     k
//! })?;
//!
//! assert!((next.var(0)[(0, 0)] - 0.95125).abs() < 1e-12);
//! # Ok(())
//! # }
//! ```
//!
//! The stage loop can also be driven by hand when the physics evaluation does
//! not fit a closure (e.g. it lives in another module or across an FFI
//! boundary); see [`integrator::RkIntegrator`].
//!
//! # Modules
//!
//! - [`grid`]: the grid-state abstraction and a reference implementation
//! - [`integrator`]: Butcher tableaux and the stage integrator
//! - [`error`]: the error taxonomy shared by both

// Core modules
pub mod error;
pub mod grid;
pub mod integrator;

pub use error::IntegratorError;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use rkgrid_rs::prelude::*;
    //! ```
    pub use crate::error::IntegratorError;
    pub use crate::grid::{FieldState, Grid2d, GridState, GridVariable};
    pub use crate::integrator::{rk_step, ButcherTableau, RkIntegrator};
}
