//! Grid states
//!
//! This module provides the narrow abstraction the integrator consumes, plus
//! a reference implementation suitable for tests, benchmarks, and small
//! simulations.
//!
//! # Core Concepts
//!
//! - **Grid State** ([`GridState`]): a collection of variable fields of
//!   identical 2D shape, enumerable by index, cloneable with independently
//!   owned storage
//! - **Grid Variable** ([`GridVariable`]): type-safe identifier for a field
//! - **Field State** ([`FieldState`]): the shipped cell-centered container
//!   backed by `ndarray`
//!
//! # Architecture
//!
//! Grid states are **separate from the integrator**:
//! - The state carries the data (fields over a grid)
//! - The integrator combines states and derivatives per the tableau
//!
//! This separation allows the integrator to step any state container —
//! a richer mesh type with ghost cells and boundary conditions implements
//! [`GridState`] the same way [`FieldState`] does.
//!
//! # Example
//!
//! ```rust
//! use rkgrid_rs::grid::{FieldState, Grid2d, GridState, GridVariable};
//!
//! let mut state = FieldState::new(Grid2d::new(16, 16));
//! state.register(GridVariable::Density, 1.0);
//! state.register(GridVariable::Energy, 2.5);
//!
//! assert_eq!(state.nvar(), 2);
//! assert_eq!(state.var(1)[(3, 4)], 2.5);
//!
//! // Clones own their storage: mutating one never affects the other.
//! let mut other = state.clone_state();
//! other.var_mut(0)[(0, 0)] = 9.0;
//! assert_eq!(state.var(0)[(0, 0)], 1.0);
//! ```

// module declaration
pub mod data;
pub mod traits;

// re-export commonly used types for convenience
pub use data::{FieldState, Grid2d};
pub use traits::{GridState, GridVariable};
