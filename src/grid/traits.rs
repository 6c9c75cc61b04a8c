//! Grid-state trait and variable identifiers
//!
//! This module defines the core API the integrator consumes:
//! - `GridState`: trait for steppable field collections
//! - `GridVariable`: type-safe variable identifiers

use ndarray::Array2;
use std::fmt;

// =================================================================================================
// Grid Variables (Type-safe Identifiers)
// =================================================================================================

/// Known field variables (type-safe enum)
///
/// # Enum type safety
///
/// Variables are identified by enum variants rather than strings, so a typo
/// in a variable name is a compile error, not a silent lookup miss. Problems
/// tracking quantities outside the built-in set use `Custom`.
///
/// # Example
/// ```
/// use rkgrid_rs::grid::{FieldState, Grid2d, GridVariable};
///
/// let phi = GridVariable::Custom("phi");
/// let mut state = FieldState::new(Grid2d::new(4, 4));
/// state.register(phi, 0.0);
///
/// assert!(state.get(phi).is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridVariable {
    /// Mass density
    Density,

    /// x-momentum density
    XMomentum,

    /// y-momentum density
    YMomentum,

    /// Total energy density
    Energy,

    /// Custom variable (for use extension)
    Custom(&'static str),
}

impl fmt::Display for GridVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridVariable::Density => write!(f, "density"),
            GridVariable::XMomentum => write!(f, "x-momentum"),
            GridVariable::YMomentum => write!(f, "y-momentum"),
            GridVariable::Energy => write!(f, "energy"),
            GridVariable::Custom(name) => write!(f, "{}", name),
        }
    }
}

// =================================================================================================
// Grid State Trait
// =================================================================================================

/// Trait for steppable grid states
///
/// # Responsibility
///
/// Exposes a collection of variable fields to the integrator. The integrator
/// only ever enumerates variables by index, reads/writes fields element-wise,
/// and clones whole states; everything else a state container does (boundary
/// conditions, ghost cells, coordinate metadata) is invisible to it.
///
/// # Contract
///
/// - All fields of one state share a single 2D shape, and every state cloned
///   from it shares that shape too
/// - `clone_state` returns a state with **independently owned storage**:
///   mutations to the clone never affect the original, and vice versa
/// - Variable indices are stable for the lifetime of a state and its clones:
///   `var(n)` on a clone refers to the same variable as `var(n)` on the
///   original
///
/// # Stability
///
/// This trait is the integration seam of the crate. New capabilities will be
/// added as separate optional traits rather than new required methods.
pub trait GridState {
    /// Number of variable fields (≥ 1 for a useful state)
    fn nvar(&self) -> usize;

    /// Field of the `n`-th variable
    ///
    /// # Panics
    /// Panics when `n >= self.nvar()`.
    fn var(&self, n: usize) -> &Array2<f64>;

    /// Mutable field of the `n`-th variable
    ///
    /// # Panics
    /// Panics when `n >= self.nvar()`.
    fn var_mut(&mut self, n: usize) -> &mut Array2<f64>;

    /// Clone this state into independently owned storage
    fn clone_state(&self) -> Self
    where
        Self: Sized;
}

// =================================================================================================
// Tests
// =================================================================================================
