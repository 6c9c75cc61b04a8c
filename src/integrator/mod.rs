//! Explicit Runge-Kutta stage integration
//!
//! This module contains the two halves of the time-stepping engine:
//!
//! 1. **Tableau registry** (`tableau`) — the fixed set of known explicit
//!    methods, keyed by order, looked up via [`tableau()`]
//! 2. **Stage integrator** (`rk`) — [`RkIntegrator`], bound to one step
//!    `[t, t + dt]` and one method, plus the [`rk_step`] convenience driver
//!
//! # The Caller Contract
//!
//! The integrator never evaluates physics. For each stage `i` in order, the
//! caller:
//!
//! 1. asks for the stage time ([`RkIntegrator::stage_time`]) and the stage
//!    evaluation state ([`RkIntegrator::stage_start`])
//! 2. evaluates the right-hand side externally
//! 3. reports the derivative back ([`RkIntegrator::store_increment`])
//!
//! and finally asks for the combined update
//! ([`RkIntegrator::compute_final_update`]). Each transition is checked: a
//! skipped stage, an unbound start state, or a derivative of the wrong shape
//! is a typed [`IntegratorError`](crate::IntegratorError), never a silently
//! wrong number.
//!
//! # Choosing an Order
//!
//! - **Order 2** (explicit midpoint): 2 evaluations per step, error O(dt²).
//!   Good for cheap prototyping and strongly damped problems.
//! - **Order 4** (classical RK4): 4 evaluations per step, error O(dt⁴).
//!   The default choice for non-stiff production stepping.

// =================================================================================================
// Module Declarations
// =================================================================================================
mod rk;
pub mod tableau;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// Deciding *when* to hand the element-wise accumulation kernel off to Rayon
// is an execution concern of the integrator, not a property of the grid
// state, so it lives here rather than in grid/.
//
// The threshold is stored in an AtomicUsize so that benchmarks and tests can
// change it at runtime without a mutex on every kernel call. Relaxed
// ordering is sufficient: the value is a performance hint, not a
// synchronisation point.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of field elements above which the accumulation kernel
/// switches to parallel iteration.
///
/// Below roughly a thousand elements the cost of Rayon's thread-pool
/// dispatch exceeds the per-element work of a fused multiply-add.
const DEFAULT_PARALLEL_THRESHOLD: usize = 999;

/// Runtime-configurable parallel-execution threshold.
///
/// Read via [`parallel_threshold()`], written via [`set_parallel_threshold()`].
static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// The stage-combination kernel iterates sequentially over a field with
/// fewer elements than this value and hands larger fields to Rayon — but
/// only when the crate is compiled with the `parallel` feature.
///
/// # Example
///
/// ```rust
/// use rkgrid_rs::integrator::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`: that would force parallel dispatch even for
/// single-element fields, which is never intended.
///
/// # Example
///
/// ```rust
/// use rkgrid_rs::integrator::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(4096);
/// assert_eq!(parallel_threshold(), 4096);
///
/// // Restore so other tests are not affected.
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// RAII guard that saves the current threshold on construction and restores
/// it on drop.
///
/// Only compiled in test builds. Prevents one test from leaking a modified
/// threshold into the next.
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
}

#[cfg(test)]
impl ThresholdGuard {
    /// Set the threshold to `new_value` and return a guard that restores the
    /// previous value on drop.
    pub(crate) fn save(new_value: usize) -> Self {
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        // Store directly so restoring any saved value never panics.
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use rk::{rk_step, RkIntegrator};
pub use tableau::{supported_orders, tableau, ButcherTableau};

// =================================================================================================
// Tests
// =================================================================================================
