//! Mock right-hand sides for integration tests
//!
//! Each builder returns a closure with the `rhs(t, y)` shape expected by
//! `rk_step` and by hand-driven stage loops. The problems all have known
//! analytical solutions, so tests can check accuracy, not just plumbing.

use rkgrid_rs::grid::{FieldState, GridState};

/// Exponential decay `dy/dt = -rate * y`.
///
/// Analytical solution: `y(t) = y0 * exp(-rate * t)`.
pub fn decay(rate: f64) -> impl Fn(f64, &FieldState) -> FieldState {
    move |_t, y| {
        let mut k = y.clone_state();
        k.apply(|v| -rate * v);
        k
    }
}

/// Constant growth `dy/dt = value`.
///
/// Analytical solution: `y(t) = y0 + value * t`.
pub fn constant(value: f64) -> impl Fn(f64, &FieldState) -> FieldState {
    move |_t, y| {
        let mut k = y.clone_state();
        k.apply(|_| value);
        k
    }
}

/// Zero right-hand side: the state must not move.
pub fn zero() -> impl Fn(f64, &FieldState) -> FieldState {
    constant(0.0)
}

/// Simple harmonic oscillator `d²y/dt² = -omega² y`, written as a
/// first-order system over two variables:
///
/// - variable 0: position, `dy0/dt = y1`
/// - variable 1: velocity, `dy1/dt = -omega² y0`
///
/// With `y0(0) = 1, y1(0) = 0` the solution is `y0(t) = cos(omega t)`.
pub fn harmonic(omega: f64) -> impl Fn(f64, &FieldState) -> FieldState {
    move |_t, y| {
        let mut k = y.clone_state();
        k.var_mut(0).assign(y.var(1));
        let accel = y.var(0).mapv(|p| -omega * omega * p);
        k.var_mut(1).assign(&accel);
        k
    }
}
