//! Accuracy and convergence tests
//!
//! Multi-step integrations against problems with known analytical solutions.
//! The convergence tests check the observed order (error ratio when halving
//! dt), which is the property the stage recurrence silently corrupts when a
//! coefficient index or accumulation order is wrong.

mod common;

use common::{rhs, uniform_state};
use rkgrid_rs::grid::{GridState, GridVariable};
use rkgrid_rs::integrator::rk_step;

/// Integrate dy/dt = -rate * y from y(0) = 1 over `total_time` in `steps`
/// uniform steps; returns the final value at one cell.
fn integrate_decay(order: usize, rate: f64, total_time: f64, steps: usize) -> f64 {
    let dt = total_time / steps as f64;
    let mut state = uniform_state(4, 4, &[(GridVariable::Density, 1.0)]);

    for n in 0..steps {
        let t = n as f64 * dt;
        state = rk_step(t, dt, order, state, rhs::decay(rate)).unwrap();
    }
    state.var(0)[(0, 0)]
}

#[test]
fn test_midpoint_convergence_is_second_order() {
    let rate: f64 = 1.0;
    let total_time = 2.0;
    let exact = (-rate * total_time).exp();

    let vsteps = [10, 20, 40, 80];
    let errors: Vec<f64> = vsteps
        .iter()
        .map(|&steps| (integrate_decay(2, rate, total_time, steps) - exact).abs())
        .collect();

    // Second order: halving dt divides the error by ~4.
    for i in 0..errors.len() - 1 {
        let ratio = errors[i] / errors[i + 1];
        assert!(
            ratio > 3.2 && ratio < 4.8,
            "convergence ratio {} is not second-order at step {}",
            ratio,
            i
        );
    }
}

#[test]
fn test_rk4_convergence_is_fourth_order() {
    let rate: f64 = 1.0;
    let total_time = 2.0;
    let exact = (-rate * total_time).exp();

    let vsteps = [10, 20, 40, 80];
    let errors: Vec<f64> = vsteps
        .iter()
        .map(|&steps| (integrate_decay(4, rate, total_time, steps) - exact).abs())
        .collect();

    // Fourth order: halving dt divides the error by ~16.
    for i in 0..errors.len() - 1 {
        let ratio = errors[i] / errors[i + 1];
        assert!(
            ratio > 12.0 && ratio < 20.0,
            "convergence ratio {} is not fourth-order at step {}",
            ratio,
            i
        );
    }
}

#[test]
fn test_rk4_exponential_decay_accuracy() {
    // dt = 0.1 with rate 0.1: O(dt^4) error, comfortably under 1e-4.
    let rate: f64 = 0.1;
    let total_time = 10.0;
    let exact = (-rate * total_time).exp();

    let numerical = integrate_decay(4, rate, total_time, 100);
    let error = (numerical - exact).abs();
    assert!(error < 1e-4, "error {} is too large for RK4", error);
}

#[test]
fn test_midpoint_exponential_decay_accuracy() {
    // O(dt^2) error with dt = 0.1 and rate 0.1.
    let rate: f64 = 0.1;
    let total_time = 10.0;
    let exact = (-rate * total_time).exp();

    let numerical = integrate_decay(2, rate, total_time, 100);
    let error = (numerical - exact).abs();
    assert!(error < 1e-3, "error {} is too large for midpoint", error);
}

#[test]
fn test_constant_growth_is_exact() {
    // dy/dt = c => y(T) = y0 + c*T; any consistent RK method is exact here
    // (within floating-point rounding) because the derivative is constant.
    let growth_rate = 2.0;
    let total_time = 10.0;
    let steps = 100;
    let dt = total_time / steps as f64;

    for order in [2, 4] {
        let mut state = uniform_state(4, 4, &[(GridVariable::Density, 0.0)]);
        for n in 0..steps {
            state = rk_step(n as f64 * dt, dt, order, state, rhs::constant(growth_rate)).unwrap();
        }

        let expected = growth_rate * total_time;
        let actual = state.var(0)[(0, 0)];
        assert!(
            (actual - expected).abs() < 1e-10,
            "order {}: expected {}, got {}",
            order,
            expected,
            actual
        );
    }
}

#[test]
fn test_zero_rhs_is_identity_over_many_steps() {
    let mut state = uniform_state(4, 4, &[(GridVariable::Density, 1.7)]);
    for n in 0..50 {
        state = rk_step(n as f64 * 0.1, 0.1, 4, state, rhs::zero()).unwrap();
    }
    assert!(state.var(0).iter().all(|&v| v == 1.7));
}

#[test]
fn test_rk4_harmonic_oscillator_period() {
    // d²y/dt² = -omega² y with omega = 1: after one full period 2π the
    // position returns to its initial value, y(2π) = cos(2π) = 1.
    let omega = 1.0;
    let period = 2.0 * std::f64::consts::PI;
    let steps = 100;
    let dt = period / steps as f64;

    let mut state = uniform_state(
        4,
        4,
        &[
            (GridVariable::Custom("position"), 1.0),
            (GridVariable::Custom("velocity"), 0.0),
        ],
    );

    for n in 0..steps {
        state = rk_step(n as f64 * dt, dt, 4, state, rhs::harmonic(omega)).unwrap();
    }

    let position = state.var(0)[(0, 0)];
    assert!(
        (position - 1.0).abs() < 0.01,
        "position after one period is {}",
        position
    );
}
