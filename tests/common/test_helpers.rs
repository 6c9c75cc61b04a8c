//! Helper functions for integration tests

use rkgrid_rs::grid::{FieldState, Grid2d, GridState, GridVariable};

/// Build a state with the given uniformly filled variables.
pub fn uniform_state(nx: usize, ny: usize, variables: &[(GridVariable, f64)]) -> FieldState {
    let mut state = FieldState::new(Grid2d::new(nx, ny));
    for &(variable, value) in variables {
        state.register(variable, value);
    }
    state
}

/// Largest element-wise difference across all variables.
pub fn max_abs_diff(state1: &FieldState, state2: &FieldState) -> f64 {
    assert_eq!(state1.nvar(), state2.nvar(), "variable count mismatch");

    let mut max_diff: f64 = 0.0;
    for n in 0..state1.nvar() {
        for (&v1, &v2) in state1.var(n).iter().zip(state2.var(n).iter()) {
            max_diff = max_diff.max((v1 - v2).abs());
        }
    }
    max_diff
}

/// Assert that two states are element-wise close (within tolerance).
pub fn assert_states_close(
    state1: &FieldState,
    state2: &FieldState,
    tolerance: f64,
    message: &str,
) {
    assert_eq!(
        state1.nvar(),
        state2.nvar(),
        "{}: variable count mismatch",
        message
    );

    for n in 0..state1.nvar() {
        let field1 = state1.var(n);
        let field2 = state2.var(n);
        assert_eq!(field1.dim(), field2.dim(), "{}: shape mismatch", message);

        for ((index, &v1), &v2) in field1.indexed_iter().zip(field2.iter()) {
            let diff = (v1 - v2).abs();
            assert!(
                diff < tolerance,
                "{}: variable {} at {:?} differs by {} (tolerance {})",
                message,
                n,
                index,
                diff,
                tolerance
            );
        }
    }
}
