//! Common utilities for integration tests

pub mod rhs;
pub mod test_helpers;

// Re-export commonly used items
#[allow(unused_imports)]
pub use rhs::{constant, decay, harmonic, zero};
#[allow(unused_imports)]
pub use test_helpers::{assert_states_close, max_abs_diff, uniform_state};
