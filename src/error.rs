//! Error taxonomy for the time-stepping engine
//!
//! Every failure here is a contract violation by the caller (wrong order,
//! stage operations out of sequence, incompatible derivative shapes). The
//! engine never retries or recovers: errors propagate to the simulation
//! driver, which decides whether to abort the run or restart the step.
//! No error condition is ever swallowed or replaced by a numeric default.

use thiserror::Error;

/// Errors reported by the tableau registry and the stage integrator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegratorError {
    /// The requested method order has no registered Butcher tableau.
    #[error("unsupported method order {order}; registered orders are {supported:?}")]
    UnsupportedOrder {
        /// The order that was asked for.
        order: usize,
        /// Orders the registry actually knows about.
        supported: Vec<usize>,
    },

    /// The step size is not a positive finite number.
    #[error("time step must be positive and finite, got {dt}")]
    InvalidTimeStep {
        /// The offending step size.
        dt: f64,
    },

    /// A stage operation was invoked before `set_start` bound the initial
    /// state.
    #[error("start state is not bound; call set_start first")]
    StartNotBound,

    /// `set_start` was called a second time on the same integrator.
    #[error("start state is already bound")]
    StartAlreadyBound,

    /// A stage index at or beyond the method's stage count.
    #[error("stage index {stage} out of range for a {stages}-stage method")]
    StageOutOfRange {
        /// The requested stage index (0-based).
        stage: usize,
        /// Number of stages in the method.
        stages: usize,
    },

    /// A derivative slot was read (or skipped over) before being populated.
    #[error("derivative for stage {stage} not yet available")]
    MissingIncrement {
        /// The unpopulated stage index (0-based).
        stage: usize,
    },

    /// A derivative state carries a different number of variables than the
    /// start state.
    #[error("derivative has {found} variables, start state has {expected}")]
    VariableCountMismatch {
        /// Variable count of the start state.
        expected: usize,
        /// Variable count of the offending derivative.
        found: usize,
    },

    /// A derivative field's grid shape disagrees with the start state's.
    #[error("shape mismatch for variable {var}: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        /// Index of the offending variable.
        var: usize,
        /// Field shape of the start state, `(rows, cols)`.
        expected: (usize, usize),
        /// Field shape of the offending derivative.
        found: (usize, usize),
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_contract() {
        let err = IntegratorError::MissingIncrement { stage: 2 };
        assert_eq!(err.to_string(), "derivative for stage 2 not yet available");

        let err = IntegratorError::UnsupportedOrder {
            order: 3,
            supported: vec![2, 4],
        };
        assert!(err.to_string().contains("unsupported method order 3"));
        assert!(err.to_string().contains("[2, 4]"));
    }

    #[test]
    fn test_errors_are_comparable() {
        assert_eq!(
            IntegratorError::StartNotBound,
            IntegratorError::StartNotBound
        );
        assert_ne!(
            IntegratorError::MissingIncrement { stage: 0 },
            IntegratorError::MissingIncrement { stage: 1 }
        );
    }
}
