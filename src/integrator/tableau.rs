//! Butcher tableau registry
//!
//! # Mathematical Background
//!
//! An explicit Runge-Kutta method is fully described by its Butcher tableau:
//!
//! ```text
//! 0   |
//! c_2 | a_21
//! c_3 | a_31 a_32
//! :   |  :        .
//! c_s | a_s1 a_s2 ... a_s,s-1
//! ----+---------------------------
//!     | b_1  b_2  ... b_{s-1}  b_s
//! ```
//!
//! One step of the method is
//!
//! ```text
//! y_{n+1} = y_n + dt * sum_{i=1}^{s} b_i k_i
//! ```
//!
//! with the stage derivatives
//!
//! ```text
//! k_i = f(t + c_i dt, y_n + dt * (a_i1 k_1 + ... + a_i,i-1 k_{i-1}))
//! ```
//!
//! The registry holds a fixed set of classical tableaux keyed by method
//! order. It is populated once on first access and never mutated, so a
//! `&'static ButcherTableau` can be shared freely across threads and across
//! any number of concurrently running integrators.

use nalgebra::{DMatrix, DVector};
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::error::IntegratorError;

// =================================================================================================
// Butcher Tableau
// =================================================================================================

/// Coefficients of one explicit Runge-Kutta method
///
/// Holds the stage-coupling matrix `a` (strictly lower triangular), the final
/// combination weights `b`, and the stage time offsets `c`.
///
/// # Registry preconditions
///
/// Tableaux are only constructed inside this module, and registered ones
/// satisfy the classical consistency conditions: `sum(b) == 1`, `c[0] == 0`,
/// and `c[i] == sum(a[i][..i])`. The integrator assumes these hold and never
/// re-checks them at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct ButcherTableau {
    /// Stage-coupling coefficients, s×s, zero on and above the diagonal
    a: DMatrix<f64>,

    /// Final combination weights, length s
    b: DVector<f64>,

    /// Stage time offsets in [0, 1], length s
    c: DVector<f64>,
}

impl ButcherTableau {
    /// Build a tableau from row-major `a` and the weight/offset vectors.
    ///
    /// # Panics
    /// Panics when the dimensions disagree or `a` is not strictly lower
    /// triangular. Both would be registry bugs, not runtime conditions.
    fn new(stages: usize, a: &[f64], b: &[f64], c: &[f64]) -> Self {
        let a = DMatrix::from_row_slice(stages, stages, a);
        let b = DVector::from_row_slice(b);
        let c = DVector::from_row_slice(c);

        assert_eq!(b.len(), stages, "weight vector length disagrees with stage count");
        assert_eq!(c.len(), stages, "offset vector length disagrees with stage count");
        for i in 0..stages {
            for j in i..stages {
                assert_eq!(
                    a[(i, j)],
                    0.0,
                    "a[{},{}] must be zero for an explicit method",
                    i,
                    j
                );
            }
        }

        Self { a, b, c }
    }

    /// Number of stages
    pub fn stages(&self) -> usize {
        self.b.len()
    }

    /// Stage-coupling coefficient `a[i][j]`
    pub fn a(&self, i: usize, j: usize) -> f64 {
        self.a[(i, j)]
    }

    /// Final combination weight `b[i]`
    pub fn b(&self, i: usize) -> f64 {
        self.b[i]
    }

    /// Stage time offset `c[i]`
    pub fn c(&self, i: usize) -> f64 {
        self.c[i]
    }

    /// Sum of the combination weights (1 for a consistent method)
    pub fn weight_sum(&self) -> f64 {
        self.b.sum()
    }
}

// =================================================================================================
// Registry
// =================================================================================================

/// Registered tableaux, keyed by method order.
///
/// Initialized once on first access; read-only afterwards.
static TABLEAUX: LazyLock<BTreeMap<usize, ButcherTableau>> = LazyLock::new(|| {
    let mut registry = BTreeMap::new();

    // Second order: explicit midpoint. The full step weight sits entirely on
    // the midpoint evaluation.
    registry.insert(
        2,
        ButcherTableau::new(
            2,
            &[
                0.0, 0.0, //
                0.5, 0.0,
            ],
            &[0.0, 1.0],
            &[0.0, 0.5],
        ),
    );

    // Fourth order: classical RK4 with Simpson-rule weights.
    registry.insert(
        4,
        ButcherTableau::new(
            4,
            &[
                0.0, 0.0, 0.0, 0.0, //
                0.5, 0.0, 0.0, 0.0, //
                0.0, 0.5, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0,
            ],
            &[1.0 / 6.0, 1.0 / 3.0, 1.0 / 3.0, 1.0 / 6.0],
            &[0.0, 0.5, 0.5, 1.0],
        ),
    );

    registry
});

/// Look up the tableau registered for a method order.
///
/// Fails with [`IntegratorError::UnsupportedOrder`] when no tableau is
/// registered for `order` — there is no silent fallback to another method.
///
/// # Example
///
/// ```rust
/// use rkgrid_rs::integrator::tableau;
///
/// let rk4 = tableau(4).unwrap();
/// assert_eq!(rk4.stages(), 4);
/// assert!(tableau(3).is_err());
/// ```
pub fn tableau(order: usize) -> Result<&'static ButcherTableau, IntegratorError> {
    TABLEAUX.get(&order).ok_or_else(|| IntegratorError::UnsupportedOrder {
        order,
        supported: supported_orders(),
    })
}

/// Orders with a registered tableau, ascending.
pub fn supported_orders() -> Vec<usize> {
    TABLEAUX.keys().copied().collect()
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_orders() {
        assert_eq!(supported_orders(), vec![2, 4]);
    }

    #[test]
    fn test_unsupported_order_is_an_error() {
        for order in [0, 1, 3, 5, 6] {
            let err = tableau(order).unwrap_err();
            assert_eq!(
                err,
                IntegratorError::UnsupportedOrder {
                    order,
                    supported: vec![2, 4],
                }
            );
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        // Consistency condition of any RK method: sum(b) == 1.
        for order in supported_orders() {
            let tab = tableau(order).unwrap();
            assert!(
                (tab.weight_sum() - 1.0).abs() < 1e-15,
                "order {} weights sum to {}",
                order,
                tab.weight_sum()
            );
        }
    }

    #[test]
    fn test_first_stage_starts_at_step_start() {
        for order in supported_orders() {
            assert_eq!(tableau(order).unwrap().c(0), 0.0);
        }
    }

    #[test]
    fn test_strictly_lower_triangular() {
        for order in supported_orders() {
            let tab = tableau(order).unwrap();
            for i in 0..tab.stages() {
                for j in i..tab.stages() {
                    assert_eq!(tab.a(i, j), 0.0, "order {} a[{},{}]", order, i, j);
                }
            }
        }
    }

    #[test]
    fn test_offsets_match_row_sums() {
        // Classical tableaux satisfy c[i] == sum(a[i][..i]).
        for order in supported_orders() {
            let tab = tableau(order).unwrap();
            for i in 0..tab.stages() {
                let row_sum: f64 = (0..i).map(|j| tab.a(i, j)).sum();
                assert!(
                    (tab.c(i) - row_sum).abs() < 1e-15,
                    "order {} stage {}: c = {}, row sum = {}",
                    order,
                    i,
                    tab.c(i),
                    row_sum
                );
            }
        }
    }

    #[test]
    fn test_rk4_coefficients() {
        let tab = tableau(4).unwrap();
        assert_eq!(tab.a(1, 0), 0.5);
        assert_eq!(tab.a(2, 1), 0.5);
        assert_eq!(tab.a(3, 2), 1.0);
        assert_eq!(tab.b(0), 1.0 / 6.0);
        assert_eq!(tab.b(1), 1.0 / 3.0);
        assert_eq!(tab.c(3), 1.0);
    }

    #[test]
    fn test_midpoint_coefficients() {
        let tab = tableau(2).unwrap();
        assert_eq!(tab.a(1, 0), 0.5);
        assert_eq!(tab.b(0), 0.0);
        assert_eq!(tab.b(1), 1.0);
        assert_eq!(tab.c(1), 0.5);
    }
}
