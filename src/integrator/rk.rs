//! Generic explicit Runge-Kutta stage integrator
//!
//! # Mathematical Background
//!
//! One step of an s-stage explicit method advances a state `y_n` by
//!
//! ```text
//! y_{n+1} = y_n + dt * sum_{i=1}^{s} b_i k_i
//! ```
//!
//! where each stage derivative is evaluated at an intermediate state
//!
//! ```text
//! k_i = f(t + c_i dt,  y_n + dt * sum_{j<i} a_ij k_j)
//! ```
//!
//! The integrator here is agnostic to `f`: the caller evaluates the physics
//! for each stage and hands the result back. The integrator's whole job is
//! combining stage states and derivatives with exact adherence to the
//! tableau — stage ordering, coefficient indexing, and accumulation order.
//! Mistakes in that recurrence do not raise errors; they silently degrade
//! the method's order. That is why the stage sequence is enforced as a state
//! machine instead of left to caller discipline.
//!
//! # Lifecycle
//!
//! One [`RkIntegrator`] is created per time step and consumed by
//! [`RkIntegrator::compute_final_update`]:
//!
//! ```text
//! new(t, dt, order) → set_start(y) → { stage_time(i), stage_start(i),
//!     store_increment(i, k_i) } for i in 0..s → compute_final_update()
//! ```
//!
//! Nothing persists across steps. For the common case where the right-hand
//! side fits a closure, [`rk_step`] runs the whole sequence.

use ndarray::{Array2, Zip};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::IntegratorError;
use crate::grid::GridState;
use crate::integrator::tableau::{tableau, ButcherTableau};

#[cfg(feature = "parallel")]
use crate::integrator::parallel_threshold;

// =================================================================================================
// Element-wise Accumulation Kernel
// =================================================================================================

/// `dest += coeff * src` for one field.
///
/// Switches to rayon when the field is large enough and the storage is
/// contiguous; falls back to sequential `Zip` otherwise.
fn axpy_field(dest: &mut Array2<f64>, coeff: f64, src: &Array2<f64>) {
    #[cfg(feature = "parallel")]
    if dest.len() > parallel_threshold() {
        if let (Some(d), Some(s)) = (dest.as_slice_mut(), src.as_slice()) {
            d.par_iter_mut()
                .zip(s.par_iter())
                .for_each(|(d, s)| *d += coeff * *s);
            return;
        }
    }

    Zip::from(dest).and(src).for_each(|d, s| *d += coeff * *s);
}

/// `dest += coeff * src` across every variable, validating compatibility.
///
/// Shape disagreement fails before any arithmetic can truncate or broadcast;
/// a partial accumulation is never left behind on error because validation
/// of each field precedes its update and shapes were already checked at
/// store time.
fn accumulate_scaled<S: GridState>(
    dest: &mut S,
    coeff: f64,
    src: &S,
) -> Result<(), IntegratorError> {
    check_compatible(dest, src)?;
    for n in 0..dest.nvar() {
        axpy_field(dest.var_mut(n), coeff, src.var(n));
    }
    Ok(())
}

/// Verify that two states agree in variable count and field shapes.
fn check_compatible<S: GridState>(reference: &S, other: &S) -> Result<(), IntegratorError> {
    if reference.nvar() != other.nvar() {
        return Err(IntegratorError::VariableCountMismatch {
            expected: reference.nvar(),
            found: other.nvar(),
        });
    }
    for n in 0..reference.nvar() {
        let expected = reference.var(n).dim();
        let found = other.var(n).dim();
        if expected != found {
            return Err(IntegratorError::ShapeMismatch {
                var: n,
                expected,
                found,
            });
        }
    }
    Ok(())
}

// =================================================================================================
// Stage Integrator
// =================================================================================================

/// Stateful integrator for one time step `[t, t + dt]`
///
/// Generic over any [`GridState`]; a derivative is a grid-state-shaped value
/// of the same type as the state being advanced.
///
/// # Stage ordering
///
/// Stage indices are 0-based: stage 0 is the evaluation at the step start
/// (`c[0] = 0`). Derivatives must be stored in increasing stage order;
/// storing stage `i` while an earlier slot is still empty fails with
/// [`IntegratorError::MissingIncrement`] naming the first empty slot.
/// Re-storing an already-filled slot is permitted and simply replaces the
/// derivative.
///
/// # Ownership
///
/// [`set_start`](Self::set_start) takes the initial state by value and
/// [`compute_final_update`](Self::compute_final_update) consumes the
/// integrator, returning the advanced state built in the start state's own
/// storage. There is exactly one logical state after the step; the pre-step
/// state is gone by construction, not by documentation.
///
/// # Example
///
/// ```rust
/// use rkgrid_rs::grid::{FieldState, Grid2d, GridState, GridVariable};
/// use rkgrid_rs::integrator::RkIntegrator;
///
/// # fn main() -> Result<(), rkgrid_rs::IntegratorError> {
/// let mut state = FieldState::new(Grid2d::new(4, 4));
/// state.register(GridVariable::Density, 1.0);
///
/// let mut integrator = RkIntegrator::new(0.0, 0.1, 2)?;
/// let stages = integrator.stages();
/// integrator.set_start(state)?;
///
/// for stage in 0..stages {
///     let t_stage = integrator.stage_time(stage)?;
///     let y_stage = integrator.stage_start(stage)?;
///
///     // Physics evaluation happens here; dy/dt = 2 everywhere.
///     let mut k = y_stage.clone_state();
///     k.apply(|_| 2.0);
///     let _ = t_stage;
///
///     integrator.store_increment(stage, k)?;
/// }
///
/// let advanced = integrator.compute_final_update()?;
/// assert!((advanced.var(0)[(0, 0)] - 1.2).abs() < 1e-14);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RkIntegrator<S> {
    /// Step start time
    t: f64,

    /// Step size
    dt: f64,

    /// Coefficients of the chosen method
    tableau: &'static ButcherTableau,

    /// Initial state, bound once via `set_start`
    start: Option<S>,

    /// Stage derivative slots, one per stage, filled in increasing order
    k: Vec<Option<S>>,
}

impl<S: GridState> RkIntegrator<S> {
    /// Create an integrator for one step of the method with the given order.
    ///
    /// Fails with [`IntegratorError::UnsupportedOrder`] when no tableau is
    /// registered for `order`, and with [`IntegratorError::InvalidTimeStep`]
    /// when `dt` is not a positive finite number.
    pub fn new(t: f64, dt: f64, order: usize) -> Result<Self, IntegratorError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(IntegratorError::InvalidTimeStep { dt });
        }
        let tableau = tableau(order)?;
        let k = (0..tableau.stages()).map(|_| None).collect();

        Ok(Self {
            t,
            dt,
            tableau,
            start: None,
            k,
        })
    }

    /// Step start time
    pub fn t(&self) -> f64 {
        self.t
    }

    /// Step size
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Number of stages of the chosen method
    pub fn stages(&self) -> usize {
        self.tableau.stages()
    }

    /// Bind the step's initial state.
    ///
    /// Must be called exactly once before any stage operation. A second call
    /// fails with [`IntegratorError::StartAlreadyBound`]; rebinding mid-step
    /// would orphan already-stored derivatives.
    pub fn set_start(&mut self, state: S) -> Result<(), IntegratorError> {
        if self.start.is_some() {
            return Err(IntegratorError::StartAlreadyBound);
        }
        self.start = Some(state);
        Ok(())
    }

    /// Physical time at which stage `stage`'s derivative is evaluated:
    /// `t + c[stage] * dt`.
    ///
    /// Pure; always uses this integrator's own `dt`.
    pub fn stage_time(&self, stage: usize) -> Result<f64, IntegratorError> {
        self.check_stage(stage)?;
        Ok(self.t + self.tableau.c(stage) * self.dt)
    }

    /// Evaluation state for stage `stage`:
    ///
    /// ```text
    /// y_i = y_start + dt * sum_{j<i} a[i][j] * k_j
    /// ```
    ///
    /// Returns a fresh clone with independently owned storage; mutating it
    /// never affects the bound start state or any other clone. For stage 0
    /// the accumulation runs zero times and the clone equals the start state.
    ///
    /// Every earlier slot must already be populated; otherwise this fails
    /// with [`IntegratorError::MissingIncrement`] for the first empty one.
    pub fn stage_start(&self, stage: usize) -> Result<S, IntegratorError> {
        self.check_stage(stage)?;
        let start = self.start.as_ref().ok_or(IntegratorError::StartNotBound)?;

        let mut y = start.clone_state();
        for j in 0..stage {
            let k_j = self.k[j]
                .as_ref()
                .ok_or(IntegratorError::MissingIncrement { stage: j })?;
            let coeff = self.tableau.a(stage, j);
            // Zero couplings contribute nothing; skip the element-wise pass.
            if coeff != 0.0 {
                accumulate_scaled(&mut y, self.dt * coeff, k_j)?;
            }
        }
        Ok(y)
    }

    /// Record the externally computed derivative for stage `stage`.
    ///
    /// The derivative must match the start state in variable count and field
    /// shapes; a mismatch is rejected here, before it can reach the
    /// combination arithmetic. Storing out of order (leaving an earlier slot
    /// empty) fails with [`IntegratorError::MissingIncrement`] for that slot.
    pub fn store_increment(&mut self, stage: usize, derivative: S) -> Result<(), IntegratorError> {
        self.check_stage(stage)?;
        let start = self.start.as_ref().ok_or(IntegratorError::StartNotBound)?;
        check_compatible(start, &derivative)?;

        let first_empty = self.filled();
        if stage > first_empty {
            return Err(IntegratorError::MissingIncrement { stage: first_empty });
        }

        self.k[stage] = Some(derivative);
        Ok(())
    }

    /// Combine all stage derivatives into the end-of-step state:
    ///
    /// ```text
    /// y_{n+1} = y_start + dt * sum_{i} b[i] * k_i
    /// ```
    ///
    /// Consumes the integrator and returns the advanced state, accumulated
    /// in place into the start state's storage (no new field allocation).
    /// The start state must be bound and every derivative slot populated;
    /// otherwise this fails with [`IntegratorError::StartNotBound`] or
    /// [`IntegratorError::MissingIncrement`] and nothing is combined.
    pub fn compute_final_update(mut self) -> Result<S, IntegratorError> {
        if self.start.is_none() {
            return Err(IntegratorError::StartNotBound);
        }
        // Reject before touching y: no partial combination on error.
        if let Some(stage) = self.k.iter().position(Option::is_none) {
            return Err(IntegratorError::MissingIncrement { stage });
        }
        let mut y = self.start.take().ok_or(IntegratorError::StartNotBound)?;

        for (i, slot) in self.k.iter().enumerate() {
            let k_i = slot
                .as_ref()
                .ok_or(IntegratorError::MissingIncrement { stage: i })?;
            let weight = self.tableau.b(i);
            if weight != 0.0 {
                accumulate_scaled(&mut y, self.dt * weight, k_i)?;
            }
        }
        Ok(y)
    }

    /// Number of leading derivative slots already populated.
    fn filled(&self) -> usize {
        self.k
            .iter()
            .position(Option::is_none)
            .unwrap_or(self.k.len())
    }

    fn check_stage(&self, stage: usize) -> Result<(), IntegratorError> {
        if stage >= self.stages() {
            return Err(IntegratorError::StageOutOfRange {
                stage,
                stages: self.stages(),
            });
        }
        Ok(())
    }
}

// =================================================================================================
// Single-step Driver
// =================================================================================================

/// Advance `start` by one step of the order-`order` method, evaluating the
/// right-hand side with `rhs(t_stage, y_stage)`.
///
/// This is the canonical stage loop over [`RkIntegrator`]: for each stage it
/// asks for the stage time and stage-start state, evaluates the physics, and
/// stores the derivative; afterwards it returns the combined update.
///
/// # Example
///
/// ```rust
/// use rkgrid_rs::grid::{FieldState, Grid2d, GridState, GridVariable};
/// use rkgrid_rs::integrator::rk_step;
///
/// # fn main() -> Result<(), rkgrid_rs::IntegratorError> {
/// let mut state = FieldState::new(Grid2d::new(4, 4));
/// state.register(GridVariable::Density, 1.0);
///
/// // One RK4 step of dy/dt = -y; exact answer is exp(-0.1).
/// let next = rk_step(0.0, 0.1, 4, state, |_t, y| {
///     let mut k = y.clone_state();
///     k.apply(|v| -v);
///     k
/// })?;
///
/// assert!((next.var(0)[(0, 0)] - (-0.1f64).exp()).abs() < 1e-7);
/// # Ok(())
/// # }
/// ```
pub fn rk_step<S, F>(
    t: f64,
    dt: f64,
    order: usize,
    start: S,
    mut rhs: F,
) -> Result<S, IntegratorError>
where
    S: GridState,
    F: FnMut(f64, &S) -> S,
{
    let mut integrator = RkIntegrator::new(t, dt, order)?;
    let stages = integrator.stages();
    integrator.set_start(start)?;

    for stage in 0..stages {
        let t_stage = integrator.stage_time(stage)?;
        let y_stage = integrator.stage_start(stage)?;
        let k_stage = rhs(t_stage, &y_stage);
        integrator.store_increment(stage, k_stage)?;
    }

    integrator.compute_final_update()
}

// =================================================================================================
// Tests
// =================================================================================================
