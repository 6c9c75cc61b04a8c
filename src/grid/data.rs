//! Cell-centered grid container
//!
//! This module provides the reference [`GridState`] implementation: a 2D
//! cell-centered grid geometry ([`Grid2d`]) and an ordered collection of
//! variable fields over it ([`FieldState`]).

use ndarray::Array2;
use std::fmt;

use crate::grid::traits::{GridState, GridVariable};

// =================================================================================================
// Grid Geometry
// =================================================================================================

/// 2D cell-centered grid geometry
///
/// Describes the index space and cell spacing shared by every field defined
/// on it. Values live at cell centers; there is one value per cell.
///
/// # Example
///
/// ```rust
/// use rkgrid_rs::grid::Grid2d;
///
/// let grid = Grid2d::with_spacing(32, 16, 0.5, 0.25);
/// assert_eq!(grid.shape(), (32, 16));
/// assert_eq!(grid.ncells(), 512);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid2d {
    /// Number of cells in x
    nx: usize,

    /// Number of cells in y
    ny: usize,

    /// Cell width in x
    dx: f64,

    /// Cell width in y
    dy: f64,
}

impl Grid2d {
    /// Create a grid with unit cell spacing
    ///
    /// # Panics
    /// Panics when either extent is zero.
    pub fn new(nx: usize, ny: usize) -> Self {
        Self::with_spacing(nx, ny, 1.0, 1.0)
    }

    /// Create a grid with explicit cell spacing
    ///
    /// # Panics
    /// Panics when either extent is zero or either spacing is not a positive
    /// finite number.
    pub fn with_spacing(nx: usize, ny: usize, dx: f64, dy: f64) -> Self {
        assert!(nx > 0 && ny > 0, "grid must have at least one cell per axis");
        assert!(
            dx.is_finite() && dx > 0.0 && dy.is_finite() && dy > 0.0,
            "cell spacing must be positive and finite"
        );
        Self { nx, ny, dx, dy }
    }

    /// Number of cells in x
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Number of cells in y
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Cell width in x
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Cell width in y
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Field shape `(nx, ny)`
    pub fn shape(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    /// Total cell count
    pub fn ncells(&self) -> usize {
        self.nx * self.ny
    }
}

// =================================================================================================
// Field State (Reference Grid-State Container)
// =================================================================================================

/// Ordered collection of variable fields on one grid
///
/// The shipped [`GridState`] implementation. Variables are registered once,
/// addressed either by their [`GridVariable`] identifier or by registration
/// index, and stored as dense `ndarray` arrays of shape `grid.shape()`.
///
/// Registration order defines the index order, so `var(n)` is deterministic
/// and stable across clones.
///
/// # Example
///
/// ```rust
/// use rkgrid_rs::grid::{FieldState, Grid2d, GridState, GridVariable};
///
/// let mut state = FieldState::new(Grid2d::new(8, 8));
/// state.register(GridVariable::Density, 1.0);
/// state.register(GridVariable::Energy, 2.5);
///
/// assert_eq!(state.index_of(GridVariable::Energy), Some(1));
/// assert_eq!(state.var(1)[(0, 0)], 2.5);
/// ```
#[derive(Debug, Clone)]
pub struct FieldState {
    /// Shared geometry of every field
    grid: Grid2d,

    /// Variable identifiers in registration order
    names: Vec<GridVariable>,

    /// Fields in registration order, one per name
    fields: Vec<Array2<f64>>,
}

impl FieldState {
    /// Create an empty state on a grid
    pub fn new(grid: Grid2d) -> Self {
        Self {
            grid,
            names: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Register a variable filled with a uniform value
    ///
    /// # Panics
    /// Panics when the variable is already registered.
    pub fn register(&mut self, variable: GridVariable, value: f64) {
        let field = Array2::from_elem(self.grid.shape(), value);
        self.register_field(variable, field);
    }

    /// Register a variable with an explicit field
    ///
    /// # Panics
    /// Panics when the variable is already registered or the field's shape
    /// disagrees with the grid.
    pub fn register_field(&mut self, variable: GridVariable, field: Array2<f64>) {
        assert!(
            self.index_of(variable).is_none(),
            "variable {} already registered",
            variable
        );
        assert_eq!(
            field.dim(),
            self.grid.shape(),
            "field shape disagrees with grid shape"
        );
        self.names.push(variable);
        self.fields.push(field);
    }

    /// The grid every field is defined on
    pub fn grid(&self) -> &Grid2d {
        &self.grid
    }

    /// Variable identifiers in index order
    pub fn variables(&self) -> &[GridVariable] {
        &self.names
    }

    /// Registration index of a variable, if registered
    pub fn index_of(&self, variable: GridVariable) -> Option<usize> {
        self.names.iter().position(|&name| name == variable)
    }

    /// Field of a variable, if registered
    pub fn get(&self, variable: GridVariable) -> Option<&Array2<f64>> {
        self.index_of(variable).map(|n| &self.fields[n])
    }

    /// Mutable field of a variable, if registered
    pub fn get_mut(&mut self, variable: GridVariable) -> Option<&mut Array2<f64>> {
        self.index_of(variable).map(|n| &mut self.fields[n])
    }

    /// Apply a function element-wise to every field
    ///
    /// Convenient for building right-hand sides in tests and small problems:
    ///
    /// ```rust
    /// use rkgrid_rs::grid::{FieldState, Grid2d, GridState, GridVariable};
    ///
    /// let mut k = FieldState::new(Grid2d::new(4, 4));
    /// k.register(GridVariable::Density, 2.0);
    /// k.apply(|y| -0.1 * y);
    /// assert_eq!(k.var(0)[(0, 0)], -0.2);
    /// ```
    pub fn apply<F>(&mut self, f: F)
    where
        F: Fn(f64) -> f64,
    {
        for field in &mut self.fields {
            field.mapv_inplace(&f);
        }
    }
}

impl GridState for FieldState {
    fn nvar(&self) -> usize {
        self.fields.len()
    }

    fn var(&self, n: usize) -> &Array2<f64> {
        &self.fields[n]
    }

    fn var_mut(&mut self, n: usize) -> &mut Array2<f64> {
        &mut self.fields[n]
    }

    fn clone_state(&self) -> Self {
        // Array2 clones deep-copy their storage, so the derived Clone
        // already satisfies the independence contract.
        self.clone()
    }
}

impl fmt::Display for FieldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self
            .names
            .iter()
            .map(|name| name.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "FieldState [{} * {}] {{ {} }}",
            self.grid.nx, self.grid.ny, names
        )
    }
}

// =================================================================================================
// Tests
// =================================================================================================
