//! Right-hand-side operators under test.
//!
//! An RHS operator maps a (multi-channel) field to its time derivative,
//!
//! ∂u/∂t = L(u, t)
//!
//! where L is a spatial discretisation. Besides the discrete `rhs`, every
//! operator knows its continuous counterpart applied to symbolic test
//! functions (`rhs_analytic`) and the order it is expected to converge at.
//!
//! Operators:
//! - [`Diffusion`]: `D Δu` with a 2nd- or 4th-order Laplacian
//! - [`Advection`]: `-(v · ∇u)` with central differences
//! - [`GrayScott`]: two-species reaction-diffusion

mod advection;
mod diffusion;
mod gray_scott;

pub use advection::{Advection, AdvectionParams};
pub use diffusion::{Diffusion, DiffusionParams};
pub use gray_scott::{GrayScott, GrayScottParams};

use std::fmt;

use thiserror::Error;

use crate::backend::VoxelGrid;
use crate::symbolic::Expr;

/// Errors raised when building or applying an operator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OperatorError {
    /// Field or expression count does not match what the operator models.
    #[error("{operator} expects {expected} field(s), got {actual}")]
    FieldCount {
        operator: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Operator parameter outside its valid range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// A discretised PDE right-hand side.
///
/// # Example Implementation
///
/// ```ignore
/// impl RhsOperator for Decay {
///     type Params = f64;
///
///     fn new<G: VoxelGrid>(_grid: &G, rate: &f64) -> Result<Self, OperatorError> {
///         Ok(Self { rate: *rate })
///     }
///
///     fn rhs<G: VoxelGrid>(&self, grid: &G, u: &G::Field, _t: f64) -> Result<G::Field, OperatorError> {
///         Ok(grid.scale(u, -self.rate))
///     }
///
///     fn rhs_analytic(&self, exprs: &[Expr], _t: f64) -> Result<Vec<Expr>, OperatorError> {
///         Ok(exprs.iter().map(|f| -self.rate * f.clone()).collect())
///     }
///     // ...
/// }
/// ```
pub trait RhsOperator: Sized {
    /// Problem-specific parameters.
    type Params: Clone + fmt::Debug;

    /// Human-readable name for logging and reports.
    fn name(&self) -> &'static str;

    /// Build the operator for a grid.
    fn new<G: VoxelGrid>(grid: &G, params: &Self::Params) -> Result<Self, OperatorError>;

    /// Declared convergence order of the discretisation.
    fn order(&self) -> u32;

    /// Number of fields the operator couples, if fixed.
    ///
    /// `None` means the operator acts on any number of channels independently.
    fn n_fields(&self) -> Option<usize> {
        None
    }

    /// Discrete right-hand side at time `t`.
    ///
    /// `u` has the trimmed grid shape; the result has the same shape.
    fn rhs<G: VoxelGrid>(&self, grid: &G, u: &G::Field, t: f64) -> Result<G::Field, OperatorError>;

    /// Exact right-hand side of the test functions `exprs` at time `t`.
    ///
    /// Returns one expression per input expression.
    fn rhs_analytic(&self, exprs: &[Expr], t: f64) -> Result<Vec<Expr>, OperatorError>;

    /// Check a channel or expression count against [`RhsOperator::n_fields`].
    fn check_field_count(&self, actual: usize) -> Result<(), OperatorError> {
        match self.n_fields() {
            Some(expected) if expected != actual => Err(OperatorError::FieldCount {
                operator: self.name(),
                expected,
                actual,
            }),
            _ => Ok(()),
        }
    }
}

/// Reject non-finite parameter values.
pub(crate) fn require_finite(name: &str, value: f64) -> Result<(), OperatorError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(OperatorError::InvalidParameter(format!(
            "{} must be finite, got {}",
            name, value
        )))
    }
}
