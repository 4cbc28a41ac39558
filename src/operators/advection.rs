//! Linear advection with a constant velocity.
//!
//! ∂u/∂t = -(v · ∇u)
//!
//! discretised with second-order central differences on every channel.

use serde::{Deserialize, Serialize};

use super::{OperatorError, RhsOperator, require_finite};
use crate::backend::{BoundarySpec, Stencils, VoxelGrid};
use crate::symbolic::Expr;

/// Parameters of [`Advection`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvectionParams {
    /// Advection velocity `[vx, vy, vz]`
    pub velocity: [f64; 3],
    /// Boundary values at x = 0 and x = L on `staggered_x` grids
    pub dirichlet_x: (f64, f64),
}

impl AdvectionParams {
    pub fn new(velocity: [f64; 3]) -> Self {
        Self {
            velocity,
            dirichlet_x: (0.0, 0.0),
        }
    }

    pub fn with_dirichlet_x(mut self, low: f64, high: f64) -> Self {
        self.dirichlet_x = (low, high);
        self
    }
}

impl Default for AdvectionParams {
    fn default() -> Self {
        Self::new([1.0, 0.0, 0.0])
    }
}

/// Central-difference advection operator.
#[derive(Clone, Debug)]
pub struct Advection {
    params: AdvectionParams,
    bc: BoundarySpec,
}

impl RhsOperator for Advection {
    type Params = AdvectionParams;

    fn name(&self) -> &'static str {
        "advection"
    }

    fn new<G: VoxelGrid>(grid: &G, params: &AdvectionParams) -> Result<Self, OperatorError> {
        for (axis, v) in params.velocity.iter().enumerate() {
            require_finite(&format!("velocity[{}]", axis), *v)?;
        }
        Ok(Self {
            params: params.clone(),
            bc: BoundarySpec::for_convention(grid.info().convention, params.dirichlet_x),
        })
    }

    fn order(&self) -> u32 {
        2
    }

    fn rhs<G: VoxelGrid>(&self, grid: &G, u: &G::Field, _t: f64) -> Result<G::Field, OperatorError> {
        let mut acc = grid.scale(u, 0.0);
        for (axis, &v) in self.params.velocity.iter().enumerate() {
            if v == 0.0 {
                continue;
            }
            let du = grid.gradient(u, axis, &self.bc);
            acc = grid.add(&acc, &grid.scale(&du, -v));
        }
        Ok(acc)
    }

    fn rhs_analytic(&self, exprs: &[Expr], _t: f64) -> Result<Vec<Expr>, OperatorError> {
        Ok(exprs
            .iter()
            .map(|f| -f.directional_derivative(self.params.velocity))
            .collect())
    }
}
