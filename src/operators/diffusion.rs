//! Linear diffusion.
//!
//! ∂u/∂t = D Δu
//!
//! applied to every channel independently.

use serde::{Deserialize, Serialize};

use super::{OperatorError, RhsOperator, require_finite};
use crate::backend::{BoundarySpec, LaplaceStencil, Stencils, VoxelGrid};
use crate::symbolic::Expr;

/// Parameters of [`Diffusion`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffusionParams {
    /// Diffusion coefficient D
    pub diffusivity: f64,
    /// Laplacian discretisation
    pub stencil: LaplaceStencil,
    /// Boundary values at x = 0 and x = L on `staggered_x` grids
    pub dirichlet_x: (f64, f64),
}

impl DiffusionParams {
    pub fn new(diffusivity: f64) -> Self {
        Self {
            diffusivity,
            ..Default::default()
        }
    }

    pub fn with_stencil(mut self, stencil: LaplaceStencil) -> Self {
        self.stencil = stencil;
        self
    }

    pub fn with_dirichlet_x(mut self, low: f64, high: f64) -> Self {
        self.dirichlet_x = (low, high);
        self
    }
}

impl Default for DiffusionParams {
    fn default() -> Self {
        Self {
            diffusivity: 1.0,
            stencil: LaplaceStencil::SecondOrder,
            dirichlet_x: (0.0, 0.0),
        }
    }
}

/// Diffusion operator `D Δu`.
#[derive(Clone, Debug)]
pub struct Diffusion {
    params: DiffusionParams,
    bc: BoundarySpec,
}

impl Diffusion {
    pub fn params(&self) -> &DiffusionParams {
        &self.params
    }

    pub fn boundary(&self) -> &BoundarySpec {
        &self.bc
    }
}

impl RhsOperator for Diffusion {
    type Params = DiffusionParams;

    fn name(&self) -> &'static str {
        "diffusion"
    }

    fn new<G: VoxelGrid>(grid: &G, params: &DiffusionParams) -> Result<Self, OperatorError> {
        require_finite("diffusivity", params.diffusivity)?;
        require_finite("dirichlet_x.0", params.dirichlet_x.0)?;
        require_finite("dirichlet_x.1", params.dirichlet_x.1)?;

        Ok(Self {
            params: params.clone(),
            bc: BoundarySpec::for_convention(grid.info().convention, params.dirichlet_x),
        })
    }

    fn order(&self) -> u32 {
        self.params.stencil.order()
    }

    fn rhs<G: VoxelGrid>(&self, grid: &G, u: &G::Field, _t: f64) -> Result<G::Field, OperatorError> {
        let lap = grid.laplace(u, &self.bc, self.params.stencil);
        Ok(grid.scale(&lap, self.params.diffusivity))
    }

    fn rhs_analytic(&self, exprs: &[Expr], _t: f64) -> Result<Vec<Expr>, OperatorError> {
        Ok(exprs
            .iter()
            .map(|f| self.params.diffusivity * f.laplacian())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HostGrid;
    use crate::grid::VoxelFields;
    use crate::types::{Convention, Extent3D};
    use std::f64::consts::PI;

    fn grid(convention: Convention, n: usize) -> (VoxelFields, HostGrid<f64>) {
        let vf =
            VoxelFields::new(convention.resolution(n), Extent3D::unit_cube(), convention).unwrap();
        let g = HostGrid::create(vf.grid_info()).unwrap();
        (vf, g)
    }

    #[test]
    fn test_declared_order_follows_stencil() {
        let (_, g) = grid(Convention::CellCenter, 4);
        let op = Diffusion::new(&g, &DiffusionParams::new(1.0)).unwrap();
        assert_eq!(op.order(), 2);

        let params = DiffusionParams::new(1.0).with_stencil(LaplaceStencil::FourthOrder);
        let op = Diffusion::new(&g, &params).unwrap();
        assert_eq!(op.order(), 4);
    }

    #[test]
    fn test_boundary_from_convention() {
        let (_, g) = grid(Convention::StaggeredX, 4);
        let params = DiffusionParams::new(0.5).with_dirichlet_x(1.0, 3.0);
        let op = Diffusion::new(&g, &params).unwrap();
        assert_eq!(
            *op.boundary(),
            BoundarySpec::for_convention(Convention::StaggeredX, (1.0, 3.0))
        );
    }

    #[test]
    fn test_rejects_nan_diffusivity() {
        let (_, g) = grid(Convention::CellCenter, 4);
        let err = Diffusion::new(&g, &DiffusionParams::new(f64::NAN)).unwrap_err();
        assert!(matches!(err, OperatorError::InvalidParameter(_)));
    }

    #[test]
    fn test_analytic_rhs() {
        let (_, g) = grid(Convention::CellCenter, 4);
        let op = Diffusion::new(&g, &DiffusionParams::new(0.5)).unwrap();
        let f = Expr::x().powi(2) + Expr::y().powi(2);
        let rhs = op.rhs_analytic(&[f], 0.0).unwrap();
        assert_eq!(rhs.len(), 1);
        assert!((rhs[0].eval([0.3, 0.1, 0.9]) - 2.0).abs() < 1e-14);
    }

    #[test]
    fn test_numeric_rhs_scales_with_diffusivity() {
        let (vf, g) = grid(Convention::CellCenter, 8);
        let f = (2.0 * PI * Expr::y()).sin();
        let u = g.init_scalar_field(&f.sample(&vf.meshgrid())).unwrap();

        let one = Diffusion::new(&g, &DiffusionParams::new(1.0)).unwrap();
        let three = Diffusion::new(&g, &DiffusionParams::new(3.0)).unwrap();
        let r1 = one.rhs(&g, &u, 0.0).unwrap();
        let r3 = three.rhs(&g, &u, 0.0).unwrap();
        for (a, b) in r1.iter().zip(r3.iter()) {
            assert!((3.0 * a - b).abs() < 1e-9 * b.abs().max(1.0));
        }
    }
}
