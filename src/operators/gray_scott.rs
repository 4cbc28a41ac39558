//! Gray-Scott reaction-diffusion.
//!
//! Two species on channels 0 (u) and 1 (v):
//!
//! ∂u/∂t = Du Δu - u v² + F (1 - u)
//! ∂v/∂t = Dv Δv + u v² - (F + k) v

use serde::{Deserialize, Serialize};

use super::{OperatorError, RhsOperator, require_finite};
use crate::backend::{BoundarySpec, LaplaceStencil, Stencils, VoxelGrid};
use crate::symbolic::Expr;

/// Parameters of [`GrayScott`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrayScottParams {
    /// Diffusivity of u
    pub du: f64,
    /// Diffusivity of v
    pub dv: f64,
    /// Feed rate F
    pub feed: f64,
    /// Kill rate k
    pub kill: f64,
    /// Boundary values of u at x = 0 and x = L on `staggered_x` grids
    pub dirichlet_u: (f64, f64),
    /// Boundary values of v at x = 0 and x = L on `staggered_x` grids
    pub dirichlet_v: (f64, f64),
}

impl GrayScottParams {
    pub fn new(du: f64, dv: f64, feed: f64, kill: f64) -> Self {
        Self {
            du,
            dv,
            feed,
            kill,
            ..Default::default()
        }
    }

    pub fn with_dirichlet(mut self, u: (f64, f64), v: (f64, f64)) -> Self {
        self.dirichlet_u = u;
        self.dirichlet_v = v;
        self
    }
}

impl Default for GrayScottParams {
    /// Pearson's "mitosis" regime.
    fn default() -> Self {
        Self {
            du: 0.16,
            dv: 0.08,
            feed: 0.035,
            kill: 0.065,
            dirichlet_u: (1.0, 1.0),
            dirichlet_v: (0.0, 0.0),
        }
    }
}

/// Two-field Gray-Scott operator.
#[derive(Clone, Debug)]
pub struct GrayScott {
    params: GrayScottParams,
    bc_u: BoundarySpec,
    bc_v: BoundarySpec,
}

impl GrayScott {
    pub fn params(&self) -> &GrayScottParams {
        &self.params
    }
}

impl RhsOperator for GrayScott {
    type Params = GrayScottParams;

    fn name(&self) -> &'static str {
        "gray-scott"
    }

    fn new<G: VoxelGrid>(grid: &G, params: &GrayScottParams) -> Result<Self, OperatorError> {
        require_finite("du", params.du)?;
        require_finite("dv", params.dv)?;
        require_finite("feed", params.feed)?;
        require_finite("kill", params.kill)?;
        if params.du < 0.0 || params.dv < 0.0 {
            return Err(OperatorError::InvalidParameter(format!(
                "diffusivities must be non-negative, got du={}, dv={}",
                params.du, params.dv
            )));
        }

        let convention = grid.info().convention;
        Ok(Self {
            params: params.clone(),
            bc_u: BoundarySpec::for_convention(convention, params.dirichlet_u),
            bc_v: BoundarySpec::for_convention(convention, params.dirichlet_v),
        })
    }

    fn order(&self) -> u32 {
        2
    }

    fn n_fields(&self) -> Option<usize> {
        Some(2)
    }

    fn rhs<G: VoxelGrid>(&self, grid: &G, uv: &G::Field, _t: f64) -> Result<G::Field, OperatorError> {
        self.check_field_count(grid.n_channels(uv))?;
        let p = &self.params;

        let u = grid.channel(uv, 0);
        let v = grid.channel(uv, 1);
        let uvv = grid.mul(&u, &grid.mul(&v, &v));

        let lap_u = grid.laplace(&u, &self.bc_u, LaplaceStencil::SecondOrder);
        let lap_v = grid.laplace(&v, &self.bc_v, LaplaceStencil::SecondOrder);

        // F (1 - u) and -(F + k) v
        let feed = grid.affine(&u, -p.feed, p.feed);
        let decay = grid.scale(&v, -(p.feed + p.kill));

        let du = grid.add(&grid.sub(&grid.scale(&lap_u, p.du), &uvv), &feed);
        let dv = grid.add(&grid.add(&grid.scale(&lap_v, p.dv), &uvv), &decay);

        Ok(grid.concatenate(vec![du, dv]))
    }

    fn rhs_analytic(&self, exprs: &[Expr], _t: f64) -> Result<Vec<Expr>, OperatorError> {
        self.check_field_count(exprs.len())?;
        let p = &self.params;
        let (u, v) = (&exprs[0], &exprs[1]);

        let uvv = u * &v.clone().powi(2);
        let du = p.du * u.laplacian() - uvv.clone() + p.feed * (1.0 - u.clone());
        let dv = p.dv * v.laplacian() + uvv - (p.feed + p.kill) * v.clone();
        Ok(vec![du, dv])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HostGrid;
    use crate::grid::VoxelFields;
    use crate::types::{Convention, Extent3D};

    fn host(n: usize) -> (VoxelFields, HostGrid<f64>) {
        let vf = VoxelFields::new(
            Convention::CellCenter.resolution(n),
            Extent3D::unit_cube(),
            Convention::CellCenter,
        )
        .unwrap();
        let g = HostGrid::create(vf.grid_info()).unwrap();
        (vf, g)
    }

    #[test]
    fn test_requires_two_fields() {
        let (vf, g) = host(4);
        let op = GrayScott::new(&g, &GrayScottParams::default()).unwrap();
        let err = op.rhs_analytic(&[Expr::x()], 0.0).unwrap_err();
        assert_eq!(
            err,
            OperatorError::FieldCount {
                operator: "gray-scott",
                expected: 2,
                actual: 1
            }
        );

        let one = g
            .init_scalar_field(&Expr::x().sin().sample(&vf.meshgrid()))
            .unwrap();
        assert!(op.rhs(&g, &one, 0.0).is_err());
    }

    #[test]
    fn test_uniform_state_is_pure_reaction() {
        let (_, g) = host(4);
        let params = GrayScottParams::new(0.2, 0.1, 0.04, 0.06);
        let op = GrayScott::new(&g, &params).unwrap();

        let u = g
            .init_scalar_field(&ndarray::Array3::from_elem((4, 4, 4), 0.5))
            .unwrap();
        let v = g
            .init_scalar_field(&ndarray::Array3::from_elem((4, 4, 4), 0.25))
            .unwrap();
        let rhs = op.rhs(&g, &g.concatenate(vec![u, v]), 0.0).unwrap();
        assert_eq!(g.n_channels(&rhs), 2);

        let uvv = 0.5 * 0.25 * 0.25;
        let du = g.export_scalar_field(&g.channel(&rhs, 0)).unwrap();
        let dv = g.export_scalar_field(&g.channel(&rhs, 1)).unwrap();
        assert!(du.iter().all(|&x| (x - (-uvv + 0.04 * 0.5)).abs() < 1e-14));
        assert!(dv.iter().all(|&x| (x - (uvv - 0.1 * 0.25)).abs() < 1e-14));
    }

    #[test]
    fn test_analytic_constant_state() {
        let (_, g) = host(4);
        let op = GrayScott::new(&g, &GrayScottParams::new(0.2, 0.1, 0.04, 0.06)).unwrap();
        let rhs = op
            .rhs_analytic(&[Expr::constant(0.5), Expr::constant(0.25)], 0.0)
            .unwrap();
        let uvv = 0.5 * 0.25 * 0.25;
        assert!((rhs[0].eval([0.0; 3]) - (-uvv + 0.02)).abs() < 1e-14);
        assert!((rhs[1].eval([0.0; 3]) - (uvv - 0.025)).abs() < 1e-14);
    }

    #[test]
    fn test_rejects_negative_diffusivity() {
        let (_, g) = host(4);
        assert!(GrayScott::new(&g, &GrayScottParams::new(-1.0, 0.1, 0.0, 0.0)).is_err());
    }
}
