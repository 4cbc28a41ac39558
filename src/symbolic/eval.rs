//! Numeric evaluation of expressions.

use ndarray::{Array3, Zip};

use super::Expr;
use crate::grid::Mesh;

impl Expr {
    /// Evaluate at the point `p = [x, y, z]`.
    pub fn eval(&self, p: [f64; 3]) -> f64 {
        match self {
            Expr::Const(c) => *c,
            Expr::Var(v) => p[v.index()],
            Expr::Add(a, b) => a.eval(p) + b.eval(p),
            Expr::Sub(a, b) => a.eval(p) - b.eval(p),
            Expr::Mul(a, b) => a.eval(p) * b.eval(p),
            Expr::Div(a, b) => a.eval(p) / b.eval(p),
            Expr::Neg(a) => -a.eval(p),
            Expr::Powi(a, n) => a.eval(p).powi(*n),
            Expr::Sin(a) => a.eval(p).sin(),
            Expr::Cos(a) => a.eval(p).cos(),
            Expr::Exp(a) => a.eval(p).exp(),
            Expr::Ln(a) => a.eval(p).ln(),
        }
    }

    /// Sample the expression on every point of a coordinate mesh.
    ///
    /// The result has the mesh shape.
    pub fn sample(&self, mesh: &Mesh) -> Array3<f64> {
        let zip = Zip::from(mesh.x()).and(mesh.y()).and(mesh.z());

        #[cfg(feature = "parallel")]
        let values = zip.par_map_collect(|&x, &y, &z| self.eval([x, y, z]));

        #[cfg(not(feature = "parallel"))]
        let values = zip.map_collect(|&x, &y, &z| self.eval([x, y, z]));

        values
    }
}
