//! Exact differentiation of expression trees.

use super::{Expr, Var};

impl Expr {
    /// Partial derivative with respect to `v`.
    pub fn diff(&self, v: Var) -> Expr {
        match self {
            Expr::Const(_) => Expr::zero(),
            Expr::Var(w) => {
                if *w == v {
                    Expr::one()
                } else {
                    Expr::zero()
                }
            }
            Expr::Add(a, b) => a.diff(v) + b.diff(v),
            Expr::Sub(a, b) => a.diff(v) - b.diff(v),
            Expr::Mul(a, b) => {
                let da = a.diff(v);
                let db = b.diff(v);
                da * (**b).clone() + (**a).clone() * db
            }
            Expr::Div(a, b) => {
                let da = a.diff(v);
                let db = b.diff(v);
                (da * (**b).clone() - (**a).clone() * db) / (**b).clone().powi(2)
            }
            Expr::Neg(a) => -a.diff(v),
            Expr::Powi(a, n) => {
                let da = a.diff(v);
                f64::from(*n) * (**a).clone().powi(n - 1) * da
            }
            Expr::Sin(a) => (**a).clone().cos() * a.diff(v),
            Expr::Cos(a) => -((**a).clone().sin() * a.diff(v)),
            Expr::Exp(a) => (**a).clone().exp() * a.diff(v),
            Expr::Ln(a) => a.diff(v) / (**a).clone(),
        }
    }

    /// Gradient `[∂/∂x, ∂/∂y, ∂/∂z]`.
    pub fn gradient(&self) -> [Expr; 3] {
        Var::ALL.map(|v| self.diff(v))
    }

    /// Laplacian `∂²/∂x² + ∂²/∂y² + ∂²/∂z²`.
    pub fn laplacian(&self) -> Expr {
        Var::ALL
            .iter()
            .fold(Expr::zero(), |acc, &v| acc + self.diff(v).diff(v))
    }

    /// Directional derivative `w · ∇f` for a constant vector `w`.
    pub fn directional_derivative(&self, w: [f64; 3]) -> Expr {
        Var::ALL
            .iter()
            .zip(w)
            .fold(Expr::zero(), |acc, (&v, wi)| acc + wi * self.diff(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn check_at(e: &Expr, p: [f64; 3], expected: f64) {
        assert_relative_eq!(e.eval(p), expected, epsilon = 1e-12, max_relative = 1e-12);
    }

    #[test]
    fn test_basic_rules() {
        assert_eq!(Expr::constant(3.0).diff(Var::X), Expr::zero());
        assert_eq!(Expr::x().diff(Var::X), Expr::one());
        assert_eq!(Expr::x().diff(Var::Y), Expr::zero());
        assert_eq!((Expr::x() * 4.0).diff(Var::X), Expr::Const(4.0));
    }

    #[test]
    fn test_polynomial_laplacian() {
        // Δ(x² + y²z) = 2 + 2z
        let f = Expr::x().powi(2) + Expr::y().powi(2) * Expr::z();
        let lap = f.laplacian();
        check_at(&lap, [0.3, 0.7, 0.25], 2.5);
        check_at(&lap, [0.0, 0.0, -1.0], 0.0);
    }

    #[test]
    fn test_trig_second_derivative() {
        let k = 2.0 * PI;
        let f = (k * Expr::x()).sin() * (k * Expr::y()).cos();
        let lap = f.laplacian();
        for p in [[0.1, 0.2, 0.3], [0.45, 0.8, 0.0]] {
            let expected = -2.0 * k * k * (k * p[0]).sin() * (k * p[1]).cos();
            check_at(&lap, p, expected);
        }
    }

    #[test]
    fn test_quotient_and_log() {
        // d/dx ln(1 + x²) = 2x / (1 + x²)
        let f = (1.0 + Expr::x().powi(2)).ln();
        let df = f.diff(Var::X);
        check_at(&df, [0.5, 0.0, 0.0], 1.0 / 1.25);

        // d/dy (y / (1 + y)) = 1 / (1 + y)²
        let g = Expr::y() / (1.0 + Expr::y());
        check_at(&g.diff(Var::Y), [0.0, 1.0, 0.0], 0.25);
    }

    #[test]
    fn test_exp_chain_rule() {
        let f = (-(Expr::z().powi(2))).exp();
        let df = f.diff(Var::Z);
        let z: f64 = 0.4;
        check_at(&df, [0.0, 0.0, z], -2.0 * z * (-z * z).exp());
    }

    #[test]
    fn test_gradient_and_directional() {
        let f = Expr::x() * Expr::y() + Expr::z().powi(3);
        let g = f.gradient();
        let p = [2.0, 3.0, 0.5];
        check_at(&g[0], p, 3.0);
        check_at(&g[1], p, 2.0);
        check_at(&g[2], p, 0.75);

        let d = f.directional_derivative([1.0, -1.0, 2.0]);
        check_at(&d, p, 3.0 - 2.0 + 1.5);
    }
}
