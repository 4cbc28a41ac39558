//! Symbolic scalar expressions in three spatial variables.
//!
//! Test functions and their exact right-hand sides are represented as
//! expression trees over `x`, `y`, `z`. The tree can be:
//! - built with ordinary arithmetic (`Expr::x() * 2.0 + Expr::y().sin()`)
//! - differentiated exactly ([`Expr::diff`], [`Expr::gradient`], [`Expr::laplacian`])
//! - evaluated at a point or sampled on a coordinate mesh ([`Expr::sample`])
//!
//! Construction goes through simplifying constructors that fold constants
//! and drop `0`/`1` identities, which keeps derivative trees small.
//!
//! # Example
//!
//! ```
//! use std::f64::consts::PI;
//! use vox_rs::symbolic::{Expr, Var};
//!
//! let f = (2.0 * PI * Expr::x()).sin();
//! let d2f = f.diff(Var::X).diff(Var::X);
//!
//! let x = 0.125;
//! let exact = -(2.0 * PI).powi(2) * (2.0 * PI * x).sin();
//! assert!((d2f.eval([x, 0.0, 0.0]) - exact).abs() < 1e-12);
//! ```

mod calculus;
mod display;
mod eval;
mod ops;

use serde::{Deserialize, Serialize};

/// Spatial variable of an expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Var {
    X,
    Y,
    Z,
}

impl Var {
    /// All three variables in axis order.
    pub const ALL: [Var; 3] = [Var::X, Var::Y, Var::Z];

    /// Axis index (0, 1, 2).
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Var::X => 0,
            Var::Y => 1,
            Var::Z => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Var::X => "x",
            Var::Y => "y",
            Var::Z => "z",
        }
    }
}

/// Symbolic scalar expression.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Const(f64),
    Var(Var),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Neg(Box<Expr>),
    /// Integer power.
    Powi(Box<Expr>, i32),
    Sin(Box<Expr>),
    Cos(Box<Expr>),
    Exp(Box<Expr>),
    /// Natural logarithm.
    Ln(Box<Expr>),
}

impl Expr {
    /// The variable `x`.
    pub fn x() -> Self {
        Expr::Var(Var::X)
    }

    /// The variable `y`.
    pub fn y() -> Self {
        Expr::Var(Var::Y)
    }

    /// The variable `z`.
    pub fn z() -> Self {
        Expr::Var(Var::Z)
    }

    pub fn var(v: Var) -> Self {
        Expr::Var(v)
    }

    pub fn constant(c: f64) -> Self {
        Expr::Const(c)
    }

    pub fn zero() -> Self {
        Expr::Const(0.0)
    }

    pub fn one() -> Self {
        Expr::Const(1.0)
    }

    /// Constant value if the expression is a literal.
    #[inline]
    pub fn as_constant(&self) -> Option<f64> {
        match self {
            Expr::Const(c) => Some(*c),
            _ => None,
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.as_constant() == Some(0.0)
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.as_constant() == Some(1.0)
    }

    /// Whether `v` occurs anywhere in the expression.
    pub fn depends_on(&self, v: Var) -> bool {
        match self {
            Expr::Const(_) => false,
            Expr::Var(w) => *w == v,
            Expr::Add(a, b) | Expr::Sub(a, b) | Expr::Mul(a, b) | Expr::Div(a, b) => {
                a.depends_on(v) || b.depends_on(v)
            }
            Expr::Neg(a)
            | Expr::Powi(a, _)
            | Expr::Sin(a)
            | Expr::Cos(a)
            | Expr::Exp(a)
            | Expr::Ln(a) => a.depends_on(v),
        }
    }
}

impl From<f64> for Expr {
    fn from(c: f64) -> Self {
        Expr::Const(c)
    }
}

impl From<Var> for Expr {
    fn from(v: Var) -> Self {
        Expr::Var(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depends_on() {
        let f = Expr::x() * Expr::z().sin();
        assert!(f.depends_on(Var::X));
        assert!(!f.depends_on(Var::Y));
        assert!(f.depends_on(Var::Z));
    }

    #[test]
    fn test_constant_queries() {
        assert!(Expr::zero().is_zero());
        assert!(Expr::one().is_one());
        assert_eq!(Expr::constant(2.5).as_constant(), Some(2.5));
        assert_eq!(Expr::x().as_constant(), None);
    }

    #[test]
    fn test_serde_roundtrip() {
        let f = (Expr::x() * 3.0).cos() + Expr::y().powi(2);
        let json = serde_json::to_string(&f).unwrap();
        let back: Expr = serde_json::from_str(&json).unwrap();
        assert_eq!(f, back);
    }
}
