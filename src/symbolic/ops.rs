//! Simplifying constructors and arithmetic operator overloads.

use std::ops::{Add, Div, Mul, Neg, Sub};

use super::Expr;

impl Expr {
    /// `a + b` with constant folding.
    pub fn sum(a: Expr, b: Expr) -> Expr {
        match (a.as_constant(), b.as_constant()) {
            (Some(x), Some(y)) => Expr::Const(x + y),
            (Some(x), _) if x == 0.0 => b,
            (_, Some(y)) if y == 0.0 => a,
            _ => match b {
                Expr::Neg(inner) => Expr::Sub(Box::new(a), inner),
                b => Expr::Add(Box::new(a), Box::new(b)),
            },
        }
    }

    /// `a - b` with constant folding.
    pub fn difference(a: Expr, b: Expr) -> Expr {
        match (a.as_constant(), b.as_constant()) {
            (Some(x), Some(y)) => Expr::Const(x - y),
            (Some(x), _) if x == 0.0 => Expr::negate(b),
            (_, Some(y)) if y == 0.0 => a,
            _ if a == b => Expr::zero(),
            _ => match b {
                Expr::Neg(inner) => Expr::Add(Box::new(a), inner),
                b => Expr::Sub(Box::new(a), Box::new(b)),
            },
        }
    }

    /// `a * b` with constant folding and `0`/`1` identities.
    pub fn product(a: Expr, b: Expr) -> Expr {
        match (a.as_constant(), b.as_constant()) {
            (Some(x), Some(y)) => Expr::Const(x * y),
            (Some(x), _) | (_, Some(x)) if x == 0.0 => Expr::zero(),
            (Some(x), _) if x == 1.0 => b,
            (_, Some(y)) if y == 1.0 => a,
            (Some(x), _) if x == -1.0 => Expr::negate(b),
            (_, Some(y)) if y == -1.0 => Expr::negate(a),
            // keep constants on the left so `c1 * (c2 * e)` folds
            (None, Some(_)) => Expr::product(b, a),
            (Some(x), None) => match b {
                Expr::Mul(inner_a, inner_b) if inner_a.as_constant().is_some() => {
                    let c = inner_a.as_constant().unwrap_or(1.0);
                    Expr::product(Expr::Const(x * c), *inner_b)
                }
                b => Expr::Mul(Box::new(a), Box::new(b)),
            },
            (None, None) => Expr::Mul(Box::new(a), Box::new(b)),
        }
    }

    /// `a / b` with constant folding.
    pub fn quotient(a: Expr, b: Expr) -> Expr {
        match (a.as_constant(), b.as_constant()) {
            (Some(x), Some(y)) if y != 0.0 => Expr::Const(x / y),
            (Some(x), _) if x == 0.0 => Expr::zero(),
            (_, Some(y)) if y == 1.0 => a,
            (_, Some(y)) if y != 0.0 => Expr::product(Expr::Const(1.0 / y), a),
            _ => Expr::Div(Box::new(a), Box::new(b)),
        }
    }

    /// `-a`, collapsing double negation.
    pub fn negate(a: Expr) -> Expr {
        match a {
            Expr::Const(c) => Expr::Const(-c),
            Expr::Neg(inner) => *inner,
            a => Expr::Neg(Box::new(a)),
        }
    }

    /// Integer power.
    pub fn powi(self, n: i32) -> Expr {
        match (n, self) {
            (0, _) => Expr::one(),
            (1, e) => e,
            (_, Expr::Const(c)) => Expr::Const(c.powi(n)),
            (_, Expr::Powi(inner, m)) => Expr::Powi(inner, m * n),
            (_, e) => Expr::Powi(Box::new(e), n),
        }
    }

    pub fn sin(self) -> Expr {
        match self {
            Expr::Const(c) => Expr::Const(c.sin()),
            e => Expr::Sin(Box::new(e)),
        }
    }

    pub fn cos(self) -> Expr {
        match self {
            Expr::Const(c) => Expr::Const(c.cos()),
            e => Expr::Cos(Box::new(e)),
        }
    }

    pub fn exp(self) -> Expr {
        match self {
            Expr::Const(c) => Expr::Const(c.exp()),
            e => Expr::Exp(Box::new(e)),
        }
    }

    pub fn ln(self) -> Expr {
        match self {
            Expr::Const(c) if c > 0.0 => Expr::Const(c.ln()),
            e => Expr::Ln(Box::new(e)),
        }
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $ctor:path) => {
        impl $trait<Expr> for Expr {
            type Output = Expr;
            fn $method(self, rhs: Expr) -> Expr {
                $ctor(self, rhs)
            }
        }

        impl $trait<&Expr> for &Expr {
            type Output = Expr;
            fn $method(self, rhs: &Expr) -> Expr {
                $ctor(self.clone(), rhs.clone())
            }
        }

        impl $trait<f64> for Expr {
            type Output = Expr;
            fn $method(self, rhs: f64) -> Expr {
                $ctor(self, Expr::Const(rhs))
            }
        }

        impl $trait<Expr> for f64 {
            type Output = Expr;
            fn $method(self, rhs: Expr) -> Expr {
                $ctor(Expr::Const(self), rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, Expr::sum);
impl_binary_op!(Sub, sub, Expr::difference);
impl_binary_op!(Mul, mul, Expr::product);
impl_binary_op!(Div, div, Expr::quotient);

impl Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        Expr::negate(self)
    }
}

impl Neg for &Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        Expr::negate(self.clone())
    }
}
