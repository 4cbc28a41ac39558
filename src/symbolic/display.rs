//! Human-readable printing of expressions.

use std::fmt;

use super::Expr;

/// Binding strength used to decide where parentheses are needed.
fn precedence(e: &Expr) -> u8 {
    match e {
        Expr::Add(..) | Expr::Sub(..) => 1,
        Expr::Mul(..) | Expr::Div(..) => 2,
        Expr::Neg(_) => 3,
        Expr::Const(c) if *c < 0.0 => 3,
        Expr::Powi(..) => 4,
        _ => 5,
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, e: &Expr, min_prec: u8) -> fmt::Result {
    if precedence(e) < min_prec {
        write!(f, "({})", e)
    } else {
        write!(f, "{}", e)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const(c) => write!(f, "{}", c),
            Expr::Var(v) => f.write_str(v.name()),
            Expr::Add(a, b) => {
                write_operand(f, a, 1)?;
                f.write_str(" + ")?;
                write_operand(f, b, 1)
            }
            Expr::Sub(a, b) => {
                write_operand(f, a, 1)?;
                f.write_str(" - ")?;
                write_operand(f, b, 2)
            }
            Expr::Mul(a, b) => {
                write_operand(f, a, 2)?;
                f.write_str("*")?;
                write_operand(f, b, 3)
            }
            Expr::Div(a, b) => {
                write_operand(f, a, 2)?;
                f.write_str("/")?;
                write_operand(f, b, 4)
            }
            Expr::Neg(a) => {
                f.write_str("-")?;
                write_operand(f, a, 3)
            }
            Expr::Powi(a, n) => {
                write_operand(f, a, 5)?;
                write!(f, "**{}", n)
            }
            Expr::Sin(a) => write!(f, "sin({})", a),
            Expr::Cos(a) => write!(f, "cos({})", a),
            Expr::Exp(a) => write!(f, "exp({})", a),
            Expr::Ln(a) => write!(f, "log({})", a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let f = Expr::x().powi(2);
        assert_eq!(f.to_string(), "x**2");

        let g = (Expr::x() + Expr::y()) * Expr::z();
        assert_eq!(g.to_string(), "(x + y)*z");

        let h = Expr::x() - (Expr::y() - Expr::z());
        assert_eq!(h.to_string(), "x - (y - z)");

        let k = (3.0 * Expr::x()).sin();
        assert_eq!(k.to_string(), "sin(3*x)");
    }
}
