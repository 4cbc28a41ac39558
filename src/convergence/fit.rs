//! Error norms and the log-log fit.

use ndarray::{Array3, Zip};

use crate::backend::shape_string;
use crate::grid::GridError;

/// Least-squares line `y = slope * x + intercept`.
///
/// Returns `(slope, intercept)`. Inputs with fewer than two points or zero
/// spread in `x` give NaN.
pub fn polyfit_linear(xs: &[f64], ys: &[f64]) -> (f64, f64) {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return (f64::NAN, f64::NAN);
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);

    let x_mean = xs.iter().sum::<f64>() / n as f64;
    let y_mean = ys.iter().sum::<f64>() / n as f64;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - x_mean;
        sxy += dx * (y - y_mean);
        sxx += dx * dx;
    }

    let slope = sxy / sxx;
    (slope, y_mean - slope * x_mean)
}

/// Slope of `ln(error)` against `ln(spacing)`: the empirical convergence order.
///
/// A zero error makes the slope non-finite.
pub fn log_log_slope(spacings: &[f64], errors: &[f64]) -> f64 {
    let ln_h: Vec<f64> = spacings.iter().map(|h| h.ln()).collect();
    let ln_e: Vec<f64> = errors.iter().map(|e| e.ln()).collect();
    polyfit_linear(&ln_h, &ln_e).0
}

/// Relative L2 error `||numeric - exact||₂ / ||exact||₂`.
pub fn relative_l2_error(numeric: &Array3<f64>, exact: &Array3<f64>) -> Result<f64, GridError> {
    if numeric.shape() != exact.shape() {
        return Err(GridError::dimension_mismatch(
            shape_string(exact.shape()),
            shape_string(numeric.shape()),
        ));
    }

    let mut diff2 = 0.0;
    let mut ref2 = 0.0;
    Zip::from(numeric).and(exact).for_each(|&a, &b| {
        diff2 += (a - b) * (a - b);
        ref2 += b * b;
    });
    Ok((diff2 / ref2).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_polyfit_exact_line() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys: Vec<f64> = xs.iter().map(|x| 2.5 * x - 1.0).collect();
        let (slope, intercept) = polyfit_linear(&xs, &ys);
        assert_relative_eq!(slope, 2.5, epsilon = 1e-12);
        assert_relative_eq!(intercept, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_polyfit_degenerate() {
        assert!(polyfit_linear(&[1.0], &[2.0]).0.is_nan());
        assert!(polyfit_linear(&[1.0, 1.0], &[2.0, 3.0]).0.is_nan());
    }

    #[test]
    fn test_log_log_slope_power_law() {
        let hs = [0.125, 0.0625, 0.03125, 0.015625];
        let es: Vec<f64> = hs.iter().map(|h: &f64| 3.0 * h.powi(2)).collect();
        assert_relative_eq!(log_log_slope(&hs, &es), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_error_gives_non_finite_slope() {
        let hs = [0.5, 0.25, 0.125];
        let es = [1e-2, 0.0, 1e-4];
        assert!(!log_log_slope(&hs, &es).is_finite());
    }

    #[test]
    fn test_relative_l2() {
        let exact = Array3::from_elem((2, 2, 2), 2.0);
        let numeric = Array3::from_elem((2, 2, 2), 2.2);
        assert_relative_eq!(
            relative_l2_error(&numeric, &exact).unwrap(),
            0.1,
            epsilon = 1e-12
        );
        assert_eq!(relative_l2_error(&exact, &exact).unwrap(), 0.0);
    }

    #[test]
    fn test_relative_l2_shape_mismatch() {
        let a = Array3::zeros((2, 2, 2));
        let b = Array3::zeros((2, 2, 3));
        assert!(matches!(
            relative_l2_error(&a, &b),
            Err(GridError::DimensionMismatch { .. })
        ));
    }
}
