//! Convergence-order testing of RHS operators.
//!
//! A convergence study evaluates an operator on a sequence of grids of side
//! `2^p` and measures the relative L2 error against the exact RHS of analytic
//! test functions. The slope of `ln(error)` against `ln(spacing)` estimates
//! the order of the discretisation:
//!
//! error ≈ C h^k  ⇒  ln(error) ≈ ln(C) + k ln(h)
//!
//! # Example
//!
//! ```
//! use std::f64::consts::PI;
//! use vox_rs::convergence::{ConvergenceConfig, rhs_convergence_test_single};
//! use vox_rs::operators::{Diffusion, DiffusionParams};
//! use vox_rs::symbolic::Expr;
//! use vox_rs::types::{Convention, Precision};
//!
//! let f = (PI * Expr::x()).sin() * (2.0 * PI * Expr::y()).cos();
//! let config = ConvergenceConfig::default()
//!     .with_convention(Convention::StaggeredX)
//!     .with_precision(Precision::Float64)
//!     .with_powers(vec![3, 4, 5]);
//!
//! let report =
//!     rhs_convergence_test_single::<Diffusion>(&DiffusionParams::new(1.0), &f, &config)?;
//! assert!((report.slope - 2.0).abs() < 0.2);
//! # Ok::<(), vox_rs::convergence::ConvergenceError>(())
//! ```

mod config;
mod error;
mod fit;
mod report;
mod runner;

pub use config::{ConvergenceConfig, MAX_POWER, MIN_POWER};
pub use error::ConvergenceError;
pub use fit::{log_log_slope, polyfit_linear, relative_l2_error};
pub use report::{ConvergenceReport, SingleConvergenceReport};
pub use runner::{rhs_convergence_test, rhs_convergence_test_on, rhs_convergence_test_single};
