//! # vox-rs
//!
//! Convergence-order testing for right-hand-side operators on voxel grids.
//!
//! This crate provides:
//! - Symbolic test functions with exact differentiation ([`symbolic`])
//! - Voxel domains in `cell_center` and `staggered_x` conventions ([`grid`])
//! - Interchangeable field engines, ndarray and Burn ([`backend`])
//! - Finite-difference RHS operators under test ([`operators`])
//! - The convergence tester and its reports ([`convergence`])
//!
//! # Quick Start
//!
//! ```
//! use std::f64::consts::PI;
//! use vox_rs::{ConvergenceConfig, Diffusion, DiffusionParams, Expr, Precision};
//!
//! let f = (2.0 * PI * Expr::x()).sin() * (2.0 * PI * Expr::y()).cos();
//! let config = ConvergenceConfig::default()
//!     .with_precision(Precision::Float64)
//!     .with_powers(vec![3, 4, 5]);
//!
//! let report =
//!     vox_rs::rhs_convergence_test::<Diffusion>(&DiffusionParams::new(1.0), &[f], &config)?;
//! assert!(report.within_tolerance(0.2));
//! # Ok::<(), vox_rs::ConvergenceError>(())
//! ```
//!
//! # Features
//!
//! - `burn-ndarray` (default): Burn engine on the NdArray CPU backend
//! - `burn-wgpu`: Burn engine on WGPU
//! - `parallel`: parallel sampling of test functions

pub mod backend;
pub mod convergence;
pub mod grid;
pub mod operators;
pub mod symbolic;
pub mod types;

pub use backend::{BoundarySpec, HostGrid, LaplaceStencil, Stencils, VoxelGrid};
pub use convergence::{
    ConvergenceConfig, ConvergenceError, ConvergenceReport, SingleConvergenceReport,
    rhs_convergence_test, rhs_convergence_test_single,
};
pub use grid::{GridError, GridInfo, Mesh, VoxelFields};
pub use operators::{
    Advection, AdvectionParams, Diffusion, DiffusionParams, GrayScott, GrayScottParams,
    OperatorError, RhsOperator,
};
pub use symbolic::{Expr, Var};
pub use types::{BackendKind, Convention, Extent3D, Precision, Resolution3D};

#[cfg(feature = "burn")]
pub use backend::burn_grid::{BurnGrid, GridBackend};
