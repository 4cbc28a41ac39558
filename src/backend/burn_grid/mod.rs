//! Field engine on the [Burn](https://github.com/tracel-ai/burn) tensor framework.
//!
//! # Backend Selection
//!
//! - **NdArray**: CPU reference implementation, `f32` or `f64`
//!   (requires `burn-ndarray` feature)
//! - **WGPU**: Cross-platform GPU, `f32` only (requires `burn-wgpu` feature)
//!
//! # Usage
//!
//! ```ignore
//! use vox_rs::backend::burn_grid::BurnGrid;
//! use vox_rs::backend::VoxelGrid;
//! use burn_ndarray::NdArray;
//!
//! let grid = BurnGrid::<NdArray<f64>>::create(vf.grid_info())?;
//! let u = grid.init_scalar_field(&f.sample(&vf.meshgrid()))?;
//! let host = grid.export_scalar_field(&u)?;
//! ```

mod backend;
mod grid;

pub use backend::GridBackend;
pub use grid::BurnGrid;
