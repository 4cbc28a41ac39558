//! Voxel grid domains.
//!
//! [`VoxelFields`] describes the sampled domain (resolution, physical extent,
//! convention) and produces the coordinate [`Mesh`] that test functions are
//! sampled on, plus the [`GridInfo`] a field engine is bound to.

mod error;
mod voxel_fields;

pub use error::GridError;
pub use voxel_fields::{GridInfo, Mesh, VoxelFields};
