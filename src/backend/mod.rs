//! Field engines for voxel grids.
//!
//! A field engine owns the numeric representation of fields on a grid and
//! provides the contract the convergence harness relies on:
//! - scalar-field construction from a host array ([`VoxelGrid::init_scalar_field`])
//! - multi-field concatenation along the channel axis ([`VoxelGrid::concatenate`])
//! - boundary-node trimming ([`VoxelGrid::trim_boundary_nodes`])
//! - export of a field back to a host array ([`VoxelGrid::export_scalar_field`])
//!
//! Fields have layout `[channel, x, y, z]`. Engines implement a handful of
//! primitives (windowing, concatenation, affine maps, pointwise arithmetic);
//! padding and finite-difference stencils are built once on top of those in
//! [`Stencils`].
//!
//! # Engines
//!
//! - [`HostGrid`]: ndarray on the CPU, `f32` or `f64`. Always available.
//! - [`BurnGrid`](burn_grid::BurnGrid): [Burn](https://github.com/tracel-ai/burn)
//!   tensors (`burn` feature), NdArray or WGPU backends.

mod boundary;
mod host;
mod stencil;

#[cfg(feature = "burn")]
pub mod burn_grid;

pub use boundary::{AxisBoundary, BoundarySpec};
pub use host::{HostGrid, Real};
pub use stencil::{LaplaceStencil, Stencils};

use std::fmt;

use ndarray::Array3;

use crate::grid::{GridError, GridInfo};
use crate::types::Precision;

/// A field engine bound to one grid.
///
/// Engines are interchangeable: the same sequence of calls on two engines
/// produces the same numbers up to floating-point precision.
pub trait VoxelGrid: Sized {
    /// Engine-side field with layout `[channel, x, y, z]`.
    type Field: Clone + fmt::Debug;

    /// Bind a new engine instance to a grid.
    fn create(info: GridInfo) -> Result<Self, GridError>;

    /// Grid this engine is bound to.
    fn info(&self) -> &GridInfo;

    /// Floating-point width of engine fields.
    fn precision(&self) -> Precision;

    /// Short engine name for logging.
    fn name(&self) -> &'static str;

    /// Build a single-channel field from samples on the full grid.
    ///
    /// `data` must have the grid shape, boundary nodes included.
    fn init_scalar_field(&self, data: &Array3<f64>) -> Result<Self::Field, GridError>;

    /// Export a single-channel field to a host array.
    fn export_scalar_field(&self, field: &Self::Field) -> Result<Array3<f64>, GridError>;

    /// Field shape `[channels, nx, ny, nz]`.
    fn shape(&self, field: &Self::Field) -> [usize; 4];

    /// Copy of the sub-block starting at `start` with extent `len`.
    fn window(&self, field: &Self::Field, start: [usize; 4], len: [usize; 4]) -> Self::Field;

    /// Concatenate fields along tensor axis `axis` (0 = channel).
    ///
    /// # Panics
    ///
    /// Panics if `fields` is empty or shapes differ off `axis`.
    fn cat(&self, fields: Vec<Self::Field>, axis: usize) -> Self::Field;

    /// Pointwise `scale * field + shift`.
    fn affine(&self, field: &Self::Field, scale: f64, shift: f64) -> Self::Field;

    /// Pointwise sum.
    fn add(&self, a: &Self::Field, b: &Self::Field) -> Self::Field;

    /// Pointwise difference.
    fn sub(&self, a: &Self::Field, b: &Self::Field) -> Self::Field;

    /// Pointwise product.
    fn mul(&self, a: &Self::Field, b: &Self::Field) -> Self::Field;

    /// Concatenate fields along the channel axis.
    fn concatenate(&self, fields: Vec<Self::Field>) -> Self::Field {
        self.cat(fields, 0)
    }

    /// Strip boundary layers that the convention does not evolve.
    ///
    /// `cell_center` fields are returned unchanged; `staggered_x` fields lose
    /// their first and last x-layer.
    fn trim_boundary_nodes(&self, field: &Self::Field) -> Self::Field {
        let layers = self.info().convention.trimmed_layers();
        if layers == [0, 0, 0] {
            return field.clone();
        }
        let [c, nx, ny, nz] = self.shape(field);
        self.window(
            field,
            [0, layers[0], layers[1], layers[2]],
            [
                c,
                nx - 2 * layers[0],
                ny - 2 * layers[1],
                nz - 2 * layers[2],
            ],
        )
    }

    /// Number of channels of a field.
    fn n_channels(&self, field: &Self::Field) -> usize {
        self.shape(field)[0]
    }

    /// Single-channel view of channel `j` (copied).
    fn channel(&self, field: &Self::Field, j: usize) -> Self::Field {
        let [_, nx, ny, nz] = self.shape(field);
        self.window(field, [j, 0, 0, 0], [1, nx, ny, nz])
    }

    /// Pointwise `scale * field`.
    fn scale(&self, field: &Self::Field, scale: f64) -> Self::Field {
        self.affine(field, scale, 0.0)
    }
}

/// Format a shape for error messages.
pub(crate) fn shape_string(shape: &[usize]) -> String {
    format!("{:?}", shape)
}
