//! Boundary padding and finite-difference stencils on top of engine primitives.

use serde::{Deserialize, Serialize};

use super::{AxisBoundary, BoundarySpec, VoxelGrid};

/// Central finite-difference Laplacian stencil.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaplaceStencil {
    /// 3-point `[1, -2, 1] / h²`.
    #[default]
    SecondOrder,
    /// 5-point `[-1, 16, -30, 16, -1] / (12 h²)`.
    FourthOrder,
}

impl LaplaceStencil {
    /// Formal truncation order.
    pub fn order(&self) -> u32 {
        match self {
            LaplaceStencil::SecondOrder => 2,
            LaplaceStencil::FourthOrder => 4,
        }
    }

    /// Number of neighbours on each side.
    pub fn half_width(&self) -> usize {
        match self {
            LaplaceStencil::SecondOrder => 1,
            LaplaceStencil::FourthOrder => 2,
        }
    }

    /// Off-centre `(offset, weight)` pairs of the 1D stencil (before `1/h²`).
    fn neighbours(&self) -> &'static [(isize, f64)] {
        match self {
            LaplaceStencil::SecondOrder => &[(-1, 1.0), (1, 1.0)],
            LaplaceStencil::FourthOrder => &[
                (-2, -1.0 / 12.0),
                (-1, 16.0 / 12.0),
                (1, 16.0 / 12.0),
                (2, -1.0 / 12.0),
            ],
        }
    }

    /// Centre weight of the 1D stencil (before `1/h²`).
    fn centre(&self) -> f64 {
        match self {
            LaplaceStencil::SecondOrder => -2.0,
            LaplaceStencil::FourthOrder => -30.0 / 12.0,
        }
    }
}

/// Padding and finite differences available on every [`VoxelGrid`].
///
/// All operators act on every channel independently and return a field of
/// the input shape. Grid spacing is taken from [`VoxelGrid::info`].
pub trait Stencils: VoxelGrid {
    /// Window of `len` layers starting at `start` along spatial axis `axis`.
    fn axis_window(&self, field: &Self::Field, axis: usize, start: usize, len: usize) -> Self::Field {
        let shape = self.shape(field);
        let mut from = [0; 4];
        let mut extent = shape;
        from[axis + 1] = start;
        extent[axis + 1] = len;
        self.window(field, from, extent)
    }

    /// Pad `width` layers on both ends of spatial axis `axis`.
    ///
    /// # Panics
    ///
    /// Panics if the field has fewer than `width` layers along `axis`.
    fn pad_axis(
        &self,
        field: &Self::Field,
        axis: usize,
        width: usize,
        boundary: AxisBoundary,
    ) -> Self::Field {
        if width == 0 {
            return field.clone();
        }
        let n = self.shape(field)[axis + 1];
        assert!(
            n >= width,
            "cannot pad {} layers on an axis with {} samples",
            width,
            n
        );

        let mut parts = Vec::with_capacity(2 * width + 1);
        match boundary {
            AxisBoundary::Periodic => {
                parts.push(self.axis_window(field, axis, n - width, width));
                parts.push(field.clone());
                parts.push(self.axis_window(field, axis, 0, width));
            }
            AxisBoundary::Dirichlet { low, high } => {
                // outermost first: 2g - u mirrored through the boundary node
                for m in (1..width).rev() {
                    let inner = self.axis_window(field, axis, m - 1, 1);
                    parts.push(self.affine(&inner, -1.0, 2.0 * low));
                }
                let edge = self.axis_window(field, axis, 0, 1);
                parts.push(self.affine(&edge, 0.0, low));

                parts.push(field.clone());

                parts.push(self.affine(&edge, 0.0, high));
                for m in 1..width {
                    let inner = self.axis_window(field, axis, n - m, 1);
                    parts.push(self.affine(&inner, -1.0, 2.0 * high));
                }
            }
        }
        self.cat(parts, axis + 1)
    }

    /// Pad `width` layers on both ends of every spatial axis.
    fn pad(&self, field: &Self::Field, width: usize, bc: &BoundarySpec) -> Self::Field {
        (0..3).fold(field.clone(), |f, axis| {
            self.pad_axis(&f, axis, width, bc.axes[axis])
        })
    }

    /// Discrete Laplacian.
    fn laplace(&self, field: &Self::Field, bc: &BoundarySpec, stencil: LaplaceStencil) -> Self::Field {
        let w = stencil.half_width();
        let spacing = self.info().spacing;
        let centre: f64 = spacing
            .iter()
            .map(|h| stencil.centre() / (h * h))
            .sum();

        let mut acc = self.scale(field, centre);
        for axis in 0..3 {
            let n = self.shape(field)[axis + 1];
            let inv_h2 = 1.0 / (spacing[axis] * spacing[axis]);
            let padded = self.pad_axis(field, axis, w, bc.axes[axis]);
            for &(offset, weight) in stencil.neighbours() {
                let start = (w as isize + offset) as usize;
                let shifted = self.axis_window(&padded, axis, start, n);
                acc = self.add(&acc, &self.scale(&shifted, weight * inv_h2));
            }
        }
        acc
    }

    /// Second-order central difference `∂u/∂x_axis`.
    fn gradient(&self, field: &Self::Field, axis: usize, bc: &BoundarySpec) -> Self::Field {
        let n = self.shape(field)[axis + 1];
        let h = self.info().spacing[axis];
        let padded = self.pad_axis(field, axis, 1, bc.axes[axis]);
        let forward = self.axis_window(&padded, axis, 2, n);
        let backward = self.axis_window(&padded, axis, 0, n);
        self.scale(&self.sub(&forward, &backward), 0.5 / h)
    }
}

impl<G: VoxelGrid> Stencils for G {}
