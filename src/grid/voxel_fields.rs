//! Voxel domain description: resolution, extent, convention and coordinates.

use ndarray::Array3;
use serde::{Deserialize, Serialize};

use super::GridError;
use crate::types::{Convention, Extent3D, Resolution3D};

/// Metadata a field engine needs to lay out fields on a grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridInfo {
    /// Samples per axis, boundary nodes included
    pub shape: [usize; 3],
    /// Grid spacing per axis
    pub spacing: [f64; 3],
    /// Physical size of the domain
    pub extent: Extent3D,
    /// Sample placement
    pub convention: Convention,
}

impl GridInfo {
    /// Shape of a field after boundary layers are trimmed.
    pub fn trimmed_shape(&self) -> [usize; 3] {
        let layers = self.convention.trimmed_layers();
        [0, 1, 2].map(|a| self.shape[a] - 2 * layers[a])
    }

    /// Total number of samples.
    #[inline]
    pub fn n_voxels(&self) -> usize {
        self.shape.iter().product()
    }
}

/// Coordinate arrays of a grid in `ij` indexing.
#[derive(Clone, Debug)]
pub struct Mesh {
    x: Array3<f64>,
    y: Array3<f64>,
    z: Array3<f64>,
}

impl Mesh {
    #[inline]
    pub fn x(&self) -> &Array3<f64> {
        &self.x
    }

    #[inline]
    pub fn y(&self) -> &Array3<f64> {
        &self.y
    }

    #[inline]
    pub fn z(&self) -> &Array3<f64> {
        &self.z
    }

    /// Mesh shape `[nx, ny, nz]`.
    pub fn shape(&self) -> [usize; 3] {
        let s = self.x.shape();
        [s[0], s[1], s[2]]
    }
}

/// A rectangular voxel domain anchored at the origin.
///
/// Coordinates follow the convention:
/// - `cell_center`: `x_i = (i + 1/2) h`, `h = L / N`
/// - `staggered_x`: along x, `x_i = i h` with `h = L / (N - 1)` so the first
///   and last layers sit on the domain faces; y and z are cell-centred.
///
/// # Example
///
/// ```
/// use vox_rs::grid::VoxelFields;
/// use vox_rs::types::{Convention, Extent3D};
///
/// let vf = VoxelFields::new(
///     Convention::StaggeredX.resolution(8),
///     Extent3D::unit_cube(),
///     Convention::StaggeredX,
/// )
/// .unwrap();
/// assert_eq!(vf.spacing(), [0.125, 0.125, 0.125]);
/// assert_eq!(vf.axis_coordinates(0)[8], 1.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelFields {
    resolution: Resolution3D,
    extent: Extent3D,
    convention: Convention,
    spacing: [f64; 3],
}

impl VoxelFields {
    /// Create a domain description.
    ///
    /// Fails if a staggered axis has fewer than three nodes, which would leave
    /// no interior after trimming.
    pub fn new(
        resolution: Resolution3D,
        extent: Extent3D,
        convention: Convention,
    ) -> Result<Self, GridError> {
        let n = resolution.as_array();
        let l = extent.as_array();
        let layers = convention.trimmed_layers();

        for axis in 0..3 {
            if n[axis] < 2 * layers[axis] + 1 {
                return Err(GridError::InvalidResolution(format!(
                    "{} needs at least {} samples along axis {}, got {}",
                    convention,
                    2 * layers[axis] + 1,
                    axis,
                    n[axis]
                )));
            }
        }

        let spacing = [0, 1, 2].map(|a| {
            if layers[a] > 0 {
                l[a] / (n[a] - 1) as f64
            } else {
                l[a] / n[a] as f64
            }
        });

        Ok(Self {
            resolution,
            extent,
            convention,
            spacing,
        })
    }

    #[inline]
    pub fn resolution(&self) -> Resolution3D {
        self.resolution
    }

    #[inline]
    pub fn extent(&self) -> Extent3D {
        self.extent
    }

    #[inline]
    pub fn convention(&self) -> Convention {
        self.convention
    }

    /// Grid spacing per axis.
    #[inline]
    pub fn spacing(&self) -> [f64; 3] {
        self.spacing
    }

    /// 1D sample coordinates along `axis`.
    pub fn axis_coordinates(&self, axis: usize) -> Vec<f64> {
        let n = self.resolution.as_array()[axis];
        let h = self.spacing[axis];
        let offset = if self.convention.trimmed_layers()[axis] > 0 {
            0.0
        } else {
            0.5
        };
        (0..n).map(|i| (i as f64 + offset) * h).collect()
    }

    /// Coordinate mesh of all samples.
    pub fn meshgrid(&self) -> Mesh {
        let shape = (
            self.resolution.nx(),
            self.resolution.ny(),
            self.resolution.nz(),
        );
        let xs = self.axis_coordinates(0);
        let ys = self.axis_coordinates(1);
        let zs = self.axis_coordinates(2);

        Mesh {
            x: Array3::from_shape_fn(shape, |(i, _, _)| xs[i]),
            y: Array3::from_shape_fn(shape, |(_, j, _)| ys[j]),
            z: Array3::from_shape_fn(shape, |(_, _, k)| zs[k]),
        }
    }

    /// Metadata for binding a field engine to this domain.
    pub fn grid_info(&self) -> GridInfo {
        GridInfo {
            shape: self.resolution.as_array(),
            spacing: self.spacing,
            extent: self.extent,
            convention: self.convention,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_center_coordinates() {
        let vf = VoxelFields::new(
            Resolution3D::cube(4),
            Extent3D::unit_cube(),
            Convention::CellCenter,
        )
        .unwrap();
        assert_eq!(vf.spacing(), [0.25; 3]);
        assert_eq!(vf.axis_coordinates(1), vec![0.125, 0.375, 0.625, 0.875]);
    }

    #[test]
    fn test_staggered_x_coordinates() {
        let vf = VoxelFields::new(
            Convention::StaggeredX.resolution(4),
            Extent3D::new(2.0, 1.0, 1.0),
            Convention::StaggeredX,
        )
        .unwrap();
        assert_eq!(vf.spacing(), [0.5, 0.25, 0.25]);
        assert_eq!(vf.axis_coordinates(0), vec![0.0, 0.5, 1.0, 1.5, 2.0]);
        assert_eq!(vf.axis_coordinates(2)[0], 0.125);
    }

    #[test]
    fn test_meshgrid_ij_indexing() {
        let vf = VoxelFields::new(
            Resolution3D::new(2, 3, 4),
            Extent3D::unit_cube(),
            Convention::CellCenter,
        )
        .unwrap();
        let mesh = vf.meshgrid();
        assert_eq!(mesh.shape(), [2, 3, 4]);
        assert_eq!(mesh.x()[[1, 0, 0]], 0.75);
        assert!((mesh.y()[[0, 2, 0]] - 2.5 / 3.0).abs() < 1e-15);
        assert_eq!(mesh.z()[[0, 0, 3]], 0.875);
    }

    #[test]
    fn test_grid_info_trimmed_shape() {
        let vf = VoxelFields::new(
            Convention::StaggeredX.resolution(8),
            Extent3D::unit_cube(),
            Convention::StaggeredX,
        )
        .unwrap();
        let info = vf.grid_info();
        assert_eq!(info.shape, [9, 8, 8]);
        assert_eq!(info.trimmed_shape(), [7, 8, 8]);
        assert_eq!(info.n_voxels(), 9 * 64);
    }

    #[test]
    fn test_staggered_too_small() {
        let err = VoxelFields::new(
            Resolution3D::new(2, 4, 4),
            Extent3D::unit_cube(),
            Convention::StaggeredX,
        )
        .unwrap_err();
        assert!(matches!(err, GridError::InvalidResolution(_)));
    }
}
