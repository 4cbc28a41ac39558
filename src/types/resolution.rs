//! 3D voxel grid resolution types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 3D grid resolution (number of samples along each axis).
///
/// Provides a strongly-typed way to specify grid resolution,
/// preventing mix-ups between nx/ny/nz and other integer parameters.
///
/// # Example
///
/// ```
/// use vox_rs::types::Resolution3D;
///
/// let res = Resolution3D::new(17, 16, 16);
/// assert_eq!(res.nx(), 17);
/// assert_eq!(res.total_voxels(), 17 * 16 * 16);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution3D {
    /// Number of samples along x
    nx: usize,
    /// Number of samples along y
    ny: usize,
    /// Number of samples along z
    nz: usize,
}

impl Resolution3D {
    /// Create a new resolution.
    ///
    /// # Panics
    ///
    /// Panics if any of `nx`, `ny` or `nz` is zero.
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        assert!(nx > 0, "nx must be positive, got {}", nx);
        assert!(ny > 0, "ny must be positive, got {}", ny);
        assert!(nz > 0, "nz must be positive, got {}", nz);
        Self { nx, ny, nz }
    }

    /// Create a cubic resolution (same in all directions).
    pub fn cube(n: usize) -> Self {
        Self::new(n, n, n)
    }

    /// Number of samples along x.
    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Number of samples along y.
    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Number of samples along z.
    #[inline]
    pub fn nz(&self) -> usize {
        self.nz
    }

    /// Total number of samples.
    #[inline]
    pub fn total_voxels(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// Return as array `[nx, ny, nz]`.
    #[inline]
    pub fn as_array(&self) -> [usize; 3] {
        [self.nx, self.ny, self.nz]
    }
}

impl fmt::Display for Resolution3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}×{}", self.nx, self.ny, self.nz)
    }
}

impl From<(usize, usize, usize)> for Resolution3D {
    fn from((nx, ny, nz): (usize, usize, usize)) -> Self {
        Self::new(nx, ny, nz)
    }
}

impl From<Resolution3D> for [usize; 3] {
    fn from(res: Resolution3D) -> Self {
        res.as_array()
    }
}
