//! Physical extent of a voxel domain.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Physical size of a box-shaped domain anchored at the origin.
///
/// # Example
///
/// ```
/// use vox_rs::types::Extent3D;
///
/// let extent = Extent3D::new(2.0, 1.0, 1.0);
/// assert_eq!(extent.lx(), 2.0);
/// assert_eq!(extent.volume(), 2.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Extent3D {
    lx: f64,
    ly: f64,
    lz: f64,
}

impl Extent3D {
    /// Create a new extent.
    ///
    /// # Panics
    ///
    /// Panics if any side length is not strictly positive and finite.
    pub fn new(lx: f64, ly: f64, lz: f64) -> Self {
        for (name, l) in [("lx", lx), ("ly", ly), ("lz", lz)] {
            assert!(
                l.is_finite() && l > 0.0,
                "{} must be positive and finite, got {}",
                name,
                l
            );
        }
        Self { lx, ly, lz }
    }

    /// The unit cube [0, 1]³.
    pub fn unit_cube() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    #[inline]
    pub fn lx(&self) -> f64 {
        self.lx
    }

    #[inline]
    pub fn ly(&self) -> f64 {
        self.ly
    }

    #[inline]
    pub fn lz(&self) -> f64 {
        self.lz
    }

    /// Side lengths as `[lx, ly, lz]`.
    #[inline]
    pub fn as_array(&self) -> [f64; 3] {
        [self.lx, self.ly, self.lz]
    }

    /// Domain volume.
    #[inline]
    pub fn volume(&self) -> f64 {
        self.lx * self.ly * self.lz
    }
}

impl Default for Extent3D {
    fn default() -> Self {
        Self::unit_cube()
    }
}

impl fmt::Display for Extent3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} × {} × {}]", self.lx, self.ly, self.lz)
    }
}
