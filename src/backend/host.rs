//! ndarray-based CPU field engine.

use std::fmt;
use std::marker::PhantomData;

use ndarray::{Array3, Array4, Axis, ScalarOperand, Slice, s};
use num_traits::Float;

use super::{VoxelGrid, shape_string};
use crate::grid::{GridError, GridInfo};
use crate::types::Precision;

/// Floating-point element type of host fields.
pub trait Real: Float + ScalarOperand + fmt::Debug + Send + Sync + 'static {
    /// Precision tag of the element type.
    const PRECISION: Precision;

    /// Convert from `f64`, rounding if needed.
    fn of(v: f64) -> Self;

    /// Widen to `f64`.
    fn as_f64(self) -> f64;
}

impl Real for f32 {
    const PRECISION: Precision = Precision::Float32;

    #[inline]
    fn of(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl Real for f64 {
    const PRECISION: Precision = Precision::Float64;

    #[inline]
    fn of(v: f64) -> Self {
        v
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self
    }
}

/// CPU field engine storing fields as `Array4<T>`.
///
/// # Example
///
/// ```
/// use ndarray::Array3;
/// use vox_rs::backend::{HostGrid, VoxelGrid};
/// use vox_rs::grid::VoxelFields;
/// use vox_rs::types::{Convention, Extent3D, Resolution3D};
///
/// let vf = VoxelFields::new(Resolution3D::cube(4), Extent3D::unit_cube(), Convention::CellCenter).unwrap();
/// let grid = HostGrid::<f64>::create(vf.grid_info()).unwrap();
///
/// let u = grid.init_scalar_field(&Array3::from_elem((4, 4, 4), 1.5)).unwrap();
/// let both = grid.concatenate(vec![u.clone(), u]);
/// assert_eq!(grid.shape(&both), [2, 4, 4, 4]);
/// ```
#[derive(Clone, Debug)]
pub struct HostGrid<T: Real> {
    info: GridInfo,
    _marker: PhantomData<T>,
}

impl<T: Real> VoxelGrid for HostGrid<T> {
    type Field = Array4<T>;

    fn create(info: GridInfo) -> Result<Self, GridError> {
        Ok(Self {
            info,
            _marker: PhantomData,
        })
    }

    fn info(&self) -> &GridInfo {
        &self.info
    }

    fn precision(&self) -> Precision {
        T::PRECISION
    }

    fn name(&self) -> &'static str {
        "host"
    }

    fn init_scalar_field(&self, data: &Array3<f64>) -> Result<Array4<T>, GridError> {
        if data.shape() != &self.info.shape[..] {
            return Err(GridError::dimension_mismatch(
                shape_string(&self.info.shape),
                shape_string(data.shape()),
            ));
        }
        Ok(data.mapv(T::of).insert_axis(Axis(0)))
    }

    fn export_scalar_field(&self, field: &Array4<T>) -> Result<Array3<f64>, GridError> {
        if field.shape()[0] != 1 {
            return Err(GridError::dimension_mismatch(
                "a single channel",
                shape_string(field.shape()),
            ));
        }
        Ok(field.index_axis(Axis(0), 0).mapv(T::as_f64))
    }

    fn shape(&self, field: &Array4<T>) -> [usize; 4] {
        let s = field.shape();
        [s[0], s[1], s[2], s[3]]
    }

    fn window(&self, field: &Array4<T>, start: [usize; 4], len: [usize; 4]) -> Array4<T> {
        field
            .slice(s![
                start[0]..start[0] + len[0],
                start[1]..start[1] + len[1],
                start[2]..start[2] + len[2],
                start[3]..start[3] + len[3]
            ])
            .to_owned()
    }

    fn cat(&self, fields: Vec<Array4<T>>, axis: usize) -> Array4<T> {
        assert!(!fields.is_empty(), "cannot concatenate zero fields");
        let first = self.shape(&fields[0]);
        let mut out_shape = first;
        out_shape[axis] = 0;
        for f in &fields {
            let shape = self.shape(f);
            for a in (0..4).filter(|&a| a != axis) {
                assert_eq!(
                    shape[a], first[a],
                    "field shapes {:?} and {:?} differ off axis {}",
                    shape, first, axis
                );
            }
            out_shape[axis] += shape[axis];
        }

        let mut out = Array4::zeros(out_shape);
        let mut offset = 0;
        for f in &fields {
            let n = f.shape()[axis];
            out.slice_axis_mut(Axis(axis), Slice::from(offset..offset + n))
                .assign(f);
            offset += n;
        }
        out
    }

    fn affine(&self, field: &Array4<T>, scale: f64, shift: f64) -> Array4<T> {
        let (a, b) = (T::of(scale), T::of(shift));
        field.mapv(|v| v * a + b)
    }

    fn add(&self, a: &Array4<T>, b: &Array4<T>) -> Array4<T> {
        a + b
    }

    fn sub(&self, a: &Array4<T>, b: &Array4<T>) -> Array4<T> {
        a - b
    }

    fn mul(&self, a: &Array4<T>, b: &Array4<T>) -> Array4<T> {
        a * b
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::VoxelFields;
    use crate::types::{Convention, Extent3D};

    fn grid(convention: Convention, n: usize) -> HostGrid<f64> {
        let vf =
            VoxelFields::new(convention.resolution(n), Extent3D::unit_cube(), convention).unwrap();
        HostGrid::create(vf.grid_info()).unwrap()
    }

    fn ramp(shape: [usize; 3]) -> Array3<f64> {
        Array3::from_shape_fn((shape[0], shape[1], shape[2]), |(i, j, k)| {
            (100 * i + 10 * j + k) as f64
        })
    }

    #[test]
    fn test_init_and_export() {
        let g = grid(Convention::CellCenter, 4);
        let data = ramp([4, 4, 4]);
        let u = g.init_scalar_field(&data).unwrap();
        assert_eq!(g.shape(&u), [1, 4, 4, 4]);
        assert_eq!(g.export_scalar_field(&u).unwrap(), data);
    }

    #[test]
    fn test_init_wrong_shape() {
        let g = grid(Convention::CellCenter, 4);
        let err = g.init_scalar_field(&ramp([4, 4, 3])).unwrap_err();
        assert!(matches!(err, GridError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_export_requires_single_channel() {
        let g = grid(Convention::CellCenter, 2);
        let u = g.init_scalar_field(&ramp([2, 2, 2])).unwrap();
        let uu = g.concatenate(vec![u.clone(), u]);
        assert!(g.export_scalar_field(&uu).is_err());
        assert!(g.export_scalar_field(&g.channel(&uu, 1)).is_ok());
    }

    #[test]
    fn test_f32_rounds_on_init() {
        let vf = VoxelFields::new(
            Convention::CellCenter.resolution(2),
            Extent3D::unit_cube(),
            Convention::CellCenter,
        )
        .unwrap();
        let g = HostGrid::<f32>::create(vf.grid_info()).unwrap();
        assert_eq!(g.precision(), Precision::Float32);

        let data = Array3::from_elem((2, 2, 2), 0.1);
        let out = g.export_scalar_field(&g.init_scalar_field(&data).unwrap()).unwrap();
        assert_eq!(out[[0, 0, 0]], 0.1f32 as f64);
    }

    #[test]
    fn test_trim_staggered_x() {
        let g = grid(Convention::StaggeredX, 4);
        let data = ramp([5, 4, 4]);
        let u = g.init_scalar_field(&data).unwrap();
        let t = g.trim_boundary_nodes(&u);
        assert_eq!(g.shape(&t), [1, 3, 4, 4]);

        let out = g.export_scalar_field(&t).unwrap();
        assert_eq!(out[[0, 0, 0]], data[[1, 0, 0]]);
        assert_eq!(out[[2, 3, 3]], data[[3, 3, 3]]);
    }

    #[test]
    fn test_trim_cell_center_is_identity() {
        let g = grid(Convention::CellCenter, 3);
        let u = g.init_scalar_field(&ramp([3, 3, 3])).unwrap();
        assert_eq!(g.trim_boundary_nodes(&u), u);
    }

    #[test]
    fn test_cat_spatial_axis() {
        let g = grid(Convention::CellCenter, 2);
        let u = g.init_scalar_field(&ramp([2, 2, 2])).unwrap();
        let w = g.cat(vec![u.clone(), u.clone(), u], 2);
        assert_eq!(g.shape(&w), [1, 2, 6, 2]);
        assert_eq!(w[[0, 1, 4, 1]], 101.0);
    }

    #[test]
    #[should_panic(expected = "differ off axis")]
    fn test_cat_mismatched() {
        let g = grid(Convention::CellCenter, 2);
        let a = Array4::<f64>::zeros((1, 2, 2, 2));
        let b = Array4::<f64>::zeros((1, 3, 2, 2));
        g.cat(vec![a, b], 0);
    }

    #[test]
    fn test_pointwise_ops() {
        let g = grid(Convention::CellCenter, 2);
        let a = Array4::from_elem((1, 2, 2, 2), 3.0);
        let b = Array4::from_elem((1, 2, 2, 2), 2.0);
        assert_eq!(g.add(&a, &b)[[0, 0, 0, 0]], 5.0);
        assert_eq!(g.sub(&a, &b)[[0, 1, 1, 1]], 1.0);
        assert_eq!(g.mul(&a, &b)[[0, 0, 1, 0]], 6.0);
        assert_eq!(g.affine(&a, -2.0, 1.0)[[0, 0, 0, 1]], -5.0);
    }
}
