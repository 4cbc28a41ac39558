//! Burn-tensor field engine.
//!
//! Fields are `Tensor<B, 4>` with layout `[channel, x, y, z]`, resident on
//! the backend device. Host arrays are uploaded once per field and
//! downloaded only for export.

use burn::prelude::*;
use burn::tensor::TensorData;
use ndarray::Array3;

use super::GridBackend;
use crate::backend::{VoxelGrid, shape_string};
use crate::grid::{GridError, GridInfo};
use crate::types::Precision;

/// Field engine backed by Burn tensors.
#[derive(Clone, Debug)]
pub struct BurnGrid<B: GridBackend> {
    info: GridInfo,
    device: B::Device,
}

impl<B: GridBackend> BurnGrid<B> {
    /// Bind to a grid on an explicit device.
    pub fn with_device(info: GridInfo, device: B::Device) -> Self {
        Self { info, device }
    }

    /// Device fields reside on.
    pub fn device(&self) -> &B::Device {
        &self.device
    }
}

impl<B: GridBackend> VoxelGrid for BurnGrid<B> {
    type Field = Tensor<B, 4>;

    fn create(info: GridInfo) -> Result<Self, GridError> {
        Ok(Self::with_device(info, B::default_device()))
    }

    fn info(&self) -> &GridInfo {
        &self.info
    }

    fn precision(&self) -> Precision {
        B::PRECISION
    }

    fn name(&self) -> &'static str {
        B::NAME
    }

    /// Upload host samples to the device.
    fn init_scalar_field(&self, data: &Array3<f64>) -> Result<Tensor<B, 4>, GridError> {
        let [nx, ny, nz] = self.info.shape;
        if data.shape() != &self.info.shape[..] {
            return Err(GridError::dimension_mismatch(
                shape_string(&self.info.shape),
                shape_string(data.shape()),
            ));
        }

        // logical (row-major) order regardless of the array's memory layout
        let values: Vec<f64> = data.iter().copied().collect();
        let tensor_data = TensorData::new(values, vec![1, nx, ny, nz]).convert::<B::FloatElem>();
        Ok(Tensor::from_data(tensor_data, &self.device))
    }

    /// Download a single-channel field to the host.
    fn export_scalar_field(&self, field: &Tensor<B, 4>) -> Result<Array3<f64>, GridError> {
        let [c, nx, ny, nz] = field.dims();
        if c != 1 {
            return Err(GridError::dimension_mismatch(
                "a single channel",
                shape_string(&[c, nx, ny, nz]),
            ));
        }

        let values = field
            .to_data()
            .convert::<f64>()
            .to_vec::<f64>()
            .map_err(|e| GridError::DataTransfer(format!("{:?}", e)))?;
        Array3::from_shape_vec((nx, ny, nz), values)
            .map_err(|e| GridError::DataTransfer(e.to_string()))
    }

    fn shape(&self, field: &Tensor<B, 4>) -> [usize; 4] {
        field.dims()
    }

    fn window(&self, field: &Tensor<B, 4>, start: [usize; 4], len: [usize; 4]) -> Tensor<B, 4> {
        field.clone().slice([
            start[0]..start[0] + len[0],
            start[1]..start[1] + len[1],
            start[2]..start[2] + len[2],
            start[3]..start[3] + len[3],
        ])
    }

    fn cat(&self, fields: Vec<Tensor<B, 4>>, axis: usize) -> Tensor<B, 4> {
        assert!(!fields.is_empty(), "cannot concatenate zero fields");
        Tensor::cat(fields, axis)
    }

    fn affine(&self, field: &Tensor<B, 4>, scale: f64, shift: f64) -> Tensor<B, 4> {
        field.clone().mul_scalar(scale).add_scalar(shift)
    }

    fn add(&self, a: &Tensor<B, 4>, b: &Tensor<B, 4>) -> Tensor<B, 4> {
        a.clone().add(b.clone())
    }

    fn sub(&self, a: &Tensor<B, 4>, b: &Tensor<B, 4>) -> Tensor<B, 4> {
        a.clone().sub(b.clone())
    }

    fn mul(&self, a: &Tensor<B, 4>, b: &Tensor<B, 4>) -> Tensor<B, 4> {
        a.clone().mul(b.clone())
    }
}
