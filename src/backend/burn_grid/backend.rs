//! Backend abstraction for Burn field engines.
//!
//! This module provides the `GridBackend` trait that abstracts over
//! the Burn backends a [`BurnGrid`](super::BurnGrid) can run on.

use burn::prelude::*;

use crate::types::Precision;

/// Trait for Burn backends usable as voxel field engines.
///
/// Ties a backend to the precision of its float elements so runtime
/// precision selection can pick a matching backend type.
pub trait GridBackend: Backend {
    /// Precision of `Self::FloatElem`.
    const PRECISION: Precision;

    /// Short name for logging.
    const NAME: &'static str;

    /// Get the default device for this backend.
    fn default_device() -> Self::Device;
}

#[cfg(feature = "burn-ndarray")]
impl GridBackend for burn_ndarray::NdArray<f32> {
    const PRECISION: Precision = Precision::Float32;
    const NAME: &'static str = "burn-ndarray";

    fn default_device() -> Self::Device {
        burn_ndarray::NdArrayDevice::Cpu
    }
}

#[cfg(feature = "burn-ndarray")]
impl GridBackend for burn_ndarray::NdArray<f64> {
    const PRECISION: Precision = Precision::Float64;
    const NAME: &'static str = "burn-ndarray";

    fn default_device() -> Self::Device {
        burn_ndarray::NdArrayDevice::Cpu
    }
}

#[cfg(feature = "burn-wgpu")]
impl GridBackend for burn_wgpu::Wgpu {
    const PRECISION: Precision = Precision::Float32;
    const NAME: &'static str = "burn-wgpu";

    fn default_device() -> Self::Device {
        burn_wgpu::WgpuDevice::default()
    }
}
