//! Grid layout conventions, floating-point precision and engine selection.
//!
//! These enums are the string-keyed knobs of a convergence run. They parse
//! from and print to the same snake-case names used in configuration files.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Resolution3D;

/// Spatial placement of samples relative to a voxel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Convention {
    /// Uniform N×N×N samples at voxel centers.
    #[default]
    CellCenter,
    /// (N+1)×N×N samples: nodes on voxel faces along x, centers along y and z.
    /// The first and last x-layers are boundary nodes.
    StaggeredX,
}

impl Convention {
    /// Grid resolution for a refinement level with `n` voxels per side.
    pub fn resolution(&self, n: usize) -> Resolution3D {
        match self {
            Convention::CellCenter => Resolution3D::cube(n),
            Convention::StaggeredX => Resolution3D::new(n + 1, n, n),
        }
    }

    /// Number of boundary layers removed from each end of each axis
    /// before an operator is applied.
    pub fn trimmed_layers(&self) -> [usize; 3] {
        match self {
            Convention::CellCenter => [0, 0, 0],
            Convention::StaggeredX => [1, 0, 0],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Convention::CellCenter => "cell_center",
            Convention::StaggeredX => "staggered_x",
        }
    }
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised convention name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown grid convention '{0}' (expected 'cell_center' or 'staggered_x')")]
pub struct ParseConventionError(pub String);

impl FromStr for Convention {
    type Err = ParseConventionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cell_center" => Ok(Convention::CellCenter),
            "staggered_x" => Ok(Convention::StaggeredX),
            other => Err(ParseConventionError(other.to_string())),
        }
    }
}

/// Floating-point width of generated field data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    #[default]
    Float32,
    Float64,
}

impl Precision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Precision::Float32 => "float32",
            Precision::Float64 => "float64",
        }
    }

    /// Machine epsilon of the precision.
    pub fn epsilon(&self) -> f64 {
        match self {
            Precision::Float32 => f32::EPSILON as f64,
            Precision::Float64 => f64::EPSILON,
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised precision name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown precision '{0}' (expected 'float32' or 'float64')")]
pub struct ParsePrecisionError(pub String);

impl FromStr for Precision {
    type Err = ParsePrecisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "float32" | "f32" => Ok(Precision::Float32),
            "float64" | "f64" => Ok(Precision::Float64),
            other => Err(ParsePrecisionError(other.to_string())),
        }
    }
}

/// Field engine used to build and evaluate grids.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// ndarray-based CPU engine, always available.
    #[default]
    Host,
    /// Burn tensors on the NdArray CPU backend (`burn-ndarray` feature).
    Burn,
    /// Burn tensors on WGPU (`burn-wgpu` feature, `float32` only).
    BurnWgpu,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Host => "host",
            BackendKind::Burn => "burn",
            BackendKind::BurnWgpu => "burn-wgpu",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised backend name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown backend '{0}' (expected 'host', 'burn' or 'burn-wgpu')")]
pub struct ParseBackendError(pub String);

impl FromStr for BackendKind {
    type Err = ParseBackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "host" => Ok(BackendKind::Host),
            "burn" => Ok(BackendKind::Burn),
            "burn-wgpu" => Ok(BackendKind::BurnWgpu),
            other => Err(ParseBackendError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convention_resolution() {
        assert_eq!(
            Convention::CellCenter.resolution(8),
            Resolution3D::new(8, 8, 8)
        );
        assert_eq!(
            Convention::StaggeredX.resolution(8),
            Resolution3D::new(9, 8, 8)
        );
    }

    #[test]
    fn test_convention_parse_roundtrip() {
        for c in [Convention::CellCenter, Convention::StaggeredX] {
            assert_eq!(c.as_str().parse::<Convention>().unwrap(), c);
        }
    }

    #[test]
    fn test_unknown_convention() {
        let err = "staggered_y".parse::<Convention>().unwrap_err();
        assert_eq!(err, ParseConventionError("staggered_y".into()));
        assert!(err.to_string().contains("staggered_y"));
    }

    #[test]
    fn test_only_x_is_trimmed() {
        assert_eq!(Convention::StaggeredX.trimmed_layers(), [1, 0, 0]);
        assert_eq!(Convention::CellCenter.trimmed_layers(), [0, 0, 0]);
    }

    #[test]
    fn test_precision_parse() {
        assert_eq!("float64".parse::<Precision>().unwrap(), Precision::Float64);
        assert_eq!("f32".parse::<Precision>().unwrap(), Precision::Float32);
        assert!("float16".parse::<Precision>().is_err());
    }

    #[test]
    fn test_backend_parse() {
        assert_eq!("burn".parse::<BackendKind>().unwrap(), BackendKind::Burn);
        assert_eq!("host".parse::<BackendKind>().unwrap(), BackendKind::Host);
        assert!("torch".parse::<BackendKind>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Convention::StaggeredX).unwrap();
        assert_eq!(json, "\"staggered_x\"");
        let json = serde_json::to_string(&BackendKind::BurnWgpu).unwrap();
        assert_eq!(json, "\"burn-wgpu\"");
    }
}
