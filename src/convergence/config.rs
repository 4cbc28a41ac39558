//! Convergence run configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ConvergenceError;
use crate::types::{BackendKind, Convention, Extent3D, Precision};

/// Smallest allowed resolution exponent.
///
/// `2^2` samples leave enough interior nodes for the widest stencil on both
/// conventions.
pub const MIN_POWER: u32 = 2;

/// Largest allowed resolution exponent.
pub const MAX_POWER: u32 = 12;

/// Configuration for a convergence study.
///
/// Every field has a default, so partial JSON documents are accepted.
///
/// # Example
///
/// ```
/// use vox_rs::convergence::ConvergenceConfig;
/// use vox_rs::types::{Convention, Precision};
///
/// let config = ConvergenceConfig::default()
///     .with_convention(Convention::StaggeredX)
///     .with_precision(Precision::Float64)
///     .with_powers(vec![3, 4, 5]);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvergenceConfig {
    /// Sample placement
    pub convention: Convention,
    /// Floating-point width of engine fields
    pub precision: Precision,
    /// Resolution exponents; step i uses `2^powers[i]` voxels per side
    pub powers: Vec<u32>,
    /// Physical size of the domain
    pub extent: Extent3D,
    /// Field engine
    pub backend: BackendKind,
    /// Time passed to the operator
    pub time: f64,
}

impl Default for ConvergenceConfig {
    fn default() -> Self {
        Self {
            convention: Convention::CellCenter,
            precision: Precision::Float32,
            powers: vec![3, 4, 5, 6, 7],
            extent: Extent3D::unit_cube(),
            backend: BackendKind::Host,
            time: 0.0,
        }
    }
}

impl ConvergenceConfig {
    pub fn with_convention(mut self, convention: Convention) -> Self {
        self.convention = convention;
        self
    }

    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_powers(mut self, powers: Vec<u32>) -> Self {
        self.powers = powers;
        self
    }

    pub fn with_extent(mut self, extent: Extent3D) -> Self {
        self.extent = extent;
        self
    }

    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }

    /// Check the configuration before running.
    pub fn validate(&self) -> Result<(), ConvergenceError> {
        if self.powers.len() < 2 {
            return Err(ConvergenceError::InvalidConfig(format!(
                "at least two resolutions are needed for a fit, got {}",
                self.powers.len()
            )));
        }
        if self.powers.windows(2).any(|w| w[1] <= w[0]) {
            return Err(ConvergenceError::InvalidConfig(format!(
                "powers must be strictly increasing, got {:?}",
                self.powers
            )));
        }
        if let Some(p) = self
            .powers
            .iter()
            .find(|&&p| !(MIN_POWER..=MAX_POWER).contains(&p))
        {
            return Err(ConvergenceError::InvalidConfig(format!(
                "power {} outside [{}, {}]",
                p, MIN_POWER, MAX_POWER
            )));
        }
        if self
            .extent
            .as_array()
            .iter()
            .any(|&l| !(l.is_finite() && l > 0.0))
        {
            return Err(ConvergenceError::InvalidConfig(format!(
                "domain size must be positive, got {}",
                self.extent
            )));
        }
        if !self.time.is_finite() {
            return Err(ConvergenceError::InvalidConfig(format!(
                "time must be finite, got {}",
                self.time
            )));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, ConvergenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ConvergenceError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the configuration as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConvergenceError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read a JSON configuration and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConvergenceError> {
        let config = Self::from_json(&fs::read_to_string(path)?)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConvergenceConfig::default();
        assert_eq!(config.convention, Convention::CellCenter);
        assert_eq!(config.precision, Precision::Float32);
        assert_eq!(config.powers, vec![3, 4, 5, 6, 7]);
        assert_eq!(config.backend, BackendKind::Host);
        assert_eq!(config.time, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_short_schedule() {
        let config = ConvergenceConfig::default().with_powers(vec![4]);
        assert!(matches!(
            config.validate(),
            Err(ConvergenceError::InvalidConfig(_))
        ));
        let config = ConvergenceConfig::default().with_powers(vec![]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unordered_powers() {
        let config = ConvergenceConfig::default().with_powers(vec![3, 5, 4]);
        assert!(config.validate().is_err());
        let config = ConvergenceConfig::default().with_powers(vec![3, 3]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_out_of_range_powers() {
        assert!(
            ConvergenceConfig::default()
                .with_powers(vec![1, 2])
                .validate()
                .is_err()
        );
        assert!(
            ConvergenceConfig::default()
                .with_powers(vec![3, 40])
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_rejects_nan_time() {
        let config = ConvergenceConfig::default().with_time(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            ConvergenceConfig::from_json(r#"{"convention": "staggered_x", "powers": [2, 3]}"#)
                .unwrap();
        assert_eq!(config.convention, Convention::StaggeredX);
        assert_eq!(config.powers, vec![2, 3]);
        assert_eq!(config.precision, Precision::Float32);
        assert_eq!(config.extent, Extent3D::unit_cube());
    }

    #[test]
    fn test_json_rejects_unknown_convention() {
        assert!(ConvergenceConfig::from_json(r#"{"convention": "vertex"}"#).is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = ConvergenceConfig::default()
            .with_backend(BackendKind::Burn)
            .with_precision(Precision::Float64)
            .with_extent(Extent3D::new(2.0, 1.0, 0.5))
            .with_time(0.25);
        let back = ConvergenceConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }
}
