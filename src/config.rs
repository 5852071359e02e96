//! Engine configuration.

use serde::{Deserialize, Serialize};
use crate::{Error, Result};

/// Unit in which distances are reported.
///
/// Scaling is uniform, so it never changes which pairs are neighbors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    /// Raw planar chord over latitude/longitude degrees.
    #[default]
    Degrees,
    /// Degrees times the length of one degree of latitude at the equator.
    Kilometres,
}

impl DistanceUnit {
    pub const KM_PER_DEGREE: f64 = 111.32;

    pub fn scale(self) -> f64 {
        match self {
            DistanceUnit::Degrees => 1.0,
            DistanceUnit::Kilometres => Self::KM_PER_DEGREE,
        }
    }
}

/// Knobs for a [`SpatialGraph`](crate::SpatialGraph) build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub unit: DistanceUnit,
    /// Reject points outside latitude [-90, 90] / longitude [-180, 180].
    pub check_ranges: bool,
    /// Gabriel pairs farther apart than this (in `unit`) are not linked.
    pub max_edge_length: Option<f64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            unit: DistanceUnit::Degrees,
            check_ranges: true,
            max_edge_length: None,
        }
    }
}

impl EngineConfig {
    pub fn with_unit(mut self, unit: DistanceUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_range_check(mut self, check: bool) -> Self {
        self.check_ranges = check;
        self
    }

    pub fn with_max_edge_length(mut self, length: f64) -> Self {
        self.max_edge_length = Some(length);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(limit) = self.max_edge_length {
            if !limit.is_finite() || limit < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "max_edge_length must be a finite non-negative number, got {limit}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.unit, DistanceUnit::Degrees);
        assert!(cfg.check_ranges);
        assert!(cfg.max_edge_length.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: EngineConfig = serde_json::from_str(r#"{"unit":"kilometres"}"#).unwrap();
        assert_eq!(cfg.unit, DistanceUnit::Kilometres);
        assert!(cfg.check_ranges);
        assert_eq!(cfg.unit.scale(), DistanceUnit::KM_PER_DEGREE);
    }

    #[test]
    fn rejects_bad_cutoff() {
        assert!(EngineConfig::default().with_max_edge_length(-1.0).validate().is_err());
        assert!(EngineConfig::default().with_max_edge_length(f64::NAN).validate().is_err());
        assert!(EngineConfig::default().with_max_edge_length(0.0).validate().is_ok());
    }
}
