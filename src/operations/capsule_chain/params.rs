use serde::{Deserialize, Serialize};

use crate::error::{ParameterError, Result, RoundchainError};
use crate::math::{Vector2, TOLERANCE};

/// Parameters controlling how a curve is turned into capsule-chain segments.
///
/// Every field has a default, so presets stored as JSON or TOML only need to
/// list the values they change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainParams {
    /// Dense samples evaluated per Bézier segment.
    pub samples_per_segment: usize,
    /// Smallest rounding radius, in world units.
    pub min_radius: f64,
    /// Largest rounding radius, in world units.
    pub max_radius: f64,
    /// Deviation from an anchor's tangent line that forces a new selected
    /// sample.
    pub critical_drop: f64,
    /// Largest arc-length gap between selected samples, as a fraction of the
    /// total length. `None` disables the check.
    pub min_arc_fraction: Option<f64>,
    /// Rung count of the small-steps ladder.
    pub max_steps: usize,
    /// Smallest ratio between consecutive ladder rungs.
    pub min_step: f64,
    /// Added to every sample's half-thickness before displacement.
    pub height_offset: f64,
    /// Component-wise scale from curve space to world units.
    pub world_scale: Vector2,
    /// Self-intersection scans per sample; `1` is a single pass.
    pub clamp_passes: usize,
    /// Optional cap on the number of emitted segments.
    pub max_clusters: Option<usize>,
    /// If set, the emitted segment count must match.
    pub expected_segments: Option<usize>,
}

impl Default for ChainParams {
    fn default() -> Self {
        Self {
            samples_per_segment: 1000,
            min_radius: 0.3,
            max_radius: 1.0,
            critical_drop: 0.03,
            min_arc_fraction: None,
            max_steps: 4,
            min_step: 1.1,
            height_offset: 0.0,
            world_scale: Vector2::new(1.0, 1.0),
            clamp_passes: 1,
            max_clusters: None,
            expected_segments: None,
        }
    }
}

impl ChainParams {
    /// Checks every field against its admissible range.
    ///
    /// # Errors
    ///
    /// Returns `ParameterError::OutOfRange` for a scalar outside its bounds
    /// and `ParameterError::Invalid` for inconsistent combinations.
    pub fn validate(&self) -> Result<()> {
        if self.samples_per_segment == 0 {
            return Err(invalid("samples_per_segment must be at least 1"));
        }
        positive("min_radius", self.min_radius)?;
        positive("max_radius", self.max_radius)?;
        if self.max_radius < self.min_radius {
            return Err(invalid(&format!(
                "max_radius {} is below min_radius {}",
                self.max_radius, self.min_radius
            )));
        }
        positive("critical_drop", self.critical_drop)?;
        if let Some(fraction) = self.min_arc_fraction {
            if fraction.is_nan() || fraction <= 0.0 || fraction > 1.0 {
                return Err(ParameterError::OutOfRange {
                    parameter: "min_arc_fraction",
                    value: fraction,
                    min: 0.0,
                    max: 1.0,
                }
                .into());
            }
        }
        if self.max_steps == 0 {
            return Err(invalid("max_steps must be at least 1"));
        }
        if !self.min_step.is_finite() || self.min_step <= 1.0 {
            return Err(invalid(&format!(
                "min_step must be greater than 1, got {}",
                self.min_step
            )));
        }
        if !self.height_offset.is_finite() {
            return Err(invalid("height_offset must be finite"));
        }
        if self
            .world_scale
            .iter()
            .any(|s| !s.is_finite() || *s <= TOLERANCE)
        {
            return Err(invalid(&format!(
                "world_scale components must be positive, got ({}, {})",
                self.world_scale.x, self.world_scale.y
            )));
        }
        if self.max_clusters == Some(0) {
            return Err(invalid("max_clusters must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> RoundchainError {
    ParameterError::Invalid(message.to_owned()).into()
}

fn positive(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParameterError::OutOfRange {
            parameter,
            value,
            min: 0.0,
            max: f64::INFINITY,
        }
        .into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = ChainParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.samples_per_segment, 1000);
        assert_eq!(params.clamp_passes, 1);
        assert!(params.min_arc_fraction.is_none());
    }

    #[test]
    fn non_positive_radius_is_out_of_range() {
        let params = ChainParams {
            min_radius: 0.0,
            ..ChainParams::default()
        };
        let err = params.validate().unwrap_err();
        assert!(matches!(
            err,
            RoundchainError::Parameter(ParameterError::OutOfRange {
                parameter: "min_radius",
                ..
            })
        ));
    }

    #[test]
    fn inverted_radius_bounds_are_invalid() {
        let params = ChainParams {
            min_radius: 2.0,
            max_radius: 1.0,
            ..ChainParams::default()
        };
        assert!(matches!(
            params.validate().unwrap_err(),
            RoundchainError::Parameter(ParameterError::Invalid(_))
        ));
    }

    #[test]
    fn degenerate_ladder_and_scale_are_invalid() {
        let flat_ladder = ChainParams {
            min_step: 1.0,
            ..ChainParams::default()
        };
        assert!(flat_ladder.validate().is_err());

        let no_rungs = ChainParams {
            max_steps: 0,
            ..ChainParams::default()
        };
        assert!(no_rungs.validate().is_err());

        let flat_scale = ChainParams {
            world_scale: Vector2::new(1.0, 0.0),
            ..ChainParams::default()
        };
        assert!(flat_scale.validate().is_err());

        let no_density = ChainParams {
            samples_per_segment: 0,
            ..ChainParams::default()
        };
        assert!(no_density.validate().is_err());
    }

    #[test]
    fn arc_fraction_must_be_a_fraction() {
        for bad in [0.0, -0.2, 1.5, f64::NAN] {
            let params = ChainParams {
                min_arc_fraction: Some(bad),
                ..ChainParams::default()
            };
            assert!(params.validate().is_err(), "accepted {bad}");
        }
        let params = ChainParams {
            min_arc_fraction: Some(1.0),
            ..ChainParams::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn zero_cluster_budget_is_invalid() {
        let params = ChainParams {
            max_clusters: Some(0),
            ..ChainParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn partial_json_preset_keeps_defaults() {
        let params: ChainParams =
            serde_json::from_str(r#"{ "min_radius": 0.5, "max_clusters": 3 }"#).unwrap();
        assert!((params.min_radius - 0.5).abs() < f64::EPSILON);
        assert_eq!(params.max_clusters, Some(3));
        assert_eq!(params.samples_per_segment, 1000);
        assert!((params.max_radius - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn json_round_trip() {
        let params = ChainParams {
            world_scale: Vector2::new(2.0, 0.5),
            min_arc_fraction: Some(0.1),
            ..ChainParams::default()
        };
        let json = serde_json::to_string(&params).unwrap();
        let back: ChainParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }
}
