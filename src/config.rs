//! Notifier configuration
//!
//! Authored once per scene and read-only at runtime. Stored as JSON so a
//! partial document can override individual fields.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::NotifierError;

/// Linear RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Host-side font asset (also carries the text material)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FontHandle(pub u32);

/// Host-side sprite asset for the note background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SpriteHandle(pub u32);

/// How the torque impulse axis is chosen when a note starts falling
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TorquePolicy {
    /// Always spin around the same axis
    Fixed { axis: Vec3 },
    /// Draw a fresh axis on the unit sphere for every fall
    #[default]
    Random,
}

impl TorquePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TorquePolicy::Fixed { .. } => "fixed",
            TorquePolicy::Random => "random",
        }
    }
}

/// Notifier configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    // === Presentation ===
    /// Text color
    pub text_color: Rgba,
    /// Background (frame) color
    pub frame_color: Rgba,
    /// Font asset; its material is used for the text
    pub font: FontHandle,
    /// Background sprite asset
    pub background_sprite: SpriteHandle,

    // === Multipliers ===
    /// Distance from the viewer along its forward vector (0.4 - 5.0)
    pub distance: f32,
    /// Character size scale (1 - 30)
    pub character_size: f32,
    /// Background scale (1 - 10)
    pub background_width: f32,

    // === Fall ===
    /// Torque axis policy
    pub torque: TorquePolicy,
    /// Seed for the random torque policy
    pub seed: u64,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            text_color: Rgba::WHITE,
            frame_color: Rgba::WHITE,
            font: FontHandle::default(),
            background_sprite: SpriteHandle::default(),

            distance: 1.0,
            character_size: 1.0,
            background_width: 1.0,

            torque: TorquePolicy::Random,
            seed: 0x5EED,
        }
    }
}

impl NotifierConfig {
    /// Configuration matching the first release: fixed torque around world left
    pub fn classic() -> Self {
        Self {
            torque: TorquePolicy::Fixed {
                axis: FIXED_TORQUE_AXIS,
            },
            ..Self::default()
        }
    }

    /// Check every multiplier against its range
    pub fn validate(&self) -> Result<(), NotifierError> {
        check_range("distance", self.distance, DISTANCE_MIN, DISTANCE_MAX)?;
        check_range(
            "character_size",
            self.character_size,
            CHARACTER_SIZE_MIN,
            CHARACTER_SIZE_MAX,
        )?;
        check_range(
            "background_width",
            self.background_width,
            BACKGROUND_WIDTH_MIN,
            BACKGROUND_WIDTH_MAX,
        )?;

        if let TorquePolicy::Fixed { axis } = self.torque {
            if !axis.is_finite() || axis.length_squared() == 0.0 {
                return Err(NotifierError::InvalidTorqueAxis(axis));
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, NotifierError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded notifier config (distance={}, character_size={}, background_width={}, torque={})",
            config.distance,
            config.character_size,
            config.background_width,
            config.torque.as_str()
        );
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, NotifierError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, NotifierError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn check_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), NotifierError> {
    // NaN fails both comparisons, so test for containment rather than exclusion
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(NotifierError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(NotifierConfig::default().validate().is_ok());
        assert!(NotifierConfig::classic().validate().is_ok());
    }

    #[test]
    fn test_range_bounds_inclusive() {
        let config = NotifierConfig {
            distance: DISTANCE_MIN,
            character_size: CHARACTER_SIZE_MAX,
            background_width: BACKGROUND_WIDTH_MAX,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_rejected() {
        let config = NotifierConfig {
            distance: 0.2,
            ..Default::default()
        };
        match config.validate() {
            Err(NotifierError::OutOfRange { field, .. }) => assert_eq!(field, "distance"),
            other => panic!("expected OutOfRange, got {other:?}"),
        }

        let config = NotifierConfig {
            background_width: 11.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(NotifierError::OutOfRange {
                field: "background_width",
                ..
            })
        ));
    }

    #[test]
    fn test_nan_rejected() {
        let config = NotifierConfig {
            character_size: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_fixed_axis_rejected() {
        let config = NotifierConfig {
            torque: TorquePolicy::Fixed { axis: Vec3::ZERO },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(NotifierError::InvalidTorqueAxis(_))
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = NotifierConfig::from_json(r#"{ "distance": 2.5, "character_size": 4 }"#)
            .expect("valid config");
        assert_eq!(config.distance, 2.5);
        assert_eq!(config.character_size, 4.0);
        assert_eq!(config.background_width, 1.0);
        assert_eq!(config.torque, TorquePolicy::Random);
    }

    #[test]
    fn test_json_torque_policy() {
        let config =
            NotifierConfig::from_json(r#"{ "torque": { "kind": "fixed", "axis": [0.0, 0.0, 1.0] } }"#)
                .expect("valid config");
        assert_eq!(config.torque, TorquePolicy::Fixed { axis: Vec3::Z });

        let back = NotifierConfig::from_json(&config.to_json().expect("serializes"))
            .expect("round trips");
        assert_eq!(back, config);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            NotifierConfig::load("/nonexistent/notifier.json"),
            Err(NotifierError::Io(_))
        ));
    }

    #[test]
    fn test_json_out_of_range_fails() {
        assert!(matches!(
            NotifierConfig::from_json(r#"{ "character_size": 31 }"#),
            Err(NotifierError::OutOfRange { .. })
        ));
        assert!(matches!(
            NotifierConfig::from_json("{ not json"),
            Err(NotifierError::Parse(_))
        ));
    }
}
