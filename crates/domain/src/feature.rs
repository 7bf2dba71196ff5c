//! Card feature configuration authored on the dashboard.
//!
//! A feature is a small control strip rendered inside a card, bound to the
//! card's entity. Each kind has its own options; every option has a default
//! so a bare `{ type = "…" }` is a complete configuration.

use serde::{Deserialize, Serialize};

use crate::climate::HVAC_MODES;
use crate::error::ConfigError;

/// Configuration of one card feature, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum FeatureConfig {
    ClimateControls(ClimateControlsConfig),
    MediaControls(MediaControlsConfig),
    MediaVolume(MediaVolumeConfig),
}

impl FeatureConfig {
    /// Feature type names accepted in the `type` field.
    pub const TYPES: [&'static str; 3] = ["climate-controls", "media-controls", "media-volume"];

    /// Parse a feature configuration from a JSON value.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Missing`] when the value is `null`
    /// - [`ConfigError::UnknownFeatureType`] when `type` names no known feature
    /// - [`ConfigError::Malformed`] when an option has the wrong shape
    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        if value.is_null() {
            return Err(ConfigError::Missing);
        }
        let kind = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| ConfigError::Malformed("missing `type`".to_string()))?;
        if !Self::TYPES.contains(&kind) {
            return Err(ConfigError::UnknownFeatureType(kind.to_string()));
        }
        serde_json::from_value(value).map_err(|err| ConfigError::Malformed(err.to_string()))
    }

    /// Default configuration for a feature type, as offered when a feature
    /// is first added to a card.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownFeatureType`] for an unknown `kind`.
    pub fn stub(kind: &str) -> Result<Self, ConfigError> {
        match kind {
            "climate-controls" => Ok(Self::ClimateControls(ClimateControlsConfig::default())),
            "media-controls" => Ok(Self::MediaControls(MediaControlsConfig::default())),
            "media-volume" => Ok(Self::MediaVolume(MediaVolumeConfig::default())),
            other => Err(ConfigError::UnknownFeatureType(other.to_string())),
        }
    }

    /// The `type` tag of this configuration.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ClimateControls(_) => Self::TYPES[0],
            Self::MediaControls(_) => Self::TYPES[1],
            Self::MediaVolume(_) => Self::TYPES[2],
        }
    }
}

/// Options of the `climate-controls` feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateControlsConfig {
    /// Render the hvac-mode cycle button next to the setpoint.
    pub show_hvac_modes: bool,
    /// Explicit subset and order of hvac modes to cycle through.
    ///
    /// An empty list falls back to every mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hvac_modes: Option<Vec<String>>,
}

impl ClimateControlsConfig {
    /// Modes the hvac button cycles through.
    #[must_use]
    pub fn mode_list(&self) -> Vec<String> {
        match &self.hvac_modes {
            Some(modes) if !modes.is_empty() => modes.clone(),
            _ => HVAC_MODES.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Options of the `media-controls` feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaControlsConfig {
    /// Also show shuffle and repeat buttons.
    pub use_extended_controls: bool,
}

/// Options of the `media-volume` feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaVolumeConfig {
    pub style: VolumeStyle,
}

/// Widget used to edit the volume level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeStyle {
    #[default]
    Slider,
    Buttons,
}
