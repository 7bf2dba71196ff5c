//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `cardhub.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

use cardhub_domain::card::ButtonCardConfig;
use cardhub_domain::feature::{
    ClimateControlsConfig, FeatureConfig, MediaControlsConfig, MediaVolumeConfig,
};
use cardhub_domain::id::EntityId;
use cardhub_domain::unit::{TemperatureUnit, UnitSystem};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hub-wide display settings.
    pub hub: HubConfig,
    /// Command dispatch settings.
    pub dispatch: DispatchConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Dashboard cards, in display order.
    pub cards: Vec<CardConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Unit used to display setpoints (`celsius` / `fahrenheit`).
    pub temperature_unit: TemperatureUnit,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Quiet period before a setpoint edit is sent, in milliseconds.
    pub debounce_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// One button card and the features stacked under it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardConfig {
    #[serde(flatten)]
    pub button: ButtonCardConfig,
    #[serde(default)]
    pub features: Vec<FeatureConfig>,
}

impl Config {
    /// Load configuration from `cardhub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// result fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("cardhub.toml")?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("CARDHUB_DEBOUNCE_MS") {
            let Ok(ms) = val.parse() else {
                let msg = format!("CARDHUB_DEBOUNCE_MS={val:?} is not a number");
                return Err(ConfigError::Validation(msg));
            };
            self.dispatch.debounce_ms = ms;
        }
        if let Ok(val) = std::env::var("CARDHUB_TEMPERATURE_UNIT") {
            self.hub.temperature_unit = match val.parse() {
                Ok(unit) => unit,
                Err(err) => {
                    let msg = format!("CARDHUB_TEMPERATURE_UNIT: {err}");
                    return Err(ConfigError::Validation(msg));
                }
            };
        }
        if let Ok(val) = std::env::var("CARDHUB_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.dispatch.debounce_ms == 0 {
            return Err(ConfigError::Validation("debounce_ms must be non-zero".to_string()));
        }
        for (index, card) in self.cards.iter().enumerate() {
            let entity = card.button.entity.as_deref().filter(|e| !e.is_empty());
            if let Some(raw) = entity {
                EntityId::parse(raw)
                    .map_err(|err| ConfigError::Validation(format!("cards[{index}]: {err}")))?;
            } else if !card.features.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "cards[{index}]: features need an entity"
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.dispatch.debounce_ms)
    }

    #[must_use]
    pub fn units(&self) -> UnitSystem {
        UnitSystem {
            temperature: self.hub.temperature_unit,
        }
    }

    /// Configured cards, or a demo dashboard over the virtual devices when
    /// none are configured.
    #[must_use]
    pub fn cards_or_demo(&self) -> Vec<CardConfig> {
        if self.cards.is_empty() {
            demo_cards()
        } else {
            self.cards.clone()
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self { debounce_ms: 1000 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "cardhubd=info,cardhub_app=info,cardhub_adapter_virtual=info".to_string(),
        }
    }
}

fn demo_cards() -> Vec<CardConfig> {
    let card = |entity: &str, features: Vec<FeatureConfig>| CardConfig {
        button: ButtonCardConfig {
            entity: Some(entity.to_string()),
            show_state: Some(true),
            ..ButtonCardConfig::default()
        },
        features,
    };
    vec![
        card(
            "climate.virtual_thermostat",
            vec![FeatureConfig::ClimateControls(ClimateControlsConfig {
                show_hvac_modes: true,
                hvac_modes: None,
            })],
        ),
        card(
            "climate.virtual_heat_pump",
            vec![FeatureConfig::ClimateControls(ClimateControlsConfig::default())],
        ),
        card(
            "media_player.virtual_speaker",
            vec![
                FeatureConfig::MediaControls(MediaControlsConfig {
                    use_extended_controls: true,
                }),
                FeatureConfig::MediaVolume(MediaVolumeConfig::default()),
            ],
        ),
    ]
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
