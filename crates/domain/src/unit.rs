//! Display unit system configured on the hub.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Temperature unit the dashboard displays setpoints in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    #[serde(alias = "°C", alias = "c")]
    Celsius,
    #[serde(alias = "°F", alias = "f")]
    Fahrenheit,
}

impl TemperatureUnit {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "\u{b0}C",
            Self::Fahrenheit => "\u{b0}F",
        }
    }

    /// Setpoint increment used when an entity does not advertise its own step.
    #[must_use]
    pub fn default_step(self) -> f64 {
        match self {
            Self::Celsius => 0.5,
            Self::Fahrenheit => 1.0,
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Error returned when a unit string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown temperature unit {0:?}")]
pub struct UnknownUnit(pub String);

impl FromStr for TemperatureUnit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "celsius" | "c" | "\u{b0}c" => Ok(Self::Celsius),
            "fahrenheit" | "f" | "\u{b0}f" => Ok(Self::Fahrenheit),
            _ => Err(UnknownUnit(s.to_string())),
        }
    }
}

/// Hub-wide display settings handed to every card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSystem {
    pub temperature: TemperatureUnit,
}
