//! Climate helpers: setpoint mirror, mode cycles and step resolution.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::unit::TemperatureUnit;

/// Fan modes cycled by the fan button, in order.
pub const FAN_MODES: [&str; 4] = ["auto", "low", "medium", "high"];

/// Hvac modes cycled when the configuration does not pick its own.
pub const HVAC_MODES: [&str; 5] = ["off", "fan_only", "heat_cool", "heat", "cool"];

/// Which setpoint a stepper edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetpointTarget {
    /// The single `temperature` setpoint.
    Value,
    /// `target_temp_low` of a range.
    Low,
    /// `target_temp_high` of a range.
    High,
}

impl SetpointTarget {
    /// Attribute holding this setpoint on the entity.
    #[must_use]
    pub fn attribute(self) -> &'static str {
        match self {
            Self::Value => "temperature",
            Self::Low => "target_temp_low",
            Self::High => "target_temp_high",
        }
    }

    #[must_use]
    pub fn is_range(self) -> bool {
        matches!(self, Self::Low | Self::High)
    }
}

/// Locally edited setpoints, ahead of what the hub has confirmed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SetpointMirror {
    pub value: Option<f64>,
    pub low: Option<f64>,
    pub high: Option<f64>,
}

impl SetpointMirror {
    /// Project the setpoints of a snapshot.
    #[must_use]
    pub fn from_entity(entity: &Entity) -> Self {
        Self {
            value: entity.attribute_f64(SetpointTarget::Value.attribute()),
            low: entity.attribute_f64(SetpointTarget::Low.attribute()),
            high: entity.attribute_f64(SetpointTarget::High.attribute()),
        }
    }

    #[must_use]
    pub fn get(&self, target: SetpointTarget) -> Option<f64> {
        match target {
            SetpointTarget::Value => self.value,
            SetpointTarget::Low => self.low,
            SetpointTarget::High => self.high,
        }
    }

    pub fn set(&mut self, target: SetpointTarget, value: f64) {
        let slot = match target {
            SetpointTarget::Value => &mut self.value,
            SetpointTarget::Low => &mut self.low,
            SetpointTarget::High => &mut self.high,
        };
        *slot = Some(value);
    }
}

/// An ordered mode list with a cursor that wraps around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeCycle {
    modes: Vec<String>,
    index: usize,
}

impl ModeCycle {
    /// Build a cycle over `modes`, starting at the first entry.
    ///
    /// An empty list falls back to a single `off` entry so the cursor is
    /// always valid.
    #[must_use]
    pub fn new<I, S>(modes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut modes: Vec<String> = modes.into_iter().map(Into::into).collect();
        if modes.is_empty() {
            modes.push("off".to_string());
        }
        Self { modes, index: 0 }
    }

    /// Move the cursor to `current`, or back to the first entry when it is
    /// not part of the list.
    pub fn sync(&mut self, current: Option<&str>) {
        self.index = current
            .and_then(|mode| self.modes.iter().position(|m| m == mode))
            .unwrap_or(0);
    }

    /// Advance by one, wrapping modulo the list length, and return the new mode.
    pub fn advance(&mut self) -> &str {
        self.index = (self.index + 1) % self.modes.len();
        &self.modes[self.index]
    }

    #[must_use]
    pub fn current(&self) -> &str {
        &self.modes[self.index]
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    #[must_use]
    pub fn modes(&self) -> &[String] {
        &self.modes
    }
}

/// Icon for a fan mode.
#[must_use]
pub fn fan_mode_icon(mode: &str) -> &'static str {
    match mode {
        "low" => "mdi:fan-speed-1",
        "medium" => "mdi:fan-speed-2",
        "high" => "mdi:fan-speed-3",
        _ => "mdi:fan-auto",
    }
}

/// Icon for an hvac mode.
#[must_use]
pub fn hvac_mode_icon(mode: &str) -> &'static str {
    match mode {
        "off" => "mdi:power",
        "fan_only" => "mdi:fan",
        "heat_cool" => "mdi:sun-snowflake-variant",
        "heat" => "mdi:fire",
        "cool" => "mdi:snowflake",
        "auto" => "mdi:thermostat-auto",
        "dry" => "mdi:water-percent",
        _ => "mdi:thermostat",
    }
}

/// Setpoint increment: the entity's `target_temp_step` when present and
/// non-zero, else the unit's default.
#[must_use]
pub fn resolve_step(entity: &Entity, unit: TemperatureUnit) -> f64 {
    entity
        .attribute_f64("target_temp_step")
        .filter(|step| *step != 0.0 && step.is_finite())
        .unwrap_or_else(|| unit.default_step())
}

/// Number of fraction digits in `step` (`0.5` → 1, `1` → 0, `0.25` → 2).
#[must_use]
pub fn fraction_digits(step: f64) -> usize {
    let text = step.to_string();
    text.split_once('.')
        .map_or(0, |(_, fraction)| fraction.len())
}
