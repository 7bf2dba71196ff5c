//! Entity state: the state string reported by the hub for an entity.

use serde::{Deserialize, Serialize};

/// Operational state of an entity.
///
/// The hub reports arbitrary lowercase strings (`heat`, `playing`, …); the
/// ones the card layer branches on get their own variant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityState {
    On,
    Off,
    #[default]
    Unknown,
    Unavailable,
    Other(String),
}

impl EntityState {
    /// Whether the entity is reachable (anything but [`Unavailable`](Self::Unavailable)).
    #[must_use]
    pub fn is_available(&self) -> bool {
        !matches!(self, Self::Unavailable)
    }

    /// `unavailable` or `unknown`: there is no trustworthy state to show.
    #[must_use]
    pub fn is_unavailable_state(&self) -> bool {
        matches!(self, Self::Unavailable | Self::Unknown)
    }

    /// `off`, `unavailable` or `unknown`.
    #[must_use]
    pub fn is_off_state(&self) -> bool {
        matches!(self, Self::Off) || self.is_unavailable_state()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::On => "on",
            Self::Off => "off",
            Self::Unknown => "unknown",
            Self::Unavailable => "unavailable",
            Self::Other(value) => value,
        }
    }
}

impl From<&str> for EntityState {
    fn from(value: &str) -> Self {
        match value {
            "on" => Self::On,
            "off" => Self::Off,
            "unknown" => Self::Unknown,
            "unavailable" => Self::Unavailable,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for EntityState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "on" | "off" | "unknown" | "unavailable" => Self::from(value.as_str()),
            _ => Self::Other(value),
        }
    }
}

impl From<EntityState> for String {
    fn from(value: EntityState) -> Self {
        match value {
            EntityState::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for EntityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
