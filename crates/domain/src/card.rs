//! Button card configuration and tap/hold actions.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::feature_flags::DOMAINS_TOGGLE;
use crate::id::EntityId;

/// What a tap, hold or double tap on a card does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum CardAction {
    /// Toggle the card's entity.
    Toggle,
    /// Open the entity's detail dialog (handled by the host).
    MoreInfo,
    /// Call an arbitrary service, written `domain.service`.
    CallService {
        service: String,
        #[serde(default)]
        data: serde_json::Value,
    },
    /// Move to another dashboard view (handled by the host).
    Navigate { navigation_path: String },
    None,
}

impl CardAction {
    /// Default tap action for an entity: toggle for toggleable domains,
    /// more-info otherwise.
    #[must_use]
    pub fn default_for(entity_id: Option<&EntityId>) -> Self {
        match entity_id {
            Some(id) if DOMAINS_TOGGLE.binary_search(&id.domain()).is_ok() => Self::Toggle,
            _ => Self::MoreInfo,
        }
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Button card options as authored; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonCardConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_name: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_icon: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_state: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_color: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tap_action: Option<CardAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hold_action: Option<CardAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub double_tap_action: Option<CardAction>,
}

impl ButtonCardConfig {
    /// Starter configuration: the first light or switch among `entities`,
    /// tapping toggles it.
    #[must_use]
    pub fn stub<'a>(entities: impl IntoIterator<Item = &'a EntityId>) -> Self {
        let entity = entities
            .into_iter()
            .find(|id| matches!(id.domain(), "light" | "switch"));
        Self {
            entity: Some(entity.map(ToString::to_string).unwrap_or_default()),
            tap_action: Some(CardAction::Toggle),
            ..Self::default()
        }
    }

    /// Validate and fill in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEntity`] when `entity` is set but is
    /// not a well-formed entity id.
    pub fn resolve(self) -> Result<ButtonSettings, ConfigError> {
        let entity = match self.entity.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(
                EntityId::parse(raw).map_err(|_| ConfigError::InvalidEntity(raw.to_string()))?,
            ),
        };
        let tap_action = self
            .tap_action
            .unwrap_or_else(|| CardAction::default_for(entity.as_ref()));
        Ok(ButtonSettings {
            entity,
            name: self.name,
            icon: self.icon,
            show_name: self.show_name.unwrap_or(true),
            show_icon: self.show_icon.unwrap_or(true),
            show_state: self.show_state.unwrap_or(false),
            state_color: self.state_color,
            tap_action,
            hold_action: self.hold_action.unwrap_or(CardAction::MoreInfo),
            double_tap_action: self.double_tap_action,
        })
    }
}

/// Button card options with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonSettings {
    pub entity: Option<EntityId>,
    pub name: Option<String>,
    pub icon: Option<String>,
    pub show_name: bool,
    pub show_icon: bool,
    pub show_state: bool,
    pub state_color: Option<bool>,
    pub tap_action: CardAction,
    pub hold_action: CardAction,
    pub double_tap_action: Option<CardAction>,
}
