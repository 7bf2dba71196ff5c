//! Button card: icon, name and state of one entity, with tap, hold and
//! double-tap actions.

use std::sync::Arc;

use serde::Serialize;

use cardhub_domain::card::{ButtonCardConfig, ButtonSettings, CardAction};
use cardhub_domain::entity::Entity;
use cardhub_domain::error::ConfigError;
use cardhub_domain::id::{CardId, EntityId};
use cardhub_domain::service::ServiceCall;

use crate::dispatch::CommandDispatcher;
use crate::ports::ServiceCaller;

/// Which gesture triggered an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Tap,
    Hold,
    DoubleTap,
}

/// What handling a gesture led to.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// A service call went out.
    ServiceCalled(ServiceCall),
    /// The host should open the detail dialog of this entity.
    MoreInfo(EntityId),
    /// The host should move to this dashboard path.
    Navigate(String),
    Nothing,
}

/// Grid placement hint for the dashboard layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutOptions {
    pub grid_rows: u8,
    pub grid_columns: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_min_rows: Option<u8>,
}

/// What the card shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ButtonView {
    /// The configured entity has no snapshot.
    EntityNotFound { entity_id: EntityId },
    Button(ButtonFace),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonFace {
    pub name: Option<String>,
    /// Configured icon; `None` with `show_icon` means the entity's default.
    pub icon: Option<String>,
    pub show_icon: bool,
    pub state: Option<String>,
    /// Tint the icon with the state color.
    pub colored: bool,
    /// Whether tapping does anything.
    pub focusable: bool,
}

pub struct ButtonCard<C> {
    id: CardId,
    dispatcher: Arc<CommandDispatcher<C>>,
    settings: Option<ButtonSettings>,
    entity: Option<Entity>,
}

impl<C> ButtonCard<C> {
    pub fn new(dispatcher: Arc<CommandDispatcher<C>>) -> Self {
        Self {
            id: CardId::new(),
            dispatcher,
            settings: None,
            entity: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    /// Apply a configuration with defaults filled in.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEntity`] for a malformed entity id.
    pub fn set_config(&mut self, config: ButtonCardConfig) -> Result<(), ConfigError> {
        let settings = config.resolve()?;
        if self.entity.as_ref().map(|e| &e.entity_id) != settings.entity.as_ref() {
            self.entity = None;
        }
        self.settings = Some(settings);
        Ok(())
    }

    #[must_use]
    pub fn settings(&self) -> Option<&ButtonSettings> {
        self.settings.as_ref()
    }

    /// The entity this card follows.
    #[must_use]
    pub fn entity_id(&self) -> Option<&EntityId> {
        self.settings.as_ref().and_then(|s| s.entity.as_ref())
    }

    /// Snapshot-sync hook. Snapshots of other entities are ignored.
    pub fn set_entity(&mut self, entity: Option<Entity>) {
        match entity {
            Some(entity) if Some(&entity.entity_id) != self.entity_id() => {
                tracing::trace!(
                    card = %self.id,
                    entity_id = %entity.entity_id,
                    "ignoring foreign snapshot"
                );
            }
            other => self.entity = other,
        }
    }

    /// Height in dashboard rows.
    #[must_use]
    pub fn card_size(&self) -> u32 {
        self.settings.as_ref().map_or(0, |s| {
            (if s.show_icon { 4 } else { 0 }) + u32::from(s.show_name)
        })
    }

    #[must_use]
    pub fn layout_options(&self) -> LayoutOptions {
        match &self.settings {
            Some(s) if s.show_icon && (s.show_name || s.show_state) => LayoutOptions {
                grid_rows: 2,
                grid_columns: 2,
                grid_min_rows: Some(2),
            },
            _ => LayoutOptions {
                grid_rows: 1,
                grid_columns: 1,
                grid_min_rows: None,
            },
        }
    }

    /// Whether the icon follows the entity's state color. Defaults to on
    /// for lights only.
    #[must_use]
    pub fn state_color(&self) -> bool {
        let Some(entity) = &self.entity else {
            return false;
        };
        self.settings
            .as_ref()
            .and_then(|s| s.state_color)
            .unwrap_or(entity.domain() == "light")
    }

    #[must_use]
    pub fn render(&self) -> Option<ButtonView> {
        let settings = self.settings.as_ref()?;
        if let (Some(entity_id), None) = (&settings.entity, &self.entity) {
            return Some(ButtonView::EntityNotFound {
                entity_id: entity_id.clone(),
            });
        }
        let entity = self.entity.as_ref();
        let name = settings
            .show_name
            .then(|| settings.name.clone().or_else(|| entity.map(state_name)))
            .flatten();
        let state = if settings.show_state {
            entity.map(format_state)
        } else {
            None
        };
        Some(ButtonView::Button(ButtonFace {
            name,
            icon: settings.icon.clone(),
            show_icon: settings.show_icon,
            state,
            colored: entity.is_some_and(|e| !e.state.is_off_state()) && self.state_color(),
            focusable: !settings.tap_action.is_none(),
        }))
    }

    fn action(&self, kind: ActionKind) -> Option<&CardAction> {
        let settings = self.settings.as_ref()?;
        match kind {
            ActionKind::Tap => Some(&settings.tap_action),
            ActionKind::Hold => Some(&settings.hold_action),
            ActionKind::DoubleTap => settings.double_tap_action.as_ref(),
        }
    }
}

impl<C> ButtonCard<C>
where
    C: ServiceCaller + 'static,
{
    /// Run the action bound to `kind`.
    ///
    /// Service calls go out immediately; dialogs and navigation are left to
    /// the host through the returned outcome.
    pub fn handle_action(&self, kind: ActionKind) -> ActionOutcome {
        let Some(action) = self.action(kind) else {
            return ActionOutcome::Nothing;
        };
        let outcome = match action {
            CardAction::Toggle => match self.entity_id() {
                Some(id) => self.call(ServiceCall::new(id.domain(), "toggle", id)),
                None => ActionOutcome::Nothing,
            },
            CardAction::MoreInfo => match self.entity_id() {
                Some(id) => ActionOutcome::MoreInfo(id.clone()),
                None => ActionOutcome::Nothing,
            },
            CardAction::CallService { service, data } => match service.split_once('.') {
                Some((domain, service)) => {
                    let data = data.clone();
                    self.call(ServiceCall::from_data(domain, service, data, self.entity_id()))
                }
                None => {
                    tracing::warn!(
                        card = %self.id,
                        %service,
                        "service must be written domain.service"
                    );
                    ActionOutcome::Nothing
                }
            },
            CardAction::Navigate { navigation_path } => {
                ActionOutcome::Navigate(navigation_path.clone())
            }
            CardAction::None => ActionOutcome::Nothing,
        };
        tracing::debug!(card = %self.id, ?kind, ?outcome, "handled card action");
        outcome
    }

    fn call(&self, call: ServiceCall) -> ActionOutcome {
        self.dispatcher.send(call.clone());
        ActionOutcome::ServiceCalled(call)
    }
}

/// Friendly name, else the object id with spaces.
fn state_name(entity: &Entity) -> String {
    match entity.attribute_str("friendly_name") {
        Some(name) => name.to_string(),
        None => entity.entity_id.object_id().replace('_', " "),
    }
}

/// State text with its unit, e.g. `21.5 °C`.
fn format_state(entity: &Entity) -> String {
    match entity.attribute_str("unit_of_measurement") {
        Some(unit) => format!("{} {unit}", entity.state),
        None => entity.state.to_string(),
    }
}
