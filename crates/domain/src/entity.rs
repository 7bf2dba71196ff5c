//! Entity: a snapshot of one remote-controlled device or service.
//!
//! The card layer never owns entities. It receives a fresh [`Entity`]
//! every time the hub reports a change and derives everything it renders
//! from that snapshot.

mod attribute_value;
mod state;

pub use attribute_value::AttributeValue;
pub use state::EntityState;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CardHubError, ValidationError};
use crate::feature_flags::SUPPORTED_FEATURES;
use crate::id::EntityId;

/// UTC timestamp used for `last_changed` / `last_updated`.
pub type Timestamp = DateTime<Utc>;

/// Current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Last known state of a remote entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub entity_id: EntityId,
    pub state: EntityState,
    #[serde(default)]
    pub attributes: HashMap<String, AttributeValue>,
    pub last_changed: Timestamp,
    pub last_updated: Timestamp,
}

impl Entity {
    /// Create a builder for constructing an [`Entity`].
    #[must_use]
    pub fn builder() -> EntityBuilder {
        EntityBuilder::default()
    }

    /// The entity's domain (`climate`, `media_player`, …).
    #[must_use]
    pub fn domain(&self) -> &str {
        self.entity_id.domain()
    }

    #[must_use]
    pub fn get_attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    /// Whether the attribute key is present at all, even with a non-numeric value.
    #[must_use]
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    #[must_use]
    pub fn attribute_f64(&self, key: &str) -> Option<f64> {
        self.get_attribute(key).and_then(AttributeValue::as_f64)
    }

    #[must_use]
    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.get_attribute(key).and_then(AttributeValue::as_str)
    }

    #[must_use]
    pub fn attribute_bool(&self, key: &str) -> Option<bool> {
        self.get_attribute(key).and_then(AttributeValue::as_bool)
    }

    /// Test a capability bit against the `supported_features` attribute.
    ///
    /// A missing or non-integer attribute means no capabilities.
    #[must_use]
    pub fn supports_feature(&self, feature: u32) -> bool {
        let supported = self
            .get_attribute(SUPPORTED_FEATURES)
            .and_then(AttributeValue::as_u32)
            .unwrap_or(0);
        supported & feature != 0
    }

    /// Set a new state, bumping `last_changed` only when it actually differs.
    pub fn update_state(&mut self, state: EntityState, at: Timestamp) {
        if self.state != state {
            self.state = state;
            self.last_changed = at;
        }
        self.last_updated = at;
    }

    /// Set an attribute value and bump `last_updated`.
    pub fn set_attribute(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
        at: Timestamp,
    ) {
        self.attributes.insert(key.into(), value.into());
        self.last_updated = at;
    }
}

/// Step-by-step builder for [`Entity`].
#[derive(Debug, Default)]
pub struct EntityBuilder {
    entity_id: Option<String>,
    state: Option<EntityState>,
    attributes: HashMap<String, AttributeValue>,
    last_changed: Option<Timestamp>,
}

impl EntityBuilder {
    #[must_use]
    pub fn entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    #[must_use]
    pub fn state(mut self, state: impl Into<EntityState>) -> Self {
        self.state = Some(state.into());
        self
    }

    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn last_changed(mut self, ts: Timestamp) -> Self {
        self.last_changed = Some(ts);
        self
    }

    /// Consume the builder, validate, and return an [`Entity`].
    ///
    /// # Errors
    ///
    /// Returns [`CardHubError::Validation`] if the entity id is missing or malformed.
    pub fn build(self) -> Result<Entity, CardHubError> {
        let raw = self.entity_id.ok_or(ValidationError::EmptyEntityId)?;
        let entity_id = EntityId::parse(raw)?;
        let ts = self.last_changed.unwrap_or_else(now);
        Ok(Entity {
            entity_id,
            state: self.state.unwrap_or_default(),
            attributes: self.attributes,
            last_changed: ts,
            last_updated: ts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature_flags::ClimateEntityFeature;

    fn thermostat() -> Entity {
        Entity::builder()
            .entity_id("climate.office")
            .state("heat")
            .attribute("temperature", 20_i64)
            .attribute(SUPPORTED_FEATURES, ClimateEntityFeature::TARGET_TEMPERATURE)
            .build()
            .unwrap()
    }

    #[test]
    fn should_build_entity_with_domain() {
        let entity = thermostat();
        assert_eq!(entity.domain(), "climate");
        assert_eq!(entity.state, EntityState::Other("heat".to_string()));
    }

    #[test]
    fn should_return_validation_error_when_entity_id_missing() {
        let result = Entity::builder().state("on").build();
        assert!(matches!(
            result,
            Err(CardHubError::Validation(ValidationError::EmptyEntityId))
        ));
    }

    #[test]
    fn should_return_validation_error_when_entity_id_malformed() {
        let result = Entity::builder().entity_id("thermostat").build();
        assert!(matches!(
            result,
            Err(CardHubError::Validation(ValidationError::MalformedEntityId(_)))
        ));
    }

    #[test]
    fn should_test_capability_bits_by_containment() {
        let entity = thermostat();
        assert!(entity.supports_feature(ClimateEntityFeature::TARGET_TEMPERATURE));
        assert!(!entity.supports_feature(ClimateEntityFeature::TARGET_TEMPERATURE_RANGE));
    }

    #[test]
    fn should_report_no_capabilities_without_supported_features() {
        let entity = Entity::builder().entity_id("climate.bare").build().unwrap();
        assert!(!entity.supports_feature(ClimateEntityFeature::TARGET_TEMPERATURE));
    }

    #[test]
    fn should_read_integer_attribute_as_f64() {
        assert_eq!(thermostat().attribute_f64("temperature"), Some(20.0));
    }

    #[test]
    fn should_keep_last_changed_when_state_is_unchanged() {
        let mut entity = thermostat();
        let before = entity.last_changed;
        let later = before + chrono::Duration::seconds(5);
        entity.update_state(EntityState::from("heat"), later);
        assert_eq!(entity.last_changed, before);
        assert_eq!(entity.last_updated, later);
    }

    #[test]
    fn should_bump_last_changed_when_state_differs() {
        let mut entity = thermostat();
        let later = entity.last_changed + chrono::Duration::seconds(5);
        entity.update_state(EntityState::Off, later);
        assert_eq!(entity.last_changed, later);
        assert_eq!(entity.state, EntityState::Off);
    }

    #[test]
    fn should_deserialize_snapshot_from_json() {
        let json = serde_json::json!({
            "entity_id": "media_player.den",
            "state": "playing",
            "attributes": {"volume_level": 0.4, "is_volume_muted": false},
            "last_changed": "2024-01-01T00:00:00Z",
            "last_updated": "2024-01-01T00:00:00Z"
        });
        let entity: Entity = serde_json::from_value(json).unwrap();
        assert_eq!(entity.attribute_f64("volume_level"), Some(0.4));
        assert_eq!(entity.attribute_bool("is_volume_muted"), Some(false));
    }
}
