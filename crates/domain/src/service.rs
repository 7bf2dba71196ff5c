//! Service call: a command sent back to the hub.
//!
//! Examples: `climate.set_temperature`, `media_player.volume_set`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::id::EntityId;

/// One remote command invocation: `invoke(domain, service, { entity_id, ...args })`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCall {
    pub domain: String,
    pub service: String,
    /// Always an object. Carries `entity_id` whenever the call has a target.
    pub data: Value,
}

impl ServiceCall {
    /// Start a call targeting `entity_id`, with no extra arguments yet.
    #[must_use]
    pub fn new(
        domain: impl Into<String>,
        service: impl Into<String>,
        entity_id: &EntityId,
    ) -> Self {
        Self::from_data(domain, service, Value::Null, Some(entity_id))
    }

    /// Build a call from free-form service data.
    ///
    /// `entity_id` is added as the target unless the data already names
    /// one. Data that is not an object is dropped.
    #[must_use]
    pub fn from_data(
        domain: impl Into<String>,
        service: impl Into<String>,
        data: Value,
        entity_id: Option<&EntityId>,
    ) -> Self {
        let mut data = match data {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        if let Some(entity_id) = entity_id {
            data.entry("entity_id")
                .or_insert_with(|| Value::String(entity_id.to_string()));
        }
        Self {
            domain: domain.into(),
            service: service.into(),
            data: Value::Object(data),
        }
    }

    /// Add one argument to the call data.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        if let Value::Object(map) = &mut self.data {
            map.insert(key.to_string(), value.into());
        }
        self
    }

    /// The targeted entity id, as found in the call data.
    #[must_use]
    pub fn entity_id(&self) -> Option<&str> {
        self.data.get("entity_id").and_then(Value::as_str)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }
}

impl std::fmt::Display for ServiceCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{}({})",
            self.domain,
            self.service,
            self.entity_id().unwrap_or("-")
        )
    }
}
