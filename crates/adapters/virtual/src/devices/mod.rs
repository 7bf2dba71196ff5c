//! Virtual device implementations: thermostat, heat pump, speaker.
//!
//! Each device keeps its mutable state behind a [`Mutex`] and rebuilds a
//! full [`Entity`] snapshot after every service call.

mod heat_pump;
mod speaker;
mod thermostat;

pub use heat_pump::VirtualHeatPump;
pub use speaker::VirtualSpeaker;
pub use thermostat::VirtualThermostat;

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use cardhub_domain::entity::Entity;
use cardhub_domain::error::{CardHubError, ServiceError};
use cardhub_domain::id::EntityId;

/// Wrapper enum for the concrete virtual device types.
pub enum VirtualDevice {
    Thermostat(VirtualThermostat),
    HeatPump(VirtualHeatPump),
    Speaker(VirtualSpeaker),
}

impl VirtualDevice {
    #[must_use]
    pub fn entity_id(&self) -> &EntityId {
        match self {
            Self::Thermostat(d) => d.entity_id(),
            Self::HeatPump(d) => d.entity_id(),
            Self::Speaker(d) => d.entity_id(),
        }
    }

    /// Current snapshot of the device.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the builder fails.
    pub fn snapshot(&self) -> Result<Entity, CardHubError> {
        match self {
            Self::Thermostat(d) => d.snapshot(),
            Self::HeatPump(d) => d.snapshot(),
            Self::Speaker(d) => d.snapshot(),
        }
    }

    /// Handle a service call, returning the resulting entity snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Unsupported`] for services the device does
    /// not implement and [`ServiceError::InvalidData`] for bad arguments.
    pub fn handle_service(&self, service: &str, data: &Value) -> Result<Entity, CardHubError> {
        match self {
            Self::Thermostat(d) => d.handle_service(service, data),
            Self::HeatPump(d) => d.handle_service(service, data),
            Self::Speaker(d) => d.handle_service(service, data),
        }
    }
}

fn lock<T>(state: &Mutex<T>) -> MutexGuard<'_, T> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn unsupported(entity_id: &EntityId, service: &str) -> CardHubError {
    ServiceError::Unsupported {
        domain: entity_id.domain().to_string(),
        service: service.to_string(),
    }
    .into()
}

fn number(data: &Value, key: &'static str) -> Result<f64, ServiceError> {
    data.get(key)
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .ok_or(ServiceError::InvalidData(key))
}

fn text<'a>(data: &'a Value, key: &'static str) -> Result<&'a str, ServiceError> {
    data.get(key)
        .and_then(Value::as_str)
        .ok_or(ServiceError::InvalidData(key))
}

fn flag(data: &Value, key: &'static str) -> Result<bool, ServiceError> {
    data.get(key)
        .and_then(Value::as_bool)
        .ok_or(ServiceError::InvalidData(key))
}

/// Pick `value` out of `allowed`, as a `'static` mode name.
fn one_of(
    allowed: &[&'static str],
    value: &str,
    key: &'static str,
) -> Result<&'static str, ServiceError> {
    allowed
        .iter()
        .find(|mode| **mode == value)
        .copied()
        .ok_or(ServiceError::InvalidData(key))
}

fn mode_list(modes: &[&str]) -> Value {
    Value::Array(modes.iter().map(|m| Value::from(*m)).collect())
}
