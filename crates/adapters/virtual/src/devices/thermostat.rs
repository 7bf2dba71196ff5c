//! Virtual thermostat: single setpoint with fan and hvac modes.

use std::sync::Mutex;

use serde_json::Value;

use cardhub_domain::climate::{FAN_MODES, HVAC_MODES};
use cardhub_domain::entity::{AttributeValue, Entity};
use cardhub_domain::error::{CardHubError, ServiceError};
use cardhub_domain::feature_flags::{ClimateEntityFeature as F, SUPPORTED_FEATURES};
use cardhub_domain::id::EntityId;

use super::{lock, mode_list, number, one_of, text, unsupported};

const ENTITY_ID: &str = "climate.virtual_thermostat";
const MIN_TEMP: f64 = 7.0;
const MAX_TEMP: f64 = 35.0;

struct State {
    hvac_mode: &'static str,
    fan_mode: &'static str,
    temperature: f64,
}

/// A simulated thermostat holding one target temperature.
pub struct VirtualThermostat {
    entity_id: EntityId,
    state: Mutex<State>,
}

impl VirtualThermostat {
    /// # Errors
    ///
    /// Never fails for the built-in id; kept fallible like every builder.
    pub fn new() -> Result<Self, CardHubError> {
        Ok(Self {
            entity_id: EntityId::parse(ENTITY_ID)?,
            state: Mutex::new(State {
                hvac_mode: "heat",
                fan_mode: "auto",
                temperature: 21.0,
            }),
        })
    }

    #[must_use]
    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    /// # Errors
    ///
    /// Returns a validation error if the builder fails.
    pub fn snapshot(&self) -> Result<Entity, CardHubError> {
        let state = lock(&self.state);
        Entity::builder()
            .entity_id(self.entity_id.as_str())
            .state(state.hvac_mode)
            .attribute("friendly_name", "Virtual Thermostat")
            .attribute(
                SUPPORTED_FEATURES,
                F::TARGET_TEMPERATURE | F::FAN_MODE | F::TURN_ON | F::TURN_OFF,
            )
            .attribute("temperature", state.temperature)
            .attribute("current_temperature", 20.5)
            .attribute("min_temp", MIN_TEMP)
            .attribute("max_temp", MAX_TEMP)
            .attribute("target_temp_step", 0.5)
            .attribute("fan_mode", state.fan_mode)
            .attribute("fan_modes", AttributeValue::Json(mode_list(&FAN_MODES)))
            .attribute("hvac_modes", AttributeValue::Json(mode_list(&HVAC_MODES)))
            .build()
    }

    /// # Errors
    ///
    /// Returns [`ServiceError`] for unknown services, unknown modes or a
    /// setpoint outside `min_temp..=max_temp`.
    pub fn handle_service(&self, service: &str, data: &Value) -> Result<Entity, CardHubError> {
        {
            let mut state = lock(&self.state);
            match service {
                "set_temperature" => {
                    let temperature = number(data, "temperature")?;
                    if !(MIN_TEMP..=MAX_TEMP).contains(&temperature) {
                        return Err(ServiceError::InvalidData("temperature").into());
                    }
                    state.temperature = temperature;
                }
                "set_fan_mode" => {
                    state.fan_mode = one_of(&FAN_MODES, text(data, "fan_mode")?, "fan_mode")?;
                }
                "set_hvac_mode" => {
                    state.hvac_mode = one_of(&HVAC_MODES, text(data, "hvac_mode")?, "hvac_mode")?;
                }
                "turn_on" => state.hvac_mode = "heat",
                "turn_off" => state.hvac_mode = "off",
                other => return Err(unsupported(&self.entity_id, other)),
            }
        }
        self.snapshot()
    }
}
