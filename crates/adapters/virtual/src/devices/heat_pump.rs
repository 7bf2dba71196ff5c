//! Virtual heat pump: low/high setpoint range.

use std::sync::Mutex;

use serde_json::Value;

use cardhub_domain::entity::{AttributeValue, Entity};
use cardhub_domain::error::{CardHubError, ServiceError};
use cardhub_domain::feature_flags::{ClimateEntityFeature as F, SUPPORTED_FEATURES};
use cardhub_domain::id::EntityId;

use super::{lock, mode_list, number, one_of, text, unsupported};

const ENTITY_ID: &str = "climate.virtual_heat_pump";
const HVAC_MODES: [&str; 4] = ["off", "heat", "cool", "heat_cool"];
const MIN_TEMP: f64 = 10.0;
const MAX_TEMP: f64 = 30.0;

struct State {
    hvac_mode: &'static str,
    low: f64,
    high: f64,
}

/// A simulated heat pump keeping the room between two setpoints.
pub struct VirtualHeatPump {
    entity_id: EntityId,
    state: Mutex<State>,
}

impl VirtualHeatPump {
    /// # Errors
    ///
    /// Never fails for the built-in id; kept fallible like every builder.
    pub fn new() -> Result<Self, CardHubError> {
        Ok(Self {
            entity_id: EntityId::parse(ENTITY_ID)?,
            state: Mutex::new(State {
                hvac_mode: "heat_cool",
                low: 19.0,
                high: 24.0,
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
            .attribute("friendly_name", "Virtual Heat Pump")
            .attribute(
                SUPPORTED_FEATURES,
                F::TARGET_TEMPERATURE_RANGE | F::TURN_OFF,
            )
            .attribute("target_temp_low", state.low)
            .attribute("target_temp_high", state.high)
            .attribute("current_temperature", 22.0)
            .attribute("min_temp", MIN_TEMP)
            .attribute("max_temp", MAX_TEMP)
            .attribute("hvac_modes", AttributeValue::Json(mode_list(&HVAC_MODES)))
            .build()
    }

    /// # Errors
    ///
    /// Returns [`ServiceError`] for unknown services or modes, and when the
    /// requested range is inverted or outside `min_temp..=max_temp`.
    pub fn handle_service(&self, service: &str, data: &Value) -> Result<Entity, CardHubError> {
        {
            let mut state = lock(&self.state);
            match service {
                "set_temperature" => {
                    let low = number(data, "target_temp_low")?;
                    let high = number(data, "target_temp_high")?;
                    let bounds = MIN_TEMP..=MAX_TEMP;
                    if !bounds.contains(&low) {
                        return Err(ServiceError::InvalidData("target_temp_low").into());
                    }
                    if !bounds.contains(&high) || high < low {
                        return Err(ServiceError::InvalidData("target_temp_high").into());
                    }
                    state.low = low;
                    state.high = high;
                }
                "set_hvac_mode" => {
                    state.hvac_mode = one_of(&HVAC_MODES, text(data, "hvac_mode")?, "hvac_mode")?;
                }
                "turn_off" => state.hvac_mode = "off",
                other => return Err(unsupported(&self.entity_id, other)),
            }
        }
        self.snapshot()
    }
}
