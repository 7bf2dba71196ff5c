//! # cardhub-adapter-virtual
//!
//! Virtual hub backend that simulates a few controllable devices, so cards
//! and features can be exercised without a real hub.
//!
//! ## Provided devices
//!
//! | Device | Entity ID | Behaviour |
//! |--------|-----------|-----------|
//! | Virtual Thermostat | `climate.virtual_thermostat` | Single setpoint, fan and hvac modes |
//! | Virtual Heat Pump | `climate.virtual_heat_pump` | Low/high setpoint range |
//! | Virtual Speaker | `media_player.virtual_speaker` | Transport, volume, mute, shuffle, repeat |
//!
//! Every accepted service call mutates the device and publishes the new
//! snapshot through the configured [`StatePublisher`].
//!
//! ## Dependency rule
//!
//! Depends on `cardhub-app` (port traits) and `cardhub-domain` only.

mod devices;

use std::collections::HashMap;

use cardhub_app::ports::{ServiceCaller, StatePublisher};
use cardhub_domain::entity::Entity;
use cardhub_domain::error::{CardHubError, NotFoundError, ServiceError};
use cardhub_domain::id::EntityId;
use cardhub_domain::service::ServiceCall;

use devices::{VirtualDevice, VirtualHeatPump, VirtualSpeaker, VirtualThermostat};

/// Simulated hub owning a fixed set of virtual devices.
pub struct VirtualIntegration<P> {
    devices: HashMap<EntityId, VirtualDevice>,
    publisher: P,
}

impl<P> VirtualIntegration<P>
where
    P: StatePublisher + Send + Sync,
{
    /// Create the default devices, publishing their snapshots through `publisher`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a built-in entity id is rejected.
    pub fn new(publisher: P) -> Result<Self, CardHubError> {
        let devices = [
            VirtualDevice::Thermostat(VirtualThermostat::new()?),
            VirtualDevice::HeatPump(VirtualHeatPump::new()?),
            VirtualDevice::Speaker(VirtualSpeaker::new()?),
        ]
        .into_iter()
        .map(|device| (device.entity_id().clone(), device))
        .collect();

        Ok(Self { devices, publisher })
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        "virtual"
    }

    /// Entity ids of every device, sorted.
    #[must_use]
    pub fn entity_ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<_> = self.devices.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Check whether this integration owns the given entity.
    #[must_use]
    pub fn owns_entity(&self, entity_id: &EntityId) -> bool {
        self.devices.contains_key(entity_id)
    }

    /// Current snapshot of one device.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] for an entity this integration does not own.
    pub fn snapshot(&self, entity_id: &EntityId) -> Result<Entity, CardHubError> {
        self.device(entity_id)?.snapshot()
    }

    /// Publish the current snapshot of every device.
    ///
    /// # Errors
    ///
    /// Returns the first publish failure.
    pub async fn publish_all(&self) -> Result<(), CardHubError> {
        for id in self.entity_ids() {
            let entity = self.snapshot(&id)?;
            self.publisher.publish(entity).await?;
        }
        Ok(())
    }

    fn device(&self, entity_id: &EntityId) -> Result<&VirtualDevice, NotFoundError> {
        self.devices.get(entity_id).ok_or_else(|| NotFoundError {
            entity: "Entity",
            id: entity_id.to_string(),
        })
    }
}

impl<P> ServiceCaller for VirtualIntegration<P>
where
    P: StatePublisher + Send + Sync,
{
    async fn call_service(&self, call: ServiceCall) -> Result<(), CardHubError> {
        let raw = call
            .entity_id()
            .ok_or(ServiceError::InvalidData("entity_id"))?;
        let entity_id = EntityId::parse(raw)?;
        let device = self.device(&entity_id)?;
        if call.domain != entity_id.domain() {
            return Err(ServiceError::Unsupported {
                domain: call.domain,
                service: call.service,
            }
            .into());
        }

        let entity = device.handle_service(&call.service, &call.data)?;
        tracing::debug!(%call, state = %entity.state, "virtual device updated");
        self.publisher.publish(entity).await
    }
}
