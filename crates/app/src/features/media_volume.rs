//! `media-volume`: mute toggle and volume editor for a media player.

use cardhub_domain::entity::Entity;
use cardhub_domain::error::ConfigError;
use cardhub_domain::feature::{MediaVolumeConfig, VolumeStyle};
use cardhub_domain::feature_flags::MediaPlayerEntityFeature;
use cardhub_domain::id::FeatureId;
use cardhub_domain::media_player::{volume_mute_call, volume_percent, volume_set_call};
use cardhub_domain::surface::{Control, ControlSurface, MuteToggle, NumberStepper, Slider};

use super::support::supports_media_volume;
use super::{CardFeature, FeatureContext};
use crate::ports::ServiceCaller;

const VOLUME_MIN: f64 = 0.0;
const VOLUME_MAX: f64 = 100.0;

/// Volume controls. Every interaction is sent at once.
pub struct MediaVolumeFeature<C> {
    id: FeatureId,
    ctx: FeatureContext<C>,
    config: Option<MediaVolumeConfig>,
    entity: Option<Entity>,
}

impl<C> MediaVolumeFeature<C> {
    pub fn new(ctx: FeatureContext<C>) -> Self {
        Self {
            id: FeatureId::new(),
            ctx,
            config: None,
            entity: None,
        }
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when `config` is `None`.
    pub fn set_config(&mut self, config: Option<MediaVolumeConfig>) -> Result<(), ConfigError> {
        self.config = Some(config.ok_or(ConfigError::Missing)?);
        Ok(())
    }
}

impl<C> MediaVolumeFeature<C>
where
    C: ServiceCaller + 'static,
{
    /// Flip the mute flag.
    pub fn toggle_mute(&self) {
        if let Some(entity) = &self.entity {
            self.ctx.dispatcher.send(volume_mute_call(entity));
        }
    }

    /// Set the volume to `percent` (0–100). `NaN` is discarded.
    pub fn set_volume(&self, percent: f64) {
        if percent.is_nan() {
            return;
        }
        if let Some(entity) = &self.entity {
            self.ctx.dispatcher.send(volume_set_call(entity, percent));
        }
    }
}

impl<C> CardFeature for MediaVolumeFeature<C> {
    fn id(&self) -> FeatureId {
        self.id
    }

    fn set_entity(&mut self, entity: Option<Entity>) {
        self.entity = entity;
    }

    fn render(&self) -> Option<ControlSurface> {
        let config = self.config.as_ref()?;
        let entity = self.entity.as_ref()?;
        // Off and unavailable players show nothing, so the controls are
        // always enabled.
        if !supports_media_volume(entity) || entity.state.is_off_state() {
            return None;
        }

        let mut controls = Vec::with_capacity(2);
        if entity.supports_feature(MediaPlayerEntityFeature::VOLUME_MUTE) {
            let muted = entity.attribute_bool("is_volume_muted").unwrap_or(false);
            let icon = if muted {
                "mdi:volume-off"
            } else {
                "mdi:volume-high"
            };
            controls.push(Control::MuteToggle(MuteToggle {
                muted,
                icon,
                disabled: false,
            }));
        }
        let value = volume_percent(entity);
        controls.push(match config.style {
            VolumeStyle::Slider => Control::Slider(Slider {
                value,
                min: VOLUME_MIN,
                max: VOLUME_MAX,
                disabled: false,
            }),
            VolumeStyle::Buttons => Control::NumberStepper(NumberStepper {
                value: Some(value),
                min: Some(VOLUME_MIN),
                max: Some(VOLUME_MAX),
                label: Some("volume_level"),
                ..NumberStepper::default()
            }),
        });
        Some(ControlSurface::new(controls))
    }

    fn teardown(&mut self) {
        self.entity = None;
    }
}
