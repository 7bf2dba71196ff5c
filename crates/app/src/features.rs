//! Card features: control strips bound to a card's entity.
//!
//! Every feature follows the same lifecycle:
//!
//! 1. created with a [`FeatureContext`] and configured through `set_config`
//!    (a missing configuration is a setup failure)
//! 2. fed every fresh snapshot of its entity through
//!    [`set_entity`](CardFeature::set_entity), which re-derives the local
//!    mirror
//! 3. asked to [`render`](CardFeature::render) a [`ControlSurface`], or
//!    nothing when the entity does not qualify
//! 4. handles user input, updating the mirror first and sending service
//!    calls through the shared [`CommandDispatcher`]
//! 5. [`teardown`](CardFeature::teardown) (or drop) cancels anything still
//!    pending for this instance

pub mod climate;
pub mod media_controls;
pub mod media_volume;
mod support;

pub use climate::ClimateControlsFeature;
pub use media_controls::MediaControlsFeature;
pub use media_volume::MediaVolumeFeature;
pub use support::{supports_climate_controls, supports_media_controls, supports_media_volume};

use std::sync::Arc;

use cardhub_domain::entity::Entity;
use cardhub_domain::error::ConfigError;
use cardhub_domain::feature::FeatureConfig;
use cardhub_domain::id::FeatureId;
use cardhub_domain::surface::ControlSurface;
use cardhub_domain::unit::UnitSystem;

use crate::dispatch::CommandDispatcher;

/// Everything a feature needs from its host.
pub struct FeatureContext<C> {
    pub dispatcher: Arc<CommandDispatcher<C>>,
    pub units: UnitSystem,
}

impl<C> FeatureContext<C> {
    pub fn new(dispatcher: Arc<CommandDispatcher<C>>, units: UnitSystem) -> Self {
        Self { dispatcher, units }
    }
}

impl<C> Clone for FeatureContext<C> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
            units: self.units,
        }
    }
}

/// Behaviour shared by every card feature.
pub trait CardFeature {
    /// Identity of this mounted instance.
    fn id(&self) -> FeatureId;

    /// Snapshot-sync hook: bind to `entity` (or unbind with `None`).
    ///
    /// Binding to a different entity id drops any pending command aimed at
    /// the previous one.
    fn set_entity(&mut self, entity: Option<Entity>);

    /// The layout to show, or `None` to render nothing.
    fn render(&self) -> Option<ControlSurface>;

    /// Cancel pending commands and unbind.
    fn teardown(&mut self);
}

/// Build the feature described by a raw `{ "type": …, … }` value.
///
/// # Errors
///
/// Returns the [`ConfigError`] of [`FeatureConfig::from_value`] or of the
/// feature's `set_config`.
pub fn create_feature<C>(
    config: serde_json::Value,
    ctx: FeatureContext<C>,
) -> Result<Feature<C>, ConfigError> {
    Feature::from_config(FeatureConfig::from_value(config)?, ctx)
}

/// A card feature of any kind.
pub enum Feature<C> {
    ClimateControls(ClimateControlsFeature<C>),
    MediaControls(MediaControlsFeature<C>),
    MediaVolume(MediaVolumeFeature<C>),
}

impl<C> Feature<C> {
    /// Build and configure the feature described by `config`.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] raised by the feature's `set_config`.
    pub fn from_config(config: FeatureConfig, ctx: FeatureContext<C>) -> Result<Self, ConfigError> {
        Ok(match config {
            FeatureConfig::ClimateControls(config) => {
                let mut feature = ClimateControlsFeature::new(ctx);
                feature.set_config(Some(config))?;
                Self::ClimateControls(feature)
            }
            FeatureConfig::MediaControls(config) => {
                let mut feature = MediaControlsFeature::new(ctx);
                feature.set_config(Some(config))?;
                Self::MediaControls(feature)
            }
            FeatureConfig::MediaVolume(config) => {
                let mut feature = MediaVolumeFeature::new(ctx);
                feature.set_config(Some(config))?;
                Self::MediaVolume(feature)
            }
        })
    }

    /// Whether a feature of this kind applies to `entity`.
    #[must_use]
    pub fn supports(&self, entity: &Entity) -> bool {
        match self {
            Self::ClimateControls(_) => supports_climate_controls(entity),
            Self::MediaControls(_) => supports_media_controls(entity),
            Self::MediaVolume(_) => supports_media_volume(entity),
        }
    }

    fn inner(&self) -> &dyn CardFeature {
        match self {
            Self::ClimateControls(f) => f,
            Self::MediaControls(f) => f,
            Self::MediaVolume(f) => f,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn CardFeature {
        match self {
            Self::ClimateControls(f) => f,
            Self::MediaControls(f) => f,
            Self::MediaVolume(f) => f,
        }
    }
}

impl<C> CardFeature for Feature<C> {
    fn id(&self) -> FeatureId {
        self.inner().id()
    }

    fn set_entity(&mut self, entity: Option<Entity>) {
        self.inner_mut().set_entity(entity);
    }

    fn render(&self) -> Option<ControlSurface> {
        self.inner().render()
    }

    fn teardown(&mut self) {
        self.inner_mut().teardown();
    }
}
