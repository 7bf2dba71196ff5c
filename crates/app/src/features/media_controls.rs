//! `media-controls`: transport buttons for a media player.

use cardhub_domain::entity::Entity;
use cardhub_domain::error::ConfigError;
use cardhub_domain::feature::MediaControlsConfig;
use cardhub_domain::id::FeatureId;
use cardhub_domain::media_player::{compute_media_controls, media_control_call};
use cardhub_domain::surface::{ActionButton, Control, ControlSurface};

use super::support::supports_media_controls;
use super::{CardFeature, FeatureContext};
use crate::ports::ServiceCaller;

pub struct MediaControlsFeature<C> {
    id: FeatureId,
    ctx: FeatureContext<C>,
    config: Option<MediaControlsConfig>,
    entity: Option<Entity>,
}

impl<C> MediaControlsFeature<C> {
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
    pub fn set_config(&mut self, config: Option<MediaControlsConfig>) -> Result<(), ConfigError> {
        self.config = Some(config.ok_or(ConfigError::Missing)?);
        Ok(())
    }

    fn extended(&self) -> bool {
        self.config
            .as_ref()
            .is_some_and(|c| c.use_extended_controls)
    }
}

impl<C> MediaControlsFeature<C>
where
    C: ServiceCaller + 'static,
{
    /// A transport button was pressed.
    ///
    /// Actions that are not currently on display are ignored.
    pub fn control_tap(&self, action: &str) {
        let Some(entity) = &self.entity else {
            return;
        };
        let offered = compute_media_controls(entity, self.extended())
            .is_some_and(|controls| controls.iter().any(|c| c.action == action));
        if !offered {
            tracing::debug!(feature = %self.id, action, "ignoring action not on display");
            return;
        }
        self.ctx.dispatcher.send(media_control_call(entity, action));
    }
}

impl<C> CardFeature for MediaControlsFeature<C> {
    fn id(&self) -> FeatureId {
        self.id
    }

    fn set_entity(&mut self, entity: Option<Entity>) {
        self.entity = entity;
    }

    fn render(&self) -> Option<ControlSurface> {
        let config = self.config.as_ref()?;
        let entity = self.entity.as_ref()?;
        if !supports_media_controls(entity) {
            return None;
        }
        let controls = compute_media_controls(entity, config.use_extended_controls)?;
        Some(ControlSurface::new(
            controls
                .into_iter()
                .map(|c| {
                    Control::ActionButton(ActionButton {
                        action: c.action,
                        icon: c.icon,
                    })
                })
                .collect(),
        ))
    }

    fn teardown(&mut self) {
        self.entity = None;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::debounce::DEFAULT_DELAY;
    use crate::dispatch::CommandDispatcher;
    use crate::dispatch::testing::{RecordingCaller, settle};
    use cardhub_domain::feature_flags::{MediaPlayerEntityFeature as F, SUPPORTED_FEATURES};
    use cardhub_domain::unit::UnitSystem;

    fn feature(
        caller: &Arc<RecordingCaller>,
        extended: bool,
    ) -> MediaControlsFeature<RecordingCaller> {
        let dispatcher = Arc::new(CommandDispatcher::new(Arc::clone(caller), DEFAULT_DELAY));
        let ctx = FeatureContext::new(dispatcher, UnitSystem::default());
        let mut feature = MediaControlsFeature::new(ctx);
        feature
            .set_config(Some(MediaControlsConfig {
                use_extended_controls: extended,
            }))
            .unwrap();
        feature
    }

    fn speaker(state: &str, features: u32) -> Entity {
        Entity::builder()
            .entity_id("media_player.den")
            .state(state)
            .attribute(SUPPORTED_FEATURES, features)
            .attribute("repeat", "all")
            .build()
            .unwrap()
    }

    #[test]
    fn should_render_transport_buttons_in_order() {
        let caller = Arc::new(RecordingCaller::default());
        let mut feature = feature(&caller, false);
        feature.set_entity(Some(speaker("playing", F::PREVIOUS_TRACK | F::PAUSE | F::NEXT_TRACK)));

        let surface = feature.render().unwrap();
        assert_eq!(
            surface.actions(),
            vec!["media_previous_track", "media_pause", "media_next_track"]
        );
    }

    #[test]
    fn should_render_nothing_without_applicable_action() {
        let caller = Arc::new(RecordingCaller::default());
        let mut feature = feature(&caller, false);
        feature.set_entity(Some(speaker("off", F::PLAY)));
        assert!(feature.render().is_none());

        feature.set_entity(Some(speaker("unavailable", u32::MAX)));
        assert!(feature.render().is_none());
    }

    #[test]
    fn should_render_nothing_for_other_domains() {
        let caller = Arc::new(RecordingCaller::default());
        let mut feature = feature(&caller, false);
        let light = Entity::builder()
            .entity_id("light.kitchen")
            .state("on")
            .attribute(SUPPORTED_FEATURES, u32::MAX)
            .build()
            .unwrap();
        feature.set_entity(Some(light));
        assert!(feature.render().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn should_send_repeat_cycle_on_tap() {
        let caller = Arc::new(RecordingCaller::default());
        let mut feature = feature(&caller, true);
        feature.set_entity(Some(speaker("playing", F::REPEAT_SET)));

        feature.control_tap("repeat_set");
        settle(1).await;

        let calls = caller.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].service, "repeat_set");
        assert_eq!(
            calls[0].data,
            json!({"entity_id": "media_player.den", "repeat": "one"})
        );
    }

    #[tokio::test(start_paused = true)]
    async fn should_ignore_actions_not_on_display() {
        let caller = Arc::new(RecordingCaller::default());
        let mut feature = feature(&caller, false);
        feature.set_entity(Some(speaker("playing", F::PAUSE | F::REPEAT_SET)));

        feature.control_tap("repeat_set");
        feature.control_tap("media_next_track");
        settle(1).await;

        assert!(caller.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn should_turn_on_player_that_is_off() {
        let caller = Arc::new(RecordingCaller::default());
        let mut feature = feature(&caller, false);
        feature.set_entity(Some(speaker("off", F::TURN_ON)));

        assert_eq!(feature.render().unwrap().actions(), vec!["turn_on"]);
        feature.control_tap("turn_on");
        settle(1).await;

        assert_eq!(
            caller.calls()[0].to_string(),
            "media_player.turn_on(media_player.den)"
        );
    }
}
