//! Media player helpers: transport controls and volume commands.

use crate::entity::{Entity, EntityState};
use crate::feature_flags::MediaPlayerEntityFeature as F;
use crate::service::ServiceCall;

pub const DOMAIN: &str = "media_player";

/// Repeat modes in cycling order.
pub const REPEAT_MODES: [&str; 3] = ["off", "all", "one"];

/// A transport button: the service to call and the icon to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaControl {
    pub action: &'static str,
    pub icon: &'static str,
}

const fn control(action: &'static str, icon: &'static str) -> MediaControl {
    MediaControl { action, icon }
}

/// Derive the transport buttons for a media player, in display order.
///
/// Returns `None` when no button applies (unavailable player, or an `off`
/// player that cannot be turned on).
#[must_use]
pub fn compute_media_controls(
    entity: &Entity,
    use_extended_controls: bool,
) -> Option<Vec<MediaControl>> {
    let state = &entity.state;
    if state.is_unavailable_state() {
        return None;
    }
    let supports = |feature| entity.supports_feature(feature);

    if *state == EntityState::Off {
        return supports(F::TURN_ON).then(|| vec![control("turn_on", "mdi:power")]);
    }

    let mut buttons = Vec::new();
    if supports(F::TURN_OFF) {
        buttons.push(control("turn_off", "mdi:power"));
    }

    let assumed_state = entity.attribute_bool("assumed_state") == Some(true);
    let playing = state.as_str() == "playing";
    let paused = state.as_str() == "paused";
    let active = playing || paused || assumed_state;

    if active && use_extended_controls && supports(F::SHUFFLE_SET) {
        let icon = if entity.attribute_bool("shuffle") == Some(true) {
            "mdi:shuffle"
        } else {
            "mdi:shuffle-disabled"
        };
        buttons.push(control("shuffle_set", icon));
    }

    if active && supports(F::PREVIOUS_TRACK) {
        buttons.push(control("media_previous_track", "mdi:skip-previous"));
    }

    let idle = state.as_str() == "idle";
    let can_toggle = (playing && (supports(F::PAUSE) || supports(F::STOP)))
        || ((paused || idle) && supports(F::PLAY))
        || (*state == EntityState::On && (supports(F::PLAY) || supports(F::PAUSE)));
    if !assumed_state && can_toggle {
        let button = if *state == EntityState::On {
            control("media_play", "mdi:play-pause")
        } else if !playing {
            control("media_play", "mdi:play")
        } else if supports(F::PAUSE) {
            control("media_pause", "mdi:pause")
        } else {
            control("media_stop", "mdi:stop")
        };
        buttons.push(button);
    }

    if assumed_state && supports(F::PLAY) {
        buttons.push(control("media_play", "mdi:play"));
    }
    if assumed_state && supports(F::PAUSE) {
        buttons.push(control("media_pause", "mdi:pause"));
    }
    if assumed_state && supports(F::STOP) {
        buttons.push(control("media_stop", "mdi:stop"));
    }

    if active && supports(F::NEXT_TRACK) {
        buttons.push(control("media_next_track", "mdi:skip-next"));
    }

    if active && use_extended_controls && supports(F::REPEAT_SET) {
        let icon = match entity.attribute_str("repeat") {
            Some("all") => "mdi:repeat",
            Some("one") => "mdi:repeat-once",
            _ => "mdi:repeat-off",
        };
        buttons.push(control("repeat_set", icon));
    }

    (!buttons.is_empty()).then_some(buttons)
}

/// Build the service call for a transport button press.
///
/// `shuffle_set` flips the current shuffle flag and `repeat_set` advances
/// through [`REPEAT_MODES`]; every other action only carries the target.
#[must_use]
pub fn media_control_call(entity: &Entity, action: &str) -> ServiceCall {
    let call = ServiceCall::new(DOMAIN, action, &entity.entity_id);
    match action {
        "shuffle_set" => {
            let shuffle = entity.attribute_bool("shuffle").unwrap_or(false);
            call.with("shuffle", !shuffle)
        }
        "repeat_set" => {
            let next = entity
                .attribute_str("repeat")
                .and_then(|current| REPEAT_MODES.iter().position(|m| *m == current))
                .map_or("off", |i| REPEAT_MODES[(i + 1) % REPEAT_MODES.len()]);
            call.with("repeat", next)
        }
        _ => call,
    }
}

/// Current volume as a 0–100 percentage.
#[must_use]
pub fn volume_percent(entity: &Entity) -> f64 {
    entity.attribute_f64("volume_level").unwrap_or(0.0) * 100.0
}

/// `volume_set` for a 0–100 percentage, sent as a 0.0–1.0 level.
#[must_use]
pub fn volume_set_call(entity: &Entity, percent: f64) -> ServiceCall {
    let level = (percent / 100.0).clamp(0.0, 1.0);
    ServiceCall::new(DOMAIN, "volume_set", &entity.entity_id).with("volume_level", level)
}

/// `volume_mute` flipping the current mute flag.
#[must_use]
pub fn volume_mute_call(entity: &Entity) -> ServiceCall {
    let muted = entity.attribute_bool("is_volume_muted").unwrap_or(false);
    ServiceCall::new(DOMAIN, "volume_mute", &entity.entity_id).with("is_volume_muted", !muted)
}
