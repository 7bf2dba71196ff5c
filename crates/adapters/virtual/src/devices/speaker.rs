//! Virtual speaker: transport, volume, mute, shuffle and repeat.

use std::sync::Mutex;

use serde_json::Value;

use cardhub_domain::entity::Entity;
use cardhub_domain::error::{CardHubError, ServiceError};
use cardhub_domain::feature_flags::{MediaPlayerEntityFeature as F, SUPPORTED_FEATURES};
use cardhub_domain::id::EntityId;
use cardhub_domain::media_player::REPEAT_MODES;

use super::{flag, lock, number, one_of, text, unsupported};

const ENTITY_ID: &str = "media_player.virtual_speaker";
const PLAYLIST: [&str; 3] = ["Morning Jazz", "Rainy Day", "Evening News"];

struct State {
    state: &'static str,
    volume_level: f64,
    muted: bool,
    shuffle: bool,
    repeat: &'static str,
    track: usize,
}

/// A simulated speaker looping over a short playlist.
pub struct VirtualSpeaker {
    entity_id: EntityId,
    state: Mutex<State>,
}

impl VirtualSpeaker {
    /// # Errors
    ///
    /// Never fails for the built-in id; kept fallible like every builder.
    pub fn new() -> Result<Self, CardHubError> {
        Ok(Self {
            entity_id: EntityId::parse(ENTITY_ID)?,
            state: Mutex::new(State {
                state: "paused",
                volume_level: 0.3,
                muted: false,
                shuffle: false,
                repeat: "off",
                track: 0,
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
            .state(state.state)
            .attribute("friendly_name", "Virtual Speaker")
            .attribute(
                SUPPORTED_FEATURES,
                F::PAUSE
                    | F::VOLUME_SET
                    | F::VOLUME_MUTE
                    | F::PREVIOUS_TRACK
                    | F::NEXT_TRACK
                    | F::TURN_ON
                    | F::TURN_OFF
                    | F::STOP
                    | F::PLAY
                    | F::SHUFFLE_SET
                    | F::REPEAT_SET,
            )
            .attribute("volume_level", state.volume_level)
            .attribute("is_volume_muted", state.muted)
            .attribute("shuffle", state.shuffle)
            .attribute("repeat", state.repeat)
            .attribute("media_title", PLAYLIST[state.track])
            .build()
    }

    /// # Errors
    ///
    /// Returns [`ServiceError`] for unknown services and bad arguments.
    pub fn handle_service(&self, service: &str, data: &Value) -> Result<Entity, CardHubError> {
        {
            let mut state = lock(&self.state);
            match service {
                "turn_on" => state.state = "idle",
                "turn_off" => state.state = "off",
                "toggle" => state.state = if state.state == "off" { "idle" } else { "off" },
                "media_play" => state.state = "playing",
                "media_pause" => state.state = "paused",
                "media_stop" => state.state = "idle",
                "media_next_track" => state.track = (state.track + 1) % PLAYLIST.len(),
                "media_previous_track" => {
                    state.track = (state.track + PLAYLIST.len() - 1) % PLAYLIST.len();
                }
                "volume_set" => {
                    let level = number(data, "volume_level")?;
                    if !(0.0..=1.0).contains(&level) {
                        return Err(ServiceError::InvalidData("volume_level").into());
                    }
                    state.volume_level = level;
                }
                "volume_mute" => state.muted = flag(data, "is_volume_muted")?,
                "shuffle_set" => state.shuffle = flag(data, "shuffle")?,
                "repeat_set" => {
                    let repeat = text(data, "repeat")?;
                    state.repeat = one_of(&REPEAT_MODES, repeat, "repeat")?;
                }
                other => return Err(unsupported(&self.entity_id, other)),
            }
        }
        self.snapshot()
    }
}
