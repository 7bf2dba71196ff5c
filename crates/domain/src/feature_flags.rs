//! Capability flags advertised through the `supported_features` attribute.
//!
//! Values match the bit layout the hub uses for each domain.

/// Attribute holding the capability bitmask.
pub const SUPPORTED_FEATURES: &str = "supported_features";

/// Capability bits for `climate` entities.
pub struct ClimateEntityFeature;

impl ClimateEntityFeature {
    pub const TARGET_TEMPERATURE: u32 = 1;
    pub const TARGET_TEMPERATURE_RANGE: u32 = 2;
    pub const TARGET_HUMIDITY: u32 = 4;
    pub const FAN_MODE: u32 = 8;
    pub const PRESET_MODE: u32 = 16;
    pub const SWING_MODE: u32 = 32;
    pub const AUX_HEAT: u32 = 64;
    pub const TURN_OFF: u32 = 128;
    pub const TURN_ON: u32 = 256;
}

/// Capability bits for `media_player` entities.
pub struct MediaPlayerEntityFeature;

impl MediaPlayerEntityFeature {
    pub const PAUSE: u32 = 1;
    pub const SEEK: u32 = 2;
    pub const VOLUME_SET: u32 = 4;
    pub const VOLUME_MUTE: u32 = 8;
    pub const PREVIOUS_TRACK: u32 = 16;
    pub const NEXT_TRACK: u32 = 32;
    pub const TURN_ON: u32 = 128;
    pub const TURN_OFF: u32 = 256;
    pub const PLAY_MEDIA: u32 = 512;
    pub const VOLUME_STEP: u32 = 1024;
    pub const SELECT_SOURCE: u32 = 2048;
    pub const STOP: u32 = 4096;
    pub const CLEAR_PLAYLIST: u32 = 8192;
    pub const PLAY: u32 = 16384;
    pub const SHUFFLE_SET: u32 = 32768;
    pub const SELECT_SOUND_MODE: u32 = 65536;
    pub const BROWSE_MEDIA: u32 = 131_072;
    pub const REPEAT_SET: u32 = 262_144;
    pub const GROUPING: u32 = 524_288;
}

/// Domains whose default button action is a toggle.
pub const DOMAINS_TOGGLE: &[&str] = &[
    "automation",
    "camera",
    "climate",
    "cover",
    "fan",
    "group",
    "humidifier",
    "input_boolean",
    "light",
    "lock",
    "media_player",
    "remote",
    "script",
    "siren",
    "switch",
    "vacuum",
    "valve",
    "water_heater",
];
