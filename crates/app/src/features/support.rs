//! Which entities each feature applies to.

use cardhub_domain::entity::Entity;
use cardhub_domain::feature_flags::{ClimateEntityFeature, MediaPlayerEntityFeature};

const CLIMATE: &str = "climate";
const MEDIA_PLAYER: &str = "media_player";

/// Climate entities with a single or a range setpoint.
#[must_use]
pub fn supports_climate_controls(entity: &Entity) -> bool {
    entity.domain() == CLIMATE
        && (entity.supports_feature(ClimateEntityFeature::TARGET_TEMPERATURE)
            || entity.supports_feature(ClimateEntityFeature::TARGET_TEMPERATURE_RANGE))
}

/// Any media player.
#[must_use]
pub fn supports_media_controls(entity: &Entity) -> bool {
    entity.domain() == MEDIA_PLAYER
}

/// Media players that accept an absolute volume level.
#[must_use]
pub fn supports_media_volume(entity: &Entity) -> bool {
    entity.domain() == MEDIA_PLAYER && entity.supports_feature(MediaPlayerEntityFeature::VOLUME_SET)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardhub_domain::feature_flags::SUPPORTED_FEATURES;

    fn entity(id: &str, features: u32) -> Entity {
        Entity::builder()
            .entity_id(id)
            .state("on")
            .attribute(SUPPORTED_FEATURES, features)
            .build()
            .unwrap()
    }

    #[test]
    fn should_match_support_table_for_every_flag_combination() {
        let domains = ["climate.office", "media_player.den", "light.kitchen"];
        // every combination of the four bits the predicates look at
        let bits = [
            ClimateEntityFeature::TARGET_TEMPERATURE,
            ClimateEntityFeature::TARGET_TEMPERATURE_RANGE,
            MediaPlayerEntityFeature::VOLUME_SET,
            ClimateEntityFeature::FAN_MODE,
        ];
        for id in domains {
            for mask in 0..(1_u32 << bits.len()) {
                let features = bits
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .fold(0, |acc, (_, bit)| acc | bit);
                let e = entity(id, features);
                let setpoints = ClimateEntityFeature::TARGET_TEMPERATURE
                    | ClimateEntityFeature::TARGET_TEMPERATURE_RANGE;
                let climate = id.starts_with("climate.") && features & setpoints != 0;
                let media = id.starts_with("media_player.");
                let volume = media && features & MediaPlayerEntityFeature::VOLUME_SET != 0;

                assert_eq!(supports_climate_controls(&e), climate, "{id} {features:#b}");
                assert_eq!(supports_media_controls(&e), media, "{id} {features:#b}");
                assert_eq!(supports_media_volume(&e), volume, "{id} {features:#b}");
            }
        }
    }

    #[test]
    fn should_not_support_climate_without_capabilities_attribute() {
        let e = Entity::builder()
            .entity_id("climate.office")
            .state("heat")
            .build()
            .unwrap();
        assert!(!supports_climate_controls(&e));
    }
}
