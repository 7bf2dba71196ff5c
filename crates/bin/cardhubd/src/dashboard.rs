//! The dashboard: configured cards with their features, bound to live
//! snapshots.

use cardhub_app::cards::ButtonCard;
use cardhub_app::features::{CardFeature, Feature, FeatureContext};
use cardhub_domain::entity::Entity;
use cardhub_domain::error::ConfigError;
use cardhub_domain::id::EntityId;

use crate::config::CardConfig;

struct Card<C> {
    button: ButtonCard<C>,
    features: Vec<Feature<C>>,
}

pub struct Dashboard<C> {
    cards: Vec<Card<C>>,
}

impl<C> Dashboard<C> {
    /// Set up every card and feature.
    ///
    /// # Errors
    ///
    /// Returns the first card or feature configuration that is rejected.
    pub fn build(configs: Vec<CardConfig>, ctx: &FeatureContext<C>) -> Result<Self, ConfigError> {
        let mut cards = Vec::with_capacity(configs.len());
        for config in configs {
            let mut button = ButtonCard::new(std::sync::Arc::clone(&ctx.dispatcher));
            button.set_config(config.button)?;
            let features = config
                .features
                .into_iter()
                .map(|feature| Feature::from_config(feature, ctx.clone()))
                .collect::<Result<Vec<_>, _>>()?;
            cards.push(Card { button, features });
        }
        Ok(Self { cards })
    }

    /// Entity ids the dashboard follows, without duplicates.
    #[must_use]
    pub fn entity_ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<_> = self
            .cards
            .iter()
            .filter_map(|card| card.button.entity_id().cloned())
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    /// Feed a snapshot to every card bound to its entity. Returns whether
    /// any card was.
    pub fn apply(&mut self, entity: &Entity) -> bool {
        let mut matched = false;
        for card in &mut self.cards {
            if card.button.entity_id() != Some(&entity.entity_id) {
                continue;
            }
            matched = true;
            card.button.set_entity(Some(entity.clone()));
            for feature in &mut card.features {
                feature.set_entity(Some(entity.clone()));
            }
        }
        matched
    }

    /// Log the current view of every card bound to `entity_id`, or of all
    /// cards with `None`.
    pub fn log_render(&self, entity_id: Option<&EntityId>) {
        let cards = self
            .cards
            .iter()
            .filter(|card| entity_id.is_none() || card.button.entity_id() == entity_id);
        for card in cards {
            let view = card.button.render();
            let features: Vec<_> = card
                .features
                .iter()
                .filter_map(CardFeature::render)
                .collect();
            tracing::info!(
                card = %card.button.id(),
                view = %json(&view),
                features = %json(&features),
                "card rendered"
            );
        }
    }

    /// Cancel every pending command.
    pub fn teardown(&mut self) {
        for card in &mut self.cards {
            for feature in &mut card.features {
                feature.teardown();
            }
        }
    }
}

fn json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| format!("<unserializable: {err}>"))
}
