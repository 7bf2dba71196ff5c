//! In-process snapshot feed backed by a tokio broadcast channel.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, PoisonError};

use tokio::sync::broadcast;

use cardhub_domain::entity::Entity;
use cardhub_domain::error::CardHubError;
use cardhub_domain::id::EntityId;

use crate::ports::StatePublisher;

/// In-process state bus using a tokio [`broadcast`] channel.
///
/// Keeps the last snapshot of every entity so late subscribers can bind
/// a card without waiting for the next change. Publishing succeeds even
/// when there are no active subscribers.
pub struct InProcessStateBus {
    sender: broadcast::Sender<Entity>,
    latest: Mutex<HashMap<EntityId, Entity>>,
}

impl InProcessStateBus {
    /// Create a new bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            latest: Mutex::new(HashMap::new()),
        }
    }

    /// Subscribe to snapshots published *after* this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Entity> {
        self.sender.subscribe()
    }

    /// Last published snapshot of `entity_id`.
    #[must_use]
    pub fn get(&self, entity_id: &EntityId) -> Option<Entity> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(entity_id)
            .cloned()
    }

    /// Every known entity id, sorted.
    #[must_use]
    pub fn entity_ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<_> = self
            .latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }
}

impl StatePublisher for InProcessStateBus {
    fn publish(&self, entity: Entity) -> impl Future<Output = Result<(), CardHubError>> + Send {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(entity.entity_id.clone(), entity.clone());
        // send only fails without receivers, which is fine
        let _ = self.sender.send(entity);
        async { Ok(()) }
    }
}
