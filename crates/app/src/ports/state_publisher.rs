//! State publisher port: pushes entity snapshots to subscribers.

use std::future::Future;

use cardhub_domain::entity::Entity;
use cardhub_domain::error::CardHubError;

/// Publishes fresh entity snapshots to interested subscribers.
pub trait StatePublisher {
    /// Publish a snapshot to all current subscribers.
    fn publish(&self, entity: Entity) -> impl Future<Output = Result<(), CardHubError>> + Send;
}

impl<T: StatePublisher + Send + Sync> StatePublisher for std::sync::Arc<T> {
    fn publish(&self, entity: Entity) -> impl Future<Output = Result<(), CardHubError>> + Send {
        (**self).publish(entity)
    }
}
