//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the card layer and the hub. They are
//! defined here (in `app`) so that both the features and the adapters can
//! depend on them without creating circular dependencies.

pub mod service_caller;
pub mod state_publisher;

pub use service_caller::ServiceCaller;
pub use state_publisher::StatePublisher;
