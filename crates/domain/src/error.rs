//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`CardHubError`] via `#[from]`.

/// Top-level error shared by every cardhub crate.
#[derive(Debug, thiserror::Error)]
pub enum CardHubError {
    #[error("invalid configuration")]
    Config(#[from] ConfigError),

    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("service call failed")]
    Service(#[from] ServiceError),
}

/// Rejections raised while a card or card feature is being configured.
///
/// These are fatal to component setup: the hosting layout shows a setup
/// failure instead of the card.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration")]
    Missing,

    #[error("Invalid entity: {0}")]
    InvalidEntity(String),

    #[error("unknown card feature type {0:?}")]
    UnknownFeatureType(String),

    #[error("malformed configuration: {0}")]
    Malformed(String),

    #[error("debounce delay must be non-zero")]
    ZeroDebounce,
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("entity id must not be empty")]
    EmptyEntityId,

    #[error("entity id {0:?} must look like `<domain>.<object_id>`")]
    MalformedEntityId(String),
}

/// A lookup that matched nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// Failures reported by whoever executes a service call.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("service {domain}.{service} is not supported")]
    Unsupported { domain: String, service: String },

    #[error("missing or invalid field `{0}` in service data")]
    InvalidData(&'static str),

    #[error("backend rejected the call")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}
