//! # cardhub-domain
//!
//! Pure domain model for the cardhub dashboard card layer.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions
//! - Define **Entities** (read-only snapshots of remote devices: thermostats, media players, …)
//! - Define **Capability flags** (`supported_features` bit tests per domain)
//! - Define **Feature and card configuration** (user-authored dashboard options)
//! - Define **Service calls** (commands sent back to the hub: `set_temperature`, `volume_set`, …)
//! - Define **Control surfaces** (the layout a card feature renders)
//! - Derive media transport controls from state and capabilities
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod card;
pub mod climate;
pub mod entity;
pub mod feature;
pub mod feature_flags;
pub mod media_player;
pub mod service;
pub mod surface;
pub mod unit;
