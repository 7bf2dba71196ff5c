//! # cardhub-app
//!
//! Application layer: card features, the button card and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters implement:
//!   - `ServiceCaller`: send a service call to the hub
//!   - `StatePublisher`: push a fresh entity snapshot to listeners
//! - Provide **in-process infrastructure** that doesn't need IO:
//!   - `InProcessStateBus`: snapshot feed keyed by entity id
//!   - `Debouncer`: coalesce bursts of edits into one trailing command
//! - Implement the **card features** (climate controls, media controls,
//!   media volume) and the **button card**: keep a local optimistic mirror of
//!   the bound entity, render a control surface, translate input into
//!   service calls
//!
//! ## Dependency rule
//! Depends on `cardhub-domain` only (plus `tokio` for timers and channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod cards;
pub mod debounce;
pub mod dispatch;
pub mod features;
pub mod ports;
pub mod state_bus;
