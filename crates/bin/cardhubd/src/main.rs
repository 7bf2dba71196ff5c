//! # cardhubd: cardhub daemon
//!
//! Composition root that wires the virtual hub, the state bus and the
//! dashboard cards together.
//!
//! ## Responsibilities
//! - Load configuration (`cardhub.toml`, env vars)
//! - Install the `tracing` subscriber
//! - Start the virtual hub and publish its initial snapshots
//! - Build the dashboard cards and features from configuration
//! - Re-render cards whenever a snapshot of their entity arrives
//! - Cancel pending commands on shutdown (Ctrl-C)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no card logic belongs here.

mod config;
mod dashboard;

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

use cardhub_adapter_virtual::VirtualIntegration;
use cardhub_app::dispatch::CommandDispatcher;
use cardhub_app::features::FeatureContext;
use cardhub_app::state_bus::InProcessStateBus;

use config::Config;
use dashboard::Dashboard;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load cardhub.toml")?;

    let filter =
        EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Hub
    let bus = Arc::new(InProcessStateBus::new(256));
    let hub = Arc::new(VirtualIntegration::new(Arc::clone(&bus))?);
    tracing::info!(
        integration = hub.name(),
        entities = hub.entity_ids().len(),
        "hub started"
    );

    // Dashboard
    let dispatcher = Arc::new(CommandDispatcher::new(Arc::clone(&hub), config.debounce()));
    let ctx = FeatureContext::new(dispatcher, config.units());
    let mut dashboard =
        Dashboard::build(config.cards_or_demo(), &ctx).context("invalid dashboard")?;

    hub.publish_all().await?;
    let mut snapshots = bus.subscribe();
    for entity_id in dashboard.entity_ids() {
        match bus.get(&entity_id) {
            Some(entity) => {
                dashboard.apply(&entity);
            }
            None => tracing::warn!(%entity_id, "no such entity on the hub"),
        }
    }
    dashboard.log_render(None);

    loop {
        tokio::select! {
            received = snapshots.recv() => match received {
                Ok(entity) => {
                    if dashboard.apply(&entity) {
                        dashboard.log_render(Some(&entity.entity_id));
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "snapshot feed lagged");
                }
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                break;
            }
        }
    }

    dashboard.teardown();
    Ok(())
}
