//! Allies Hub entry point.
//!
//! Wires the in-memory adapters into the application service and waits for
//! shutdown. A chat transport plugs in by translating its updates into
//! `InboundEvent`s and implementing the `Notifier` port.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use allies_hub::adapters::memory::{
    InMemoryInviteStore, InMemoryProfileStore, InMemoryReportStore,
};
use allies_hub::adapters::TracingNotifier;
use allies_hub::application::AlliesService;
use allies_hub::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.runtime.log_level.clone())),
        )
        .init();

    let profiles = Arc::new(InMemoryProfileStore::new());
    let invites = Arc::new(InMemoryInviteStore::new());
    let reports = Arc::new(InMemoryReportStore::new());
    let notifier = Arc::new(TracingNotifier::new());

    let _service = AlliesService::new(
        profiles,
        invites,
        reports,
        notifier,
        config.moderation.policy(),
    );

    tracing::info!(
        environment = ?config.runtime.environment,
        report_threshold = config.moderation.report_threshold,
        ban_days = config.moderation.ban_days,
        "allies hub ready"
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    Ok(())
}
