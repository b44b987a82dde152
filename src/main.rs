//! Elevation Quote server entry point.
//!
//! Loads configuration, seeds content when a manifest is configured, then
//! serves the quote and content APIs until Ctrl-C. A background task evicts
//! idle wizards while the server runs.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use elevation_quote::adapters::http::{api_router, ContentHandlers, QuoteHandlers};
use elevation_quote::adapters::{dispatcher_from_config, InMemoryContentStore, InMemoryWizardStore};
use elevation_quote::application::{EvictIdleWizardsHandler, SeedContentHandler};
use elevation_quote::config::AppConfig;
use elevation_quote::ports::{ContentStore, WizardStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    init_tracing(&config);
    config.validate()?;

    tracing::info!(
        environment = ?config.server.environment,
        intake_mode = ?config.intake.mode,
        "Elevation Quote starting"
    );

    let wizards: Arc<dyn WizardStore> = Arc::new(InMemoryWizardStore::new());
    let content: Arc<dyn ContentStore> = Arc::new(InMemoryContentStore::new());
    let dispatcher = dispatcher_from_config(&config.intake)?;

    if let Some(path) = config.content.seed_path() {
        SeedContentHandler::new(content.clone()).seed_file(path).await?;
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = tokio::spawn(idle_wizard_sweeper(
        EvictIdleWizardsHandler::new(wizards.clone(), config.server.wizard_idle_ttl()),
        shutdown_rx,
    ));

    let app = api_router(
        QuoteHandlers::new(wizards, dispatcher),
        ContentHandlers::new(content),
        &config.server,
    );

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(true);
    if let Err(e) = sweeper.await {
        tracing::warn!(error = %e, "Idle wizard sweeper did not stop cleanly");
    }

    tracing::info!("Elevation Quote stopped");
    Ok(())
}

/// `RUST_LOG` wins over the configured filter; production logs are JSON.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Sweeps at a tenth of the TTL, at most once a minute.
async fn idle_wizard_sweeper(handler: EvictIdleWizardsHandler, mut shutdown: watch::Receiver<bool>) {
    let period = (handler.idle_ttl() / 10).clamp(Duration::from_secs(1), Duration::from_secs(60));
    let mut interval = tokio::time::interval(period);
    tracing::debug!(period_secs = period.as_secs(), "Idle wizard sweeper started");

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if let Err(e) = handler.handle().await {
                    tracing::warn!(error = %e, "Idle wizard sweep failed");
                }
            }
            _ = shutdown.changed() => {
                tracing::debug!("Idle wizard sweeper shutting down");
                return;
            }
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
