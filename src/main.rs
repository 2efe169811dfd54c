//! Rancher Service-Proxy Relay binary.
//!
//! Startup ordering:
//! 1. Load configuration from the environment (missing credentials are fatal)
//! 2. Verify the Rancher management API is reachable (fatal)
//! 3. Probe each configured backend (warn-only)
//! 4. Bind and serve every listener until a shutdown signal arrives

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rancher_relay::config::loader;
use rancher_relay::observability::metrics;
use rancher_relay::{RelayServer, Shutdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = loader::load_from_env()?;

    let default_filter = if config.debug {
        "rancher_relay=debug,tower_http=debug"
    } else {
        "rancher_relay=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Rancher centralized monitoring relay");
    if config.debug {
        tracing::debug!("Debug mode enabled");
    }

    tracing::info!(
        endpoint = %config.credentials.endpoint,
        cluster_id = %config.credentials.cluster_id,
        cluster_name = %config.cluster_name,
        metrics_port = config.metrics_port,
        "Configuration loaded"
    );

    let metrics = metrics::init()?;
    let server = RelayServer::new(config, metrics)?;

    // Fatal before any listener binds: the relay is useless without Rancher.
    server.verify_management_api().await?;
    tracing::info!("Successfully connected to Rancher API");

    server.probe_backends().await;

    let shutdown = Arc::new(Shutdown::new());
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            signal_shutdown.trigger();
        }
    });

    server.run(&shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
