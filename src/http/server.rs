//! Listener setup and orchestration.
//!
//! # Responsibilities
//! - Build the monitoring router and one forwarding router per backend
//! - Bind every listener before serving (bind failure is fatal)
//! - Serve each listener on its own task with supervised shutdown

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tower_http::trace::TraceLayer;

use crate::config::{BackendTarget, ProxyCredentials, RelayConfig};
use crate::health::handlers::{self, MonitorState};
use crate::lifecycle::Shutdown;
use crate::observability::metrics::{self, MetricsState};
use crate::proxy::forward::{forwarder, FORWARD_TIMEOUT};
use crate::proxy::probe::{self, PROBE_TIMEOUT};

/// Well-known local port for the log-store forwarding listener.
pub const LOG_STORE_PORT: u16 = 3100;

/// Well-known local port for the metrics-store forwarding listener.
pub const METRICS_STORE_PORT: u16 = 9090;

/// Error type for server construction and serving.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    /// Failed to construct an outbound HTTP client.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    /// A backend's listener port is not a valid TCP port.
    #[error("invalid {listener} listener port: {value:?}")]
    InvalidPort { listener: String, value: String },

    /// Failed to bind a listener.
    #[error("failed to bind {listener} listener on {addr}: {source}")]
    Bind {
        listener: String,
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// A listener task failed while serving.
    #[error("{listener} listener failed: {source}")]
    Serve {
        listener: String,
        #[source]
        source: std::io::Error,
    },
}

/// The relay's HTTP side: all listeners and their shared clients.
pub struct RelayServer {
    config: Arc<RelayConfig>,
    credentials: Arc<ProxyCredentials>,
    probe_client: reqwest::Client,
    forward_client: reqwest::Client,
    metrics: MetricsState,
}

impl RelayServer {
    /// Create the server: builds the probe and forwarding clients.
    pub fn new(config: RelayConfig, metrics: MetricsState) -> Result<Self, ServeError> {
        let probe_client = probe::build_client(&config.credentials, PROBE_TIMEOUT)?;
        let forward_client = probe::build_client(&config.credentials, FORWARD_TIMEOUT)?;
        let credentials = Arc::new(config.credentials.clone());

        Ok(Self {
            config: Arc::new(config),
            credentials,
            probe_client,
            forward_client,
            metrics,
        })
    }

    /// One authenticated GET against the Rancher API.
    ///
    /// The caller treats a failure as fatal at startup.
    pub async fn verify_management_api(&self) -> Result<(), handlers::LivenessError> {
        handlers::check_management_api(&self.probe_client, &self.credentials).await
    }

    /// Probe every configured backend, logging warnings on failure.
    ///
    /// Startup-time courtesy check only; failures do not stop the process.
    pub async fn probe_backends(&self) {
        for target in self.config.configured_targets() {
            let base_url = self.credentials.service_proxy_url(target);
            tracing::info!(service = %target.label, url = %base_url, "Testing backend connectivity");

            match probe::probe(&self.probe_client, &self.credentials, &base_url, target).await {
                Ok(()) => {
                    tracing::info!(service = %target.label, "Successfully connected to backend")
                }
                Err(error) => {
                    tracing::warn!(service = %target.label, %error, "Failed to connect to backend")
                }
            }
        }
    }

    /// Router for the monitoring listener.
    fn monitoring_router(&self) -> Router {
        let state = MonitorState {
            config: self.config.clone(),
            probe_client: self.probe_client.clone(),
        };

        Router::new()
            .route("/health", get(handlers::healthz))
            .route("/ready", get(handlers::readyz))
            .route("/version", get(handlers::version))
            .with_state(state)
            .merge(metrics::router(self.metrics.clone()))
            .layer(TraceLayer::new_for_http())
    }

    fn forwarding_router(&self, target: &BackendTarget) -> Router {
        forwarder(
            self.credentials.clone(),
            self.forward_client.clone(),
            target,
        )
    }

    /// The listeners to bind: (name, port, router).
    ///
    /// The monitoring and log-store listeners are always present; the
    /// metrics-store and remote listeners exist only when their backend
    /// triple is configured.
    fn listeners(&self) -> Result<Vec<(String, u16, Router)>, ServeError> {
        let mut listeners = vec![(
            "monitoring".to_string(),
            self.config.metrics_port,
            self.monitoring_router(),
        )];

        if self.config.log_store.is_configured() {
            listeners.push((
                self.config.log_store.label.clone(),
                LOG_STORE_PORT,
                self.forwarding_router(&self.config.log_store),
            ));
        }

        if self.config.metrics_store.is_configured() {
            listeners.push((
                self.config.metrics_store.label.clone(),
                METRICS_STORE_PORT,
                self.forwarding_router(&self.config.metrics_store),
            ));
        }

        if self.config.remote.is_configured() {
            let port = self.config.remote.port.parse::<u16>().map_err(|_| {
                ServeError::InvalidPort {
                    listener: self.config.remote.label.clone(),
                    value: self.config.remote.port.clone(),
                }
            })?;
            listeners.push((
                self.config.remote.label.clone(),
                port,
                self.forwarding_router(&self.config.remote),
            ));
        }

        Ok(listeners)
    }

    /// Bind every listener, then serve them concurrently until shutdown.
    ///
    /// Returns once every listener task has stopped.
    pub async fn run(self, shutdown: &Shutdown) -> Result<(), ServeError> {
        let mut bound = Vec::new();
        for (name, port, router) in self.listeners()? {
            let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
            let listener = TcpListener::bind(addr).await.map_err(|source| {
                ServeError::Bind {
                    listener: name.clone(),
                    addr,
                    source,
                }
            })?;

            tracing::info!(listener = %name, address = %addr, "Listener bound");
            bound.push((name, listener, router));
        }

        let mut tasks = JoinSet::new();
        for (name, listener, router) in bound {
            let mut rx = shutdown.subscribe();
            tasks.spawn(async move {
                let result = axum::serve(listener, router)
                    .with_graceful_shutdown(async move {
                        let _ = rx.recv().await;
                    })
                    .await;
                (name, result)
            });
        }

        tracing::info!("All relay listeners started");

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((name, Ok(()))) => {
                    tracing::info!(listener = %name, "Listener stopped");
                }
                Ok((name, Err(source))) => {
                    return Err(ServeError::Serve {
                        listener: name,
                        source,
                    });
                }
                Err(join_error) => {
                    return Err(ServeError::Serve {
                        listener: "unknown".to_string(),
                        source: std::io::Error::other(join_error),
                    });
                }
            }
        }

        Ok(())
    }
}
