//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! Everything here is immutable once constructed by the loader.

/// Kind of backend service, used to pick the readiness probe path.
///
/// The probe path differs per service family; anything that is not a known
/// log or metrics store is probed at its root path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    /// Log store (Loki-style); probed at `ready`.
    LogStore,
    /// Metrics store (Prometheus-style); probed at `-/ready`.
    MetricsStore,
    /// Any other service; probed at the base URL itself.
    Generic,
}

impl ServiceKind {
    /// Path suffix appended to a service-proxy base URL when probing.
    ///
    /// The base URL always ends in `/`, so the suffix carries no leading
    /// slash.
    pub fn probe_suffix(&self) -> &'static str {
        match self {
            ServiceKind::LogStore => "ready",
            ServiceKind::MetricsStore => "-/ready",
            ServiceKind::Generic => "",
        }
    }
}

/// Credentials and endpoint for the Rancher management API.
///
/// Process-wide and read-only after startup; every outbound call to the
/// service-proxy endpoint authenticates with these.
#[derive(Debug, Clone)]
pub struct ProxyCredentials {
    /// Rancher API endpoint (e.g., "https://rancher.example.com").
    pub endpoint: String,

    /// API access key (basic-auth username).
    pub access_key: String,

    /// API secret key (basic-auth password).
    pub secret_key: String,

    /// Downstream cluster identifier (e.g., "c-m-abc123").
    pub cluster_id: String,

    /// Skip TLS certificate validation on outbound calls.
    pub skip_tls_verify: bool,
}

impl ProxyCredentials {
    /// Service-proxy URL for a backend target, see [`crate::proxy::url`].
    pub fn service_proxy_url(&self, target: &BackendTarget) -> String {
        crate::proxy::url::build_service_proxy_url(
            &self.endpoint,
            &self.cluster_id,
            &target.namespace,
            &target.service,
            &target.port,
        )
    }
}

/// One downstream service reachable through the Rancher service proxy.
#[derive(Debug, Clone)]
pub struct BackendTarget {
    /// Kubernetes namespace of the service.
    pub namespace: String,

    /// Service name.
    pub service: String,

    /// Service port (kept as a string; it is only ever spliced into URLs).
    pub port: String,

    /// Human-readable label for logging and error messages.
    pub label: String,

    /// Service family, drives the probe path.
    pub kind: ServiceKind,
}

impl BackendTarget {
    /// A target is configured only when all three identifying fields are
    /// non-empty. Unconfigured targets never get a live forwarding handler.
    pub fn is_configured(&self) -> bool {
        !self.namespace.is_empty() && !self.service.is_empty() && !self.port.is_empty()
    }
}

/// Root configuration for the relay.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Enable debug logging.
    pub debug: bool,

    /// Port for the monitoring listener (/health, /ready, /version, /metrics).
    pub metrics_port: u16,

    /// Friendly name of the downstream cluster, informational only.
    pub cluster_name: String,

    /// Rancher endpoint and credentials.
    pub credentials: ProxyCredentials,

    /// Log store backend (Loki).
    pub log_store: BackendTarget,

    /// Metrics store backend (Prometheus).
    pub metrics_store: BackendTarget,

    /// Generic remote backend; unconfigured unless all three env vars are set.
    pub remote: BackendTarget,
}

impl RelayConfig {
    /// All backend targets in a fixed order: log store, metrics store, remote.
    pub fn targets(&self) -> [&BackendTarget; 3] {
        [&self.log_store, &self.metrics_store, &self.remote]
    }

    /// Backend targets that are fully configured.
    pub fn configured_targets(&self) -> impl Iterator<Item = &BackendTarget> {
        self.targets().into_iter().filter(|t| t.is_configured())
    }
}
