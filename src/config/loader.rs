//! Configuration loading from the process environment.

use crate::config::schema::{BackendTarget, ProxyCredentials, RelayConfig, ServiceKind};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A mandatory environment variable is missing or empty.
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    /// A variable is present but does not parse.
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Load and validate the relay configuration from the environment.
pub fn load_from_env() -> Result<RelayConfig, ConfigError> {
    load(|key| std::env::var(key).ok())
}

/// Load configuration through an injectable variable lookup.
///
/// Tests pass a closure over a map instead of mutating the process
/// environment.
pub fn load<F>(lookup: F) -> Result<RelayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str, default: &str| -> String {
        match lookup(key) {
            Some(value) if !value.is_empty() => value,
            _ => default.to_string(),
        }
    };
    let require = |key: &'static str| -> Result<String, ConfigError> {
        match lookup(key) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(ConfigError::Missing(key)),
        }
    };

    let credentials = ProxyCredentials {
        endpoint: require("RANCHER_API_ENDPOINT")?,
        access_key: require("RANCHER_API_ACCESS_KEY")?,
        secret_key: require("RANCHER_API_SECRET_KEY")?,
        cluster_id: require("CLUSTER_ID")?,
        skip_tls_verify: get("RANCHER_INSECURE_SKIP_VERIFY", "") == "true",
    };

    let metrics_port_raw = get("METRICS_PORT", "9000");
    let metrics_port = metrics_port_raw
        .parse::<u16>()
        .map_err(|_| ConfigError::Invalid {
            var: "METRICS_PORT",
            value: metrics_port_raw,
        })?;

    Ok(RelayConfig {
        debug: get("DEBUG", "") == "true",
        metrics_port,
        cluster_name: get("CLUSTER_NAME", ""),
        credentials,
        log_store: BackendTarget {
            namespace: get("LOKI_NAMESPACE", "loki"),
            service: get("LOKI_SERVICE", "loki"),
            port: get("LOKI_PORT", "3100"),
            label: "loki".to_string(),
            kind: ServiceKind::LogStore,
        },
        metrics_store: BackendTarget {
            namespace: get("PROMETHEUS_NAMESPACE", "cattle-monitoring-system"),
            service: get("PROMETHEUS_SERVICE", "rancher-monitoring-prometheus"),
            port: get("PROMETHEUS_PORT", "9090"),
            label: "prometheus".to_string(),
            kind: ServiceKind::MetricsStore,
        },
        remote: BackendTarget {
            namespace: get("REMOTE_NAMESPACE", ""),
            service: get("REMOTE_SERVICE", ""),
            port: get("REMOTE_PORT", ""),
            label: get("REMOTE_SERVICE", "remote"),
            kind: ServiceKind::Generic,
        },
    })
}
