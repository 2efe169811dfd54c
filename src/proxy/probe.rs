//! Backend connectivity probing.
//!
//! # Responsibilities
//! - Issue an authenticated GET against a backend's readiness path
//! - Classify the outcome (unreachable vs. unhealthy vs. ok)
//!
//! Used in two contexts with different severities: at startup the caller
//! logs a warning and continues; from the readiness endpoint the result
//! feeds the pass/fail aggregate.

use std::time::Duration;

use reqwest::StatusCode;

use crate::config::{BackendTarget, ProxyCredentials, ServiceKind};

/// Timeout for probes and for the management-API liveness check.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Error type for connectivity probes.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// Transport-level failure (DNS, connect, TLS, timeout).
    #[error("error connecting to {label}: {source}")]
    ConnectionFailed {
        label: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered, but not with 200.
    #[error("{label} health check failed, status code: {status}")]
    UnhealthyStatus { label: String, status: StatusCode },
}

/// Build an outbound client honouring the TLS-verification setting.
pub fn build_client(
    credentials: &ProxyCredentials,
    timeout: Duration,
) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .danger_accept_invalid_certs(credentials.skip_tls_verify)
        .build()
}

/// Readiness URL for a service-proxy base URL.
///
/// The base URL ends in `/`, so the kind's suffix is appended as-is.
pub fn probe_url(base_url: &str, kind: ServiceKind) -> String {
    format!("{}{}", base_url, kind.probe_suffix())
}

/// Probe one backend through the service proxy.
pub async fn probe(
    client: &reqwest::Client,
    credentials: &ProxyCredentials,
    base_url: &str,
    target: &BackendTarget,
) -> Result<(), ProbeError> {
    let url = probe_url(base_url, target.kind);

    tracing::debug!(service = %target.label, url = %url, "Probing backend connectivity");

    let response = client
        .get(&url)
        .basic_auth(&credentials.access_key, Some(&credentials.secret_key))
        .send()
        .await
        .map_err(|source| ProbeError::ConnectionFailed {
            label: target.label.clone(),
            source,
        })?;

    let status = response.status();
    tracing::debug!(service = %target.label, status = %status, "Backend responded");

    if status != StatusCode::OK {
        return Err(ProbeError::UnhealthyStatus {
            label: target.label.clone(),
            status,
        });
    }

    Ok(())
}
