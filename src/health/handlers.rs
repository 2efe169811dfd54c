//! Handlers for the monitoring listener.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use reqwest::StatusCode as UpstreamStatus;
use serde::Serialize;

use crate::config::{ProxyCredentials, RelayConfig};
use crate::proxy::probe;

/// Version of the relay, baked in at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Git commit hash, injected by the build pipeline.
pub const GIT_COMMIT: &str = match option_env!("GIT_COMMIT") {
    Some(commit) => commit,
    None => "MISSING GIT COMMIT",
};

/// Build timestamp, injected by the build pipeline.
pub const BUILD_TIME: &str = match option_env!("BUILD_TIME") {
    Some(time) => time,
    None => "MISSING BUILD TIME",
};

/// Error type for the management-API liveness check.
#[derive(Debug, thiserror::Error)]
pub enum LivenessError {
    #[error("error connecting to Rancher: {0}")]
    Unreachable(#[source] reqwest::Error),

    #[error("failed to connect to Rancher, status code: {0}")]
    Status(UpstreamStatus),
}

/// State shared by the monitoring listener's handlers.
#[derive(Clone)]
pub struct MonitorState {
    pub config: Arc<RelayConfig>,
    pub probe_client: reqwest::Client,
}

/// One authenticated GET against the Rancher API endpoint itself.
///
/// Fatal at startup; once running it backs the `/health` handler.
pub async fn check_management_api(
    client: &reqwest::Client,
    credentials: &ProxyCredentials,
) -> Result<(), LivenessError> {
    let response = client
        .get(&credentials.endpoint)
        .basic_auth(&credentials.access_key, Some(&credentials.secret_key))
        .send()
        .await
        .map_err(LivenessError::Unreachable)?;

    let status = response.status();
    if status != UpstreamStatus::OK {
        return Err(LivenessError::Status(status));
    }

    Ok(())
}

/// `GET /health` — liveness.
pub async fn healthz(State(state): State<MonitorState>) -> impl IntoResponse {
    match check_management_api(&state.probe_client, &state.config.credentials).await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(error) => {
            tracing::warn!(%error, "Liveness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable")
        }
    }
}

/// `GET /ready` — readiness, the AND over every configured backend.
pub async fn readyz(State(state): State<MonitorState>) -> impl IntoResponse {
    let credentials = &state.config.credentials;
    let mut all_healthy = true;

    for target in state.config.configured_targets() {
        let base_url = credentials.service_proxy_url(target);
        if let Err(error) = probe::probe(&state.probe_client, credentials, &base_url, target).await
        {
            tracing::warn!(service = %target.label, %error, "Readiness check failed");
            all_healthy = false;
        }
    }

    if all_healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable")
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    pub version: &'static str,
    pub git_commit: &'static str,
    pub build_time: &'static str,
}

/// `GET /version` — build information as JSON.
pub async fn version() -> Json<VersionInfo> {
    Json(VersionInfo {
        version: VERSION,
        git_commit: GIT_COMMIT,
        build_time: BUILD_TIME,
    })
}
