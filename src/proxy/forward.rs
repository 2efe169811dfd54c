//! Forwarding handler factory.
//!
//! # Responsibilities
//! - Rewrite the inbound request onto the service-proxy base URL
//! - Copy headers both ways, preserving multi-valued headers
//! - Inject the relay's basic-auth credentials (authentication boundary)
//! - Stream request and response bodies without buffering
//!
//! # Design Decisions
//! - No retries: a transport failure is surfaced to the caller as 502
//! - A body-copy error after the status line has been written can only be
//!   logged; buffering would break large and streaming payloads, so this
//!   imprecision is kept as documented behavior

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use futures_util::TryStreamExt;
use tower_http::trace::TraceLayer;

use crate::config::{BackendTarget, ProxyCredentials};

/// Timeout for a forwarded request, end to end.
pub const FORWARD_TIMEOUT: Duration = Duration::from_secs(30);

/// State captured by a forwarding handler at construction.
#[derive(Clone)]
pub struct ForwardState {
    client: reqwest::Client,
    credentials: Arc<ProxyCredentials>,
    base_url: String,
    label: String,
}

/// Build the router for one backend's forwarding listener.
///
/// For a configured target every method, path, and query is relayed to the
/// service-proxy base URL. An unconfigured target gets a router that answers
/// a fixed 503 without ever touching the network.
pub fn forwarder(
    credentials: Arc<ProxyCredentials>,
    client: reqwest::Client,
    target: &BackendTarget,
) -> Router {
    if !target.is_configured() {
        return Router::new()
            .fallback(not_configured)
            .layer(TraceLayer::new_for_http());
    }

    let state = ForwardState {
        base_url: credentials.service_proxy_url(target),
        label: target.label.clone(),
        credentials,
        client,
    };

    Router::new()
        .route("/", any(forward))
        .route("/{*path}", any(forward))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn not_configured() -> impl IntoResponse {
    (StatusCode::SERVICE_UNAVAILABLE, "Remote service not configured")
}

/// Relay one inbound request to the backend and stream the response back.
async fn forward(State(state): State<ForwardState>, request: Request) -> Response {
    // The base URL ends in '/', the inbound path starts with one.
    let mut target_url = format!(
        "{}{}",
        state.base_url.trim_end_matches('/'),
        request.uri().path()
    );
    if let Some(query) = request.uri().query() {
        target_url.push('?');
        target_url.push_str(query);
    }

    tracing::debug!(
        service = %state.label,
        method = %request.method(),
        url = %target_url,
        "Forwarding request"
    );

    let (parts, body) = request.into_parts();

    // Copy inbound headers wholesale; the client re-frames the body and
    // derives the host from the target URL, so framing headers must not
    // travel through.
    let mut headers = parts.headers;
    headers.remove(header::HOST);
    headers.remove(header::CONTENT_LENGTH);
    headers.remove(header::TRANSFER_ENCODING);

    let upstream = state
        .client
        .request(parts.method, target_url)
        .headers(headers)
        .basic_auth(
            &state.credentials.access_key,
            Some(&state.credentials.secret_key),
        )
        .body(reqwest::Body::wrap_stream(body.into_data_stream()))
        .send()
        .await;

    let upstream = match upstream {
        Ok(response) => response,
        Err(error) if error.is_builder() => {
            tracing::error!(service = %state.label, error = %error, "Error building proxy request");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
        }
        Err(error) => {
            tracing::error!(service = %state.label, error = %error, "Error executing proxy request");
            return (StatusCode::BAD_GATEWAY, "Bad Gateway").into_response();
        }
    };

    let status = upstream.status();
    let response_headers = upstream.headers().clone();

    // Stream the body through. The status line is already committed once the
    // first bytes flow, so a copy failure (upstream died, caller hung up)
    // can only be logged.
    let label = state.label.clone();
    let body_stream = upstream.bytes_stream().inspect_err(move |error| {
        tracing::warn!(service = %label, %error, "Error copying response body");
    });

    let mut response = Response::new(Body::from_stream(body_stream));
    *response.status_mut() = status;
    *response.headers_mut() = response_headers;
    response
}
