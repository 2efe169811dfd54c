//! Shared utilities for integration tests.

use std::net::SocketAddr;

use axum::body::{Body, Bytes};
use axum::extract::Request;
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use rancher_relay::config::{BackendTarget, ProxyCredentials, RelayConfig, ServiceKind};

/// Serve a router on an ephemeral local port, returning its address.
pub async fn serve_router(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

/// What a capture backend records about each request it receives.
#[derive(Debug)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Start a backend that records every request and answers with a fixed
/// status and body.
pub async fn start_capture_backend(
    status: u16,
    body: &'static str,
) -> (SocketAddr, mpsc::UnboundedReceiver<CapturedRequest>) {
    let (tx, rx) = mpsc::unbounded_channel();

    let app = Router::new().fallback(move |request: Request| {
        let tx = tx.clone();
        async move {
            let (parts, inbound_body) = request.into_parts();
            let bytes = axum::body::to_bytes(inbound_body, usize::MAX)
                .await
                .unwrap_or_default();

            let _ = tx.send(CapturedRequest {
                method: parts.method.to_string(),
                path: parts.uri.path().to_string(),
                query: parts.uri.query().map(|q| q.to_string()),
                headers: parts.headers,
                body: bytes,
            });

            Response::builder()
                .status(status)
                .body(Body::from(body))
                .unwrap()
        }
    });

    (serve_router(app).await, rx)
}

/// Relay credentials pointing at a mock Rancher endpoint.
#[allow(dead_code)]
pub fn test_credentials(endpoint: String) -> ProxyCredentials {
    ProxyCredentials {
        endpoint,
        access_key: "token-abc".to_string(),
        secret_key: "secret".to_string(),
        cluster_id: "c-test".to_string(),
        skip_tls_verify: false,
    }
}

/// Expected Authorization header for [`test_credentials`].
#[allow(dead_code)]
pub const TEST_BASIC_AUTH: &str = "Basic dG9rZW4tYWJjOnNlY3JldA==";

/// A fully configured backend target.
#[allow(dead_code)]
pub fn test_target(label: &str, kind: ServiceKind) -> BackendTarget {
    BackendTarget {
        namespace: "ns".to_string(),
        service: label.to_string(),
        port: "8080".to_string(),
        label: label.to_string(),
        kind,
    }
}

/// A relay config pointing at a mock Rancher endpoint, monitoring listener
/// on an ephemeral port, every backend unconfigured.
#[allow(dead_code)]
pub fn test_config(endpoint: String) -> RelayConfig {
    RelayConfig {
        debug: false,
        metrics_port: 0,
        cluster_name: "test-cluster".to_string(),
        credentials: test_credentials(endpoint),
        log_store: unconfigured_target("loki"),
        metrics_store: unconfigured_target("prometheus"),
        remote: unconfigured_target("remote"),
    }
}

/// A target with an empty triple, i.e. unconfigured.
#[allow(dead_code)]
pub fn unconfigured_target(label: &str) -> BackendTarget {
    BackendTarget {
        namespace: String::new(),
        service: String::new(),
        port: String::new(),
        label: label.to_string(),
        kind: ServiceKind::Generic,
    }
}
