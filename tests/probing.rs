//! Integration tests for the connectivity prober.

use rancher_relay::config::ServiceKind;
use rancher_relay::proxy::{probe, ProbeError};

mod common;

#[tokio::test]
async fn probe_issues_authenticated_get_on_ready_path() {
    let (addr, mut captured_rx) = common::start_capture_backend(200, "ready").await;
    let credentials = common::test_credentials(format!("http://{}", addr));
    let target = common::test_target("loki", ServiceKind::LogStore);
    let base_url = credentials.service_proxy_url(&target);

    let client = reqwest::Client::new();
    probe(&client, &credentials, &base_url, &target)
        .await
        .expect("healthy backend should probe ok");

    let captured = captured_rx.recv().await.unwrap();
    assert_eq!(captured.method, "GET");
    assert!(captured.path.ends_with("/services/loki:8080/proxy/ready"));
    assert_eq!(
        captured.headers.get("authorization").unwrap(),
        common::TEST_BASIC_AUTH
    );
}

#[tokio::test]
async fn probe_classifies_non_200_as_unhealthy() {
    let (addr, _rx) = common::start_capture_backend(500, "broken").await;
    let credentials = common::test_credentials(format!("http://{}", addr));
    let target = common::test_target("prometheus", ServiceKind::MetricsStore);
    let base_url = credentials.service_proxy_url(&target);

    let client = reqwest::Client::new();
    let result = probe(&client, &credentials, &base_url, &target).await;
    match result {
        Err(ProbeError::UnhealthyStatus { status, .. }) => assert_eq!(status.as_u16(), 500),
        other => panic!("expected UnhealthyStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn probe_classifies_transport_failure() {
    let dead = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let dead_addr = dead.local_addr().unwrap();
    drop(dead);

    let credentials = common::test_credentials(format!("http://{}", dead_addr));
    let target = common::test_target("remote", ServiceKind::Generic);
    let base_url = credentials.service_proxy_url(&target);

    let client = reqwest::Client::new();
    let result = probe(&client, &credentials, &base_url, &target).await;
    assert!(matches!(result, Err(ProbeError::ConnectionFailed { .. })));
}
