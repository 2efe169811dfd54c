//! Startup and shutdown behavior of the relay server.

use std::sync::Arc;
use std::time::Duration;

use rancher_relay::observability::metrics;
use rancher_relay::{RelayServer, Shutdown};

mod common;

#[tokio::test]
async fn listeners_stop_within_bounded_time_of_shutdown() {
    let metrics_state = metrics::init().expect("recorder installs once per process");

    let (rancher_addr, _rx) = common::start_capture_backend(200, "ok").await;
    let config = common::test_config(format!("http://{}", rancher_addr));

    let server = RelayServer::new(config, metrics_state).unwrap();
    server
        .verify_management_api()
        .await
        .expect("mock Rancher should be reachable");

    let shutdown = Arc::new(Shutdown::new());
    let server_shutdown = shutdown.clone();
    let handle = tokio::spawn(async move { server.run(&server_shutdown).await });

    // Let the listeners come up, then pull the plug.
    tokio::time::sleep(Duration::from_millis(200)).await;
    shutdown.trigger();

    let result = tokio::time::timeout(Duration::from_secs(3), handle)
        .await
        .expect("listeners did not stop within bounded time")
        .unwrap();
    assert!(result.is_ok(), "server exited with error: {:?}", result);
}

#[tokio::test]
async fn management_api_error_status_fails_startup_verification() {
    let (rancher_addr, _rx) = common::start_capture_backend(500, "upstream broken").await;
    let credentials = common::test_credentials(format!("http://{}", rancher_addr));

    let client = reqwest::Client::new();
    let result = rancher_relay::health::check_management_api(&client, &credentials).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn management_api_unreachable_fails_startup_verification() {
    let dead = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let dead_addr = dead.local_addr().unwrap();
    drop(dead);

    let credentials = common::test_credentials(format!("http://{}", dead_addr));
    let client = reqwest::Client::new();
    let result = rancher_relay::health::check_management_api(&client, &credentials).await;
    assert!(matches!(
        result,
        Err(rancher_relay::health::LivenessError::Unreachable(_))
    ));
}
