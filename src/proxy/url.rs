//! Rancher service-proxy URL construction.

/// Build the service-proxy URL for a service inside a managed cluster.
///
/// Pure string composition, no validation and no normalization: a trailing
/// slash on `endpoint` produces a double slash in the output, and downstream
/// path concatenation relies on the trailing `/proxy/` slash being present.
pub fn build_service_proxy_url(
    endpoint: &str,
    cluster_id: &str,
    namespace: &str,
    service: &str,
    port: &str,
) -> String {
    format!(
        "{}/k8s/clusters/{}/api/v1/namespaces/{}/services/{}:{}/proxy/",
        endpoint, cluster_id, namespace, service, port,
    )
}
