use std::fmt::Write as _;

use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

use crate::state::{AppState, ObservabilitySnapshot};

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Pass-through to the Colormind API. The body is forwarded verbatim and the
/// upstream JSON comes back unchanged; any upstream or transport failure
/// becomes a 500 with a generic `error` field. No validation, no retry.
pub async fn colormind(State(state): State<AppState>, body: Bytes) -> Response {
    state.observability.record_relay_request();

    let result = state
        .http_client
        .post(state.upstream_url.as_ref())
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await;

    match result {
        Ok(resp) if resp.status().is_success() => match resp.bytes().await {
            Ok(payload) => json_bytes_response(payload),
            Err(e) => {
                state.observability.record_network_error();
                tracing::warn!(error = %e, "failed to read Colormind response body");
                relay_error("failed to read upstream response".to_string())
            }
        },
        Ok(resp) => {
            state.observability.record_upstream_error();
            let status = resp.status().as_u16();
            tracing::warn!(status, "Colormind upstream returned an error status");
            relay_error(format!("upstream responded with status {status}"))
        }
        Err(e) => {
            state.observability.record_network_error();
            tracing::warn!(error = %e, "Colormind relay request failed");
            relay_error("upstream request failed".to_string())
        }
    }
}

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let observability = state.observability.snapshot();
    Json(serde_json::json!({
        "status": "ok",
        "upstream": state.upstream_url.as_ref(),
        "observability": observability,
    }))
}

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let body = render_prometheus_metrics(state.observability.snapshot());

    (
        [
            (header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE),
            (header::CACHE_CONTROL, "no-store"),
        ],
        body,
    )
}

fn render_prometheus_metrics(observability: ObservabilitySnapshot) -> String {
    let mut body = String::new();
    let _ = writeln!(
        body,
        "# HELP allapis_relay_requests_total Total palette requests accepted by the relay."
    );
    let _ = writeln!(body, "# TYPE allapis_relay_requests_total counter");
    let _ = writeln!(
        body,
        "allapis_relay_requests_total {}",
        observability.relay_requests_total
    );

    let _ = writeln!(
        body,
        "# HELP allapis_relay_upstream_errors_total Total non-2xx responses from the upstream."
    );
    let _ = writeln!(body, "# TYPE allapis_relay_upstream_errors_total counter");
    let _ = writeln!(
        body,
        "allapis_relay_upstream_errors_total {}",
        observability.relay_upstream_errors_total
    );

    let _ = writeln!(
        body,
        "# HELP allapis_relay_network_errors_total Total transport failures reaching the upstream."
    );
    let _ = writeln!(body, "# TYPE allapis_relay_network_errors_total counter");
    let _ = writeln!(
        body,
        "allapis_relay_network_errors_total {}",
        observability.relay_network_errors_total
    );

    body
}

fn relay_error(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}

fn json_bytes_response(body: Bytes) -> Response {
    let mut response = Response::new(Body::from(body));
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use allapis_shared::{PaletteRequest, PaletteResponse};

    use super::render_prometheus_metrics;
    use crate::state::{AppState, ObservabilitySnapshot};

    const STUB_PALETTE_JSON: &str =
        r#"{"result":[[1,2,3],[4,5,6],[7,8,9],[10,11,12],[13,14,15]]}"#;

    async fn spawn_test_server(state: AppState) -> (SocketAddr, tokio::task::JoinHandle<()>) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener address");
        let app = crate::app::build_app(state);
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve test app");
        });
        (addr, handle)
    }

    /// Stand-in for the Colormind API on an ephemeral port.
    async fn spawn_stub_upstream(router: axum::Router) -> (String, tokio::task::JoinHandle<()>) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub upstream");
        let addr = listener.local_addr().expect("stub upstream address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve stub upstream");
        });
        (format!("http://{addr}/"), handle)
    }

    #[test]
    fn metrics_output_contains_prometheus_help_type_and_values() {
        let metrics = render_prometheus_metrics(ObservabilitySnapshot {
            relay_requests_total: 12,
            relay_upstream_errors_total: 3,
            relay_network_errors_total: 1,
        });

        assert!(metrics.contains("# HELP allapis_relay_requests_total"));
        assert!(metrics.contains("# TYPE allapis_relay_requests_total counter"));
        assert!(metrics.contains("allapis_relay_requests_total 12"));
        assert!(metrics.contains("allapis_relay_upstream_errors_total 3"));
        assert!(metrics.contains("allapis_relay_network_errors_total 1"));
    }

    #[tokio::test]
    async fn relay_returns_exact_upstream_body_on_success() {
        let stub = axum::Router::new().route(
            "/",
            axum::routing::post(|| async {
                ([("content-type", "application/json")], STUB_PALETTE_JSON)
            }),
        );
        let (upstream_url, upstream_handle) = spawn_stub_upstream(stub).await;

        let state = AppState::with_upstream(upstream_url);
        let (addr, server_handle) = spawn_test_server(state).await;

        let response = reqwest::Client::new()
            .post(format!("http://{addr}/api/colormind"))
            .json(&PaletteRequest::seeded())
            .send()
            .await
            .expect("relay request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body = response.text().await.expect("read relay body");
        assert_eq!(body, STUB_PALETTE_JSON);

        let palette: PaletteResponse =
            serde_json::from_str(&body).expect("parse relayed palette");
        assert_eq!(
            palette.result,
            vec![
                [1, 2, 3],
                [4, 5, 6],
                [7, 8, 9],
                [10, 11, 12],
                [13, 14, 15]
            ]
        );

        upstream_handle.abort();
        server_handle.abort();
    }

    #[tokio::test]
    async fn relay_forwards_request_body_verbatim() {
        // Echo upstream: whatever arrives is what comes back.
        let stub = axum::Router::new().route(
            "/",
            axum::routing::post(|body: bytes::Bytes| async move {
                ([("content-type", "application/json")], body)
            }),
        );
        let (upstream_url, upstream_handle) = spawn_stub_upstream(stub).await;

        let state = AppState::with_upstream(upstream_url);
        let (addr, server_handle) = spawn_test_server(state).await;

        let payload = r#"{"model":"ui","input":[[0,0,0],"N","N","N","N"]}"#;
        let body = reqwest::Client::new()
            .post(format!("http://{addr}/api/colormind"))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .expect("relay request")
            .text()
            .await
            .expect("read echoed body");

        assert_eq!(body, payload);

        upstream_handle.abort();
        server_handle.abort();
    }

    #[tokio::test]
    async fn relay_maps_upstream_error_status_to_generic_failure() {
        let stub = axum::Router::new().route(
            "/",
            axum::routing::post(|| async { axum::http::StatusCode::SERVICE_UNAVAILABLE }),
        );
        let (upstream_url, upstream_handle) = spawn_stub_upstream(stub).await;

        let state = AppState::with_upstream(upstream_url);
        let (addr, server_handle) = spawn_test_server(state).await;

        let response = reqwest::Client::new()
            .post(format!("http://{addr}/api/colormind"))
            .json(&PaletteRequest::seeded())
            .send()
            .await
            .expect("relay request");

        assert_eq!(
            response.status(),
            reqwest::StatusCode::INTERNAL_SERVER_ERROR
        );
        let body = response
            .json::<serde_json::Value>()
            .await
            .expect("parse relay error");
        let message = body
            .get("error")
            .and_then(|v| v.as_str())
            .expect("error field present");
        assert!(!message.is_empty());
        assert!(message.contains("503"));

        upstream_handle.abort();
        server_handle.abort();
    }

    #[tokio::test]
    async fn relay_maps_network_failure_to_generic_failure() {
        // Reserve a port, then release it so the connection is refused.
        let unreachable = {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind throwaway listener");
            let addr = listener.local_addr().expect("throwaway address");
            drop(listener);
            format!("http://{addr}/")
        };

        let state = AppState::with_upstream(unreachable);
        let (addr, server_handle) = spawn_test_server(state).await;

        let response = reqwest::Client::new()
            .post(format!("http://{addr}/api/colormind"))
            .json(&PaletteRequest::seeded())
            .send()
            .await
            .expect("relay request");

        assert_eq!(
            response.status(),
            reqwest::StatusCode::INTERNAL_SERVER_ERROR
        );
        let body = response
            .json::<serde_json::Value>()
            .await
            .expect("parse relay error");
        assert!(
            !body
                .get("error")
                .and_then(|v| v.as_str())
                .expect("error field present")
                .is_empty()
        );

        server_handle.abort();
    }

    #[tokio::test]
    async fn health_and_metrics_reflect_relay_counters() {
        let stub = axum::Router::new().route(
            "/",
            axum::routing::post(|| async { axum::http::StatusCode::BAD_GATEWAY }),
        );
        let (upstream_url, upstream_handle) = spawn_stub_upstream(stub).await;

        let state = AppState::with_upstream(upstream_url);
        let (addr, server_handle) = spawn_test_server(state).await;
        let base_url = format!("http://{addr}");
        let client = reqwest::Client::new();

        client
            .post(format!("{base_url}/api/colormind"))
            .json(&PaletteRequest::seeded())
            .send()
            .await
            .expect("relay request");

        let health = client
            .get(format!("{base_url}/api/health"))
            .send()
            .await
            .expect("health request")
            .error_for_status()
            .expect("health status")
            .json::<serde_json::Value>()
            .await
            .expect("parse health");

        assert_eq!(health.get("status").and_then(|v| v.as_str()), Some("ok"));
        assert_eq!(
            health
                .get("observability")
                .and_then(|v| v.get("relay_requests_total"))
                .and_then(|v| v.as_u64()),
            Some(1)
        );
        assert_eq!(
            health
                .get("observability")
                .and_then(|v| v.get("relay_upstream_errors_total"))
                .and_then(|v| v.as_u64()),
            Some(1)
        );

        let metrics = client
            .get(format!("{base_url}/api/metrics"))
            .send()
            .await
            .expect("metrics request")
            .error_for_status()
            .expect("metrics status")
            .text()
            .await
            .expect("parse metrics text");

        assert!(metrics.contains("allapis_relay_requests_total 1"));
        assert!(metrics.contains("allapis_relay_upstream_errors_total 1"));
        assert!(metrics.contains("allapis_relay_network_errors_total 0"));

        upstream_handle.abort();
        server_handle.abort();
    }

    #[tokio::test]
    async fn cors_is_open_to_all_origins() {
        let state = AppState::with_upstream("http://127.0.0.1:1/");
        let (addr, server_handle) = spawn_test_server(state).await;

        let response = reqwest::Client::new()
            .get(format!("http://{addr}/api/health"))
            .header(reqwest::header::ORIGIN, "http://localhost:5173")
            .send()
            .await
            .expect("health request with origin");

        assert_eq!(
            response
                .headers()
                .get(reqwest::header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|value| value.to_str().ok()),
            Some("*")
        );

        server_handle.abort();
    }
}
