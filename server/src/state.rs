use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::warn;

use crate::config::{colormind_url, upstream_connect_timeout, upstream_http_timeout};

#[derive(Clone)]
pub struct AppState {
    pub http_client: reqwest::Client,
    /// Upstream the relay forwards to; fixed at startup.
    pub upstream_url: Arc<str>,
    pub observability: Arc<ObservabilityCounters>,
}

#[derive(Debug, Default)]
pub struct ObservabilityCounters {
    relay_requests_total: AtomicU64,
    relay_upstream_errors_total: AtomicU64,
    relay_network_errors_total: AtomicU64,
}

#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct ObservabilitySnapshot {
    pub relay_requests_total: u64,
    pub relay_upstream_errors_total: u64,
    pub relay_network_errors_total: u64,
}

impl ObservabilityCounters {
    pub fn snapshot(&self) -> ObservabilitySnapshot {
        ObservabilitySnapshot {
            relay_requests_total: self.relay_requests_total.load(Ordering::Relaxed),
            relay_upstream_errors_total: self.relay_upstream_errors_total.load(Ordering::Relaxed),
            relay_network_errors_total: self.relay_network_errors_total.load(Ordering::Relaxed),
        }
    }

    pub fn record_relay_request(&self) {
        self.relay_requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_upstream_error(&self) {
        self.relay_upstream_errors_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_network_error(&self) {
        self.relay_network_errors_total
            .fetch_add(1, Ordering::Relaxed);
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_upstream(colormind_url())
    }

    pub fn with_upstream(upstream_url: impl Into<Arc<str>>) -> Self {
        let request_timeout = upstream_http_timeout();
        let connect_timeout = upstream_connect_timeout();
        let http_client = reqwest::Client::builder()
            .user_agent("allapis/0.1")
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .or_else(|e| {
                warn!(
                    error = %e,
                    "failed to build configured HTTP client, retrying without custom user-agent"
                );
                reqwest::Client::builder()
                    .timeout(request_timeout)
                    .connect_timeout(connect_timeout)
                    .build()
            })
            .unwrap_or_else(|e| {
                panic!("failed to build timeout-configured HTTP client: {e}");
            });
        Self {
            http_client,
            upstream_url: upstream_url.into(),
            observability: Arc::new(ObservabilityCounters::default()),
        }
    }
}
