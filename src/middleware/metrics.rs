//! Runtime metrics middleware
//!
//! A single `ServiceMetrics` value lives in application state and owns the
//! process start time plus the request counter reported by `GET /` and
//! `GET /health`. The counter is transient diagnostic state: it resets on
//! restart and each instance counts only its own traffic.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};

/// Process-wide runtime metrics
#[derive(Debug)]
pub struct ServiceMetrics {
    started_at: DateTime<Utc>,
    requests: AtomicU64,
}

impl ServiceMetrics {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            requests: AtomicU64::new(0),
        }
    }

    /// When the process started
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Whole seconds since the process started
    pub fn uptime_seconds(&self) -> u64 {
        (Utc::now() - self.started_at).num_seconds().max(0) as u64
    }

    /// Count one request. Relaxed ordering: the counter is diagnostic only.
    pub fn record_request(&self) -> u64 {
        self.requests.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Requests handled since startup
    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Middleware counting every API request
pub async fn track_requests(
    State(metrics): State<Arc<ServiceMetrics>>,
    request: Request,
    next: Next,
) -> Response {
    metrics.record_request();
    next.run(request).await
}
