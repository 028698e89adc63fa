//! Service status and health endpoints
//!
//! `GET /` confirms the server is running and returns basic runtime
//! metrics. `GET /health` additionally probes the Lyzr API: a missing key
//! or a failed probe degrades the reported status but never turns the
//! health call itself into an error.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::{AppState, SERVICE_NAME};

/// Response for `GET /`
#[derive(Serialize)]
pub struct ServiceStatus {
    pub status: String,
    pub service: String,
    pub started_at: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub request_count: u64,
    pub lyzr_api_key_configured: bool,
}

/// Response for `GET /health`
#[derive(Serialize)]
pub struct HealthReport {
    pub status: String,
    pub uptime_seconds: u64,
    pub started_at: DateTime<Utc>,
    pub request_count: u64,
    pub lyzr: LyzrHealth,
}

/// Health of the Lyzr dependency
#[derive(Serialize, Default)]
pub struct LyzrHealth {
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ok: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
}

/// Root endpoint confirming the server is running
///
/// GET /
pub async fn service_status(State(state): State<AppState>) -> Json<ServiceStatus> {
    Json(ServiceStatus {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
        started_at: state.metrics.started_at(),
        uptime_seconds: state.metrics.uptime_seconds(),
        request_count: state.metrics.request_count(),
        lyzr_api_key_configured: state.lyzr.is_some(),
    })
}

/// Health check with a best-effort upstream probe
///
/// GET /health
///
/// Always answers 200; degradation is reported in the body so load
/// balancers keep routing while operators see the broken dependency.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthReport> {
    let mut status = "ok";

    let lyzr = match state.lyzr {
        None => {
            status = "degraded";
            LyzrHealth {
                configured: false,
                message: Some("LYZR_API_KEY not set".to_string()),
                ..LyzrHealth::default()
            }
        }
        Some(ref client) => match client.probe().await {
            Ok(upstream_status) => {
                debug!(status = %upstream_status, "Lyzr probe succeeded");
                LyzrHealth {
                    configured: true,
                    ok: Some(true),
                    status: Some(upstream_status.as_u16()),
                    ..LyzrHealth::default()
                }
            }
            Err(err) => {
                status = "degraded";
                LyzrHealth {
                    configured: true,
                    ok: Some(false),
                    error: Some(probe_error_detail(err)),
                    ..LyzrHealth::default()
                }
            }
        },
    };

    Json(HealthReport {
        status: status.to_string(),
        uptime_seconds: state.metrics.uptime_seconds(),
        started_at: state.metrics.started_at(),
        request_count: state.metrics.request_count(),
        lyzr,
    })
}

/// Raw upstream detail when the probe answered, error text otherwise
fn probe_error_detail(err: crate::services::lyzr::LyzrError) -> serde_json::Value {
    use crate::services::lyzr::LyzrError;

    match err {
        LyzrError::Status { details, .. } => details,
        LyzrError::Transport(e) => serde_json::Value::String(e.to_string()),
    }
}
