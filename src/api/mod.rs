//! API routes and handlers
//!
//! This module defines all HTTP endpoints and their routing.

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

mod audit;
mod health;

pub use health::*;

/// Create the API router
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::service_status))
        .route("/health", get(health::health_check))
        .route("/audit", post(audit::run_audit))
}
