//! SEO Guardian Backend Library
//!
//! This crate provides the core functionality for the SEO Guardian relay:
//! an HTTP service that forwards website-audit prompts to the Lyzr
//! inference API and passes the generated report back to the web frontend.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

pub use config::AppConfig;
pub use middleware::metrics::ServiceMetrics;
use services::lyzr::LyzrClient;

/// Human-readable service identity reported by `GET /`.
pub const SERVICE_NAME: &str = "SEO-Guardian Backend";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// Lyzr inference client (absent when no API key is configured)
    pub lyzr: Option<Arc<LyzrClient>>,
    /// Process-wide runtime metrics (start time, request counter)
    pub metrics: Arc<ServiceMetrics>,
}
