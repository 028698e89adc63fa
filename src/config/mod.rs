//! Configuration management
//!
//! This module provides YAML-based configuration management with support for:
//! - Environment variable overrides
//! - Multiple configuration file locations
//! - Default values for all settings
//!
//! The operational knobs (`PORT`, `CORS_ORIGIN`, `LYZR_API_KEY`) override
//! whatever the config file says, so a plain `.env` is enough to run the
//! service.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub lyzr: LyzrConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path to the static frontend directory
    #[serde(default = "default_static_dir")]
    pub static_dir: Option<PathBuf>,
    /// Whether to serve the frontend SPA (enables fallback to index.html)
    #[serde(default = "default_serve_frontend")]
    pub serve_frontend: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_static_dir() -> Option<PathBuf> {
    // Default to the static frontend in the current directory
    let path = PathBuf::from("static");
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

fn default_serve_frontend() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            serve_frontend: default_serve_frontend(),
        }
    }
}

/// CORS configuration
///
/// Only needed when the frontend is served separately (development); when the
/// relay serves the frontend itself the requests are same-origin.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Allowed origin; `*` allows any origin
    #[serde(default = "default_cors_origin")]
    pub allowed_origin: String,
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: default_cors_origin(),
        }
    }
}

/// Lyzr inference API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LyzrConfig {
    /// Chat inference endpoint
    #[serde(default = "default_lyzr_api_url")]
    pub api_url: String,
    /// API key; when unset the service starts but reports degraded health
    /// and every audit call fails
    #[serde(default)]
    pub api_key: Option<String>,
    /// Default user identity attached to audit calls
    #[serde(default = "default_user_id")]
    pub user_id: String,
    /// Lyzr agent performing the audits
    #[serde(default = "default_agent_id")]
    pub agent_id: String,
    /// Timeout for audit calls; inference is slow
    #[serde(default = "default_audit_timeout")]
    pub audit_timeout_secs: u64,
    /// Timeout for the health-check probe; short so `/health` never hangs
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,
}

fn default_lyzr_api_url() -> String {
    "https://agent-prod.studio.lyzr.ai/v3/inference/chat/".to_string()
}

fn default_user_id() -> String {
    "seo-guardian@localhost".to_string()
}

fn default_agent_id() -> String {
    "688377c03bf68ebc933cb332".to_string()
}

fn default_audit_timeout() -> u64 {
    120
}

fn default_probe_timeout() -> u64 {
    5
}

impl Default for LyzrConfig {
    fn default() -> Self {
        Self {
            api_url: default_lyzr_api_url(),
            api_key: None,
            user_id: default_user_id(),
            agent_id: default_agent_id(),
            audit_timeout_secs: default_audit_timeout(),
            probe_timeout_secs: default_probe_timeout(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            cors: CorsConfig::default(),
            lyzr: LyzrConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment.
    ///
    /// Lookup order: `SEO_GUARDIAN_CONFIG`, `./config.yaml`,
    /// `/etc/seo-guardian/config.yaml`. Environment variables override the
    /// file in all cases.
    pub fn load() -> Result<Self> {
        // Try to load .env file if it exists
        let _ = dotenvy::dotenv();

        let config_path = std::env::var("SEO_GUARDIAN_CONFIG")
            .map(PathBuf::from)
            .ok()
            .or_else(Self::find_config_file);

        let mut config = if let Some(ref path) = config_path {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {:?}", path))?;
                serde_norway::from_str(&contents)
                    .with_context(|| format!("Failed to parse config file: {:?}", path))?
            } else {
                AppConfig::default()
            }
        } else {
            AppConfig::default()
        };

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Find a configuration file in the standard locations
    pub fn find_config_file() -> Option<PathBuf> {
        let paths = [
            PathBuf::from("config.yaml"),
            PathBuf::from("/etc/seo-guardian/config.yaml"),
        ];

        paths.into_iter().find(|p| p.exists())
    }

    /// Apply environment variable overrides on top of the loaded file
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(port) = std::env::var("PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("Invalid PORT value: {}", port))?;
        }
        if let Ok(host) = std::env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(origin) = std::env::var("CORS_ORIGIN") {
            self.cors.allowed_origin = origin;
        }
        if let Ok(key) = std::env::var("LYZR_API_KEY") {
            if !key.is_empty() {
                self.lyzr.api_key = Some(key);
            }
        }
        if let Ok(url) = std::env::var("LYZR_API_URL") {
            self.lyzr.api_url = url;
        }
        Ok(())
    }
}
