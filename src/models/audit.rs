//! Audit request model

use chrono::Utc;
use serde::Deserialize;

/// Body of `POST /audit`
///
/// Only `url` is required; identity fields fall back to the configured
/// defaults, and a fresh session id is generated when none is supplied.
#[derive(Debug, Clone, Deserialize)]
pub struct AuditRequest {
    #[serde(default)]
    pub url: String,
    pub user_id: Option<String>,
    pub agent_id: Option<String>,
    pub session_id: Option<String>,
}

/// Build the natural-language audit instruction for a URL.
pub fn audit_prompt(url: &str) -> String {
    format!("Audit this website: {}", url)
}

/// Generate a session id of the form `{prefix}-{unix_millis}`.
///
/// Millisecond resolution keeps ids unique enough that two audits never
/// share an upstream conversation.
pub fn generate_session_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Utc::now().timestamp_millis())
}
