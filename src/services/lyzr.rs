//! Lyzr inference API client
//!
//! Thin client for the Lyzr chat-inference endpoint. One shared
//! `reqwest::Client`, per-request timeouts: audits get a long deadline
//! because inference is slow, the health probe a short one so `/health`
//! never hangs on a stuck upstream.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::LyzrConfig;
use crate::models::audit::generate_session_id;

/// Errors from the Lyzr API
#[derive(Debug, Error)]
pub enum LyzrError {
    /// The API answered with a non-success status; `details` is the raw
    /// response body (JSON when parseable, plain text otherwise)
    #[error("Lyzr returned status {status}")]
    Status {
        status: StatusCode,
        details: serde_json::Value,
    },

    /// The request never produced a response (connect failure, timeout,
    /// malformed body)
    #[error("Lyzr request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Chat message sent to the inference endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub user_id: String,
    pub agent_id: String,
    pub session_id: String,
    pub message: String,
}

/// Lyzr API client
#[derive(Clone)]
pub struct LyzrClient {
    client: Client,
    api_url: String,
    api_key: String,
    user_id: String,
    agent_id: String,
    audit_timeout: Duration,
    probe_timeout: Duration,
}

impl LyzrClient {
    /// Create a new client from configuration.
    ///
    /// Returns `None` when no API key is configured; the service still runs
    /// but reports degraded health and rejects audit calls.
    pub fn from_config(config: &LyzrConfig) -> Result<Option<Self>> {
        let Some(ref api_key) = config.api_key else {
            warn!("LYZR_API_KEY is not set; audits will fail until a key is configured");
            return Ok(None);
        };

        let client = Client::builder()
            .use_rustls_tls()
            .build()
            .context("Failed to create HTTP client")?;

        info!("Lyzr client initialized for {}", config.api_url);

        Ok(Some(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: api_key.clone(),
            user_id: config.user_id.clone(),
            agent_id: config.agent_id.clone(),
            audit_timeout: Duration::from_secs(config.audit_timeout_secs),
            probe_timeout: Duration::from_secs(config.probe_timeout_secs),
        }))
    }

    /// Default user identity for audit calls
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Agent performing the audits
    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    /// Send an audit chat message and return the upstream payload verbatim.
    pub async fn chat(&self, message: ChatMessage) -> Result<serde_json::Value, LyzrError> {
        debug!(session_id = %message.session_id, "Forwarding chat message to Lyzr");
        let response = self.post(&message, self.audit_timeout).await?;
        Ok(response.json().await?)
    }

    /// Quick connectivity probe for `/health`.
    ///
    /// Sends a minimal `ping` message under a throwaway session and reports
    /// the upstream status code.
    pub async fn probe(&self) -> Result<StatusCode, LyzrError> {
        let message = ChatMessage {
            user_id: "health-check".to_string(),
            agent_id: self.agent_id.clone(),
            session_id: generate_session_id("health"),
            message: "ping".to_string(),
        };

        let response = self.post(&message, self.probe_timeout).await?;
        Ok(response.status())
    }

    /// POST a chat message, mapping non-success statuses to `LyzrError::Status`
    /// with the raw response body attached.
    async fn post(
        &self,
        message: &ChatMessage,
        timeout: Duration,
    ) -> Result<reqwest::Response, LyzrError> {
        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .timeout(timeout)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let text = response.text().await.unwrap_or_default();
            let details =
                serde_json::from_str(&text).unwrap_or_else(|_| serde_json::Value::String(text));
            Err(LyzrError::Status { status, details })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LyzrConfig;

    fn test_config(api_key: Option<&str>) -> LyzrConfig {
        LyzrConfig {
            api_key: api_key.map(str::to_string),
            ..LyzrConfig::default()
        }
    }

    #[test]
    fn test_client_absent_without_key() {
        let client = LyzrClient::from_config(&test_config(None)).unwrap();
        assert!(client.is_none());
    }

    #[test]
    fn test_client_present_with_key() {
        let client = LyzrClient::from_config(&test_config(Some("key"))).unwrap();
        let client = client.expect("client should be constructed");
        assert_eq!(client.agent_id(), "688377c03bf68ebc933cb332");
        assert_eq!(client.user_id(), "seo-guardian@localhost");
    }

    #[test]
    fn test_chat_message_serialization() {
        let message = ChatMessage {
            user_id: "u".to_string(),
            agent_id: "a".to_string(),
            session_id: "a-123".to_string(),
            message: "Audit this website: https://example.com".to_string(),
        };

        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["user_id"], "u");
        assert_eq!(json["agent_id"], "a");
        assert_eq!(json["session_id"], "a-123");
        assert_eq!(json["message"], "Audit this website: https://example.com");
    }
}
