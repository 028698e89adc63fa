//! Audit relay endpoint
//!
//! The core of the service: accept a website URL, turn it into an audit
//! instruction, forward it to the Lyzr inference API, and hand the payload
//! back untouched. The UI depends on the upstream-defined `response` field,
//! so nothing here reshapes the body. A single upstream failure is
//! surfaced immediately; there are no retries.

use axum::{extract::State, Json};
use tracing::{info, warn};

use crate::{
    models::audit::{audit_prompt, generate_session_id, AuditRequest},
    services::lyzr::ChatMessage,
    utils::{
        error::{AppError, AppResult},
        validation::validate_audit_url,
    },
    AppState,
};

/// Run a website audit through the Lyzr agent
///
/// POST /audit
///
/// Request body:
/// ```json
/// {
///   "url": "https://example.com"
/// }
/// ```
///
/// `user_id`, `agent_id` and `session_id` may be supplied to continue an
/// existing upstream conversation; otherwise the configured defaults and a
/// fresh `{agent_id}-{millis}` session are used.
pub async fn run_audit(
    State(state): State<AppState>,
    Json(request): Json<AuditRequest>,
) -> AppResult<Json<serde_json::Value>> {
    if !validate_audit_url(&request.url) {
        return Err(AppError::BadRequest(
            "Missing `url` in request body".to_string(),
        ));
    }

    let lyzr = state.lyzr.as_ref().ok_or_else(|| {
        AppError::ServiceUnavailable("Lyzr API key is not configured".to_string())
    })?;

    let agent_id = request
        .agent_id
        .unwrap_or_else(|| lyzr.agent_id().to_string());
    let session_id = request
        .session_id
        .unwrap_or_else(|| generate_session_id(&agent_id));

    let message = ChatMessage {
        user_id: request.user_id.unwrap_or_else(|| lyzr.user_id().to_string()),
        agent_id,
        session_id,
        message: audit_prompt(request.url.trim()),
    };

    info!(url = %request.url, session_id = %message.session_id, "Relaying audit request");

    let session_id = message.session_id.clone();
    match lyzr.chat(message).await {
        Ok(body) => Ok(Json(body)),
        Err(err) => {
            warn!(session_id = %session_id, error = %err, "Lyzr audit call failed");
            Err(err.into())
        }
    }
}
