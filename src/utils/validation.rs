//! Input validation utilities

/// Upper bound on accepted URLs; anything longer is noise, not a website.
const MAX_URL_LENGTH: usize = 2048;

/// Validate the audit target URL: present and within length bounds.
///
/// The URL is embedded verbatim in the prompt sent upstream, so no format
/// checking happens here; the inference agent handles malformed input.
pub fn validate_audit_url(url: &str) -> bool {
    let trimmed = url.trim();
    !trimmed.is_empty() && trimmed.len() <= MAX_URL_LENGTH
}
