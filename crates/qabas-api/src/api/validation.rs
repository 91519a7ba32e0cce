// Input validation for content and form APIs
//
// Hard limits guarding the store from oversized or malformed input.
// These are not configurable.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

// =============================================================================
// Input Size Limits
// =============================================================================

/// Maximum size for titles, names and other short labels.
pub const MAX_TITLE_BYTES: usize = 1024; // 1 KB

/// Maximum size for descriptions, summaries and comments.
pub const MAX_DESCRIPTION_BYTES: usize = 10 * 1024; // 10 KB

/// Maximum size for long-form text (benefit excerpts, chapter content).
pub const MAX_CONTENT_BYTES: usize = 512 * 1024; // 512 KB

/// Maximum size for URLs.
pub const MAX_URL_BYTES: usize = 2048;

/// Maximum size for a contact or join form message.
pub const MAX_FORM_MESSAGE_BYTES: usize = 5 * 1024; // 5 KB

/// Default and maximum number of records returned by public list endpoints.
pub const DEFAULT_LIST_LIMIT: usize = 50;
pub const MAX_LIST_LIMIT: usize = 200;

// =============================================================================
// Validation Functions
// =============================================================================

/// Validation failure naming the offending field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} {problem}")]
pub struct ValidationError {
    pub field: &'static str,
    pub problem: &'static str,
}

fn fail(field: &'static str, problem: &'static str) -> Result<(), ValidationError> {
    tracing::warn!(field, problem, "Input validation failed");
    Err(ValidationError { field, problem })
}

/// Non-blank and within `max` bytes
pub fn validate_required(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return fail(field, "is required");
    }
    validate_max(field, value, max)
}

/// Within `max` bytes
pub fn validate_max(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.len() > max {
        tracing::debug!(field, bytes = value.len(), max, "Input exceeds limit");
        return fail(field, "exceeds allowed size");
    }
    Ok(())
}

/// Empty, or an absolute http(s) URL
pub fn validate_url(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    validate_max(field, value, MAX_URL_BYTES)?;
    let Some(rest) = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))
    else {
        return fail(field, "must be an http(s) URL");
    };
    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if host.is_empty() || host.chars().any(char::is_whitespace) {
        return fail(field, "must include a host");
    }
    Ok(())
}

/// Plausible email address
pub fn validate_email(field: &'static str, value: &str) -> Result<(), ValidationError> {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid"));

    validate_max(field, value, MAX_TITLE_BYTES)?;
    if !re.is_match(value.trim()) {
        return fail(field, "must be a valid email address");
    }
    Ok(())
}
