use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized - token may be expired")]
    Unauthorized,

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies carried in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Error payload shape the backend uses for non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    message: Option<String>,
}

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            format!(
                "{}... (truncated, {} total bytes)",
                &body[..MAX_ERROR_BODY_LENGTH],
                body.len()
            )
        }
    }

    /// Pull the backend's `message` field out of an error body, falling back
    /// to the (truncated) raw body when it is not the expected JSON shape.
    fn body_message(body: &str) -> String {
        serde_json::from_str::<ErrorPayload>(body)
            .ok()
            .and_then(|p| p.message)
            .unwrap_or_else(|| Self::truncate_body(body))
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = Self::body_message(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::AccessDenied(message),
            404 => ApiError::NotFound(message),
            400 | 409 | 422 => ApiError::Validation(message),
            500..=599 => ApiError::ServerError(message),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, message)),
        }
    }
}

/// Fallback shown when the backend gave no usable message at login.
pub(crate) const LOGIN_FALLBACK_MESSAGE: &str = "Login failed. Please try again.";

/// A rejected or failed login attempt.
///
/// Every login failure path - bad credentials, unreachable backend, malformed
/// response - collapses into one human-readable message for the login screen
/// to render. Session state is never mutated on a failed login.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct LoginError {
    pub message: String,
}

impl LoginError {
    pub(crate) fn from_body(body: &str) -> Self {
        let message = serde_json::from_str::<ErrorPayload>(body)
            .ok()
            .and_then(|p| p.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| LOGIN_FALLBACK_MESSAGE.to_string());
        Self { message }
    }

    pub(crate) fn fallback() -> Self {
        Self {
            message: LOGIN_FALLBACK_MESSAGE.to_string(),
        }
    }
}
