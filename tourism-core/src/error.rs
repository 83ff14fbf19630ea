use reqwest::StatusCode;
use thiserror::Error;

/// Fallback text when a failure carries nothing more useful.
pub const GENERIC_FAILURE: &str = "Failed to process query";

/// Errors raised by a [`crate::TourismApi`] call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend could not be reached at all (refused, DNS, timeout).
    #[error("backend unreachable: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Server {
        status: StatusCode,
        detail: Option<String>,
    },

    #[error("failed to decode backend response: {0}")]
    Decode(String),

    #[error("{0}")]
    Other(String),
}

impl ApiError {
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    /// Turn the error into the text shown to the user.
    pub fn user_message(&self, base_url: &str) -> String {
        match self {
            ApiError::Network(_) => format!(
                "Cannot connect to backend. Make sure the backend server is running on {base_url}"
            ),
            ApiError::Server { detail: Some(detail), .. } if !detail.is_empty() => detail.clone(),
            ApiError::Server { status, .. } => format!("Request failed with status {status}"),
            ApiError::Decode(msg) | ApiError::Other(msg) if !msg.is_empty() => msg.clone(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            ApiError::Network(err.to_string())
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Server { status, detail: None }
        } else {
            ApiError::Other(err.to_string())
        }
    }
}

/// Pull the `detail` field out of an error body, FastAPI style.
///
/// Non-string details (validation error lists) are returned as compact JSON.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    match value.get("detail")? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
