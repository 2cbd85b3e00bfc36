//! Huginn error types

/// Huginn error types
#[derive(Debug, thiserror::Error)]
pub enum HuginnError {
    // Network/transport errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    // Soft errors
    #[error("empty response from model")]
    EmptyResponse,

    // Cached upstream failure replayed from the error cache
    #[error("{0}")]
    Fetch(#[from] FetchError),
}

impl HuginnError {
    /// Best-effort human-readable message for display and caching.
    ///
    /// Upstream-provided messages (already extracted from `error`/`message`
    /// body fields by the client) pass through unchanged; transport errors
    /// fall back to their own text; anything empty becomes `Unknown error`.
    pub fn user_message(&self) -> String {
        let msg = match self {
            HuginnError::Api { message, .. } => message.clone(),
            HuginnError::Http(msg) => msg.clone(),
            HuginnError::Fetch(FetchError(msg)) => msg.clone(),
            other => other.to_string(),
        };
        if msg.trim().is_empty() {
            "Unknown error".to_string()
        } else {
            msg
        }
    }
}

impl From<reqwest::Error> for HuginnError {
    fn from(err: reqwest::Error) -> Self {
        HuginnError::Http(err.to_string())
    }
}

/// A failed fetch, reduced to its user-facing message.
///
/// This is what the error cache stores and what shared single-flight
/// futures yield on failure — it must be `Clone`, which the full
/// [`HuginnError`] (with its wrapped source errors) is not.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct FetchError(pub String);

impl FetchError {
    /// The stored message.
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl From<&HuginnError> for FetchError {
    fn from(err: &HuginnError) -> Self {
        FetchError(err.user_message())
    }
}

/// Result type alias for Huginn operations
pub type Result<T> = std::result::Result<T, HuginnError>;
