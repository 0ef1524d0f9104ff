use thiserror::Error;

/// Main error type for the live event aggregator
#[derive(Error, Debug)]
pub enum FeedError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Network errors
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    #[error("Upstream returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Payload errors
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FeedError {
    /// Classify a reqwest failure, pulling timeouts out as their own variant.
    pub fn from_request(err: reqwest::Error, elapsed_ms: u64) -> Self {
        if err.is_timeout() {
            FeedError::Timeout { elapsed_ms }
        } else {
            FeedError::Http(err)
        }
    }

    /// True for failures caused by the upstream rejecting our credentials.
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self, FeedError::UpstreamStatus { status: 401 | 403, .. })
    }
}

/// Result type alias for FeedError
pub type Result<T> = std::result::Result<T, FeedError>;
