use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ApiError {
    /// HTTP 403. Kept distinct from `Server` so callers can show the
    /// authority-denied message instead of a generic failure.
    #[error("insufficient authority: {0}")]
    InsufficientAuthority(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("server rejected request ({status}): {body}")]
    Server { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

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

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            403 => ApiError::InsufficientAuthority(truncated),
            status => ApiError::Server {
                status,
                body: truncated,
            },
        }
    }

    /// True for the 403 authority signal (never retried, always user-facing).
    pub fn is_authority(&self) -> bool {
        matches!(self, ApiError::InsufficientAuthority(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}
