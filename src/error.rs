//! Engine-wide error taxonomy.
//!
//! Validation and authority failures are always surfaced to the user and
//! never retried automatically. Network and server failures during reads
//! fall back to the cache; during writes they leave the cache untouched.
//! Nothing here is fatal to the process.

use thiserror::Error;

use crate::api::ApiError;

#[derive(Error, Debug)]
pub enum SyncError {
    /// Rejected locally before any network call was made.
    #[error("validation failed: {0}")]
    ValidationFailed(String),

    /// Transport-level failure (authority, network, server, bad body).
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A read was requested before any successful fetch populated the key.
    /// Non-fatal; read paths treat this as empty.
    #[error("no cached snapshot for {0}")]
    CacheMiss(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl SyncError {
    /// True when the failure is the HTTP 403 authority signal.
    pub fn is_authority(&self) -> bool {
        matches!(self, SyncError::Api(api) if api.is_authority())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authority_detection() {
        let err = SyncError::Api(ApiError::InsufficientAuthority("no credits".to_string()));
        assert!(err.is_authority());

        let err = SyncError::Api(ApiError::Network("offline".to_string()));
        assert!(!err.is_authority());

        let err = SyncError::ValidationFailed("missing name".to_string());
        assert!(!err.is_authority());
    }
}
