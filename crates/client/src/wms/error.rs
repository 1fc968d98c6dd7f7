//! WMS client error types.

use std::sync::Arc;

/// Errors from the upstream WMS feature-lookup client.
///
/// None of these touch the feature cache; a failed fetch must leave it
/// unmodified and propagate to the caller.
#[derive(Debug, thiserror::Error)]
pub enum WmsError {
    /// Request parameters failed validation before any network call.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Configured base URL does not parse.
    #[error("invalid WMS base URL: {0}")]
    InvalidBaseUrl(String),

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Upstream returned a non-success status.
    #[error("upstream HTTP error: {status}")]
    HttpError { status: u16 },

    /// Upstream response exceeded the configured byte ceiling.
    #[error("response too large: {size} bytes exceeds {limit}")]
    TooLarge { size: usize, limit: usize },
}

impl From<reqwest::Error> for WmsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { WmsError::Timeout } else { WmsError::Network(Arc::new(err)) }
    }
}
