use thiserror::Error;

/// Maximum number of characters of an upstream error body kept for diagnostics.
const MAX_DETAIL_CHARS: usize = 1000;

/// Failure of a single call to an upstream provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ProviderError {
    /// Build an [`ProviderError::ApiError`] from a non-success status and its body.
    ///
    /// Long bodies (HTML error pages, mostly) are cut down so the detail stays readable.
    pub fn from_api_response(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.chars().count() > MAX_DETAIL_CHARS {
            let mut cut: String = message.chars().take(MAX_DETAIL_CHARS).collect();
            cut.push_str("...");
            cut
        } else {
            message
        };
        Self::ApiError { status, message }
    }

    /// Map a transport-level reqwest failure.
    ///
    /// The request URL is dropped from the message: some upstreams take their
    /// key in the query string.
    pub fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_secs)
        } else {
            Self::Network(err.without_url().to_string())
        }
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
