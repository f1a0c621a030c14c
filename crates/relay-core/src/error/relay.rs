use serde::Serialize;
use thiserror::Error;

use super::ProviderError;

/// Machine-readable error kind reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ConfigurationError,
    ValidationError,
    UpstreamTimeout,
    UpstreamError,
    UnexpectedResponseShape,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigurationError => "configuration_error",
            Self::ValidationError => "validation_error",
            Self::UpstreamTimeout => "upstream_timeout",
            Self::UpstreamError => "upstream_error",
            Self::UnexpectedResponseShape => "unexpected_response_shape",
        }
    }
}

/// Endpoint-level failure.
///
/// `service` is the human label of the upstream ("Gemini API", "Screenshot service"...).
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{0} not configured")]
    Configuration(String),

    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("{service} timeout")]
    UpstreamTimeout { service: String, seconds: u64 },

    #[error("{service} error")]
    Upstream {
        service: String,
        status: Option<u16>,
        detail: String,
    },

    #[error("{service} returned an unexpected response")]
    UnexpectedResponseShape { service: String, detail: String },
}

impl RelayError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Attach the upstream label to a provider failure.
    pub fn from_provider(service: impl Into<String>, err: ProviderError) -> Self {
        let service = service.into();
        match err {
            ProviderError::NotConfigured(what) => Self::Configuration(what),
            ProviderError::Timeout(seconds) => Self::UpstreamTimeout { service, seconds },
            ProviderError::ApiError { status, message } => Self::Upstream {
                service,
                status: Some(status),
                detail: message,
            },
            ProviderError::Network(detail) | ProviderError::InvalidRequest(detail) => {
                Self::Upstream {
                    service,
                    status: None,
                    detail,
                }
            }
            ProviderError::UnexpectedResponse(detail) => {
                Self::UnexpectedResponseShape { service, detail }
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::ConfigurationError,
            Self::Validation { .. } => ErrorKind::ValidationError,
            Self::UpstreamTimeout { .. } => ErrorKind::UpstreamTimeout,
            Self::Upstream { .. } => ErrorKind::UpstreamError,
            Self::UnexpectedResponseShape { .. } => ErrorKind::UnexpectedResponseShape,
        }
    }

    /// Diagnostic detail carried alongside the message, if any.
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::Configuration(_) => None,
            Self::Validation { field, .. } => Some(format!("field: {}", field)),
            Self::UpstreamTimeout { seconds, .. } => {
                Some(format!("no response within {} seconds", seconds))
            }
            Self::Upstream { status, detail, .. } => Some(match status {
                Some(code) => format!("upstream status {}: {}", code, detail),
                None => detail.clone(),
            }),
            Self::UnexpectedResponseShape { detail, .. } => Some(detail.clone()),
        }
    }
}

#[cfg(test)]
#[path = "relay_tests.rs"]
mod tests;
