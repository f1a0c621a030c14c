//! Client-facing error envelope.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, warn};

use relay_core::{ErrorKind, RelayError};

/// Error returned by every relay handler.
///
/// The status follows the error kind, except for bodies over the upload
/// limit, which stay validation errors but answer 413.
#[derive(Debug, Error)]
#[error("{inner}")]
pub struct ApiError {
    inner: RelayError,
    status: StatusCode,
}

impl From<RelayError> for ApiError {
    fn from(inner: RelayError) -> Self {
        let status = status_for(inner.kind());
        Self { inner, status }
    }
}

/// `{"success": false, "error": {...}}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Fixed status code per error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::ConfigurationError => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::ValidationError => StatusCode::BAD_REQUEST,
        ErrorKind::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorKind::UpstreamError | ErrorKind::UnexpectedResponseShape => StatusCode::BAD_GATEWAY,
    }
}

impl ApiError {
    /// A body rejected by axum, kept at 413 when it ran over the upload limit.
    fn rejected(field: &str, status: StatusCode, message: String) -> Self {
        let mut err = Self::from(RelayError::validation(field, message));
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            err.status = status;
        }
        err
    }

    pub fn kind(&self) -> ErrorKind {
        self.inner.kind()
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn relay_error(&self) -> &RelayError {
        &self.inner
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::rejected("body", rejection.status(), rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::rejected("body", rejection.status(), rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::rejected("file", err.status(), err.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.inner.detail();
        match &self.inner {
            RelayError::Configuration(what) => warn!("Request refused, {} not configured", what),
            RelayError::Validation { field, message } => {
                debug!("Rejected request: {}: {}", field, message)
            }
            other => error!("{} ({})", other, detail.as_deref().unwrap_or("no detail")),
        }

        let body = ErrorResponse {
            success: false,
            error: ErrorBody {
                kind: self.kind(),
                message: self.inner.to_string(),
                detail,
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
