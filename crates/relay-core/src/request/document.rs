use bytes::Bytes;

use super::or_default;
use crate::error::RelayError;

/// The only document type the document-QA upstream is asked to read.
pub const PDF_MIME: &str = "application/pdf";

/// Defaults for omitted solve-request fields.
#[derive(Debug, Clone)]
pub struct DocumentDefaults {
    pub question: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for DocumentDefaults {
    fn default() -> Self {
        Self {
            question: "Solve this JEE question step by step.".to_string(),
            max_tokens: 2048,
            temperature: 0.7,
        }
    }
}

/// Raw text fields of a multipart solve request.
#[derive(Debug, Clone, Default)]
pub struct DocumentQaPayload {
    pub question: Option<String>,
    pub max_tokens: Option<String>,
    pub temperature: Option<String>,
}

/// A document question ready to be forwarded.
#[derive(Debug, Clone)]
pub struct DocumentQaRequest {
    pub document: Bytes,
    pub mime_type: String,
    pub question: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Check the declared type of an upload before any of its bytes are read.
///
/// Returns the normalized media type on success.
pub fn check_document_type(content_type: Option<&str>) -> Result<String, RelayError> {
    let essence = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase())
        .unwrap_or_default();

    if essence != PDF_MIME {
        return Err(RelayError::validation("file", "File must be a PDF"));
    }
    Ok(essence)
}

impl DocumentQaPayload {
    pub fn validate(
        self,
        document: Bytes,
        mime_type: String,
        defaults: &DocumentDefaults,
    ) -> Result<DocumentQaRequest, RelayError> {
        if document.is_empty() {
            return Err(RelayError::validation("file", "must not be empty"));
        }

        let max_tokens = match self.max_tokens.as_deref().map(str::trim) {
            None | Some("") => defaults.max_tokens,
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| RelayError::validation("max_tokens", "must be a positive integer"))?,
        };
        if max_tokens == 0 {
            return Err(RelayError::validation("max_tokens", "must be a positive integer"));
        }

        let temperature = match self.temperature.as_deref().map(str::trim) {
            None | Some("") => defaults.temperature,
            Some(raw) => raw
                .parse::<f32>()
                .map_err(|_| RelayError::validation("temperature", "must be a number"))?,
        };
        if !temperature.is_finite() || !(0.0..=2.0).contains(&temperature) {
            return Err(RelayError::validation(
                "temperature",
                "must be between 0.0 and 2.0",
            ));
        }

        Ok(DocumentQaRequest {
            document,
            mime_type,
            question: or_default(self.question, &defaults.question),
            max_tokens,
            temperature,
        })
    }
}
