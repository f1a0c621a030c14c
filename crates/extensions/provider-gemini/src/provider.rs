//! Gemini document question answering.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, warn};

use relay_core::error::ProviderError;
use relay_core::{DocumentAnswer, DocumentQaRequest, OutboundClient};

use crate::client::{BASE_URL, GeminiClient};
use crate::types::*;

/// Upstream label used in client-facing errors.
pub const SERVICE: &str = "Gemini API";

const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Gemini document question answering provider.
///
/// Constructed without a key, the provider stays usable as a value but every
/// call fails with [`ProviderError::NotConfigured`] before touching the network.
pub struct GeminiProvider {
    client: Option<GeminiClient>,
    model: String,
}

impl GeminiProvider {
    /// Create a provider against the public Gemini endpoint.
    pub fn new(http: OutboundClient, api_key: Option<String>) -> Self {
        Self::with_url(http, api_key, BASE_URL, DEFAULT_TIMEOUT)
    }

    /// Create a provider against a custom endpoint.
    pub fn with_url(
        http: OutboundClient,
        api_key: Option<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            client: api_key
                .filter(|k| !k.is_empty())
                .map(|key| GeminiClient::new(http, key, base_url, timeout)),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Ask the model `request.question` about `request.document`.
    ///
    /// A reply with no candidates, no parts, or a body that does not decode
    /// yields the "No answer generated" sentinel rather than an error.
    pub async fn answer(&self, request: &DocumentQaRequest) -> Result<DocumentAnswer, ProviderError> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| ProviderError::NotConfigured("GEMINI_API_KEY".to_string()))?;

        debug!(
            "Forwarding {} byte document to {} (max_tokens={})",
            request.document.len(),
            self.model,
            request.max_tokens
        );

        let body = build_request(request);
        match client.generate_content(&self.model, &body).await {
            Ok(response) => Ok(self.extract_answer(response)),
            Err(ProviderError::UnexpectedResponse(detail)) => {
                warn!("Gemini reply could not be decoded: {}", detail);
                Ok(DocumentAnswer::no_answer(&self.model))
            }
            Err(e) => Err(e),
        }
    }

    /// Reduce a reply to the text of its first candidate.
    pub fn extract_answer(&self, response: GenerateContentResponse) -> DocumentAnswer {
        let tokens_used = response
            .usage_metadata
            .as_ref()
            .map(|u| u.total_token_count)
            .unwrap_or(0);

        let texts: Vec<String> = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if texts.is_empty() {
            warn!("Gemini returned no usable candidate text");
            return DocumentAnswer {
                tokens_used,
                ..DocumentAnswer::no_answer(&self.model)
            };
        }

        DocumentAnswer {
            answer: texts.join("\n"),
            model: self.model.clone(),
            tokens_used,
        }
    }
}

/// Build the `generateContent` body: the question, then the document inline as base64.
pub fn build_request(request: &DocumentQaRequest) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![
                Part::Text {
                    text: request.question.clone(),
                },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: request.mime_type.clone(),
                        data: STANDARD.encode(&request.document),
                    },
                },
            ],
        }],
        generation_config: Some(GenerationConfig {
            max_output_tokens: Some(request.max_tokens),
            temperature: Some(request.temperature),
        }),
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
