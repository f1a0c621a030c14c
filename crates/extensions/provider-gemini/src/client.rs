//! Gemini API client.

use std::time::Duration;

use tracing::debug;
use url::Url;

use relay_core::error::ProviderError;
use relay_core::OutboundClient;

use crate::types::*;

pub(crate) const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini API client.
pub(crate) struct GeminiClient {
    http: OutboundClient,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiClient {
    pub(crate) fn new(
        http: OutboundClient,
        api_key: String,
        base_url: String,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            api_key,
            base_url,
            timeout,
        }
    }

    /// Endpoint URL for `model`, credential included as the `key` query parameter.
    pub(crate) fn endpoint(&self, model: &str) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        ))
        .map_err(|e| ProviderError::InvalidRequest(format!("invalid Gemini URL: {}", e)))?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    /// Generate content (non-streaming).
    pub(crate) async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let url = self.endpoint(model)?;

        debug!("Gemini generate_content: model={}", model);

        let response = self
            .http
            .send_raw(self.http.post(url).json(request), self.timeout)
            .await?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::from_reqwest(e, self.timeout.as_secs()))?;

        if !status.is_success() {
            let error: Result<GeminiError, _> = serde_json::from_str(&body);
            return Err(match error {
                Ok(e) => ProviderError::from_api_response(status.as_u16(), e.error.message),
                Err(_) => ProviderError::from_api_response(status.as_u16(), body),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            ProviderError::UnexpectedResponse(format!("Failed to parse response: {}", e))
        })
    }
}
