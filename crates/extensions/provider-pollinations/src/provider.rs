//! Pollinations image generation provider.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use relay_core::error::ProviderError;
use relay_core::{AssetProvider, BinaryAsset, ImageGenRequest, OutboundClient};

/// Upstream label used in client-facing errors.
pub const SERVICE: &str = "Image generation";

const BASE_URL: &str = "https://image.pollinations.ai/prompt";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Pollinations provider. The API key is optional.
pub struct PollinationsProvider {
    http: OutboundClient,
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
}

impl PollinationsProvider {
    pub fn new(http: OutboundClient, api_key: Option<String>) -> Self {
        Self {
            http,
            api_key: api_key.filter(|k| !k.is_empty()),
            base_url: BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the generation URL: prompt as the last path segment, then
    /// `width`, `height`, `seed` (when given), `model` and `nologo=true`.
    pub fn build_url(&self, request: &ImageGenRequest) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ProviderError::InvalidRequest(format!("invalid image URL: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidRequest("image URL cannot take a path".to_string()))?
            .pop_if_empty()
            .push(&request.prompt);

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("width", &request.width.to_string())
                .append_pair("height", &request.height.to_string());
            if let Some(seed) = request.seed {
                query.append_pair("seed", &seed.to_string());
            }
            query
                .append_pair("model", &request.model)
                .append_pair("nologo", "true");
        }
        Ok(url)
    }
}

#[async_trait]
impl AssetProvider for PollinationsProvider {
    type Request = ImageGenRequest;

    fn service(&self) -> &str {
        SERVICE
    }

    fn file_stem(&self) -> &str {
        "generated_image"
    }

    async fn fetch(&self, request: &ImageGenRequest) -> Result<BinaryAsset, ProviderError> {
        let url = self.build_url(request)?;
        debug!(
            "Generating {}x{} image with {} (seed={:?})",
            request.width, request.height, request.model, request.seed
        );

        let mut builder = self.http.get(url);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }
        self.http
            .fetch_binary(builder, self.timeout, "image", "image/jpeg")
            .await
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
