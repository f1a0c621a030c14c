//! Single-shot outbound HTTP.
//!
//! Every upstream call goes through [`OutboundClient`]: exactly one attempt,
//! bounded by a per-call timeout, with transport failures mapped onto
//! [`ProviderError`]. There is no retry on any path.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response};
use tracing::debug;
use url::Url;

use crate::error::ProviderError;
use crate::types::BinaryAsset;

/// Upstream detail used when an error body cannot be read.
pub const UNREADABLE_BODY: &str = "<unreadable body>";

/// A provider that turns a validated request into relayed bytes.
#[async_trait]
pub trait AssetProvider: Send + Sync {
    type Request: Send + Sync;

    /// Upstream label used in client-facing errors.
    fn service(&self) -> &str;

    /// Attachment filename stem for the relayed asset.
    fn file_stem(&self) -> &str;

    async fn fetch(&self, request: &Self::Request) -> Result<BinaryAsset, ProviderError>;
}

/// HTTP client shared by all providers.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct OutboundClient {
    client: Client,
}

impl OutboundClient {
    pub fn new(connect_timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .user_agent(concat!("relay-worker/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn get(&self, url: Url) -> RequestBuilder {
        self.client.get(url)
    }

    pub fn post(&self, url: Url) -> RequestBuilder {
        self.client.post(url)
    }

    /// Send once and return the response whatever its status.
    pub async fn send_raw(
        &self,
        request: RequestBuilder,
        timeout: Duration,
    ) -> Result<Response, ProviderError> {
        request
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(e, timeout.as_secs()))
    }

    /// Send once; a non-success status becomes [`ProviderError::ApiError`].
    pub async fn send(
        &self,
        request: RequestBuilder,
        timeout: Duration,
    ) -> Result<Response, ProviderError> {
        let response = self.send_raw(request, timeout).await?;
        let status = response.status();
        if !status.is_success() {
            let text = match response.text().await {
                Ok(text) => text,
                Err(e) => {
                    debug!("Failed to read upstream error body: {}", e.without_url());
                    UNREADABLE_BODY.to_string()
                }
            };
            return Err(ProviderError::from_api_response(status.as_u16(), text));
        }
        Ok(response)
    }

    /// Send once and read a binary body of the given media family (`image`, `audio`).
    ///
    /// A missing or generic content type falls back to `fallback_media_type`.
    /// An empty body or a body of another family is an unexpected response.
    pub async fn fetch_binary(
        &self,
        request: RequestBuilder,
        timeout: Duration,
        family: &str,
        fallback_media_type: &str,
    ) -> Result<BinaryAsset, ProviderError> {
        let response = self.send(request, timeout).await?;
        let media_type = media_type_for(&response, family, fallback_media_type)?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::from_reqwest(e, timeout.as_secs()))?;
        if bytes.is_empty() {
            return Err(ProviderError::UnexpectedResponse(
                "upstream returned an empty body".to_string(),
            ));
        }

        debug!("Relaying {} bytes of {}", bytes.len(), media_type);
        Ok(BinaryAsset::new(bytes, media_type))
    }
}

fn media_type_for(
    response: &Response,
    family: &str,
    fallback: &str,
) -> Result<String, ProviderError> {
    let declared = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or_default().trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty());

    match declared {
        None => Ok(fallback.to_string()),
        Some(ct) if ct == "application/octet-stream" => Ok(fallback.to_string()),
        Some(ct) if ct.starts_with(&format!("{}/", family)) => Ok(ct),
        Some(ct) => Err(ProviderError::UnexpectedResponse(format!(
            "expected {}/* content, got {}",
            family, ct
        ))),
    }
}

#[cfg(test)]
#[path = "outbound_tests.rs"]
mod tests;
