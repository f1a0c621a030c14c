//! Screenshot capture provider.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;

use relay_core::error::ProviderError;
use relay_core::{AssetProvider, BinaryAsset, OutboundClient, ScreenshotRequest};

/// Upstream label used in client-facing errors.
pub const SERVICE: &str = "Screenshot service";

const BASE_URL: &str = "https://api.screenshotone.com/take";
const DEMO_URL: &str = "https://shot.screenshotapi.net/screenshot";
const DEMO_TOKEN: &str = "DEMO_TOKEN";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Which upstream a capture goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    /// ScreenshotOne with the configured access key.
    Keyed,
    /// Public demo endpoint, rate limited and unauthenticated.
    Demo,
}

/// Screenshot provider.
pub struct ScreenshotProvider {
    http: OutboundClient,
    api_key: Option<String>,
    base_url: String,
    demo_url: String,
    demo_token: String,
    allow_demo_fallback: bool,
    timeout: Duration,
}

impl ScreenshotProvider {
    pub fn new(http: OutboundClient, api_key: Option<String>) -> Self {
        Self {
            http,
            api_key: api_key.filter(|k| !k.is_empty()),
            base_url: BASE_URL.to_string(),
            demo_url: DEMO_URL.to_string(),
            demo_token: DEMO_TOKEN.to_string(),
            allow_demo_fallback: true,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_demo(mut self, demo_url: impl Into<String>, token: impl Into<String>) -> Self {
        self.demo_url = demo_url.into();
        self.demo_token = token.into();
        self
    }

    pub fn with_demo_fallback(mut self, allow: bool) -> Self {
        self.allow_demo_fallback = allow;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The upstream a capture would use, or `None` when neither is available.
    pub fn mode(&self) -> Option<CaptureMode> {
        match (&self.api_key, self.allow_demo_fallback) {
            (Some(_), _) => Some(CaptureMode::Keyed),
            (None, true) => Some(CaptureMode::Demo),
            (None, false) => None,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.mode().is_some()
    }

    /// Build the capture URL for `request`.
    pub fn capture_url(&self, request: &ScreenshotRequest) -> Result<Url, ProviderError> {
        let mode = self
            .mode()
            .ok_or_else(|| ProviderError::NotConfigured("SCREENSHOTONE_KEY".to_string()))?;

        let (base, credential) = match (mode, &self.api_key) {
            (CaptureMode::Keyed, Some(key)) => (&self.base_url, key.as_str()),
            _ => (&self.demo_url, self.demo_token.as_str()),
        };
        let mut url = Url::parse(base)
            .map_err(|e| ProviderError::InvalidRequest(format!("invalid screenshot URL: {}", e)))?;

        {
            let mut query = url.query_pairs_mut();
            match mode {
                CaptureMode::Keyed => {
                    query
                        .append_pair("access_key", credential)
                        .append_pair("url", request.url.as_str())
                        .append_pair("viewport_width", &request.width.to_string())
                        .append_pair("viewport_height", &request.height.to_string())
                        .append_pair("full_page", if request.full_page { "true" } else { "false" })
                        .append_pair("format", "png");
                }
                CaptureMode::Demo => {
                    query
                        .append_pair("token", credential)
                        .append_pair("url", request.url.as_str())
                        .append_pair("width", &request.width.to_string())
                        .append_pair("height", &request.height.to_string())
                        .append_pair("output", "image")
                        .append_pair("file_type", "png");
                    if request.full_page {
                        query.append_pair("full_page", "true");
                    }
                }
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl AssetProvider for ScreenshotProvider {
    type Request = ScreenshotRequest;

    fn service(&self) -> &str {
        SERVICE
    }

    fn file_stem(&self) -> &str {
        "screenshot"
    }

    async fn fetch(&self, request: &ScreenshotRequest) -> Result<BinaryAsset, ProviderError> {
        let url = self.capture_url(request)?;

        if self.mode() == Some(CaptureMode::Demo) {
            warn!(
                "SCREENSHOTONE_KEY not set, capturing {} through the demo endpoint",
                request.url
            );
        } else {
            debug!(
                "Capturing {} at {}x{} (full_page={})",
                request.url, request.width, request.height, request.full_page
            );
        }

        self.http
            .fetch_binary(self.http.get(url), self.timeout, "image", "image/png")
            .await
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
