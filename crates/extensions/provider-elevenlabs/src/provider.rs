//! ElevenLabs text-to-speech provider.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use relay_core::error::ProviderError;
use relay_core::{AssetProvider, BinaryAsset, OutboundClient, VoiceoverRequest};

use crate::types::{SpeechRequest, VoiceSettings};

/// Upstream label used in client-facing errors.
pub const SERVICE: &str = "ElevenLabs API";

const BASE_URL: &str = "https://api.elevenlabs.io/v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// ElevenLabs provider.
pub struct ElevenLabsProvider {
    http: OutboundClient,
    api_key: Option<String>,
    base_url: String,
    settings: VoiceSettings,
    timeout: Duration,
}

impl ElevenLabsProvider {
    pub fn new(http: OutboundClient, api_key: Option<String>) -> Self {
        Self {
            http,
            api_key: api_key.filter(|k| !k.is_empty()),
            base_url: BASE_URL.to_string(),
            settings: VoiceSettings::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_settings(mut self, settings: VoiceSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// `{base}/text-to-speech/{voice_id}`, with the voice id as one encoded segment.
    pub fn speech_url(&self, voice_id: &str) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ProviderError::InvalidRequest(format!("invalid voice URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidRequest("voice URL cannot take a path".to_string()))?
            .pop_if_empty()
            .push("text-to-speech")
            .push(voice_id);
        Ok(url)
    }

    pub fn build_body(&self, request: &VoiceoverRequest) -> SpeechRequest {
        SpeechRequest {
            text: request.text.clone(),
            model_id: request.model_id.clone(),
            voice_settings: self.settings,
        }
    }
}

#[async_trait]
impl AssetProvider for ElevenLabsProvider {
    type Request = VoiceoverRequest;

    fn service(&self) -> &str {
        SERVICE
    }

    fn file_stem(&self) -> &str {
        "voiceover"
    }

    async fn fetch(&self, request: &VoiceoverRequest) -> Result<BinaryAsset, ProviderError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| ProviderError::NotConfigured("ELEVENLABS_API_KEY".to_string()))?;

        let url = self.speech_url(&request.voice_id)?;
        debug!(
            "Synthesizing {} chars with voice {} ({})",
            request.text.chars().count(),
            request.voice_id,
            request.model_id
        );

        let builder = self
            .http
            .post(url)
            .header("xi-api-key", api_key)
            .header("accept", "audio/mpeg")
            .json(&self.build_body(request));
        self.http
            .fetch_binary(builder, self.timeout, "audio", "audio/mpeg")
            .await
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
