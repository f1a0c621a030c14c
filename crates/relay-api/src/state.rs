//! Application state.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Notify;
use tracing::info;

use relay_config::Config;
use relay_core::{
    Dimensions, DocumentDefaults, ImageDefaults, OutboundClient, ProviderError, VoiceDefaults,
};
use relay_provider_elevenlabs::{ElevenLabsProvider, VoiceSettings};
use relay_provider_gemini::GeminiProvider;
use relay_provider_pollinations::PollinationsProvider;
use relay_provider_screenshot::ScreenshotProvider;

/// Application state shared across handlers.
///
/// Everything except the counters is fixed at startup.
pub struct AppState {
    pub gemini: GeminiProvider,
    pub screenshot: ScreenshotProvider,
    pub images: PollinationsProvider,
    pub voice: ElevenLabsProvider,
    pub document_defaults: DocumentDefaults,
    pub screenshot_size: Dimensions,
    pub image_defaults: ImageDefaults,
    pub voice_defaults: VoiceDefaults,
    pub max_upload_bytes: usize,
    max_requests: u64,
    start_time: Instant,
    request_count: AtomicU64,
    shutdown_requested: AtomicBool,
    /// Notifier for recycling-triggered shutdown.
    pub shutdown_notify: Arc<Notify>,
}

impl AppState {
    /// Build providers and defaults from the loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        let timeouts = &config.timeouts;
        let http = OutboundClient::new(Duration::from_secs(timeouts.connect_seconds))?;
        let providers = &config.providers;
        let defaults = &config.defaults;

        let gemini = GeminiProvider::with_url(
            http.clone(),
            providers.gemini.api_key.clone(),
            providers.gemini.base_url.clone(),
            Duration::from_secs(timeouts.document_seconds),
        )
        .with_model(providers.gemini.model.clone());

        let screenshot = ScreenshotProvider::new(http.clone(), providers.screenshot.api_key.clone())
            .with_url(providers.screenshot.base_url.clone())
            .with_demo(
                providers.screenshot.demo_url.clone(),
                providers.screenshot.demo_token.clone(),
            )
            .with_demo_fallback(providers.screenshot.allow_demo_fallback)
            .with_timeout(Duration::from_secs(timeouts.screenshot_seconds));

        let images = PollinationsProvider::new(http.clone(), providers.pollinations.api_key.clone())
            .with_url(providers.pollinations.base_url.clone())
            .with_timeout(Duration::from_secs(timeouts.image_seconds));

        let voice = ElevenLabsProvider::new(http, providers.elevenlabs.api_key.clone())
            .with_url(providers.elevenlabs.base_url.clone())
            .with_settings(VoiceSettings {
                stability: providers.elevenlabs.stability,
                similarity_boost: providers.elevenlabs.similarity_boost,
            })
            .with_timeout(Duration::from_secs(timeouts.voice_seconds));

        info!(
            "Providers: gemini={}, screenshot={:?}, voice={}",
            gemini.is_configured(),
            screenshot.mode(),
            voice.is_configured()
        );

        Ok(Self {
            gemini,
            screenshot,
            images,
            voice,
            document_defaults: DocumentDefaults {
                question: defaults.question.clone(),
                max_tokens: defaults.max_tokens,
                temperature: defaults.temperature,
            },
            screenshot_size: Dimensions::new(defaults.screenshot_width, defaults.screenshot_height),
            image_defaults: ImageDefaults {
                size: Dimensions::new(defaults.image_width, defaults.image_height),
                model: defaults.image_model.clone(),
            },
            voice_defaults: VoiceDefaults {
                voice_id: defaults.voice_id.clone(),
                model_id: defaults.voice_model.clone(),
                max_chars: config.limits.voice_max_chars,
            },
            max_upload_bytes: config.limits.max_upload_bytes,
            max_requests: config.lifecycle.max_requests,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
            shutdown_requested: AtomicBool::new(false),
            shutdown_notify: Arc::new(Notify::new()),
        })
    }

    /// Get uptime.
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Get request count.
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Count a handled request; once the recycling threshold is reached,
    /// request a graceful shutdown. A threshold of 0 disables recycling.
    pub fn record_request(&self) -> u64 {
        let count = self.request_count.fetch_add(1, Ordering::Relaxed) + 1;
        if self.max_requests > 0 && count >= self.max_requests && !self.is_shutdown_requested() {
            info!(
                "Handled {} requests (limit {}), recycling worker",
                count, self.max_requests
            );
            self.request_shutdown();
        }
        count
    }

    /// Request shutdown and notify the server signal handler.
    pub fn request_shutdown(&self) {
        self.shutdown_requested.store(true, Ordering::SeqCst);
        self.shutdown_notify.notify_one();
    }

    /// Check if shutdown is requested.
    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::SeqCst)
    }
}
