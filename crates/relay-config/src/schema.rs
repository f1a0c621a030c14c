//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub providers: ProvidersConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub timeouts: TimeoutsConfig,

    #[serde(default)]
    pub limits: LimitsConfig,

    #[serde(default)]
    pub lifecycle: LifecycleConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Upstream provider settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub gemini: GeminiConfig,

    #[serde(default)]
    pub screenshot: ScreenshotConfig,

    #[serde(default)]
    pub pollinations: PollinationsConfig,

    #[serde(default)]
    pub elevenlabs: ElevenLabsConfig,
}

/// Document question answering (Gemini).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_gemini_url")]
    pub base_url: String,

    #[serde(default = "default_gemini_model")]
    pub model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_gemini_url(),
            model: default_gemini_model(),
        }
    }
}

fn default_gemini_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

/// Webpage screenshots (ScreenshotOne, with a keyless demo fallback).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenshotConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_screenshot_url")]
    pub base_url: String,

    /// Use the rate-limited demo provider when no key is set.
    #[serde(default = "default_true")]
    pub allow_demo_fallback: bool,

    #[serde(default = "default_demo_url")]
    pub demo_url: String,

    #[serde(default = "default_demo_token")]
    pub demo_token: String,
}

impl Default for ScreenshotConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_screenshot_url(),
            allow_demo_fallback: true,
            demo_url: default_demo_url(),
            demo_token: default_demo_token(),
        }
    }
}

fn default_screenshot_url() -> String {
    "https://api.screenshotone.com/take".to_string()
}

fn default_demo_url() -> String {
    "https://shot.screenshotapi.net/screenshot".to_string()
}

fn default_demo_token() -> String {
    "DEMO_TOKEN".to_string()
}

fn default_true() -> bool {
    true
}

/// Image generation (Pollinations). Works without a key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollinationsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_pollinations_url")]
    pub base_url: String,
}

impl Default for PollinationsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_pollinations_url(),
        }
    }
}

fn default_pollinations_url() -> String {
    "https://image.pollinations.ai/prompt".to_string()
}

/// Speech synthesis (ElevenLabs).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElevenLabsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_elevenlabs_url")]
    pub base_url: String,

    #[serde(default = "default_stability")]
    pub stability: f32,

    #[serde(default = "default_similarity_boost")]
    pub similarity_boost: f32,
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_elevenlabs_url(),
            stability: default_stability(),
            similarity_boost: default_similarity_boost(),
        }
    }
}

fn default_elevenlabs_url() -> String {
    "https://api.elevenlabs.io/v1".to_string()
}

fn default_stability() -> f32 {
    0.5
}

fn default_similarity_boost() -> f32 {
    0.75
}

/// Values applied when a client omits a field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_screenshot_width")]
    pub screenshot_width: u32,

    #[serde(default = "default_screenshot_height")]
    pub screenshot_height: u32,

    #[serde(default = "default_image_size")]
    pub image_width: u32,

    #[serde(default = "default_image_size")]
    pub image_height: u32,

    #[serde(default = "default_image_model")]
    pub image_model: String,

    #[serde(default = "default_question")]
    pub question: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_voice_id")]
    pub voice_id: String,

    #[serde(default = "default_voice_model")]
    pub voice_model: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            screenshot_width: default_screenshot_width(),
            screenshot_height: default_screenshot_height(),
            image_width: default_image_size(),
            image_height: default_image_size(),
            image_model: default_image_model(),
            question: default_question(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            voice_id: default_voice_id(),
            voice_model: default_voice_model(),
        }
    }
}

fn default_screenshot_width() -> u32 {
    1920
}

fn default_screenshot_height() -> u32 {
    1080
}

fn default_image_size() -> u32 {
    1024
}

fn default_image_model() -> String {
    "flux".to_string()
}

fn default_question() -> String {
    "Solve this JEE question step by step.".to_string()
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_temperature() -> f32 {
    0.7
}

fn default_voice_id() -> String {
    "21m00Tcm4TlvDq8ikWAM".to_string()
}

fn default_voice_model() -> String {
    "eleven_multilingual_v2".to_string()
}

/// Outbound call bounds, in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutsConfig {
    #[serde(default = "default_connect_timeout")]
    pub connect_seconds: u64,

    #[serde(default = "default_slow_timeout")]
    pub document_seconds: u64,

    #[serde(default = "default_screenshot_timeout")]
    pub screenshot_seconds: u64,

    #[serde(default = "default_slow_timeout")]
    pub image_seconds: u64,

    #[serde(default = "default_slow_timeout")]
    pub voice_seconds: u64,
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            connect_seconds: default_connect_timeout(),
            document_seconds: default_slow_timeout(),
            screenshot_seconds: default_screenshot_timeout(),
            image_seconds: default_slow_timeout(),
            voice_seconds: default_slow_timeout(),
        }
    }
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_slow_timeout() -> u64 {
    60
}

fn default_screenshot_timeout() -> u64 {
    30
}

/// Input size limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Longest voiceover text, in characters.
    #[serde(default = "default_voice_max_chars")]
    pub voice_max_chars: usize,

    /// Largest accepted request body (document uploads), in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            voice_max_chars: default_voice_max_chars(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_voice_max_chars() -> usize {
    5000
}

fn default_max_upload_bytes() -> usize {
    20 * 1024 * 1024
}

/// Process lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleConfig {
    /// Shut down gracefully after this many requests so the supervisor
    /// starts a fresh process. 0 disables recycling.
    #[serde(default = "default_max_requests")]
    pub max_requests: u64,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
        }
    }
}

fn default_max_requests() -> u64 {
    100
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
