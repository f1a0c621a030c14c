//! ElevenLabs API types.

use serde::Serialize;

/// Text-to-speech request body.
#[derive(Debug, Clone, Serialize)]
pub struct SpeechRequest {
    pub text: String,
    pub model_id: String,
    pub voice_settings: VoiceSettings,
}

/// Voice tuning, each value in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.75,
        }
    }
}
