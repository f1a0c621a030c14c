use serde::Deserialize;

use super::or_default;
use crate::error::RelayError;

/// Defaults and limits for speech synthesis.
#[derive(Debug, Clone)]
pub struct VoiceDefaults {
    pub voice_id: String,
    pub model_id: String,
    /// Upper bound on text length, counted in characters.
    pub max_chars: usize,
}

impl Default for VoiceDefaults {
    fn default() -> Self {
        Self {
            voice_id: "21m00Tcm4TlvDq8ikWAM".to_string(),
            model_id: "eleven_multilingual_v2".to_string(),
            max_chars: 5000,
        }
    }
}

/// Voiceover body as sent by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct VoiceoverPayload {
    pub text: String,
    #[serde(default)]
    pub voice_id: Option<String>,
    #[serde(default)]
    pub model_id: Option<String>,
}

/// A speech synthesis ready to be forwarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceoverRequest {
    pub text: String,
    pub voice_id: String,
    pub model_id: String,
}

impl VoiceoverPayload {
    pub fn validate(self, defaults: &VoiceDefaults) -> Result<VoiceoverRequest, RelayError> {
        if self.text.trim().is_empty() {
            return Err(RelayError::validation("text", "must not be empty"));
        }
        if self.text.chars().count() > defaults.max_chars {
            return Err(RelayError::validation(
                "text",
                format!("Text too long (max {} chars)", defaults.max_chars),
            ));
        }

        Ok(VoiceoverRequest {
            text: self.text,
            voice_id: or_default(self.voice_id, &defaults.voice_id),
            model_id: or_default(self.model_id, &defaults.model_id),
        })
    }
}
