use serde::Deserialize;

use super::{or_default, Dimensions};
use crate::error::RelayError;

/// Defaults for omitted image-generation fields.
#[derive(Debug, Clone)]
pub struct ImageDefaults {
    pub size: Dimensions,
    pub model: String,
}

impl Default for ImageDefaults {
    fn default() -> Self {
        Self {
            size: Dimensions::new(1024, 1024),
            model: "flux".to_string(),
        }
    }
}

/// Image generation body as sent by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageGenPayload {
    pub prompt: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub model: Option<String>,
}

/// An image generation ready to be forwarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageGenRequest {
    pub prompt: String,
    pub width: u32,
    pub height: u32,
    pub seed: Option<u64>,
    pub model: String,
}

impl ImageGenPayload {
    pub fn validate(self, defaults: &ImageDefaults) -> Result<ImageGenRequest, RelayError> {
        let prompt = self.prompt.trim();
        if prompt.is_empty() {
            return Err(RelayError::validation("prompt", "must not be empty"));
        }
        let size = defaults.size.resolve(self.width, self.height)?;

        Ok(ImageGenRequest {
            prompt: prompt.to_string(),
            width: size.width,
            height: size.height,
            seed: self.seed,
            model: or_default(self.model, &defaults.model),
        })
    }
}
