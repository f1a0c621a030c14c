//! Payloads returned to the caller.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Answer text used when the model produced nothing usable.
pub const NO_ANSWER: &str = "No answer generated";

/// Raw bytes relayed from an upstream, with their media type.
#[derive(Debug, Clone)]
pub struct BinaryAsset {
    pub bytes: Bytes,
    pub media_type: String,
}

impl BinaryAsset {
    pub fn new(bytes: impl Into<Bytes>, media_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            media_type: media_type.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// File extension matching the media type.
    pub fn extension(&self) -> &'static str {
        let essence = self
            .media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "image/png" => "png",
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            "audio/mpeg" | "audio/mp3" => "mp3",
            "audio/wav" | "audio/x-wav" => "wav",
            "audio/ogg" => "ogg",
            _ => "bin",
        }
    }

    /// Attachment filename, e.g. `screenshot.png`.
    pub fn filename(&self, stem: &str) -> String {
        format!("{}.{}", stem, self.extension())
    }
}

/// Result of a document question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAnswer {
    pub answer: String,
    pub model: String,
    pub tokens_used: u32,
}

impl DocumentAnswer {
    /// Sentinel answer for an empty or unreadable model response.
    pub fn no_answer(model: impl Into<String>) -> Self {
        Self {
            answer: NO_ANSWER.to_string(),
            model: model.into(),
            tokens_used: 0,
        }
    }

    pub fn is_no_answer(&self) -> bool {
        self.answer == NO_ANSWER
    }
}
