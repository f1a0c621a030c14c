//! # relay-provider-elevenlabs
//!
//! Synthesizes speech from text with the ElevenLabs text-to-speech API and
//! relays the MP3 bytes.

mod provider;
mod types;

pub use provider::{ElevenLabsProvider, SERVICE};
pub use types::*;
