//! # relay-provider-gemini
//!
//! Forwards a PDF and a question to Gemini `generateContent` and reduces the
//! reply to a single answer string.

mod client;
mod provider;
mod types;

pub use provider::{build_request, GeminiProvider, SERVICE};
pub use types::*;
