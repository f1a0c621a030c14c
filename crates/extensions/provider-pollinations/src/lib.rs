//! # relay-provider-pollinations
//!
//! Generates images from a text prompt. The whole request is encoded in the
//! URL, so identical requests produce identical outbound URLs.

mod provider;

pub use provider::{PollinationsProvider, SERVICE};
