//! Error types for the relay.
//!
//! [`ProviderError`] describes what went wrong on a single outbound call.
//! [`RelayError`] is what an endpoint reports back to its caller.

mod provider;
mod relay;

pub use provider::*;
pub use relay::*;
