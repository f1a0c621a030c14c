//! # relay-core
//!
//! Shared building blocks for the relay worker:
//!
//! - [`request`] - validated, typed request objects built from raw client input
//! - [`types`] - payloads handed back to the caller ([`BinaryAsset`], [`DocumentAnswer`])
//! - [`outbound`] - the single-shot HTTP call every provider goes through
//! - [`error`] - the provider-level and endpoint-level error taxonomy
//!
//! Every request object in [`request`] is fully validated before a provider
//! sees it, so providers never re-check client input.

pub mod error;
pub mod outbound;
pub mod request;
pub mod types;

pub use error::{ErrorKind, ProviderError, RelayError};
pub use outbound::{AssetProvider, OutboundClient};
pub use request::{
    check_document_type, Dimensions, DocumentDefaults, DocumentQaPayload, DocumentQaRequest,
    ImageDefaults, ImageGenPayload, ImageGenRequest, ScreenshotPayload, ScreenshotRequest,
    VoiceDefaults, VoiceoverPayload, VoiceoverRequest, PDF_MIME,
};
pub use types::*;
