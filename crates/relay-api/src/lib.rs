//! # relay-api
//!
//! HTTP surface of the relay worker.
//!
//! Every relay endpoint follows the same path: validate the client input into
//! a typed request, hand it to one provider, and map the outcome either to a
//! JSON body, a binary attachment, or the uniform error envelope.
//!
//! ```text
//! client ──► handler ──► validate ──► provider ──► upstream API
//!                │                        │
//!                ◄──── ApiError ◄─────────┘
//! ```

pub mod error;
pub mod http;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use http::routes::create_router;
pub use server::{RelayServer, ServerConfig};
pub use state::AppState;
