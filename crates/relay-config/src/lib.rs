//! # relay-config
//!
//! Configuration for the relay worker: a TOML schema with defaults for every
//! field, a loader that expands `${VAR}` references and overlays the
//! process environment, and a validator that separates hard errors from
//! warnings such as a missing optional credential.
//!
//! The resulting [`Config`] is built once at startup and never mutated.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::{
    ConfigLoader, ELEVENLABS_API_KEY, GEMINI_API_KEY, MAX_REQUESTS, POLLINATIONS_API_KEY, PORT,
    SCREENSHOTONE_KEY,
};
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
