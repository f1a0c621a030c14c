//! Validated request objects.
//!
//! Each endpoint has a raw payload type (what the client sent, with optional
//! fields) and a request type (what a provider is allowed to see). The only
//! way from one to the other is `validate`, which applies configured defaults
//! and fails with [`RelayError::Validation`] naming the offending field.

mod document;
mod image;
mod screenshot;
mod voice;

pub use document::*;
pub use image::*;
pub use screenshot::*;
pub use voice::*;

use crate::error::RelayError;

/// Largest accepted width or height, in pixels.
pub const MAX_DIMENSION: u32 = 8192;

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Resolve optional client values against these defaults.
    pub(crate) fn resolve(
        &self,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<Dimensions, RelayError> {
        Ok(Dimensions {
            width: check_dimension("width", width.unwrap_or(self.width))?,
            height: check_dimension("height", height.unwrap_or(self.height))?,
        })
    }
}

fn check_dimension(field: &str, value: u32) -> Result<u32, RelayError> {
    if value == 0 || value > MAX_DIMENSION {
        return Err(RelayError::validation(
            field,
            format!("must be between 1 and {}", MAX_DIMENSION),
        ));
    }
    Ok(value)
}

/// Trimmed value of an optional identifier, or the default when absent or blank.
pub(crate) fn or_default(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
