//! # relay-provider-screenshot
//!
//! Captures a web page as a PNG through ScreenshotOne. Without an access key
//! the capture can fall back to a public demo endpoint.

mod provider;

pub use provider::{CaptureMode, ScreenshotProvider, SERVICE};
