use serde::Deserialize;
use url::Url;

use super::Dimensions;
use crate::error::RelayError;

/// Screenshot request body as sent by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct ScreenshotPayload {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub full_page: bool,
}

/// A screenshot capture ready to be forwarded.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenshotRequest {
    pub url: Url,
    pub width: u32,
    pub height: u32,
    pub full_page: bool,
}

impl ScreenshotPayload {
    pub fn validate(self, defaults: Dimensions) -> Result<ScreenshotRequest, RelayError> {
        let url = parse_target_url(&self.url)?;
        let size = defaults.resolve(self.width, self.height)?;
        Ok(ScreenshotRequest {
            url,
            width: size.width,
            height: size.height,
            full_page: self.full_page,
        })
    }
}

/// Accept only absolute http(s) URLs with a host.
fn parse_target_url(raw: &str) -> Result<Url, RelayError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| RelayError::validation("url", format!("not a valid absolute URL ({})", e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(RelayError::validation("url", "scheme must be http or https"));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(RelayError::validation("url", "must include a host"));
    }
    Ok(url)
}
