//! Configuration validation.

use crate::error::ConfigError;
use crate::loader::{ELEVENLABS_API_KEY, GEMINI_API_KEY, SCREENSHOTONE_KEY};
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    ///
    /// Missing credentials are warnings: the affected endpoints answer with a
    /// configuration error at request time instead of preventing startup.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_server(config, &mut result);
        Self::validate_providers(config, &mut result);
        Self::validate_defaults(config, &mut result);
        Self::validate_timeouts(config, &mut result);
        Self::validate_limits(config, &mut result);

        Ok(result)
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        if config.server.port == 0 {
            result.add_error(ValidationError::new("server.port", "Port cannot be 0"));
        }

        if config.server.host.is_empty() {
            result.add_error(ValidationError::new("server.host", "Host cannot be empty"));
        }
    }

    fn validate_providers(config: &Config, result: &mut ValidationResult) {
        let providers = &config.providers;
        let urls = [
            ("providers.gemini.base_url", &providers.gemini.base_url),
            ("providers.screenshot.base_url", &providers.screenshot.base_url),
            ("providers.screenshot.demo_url", &providers.screenshot.demo_url),
            ("providers.pollinations.base_url", &providers.pollinations.base_url),
            ("providers.elevenlabs.base_url", &providers.elevenlabs.base_url),
        ];
        for (path, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                result.add_error(ValidationError::new(
                    path,
                    "URL must start with http:// or https://",
                ));
            }
        }

        if providers.gemini.api_key.is_none() {
            result.add_warning(ValidationWarning::new(
                "providers.gemini.api_key",
                format!("{} is not set, /solve-pdf will be unavailable", GEMINI_API_KEY),
            ));
        }
        if providers.elevenlabs.api_key.is_none() {
            result.add_warning(ValidationWarning::new(
                "providers.elevenlabs.api_key",
                format!("{} is not set, /voiceover will be unavailable", ELEVENLABS_API_KEY),
            ));
        }
        if providers.screenshot.api_key.is_none() {
            let message = if providers.screenshot.allow_demo_fallback {
                format!(
                    "{} is not set, screenshots use the rate-limited demo provider",
                    SCREENSHOTONE_KEY
                )
            } else {
                format!(
                    "{} is not set and demo fallback is disabled, /screenshot will be unavailable",
                    SCREENSHOTONE_KEY
                )
            };
            result.add_warning(ValidationWarning::new("providers.screenshot.api_key", message));
        }

        for (path, value) in [
            ("providers.elevenlabs.stability", providers.elevenlabs.stability),
            (
                "providers.elevenlabs.similarity_boost",
                providers.elevenlabs.similarity_boost,
            ),
        ] {
            if !(0.0..=1.0).contains(&value) {
                result.add_error(ValidationError::new(path, "must be between 0.0 and 1.0"));
            }
        }
    }

    fn validate_defaults(config: &Config, result: &mut ValidationResult) {
        let defaults = &config.defaults;
        for (path, value) in [
            ("defaults.screenshot_width", defaults.screenshot_width),
            ("defaults.screenshot_height", defaults.screenshot_height),
            ("defaults.image_width", defaults.image_width),
            ("defaults.image_height", defaults.image_height),
        ] {
            if value == 0 {
                result.add_error(ValidationError::new(path, "must be greater than 0"));
            }
        }

        if defaults.max_tokens == 0 {
            result.add_error(ValidationError::new(
                "defaults.max_tokens",
                "max_tokens must be greater than 0",
            ));
        }
        if !(0.0..=2.0).contains(&defaults.temperature) {
            result.add_error(ValidationError::new(
                "defaults.temperature",
                "temperature must be between 0.0 and 2.0",
            ));
        }
        for (path, value) in [
            ("defaults.image_model", &defaults.image_model),
            ("defaults.voice_id", &defaults.voice_id),
            ("defaults.voice_model", &defaults.voice_model),
        ] {
            if value.trim().is_empty() {
                result.add_error(ValidationError::new(path, "cannot be empty"));
            }
        }
    }

    fn validate_timeouts(config: &Config, result: &mut ValidationResult) {
        let timeouts = &config.timeouts;
        for (path, value) in [
            ("timeouts.connect_seconds", timeouts.connect_seconds),
            ("timeouts.document_seconds", timeouts.document_seconds),
            ("timeouts.screenshot_seconds", timeouts.screenshot_seconds),
            ("timeouts.image_seconds", timeouts.image_seconds),
            ("timeouts.voice_seconds", timeouts.voice_seconds),
        ] {
            if value == 0 {
                result.add_error(ValidationError::new(path, "timeout must be greater than 0"));
            } else if value > 600 {
                result.add_warning(ValidationWarning::new(
                    path,
                    "timeout is very high (>600s), a slow upstream can hold a worker for long",
                ));
            }
        }
    }

    fn validate_limits(config: &Config, result: &mut ValidationResult) {
        if config.limits.voice_max_chars == 0 {
            result.add_error(ValidationError::new(
                "limits.voice_max_chars",
                "voice_max_chars must be greater than 0",
            ));
        }
        if config.limits.max_upload_bytes == 0 {
            result.add_error(ValidationError::new(
                "limits.max_upload_bytes",
                "max_upload_bytes must be greater than 0",
            ));
        }
        if config.lifecycle.max_requests == 0 {
            result.add_warning(ValidationWarning::new(
                "lifecycle.max_requests",
                "worker recycling is disabled",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
