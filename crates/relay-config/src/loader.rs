//! Configuration loader.
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML file
//! (with `${VAR}` expansion), then the well-known environment variables.

use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::schema::Config;

/// Environment variable carrying the document-QA credential.
pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
/// Environment variable carrying the speech-synthesis credential.
pub const ELEVENLABS_API_KEY: &str = "ELEVENLABS_API_KEY";
/// Optional image-generation credential.
pub const POLLINATIONS_API_KEY: &str = "POLLINATIONS_API_KEY";
/// Optional screenshot credential; without it the demo provider is used.
pub const SCREENSHOTONE_KEY: &str = "SCREENSHOTONE_KEY";
/// Listening port.
pub const PORT: &str = "PORT";
/// Request-count recycling threshold.
pub const MAX_REQUESTS: &str = "MAX_REQUESTS";

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Load the optional file, then overlay the process environment.
    pub fn load_with_env(path: Option<&Path>) -> Result<Config, ConfigError> {
        let mut config = match path {
            Some(p) => Self::load(p)?,
            None => Config::default(),
        };
        Self::apply_env(&mut config, |name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Overlay environment values onto `config`.
    ///
    /// `lookup` abstracts the environment so tests need not mutate it.
    /// Empty values count as unset.
    pub fn apply_env<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(GEMINI_API_KEY) {
            config.providers.gemini.api_key = Some(key);
        }
        if let Some(key) = get(ELEVENLABS_API_KEY) {
            config.providers.elevenlabs.api_key = Some(key);
        }
        if let Some(key) = get(POLLINATIONS_API_KEY) {
            config.providers.pollinations.api_key = Some(key);
        }
        if let Some(key) = get(SCREENSHOTONE_KEY) {
            config.providers.screenshot.api_key = Some(key);
        }
        if let Some(port) = get(PORT) {
            config.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: PORT.to_string(),
                message: format!("'{}' is not a port number", port),
            })?;
        }
        if let Some(max) = get(MAX_REQUESTS) {
            config.lifecycle.max_requests =
                max.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    field: MAX_REQUESTS.to_string(),
                    message: format!("'{}' is not a non-negative integer", max),
                })?;
        }
        Ok(())
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = regex::Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.config`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
