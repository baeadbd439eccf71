//! Configuration loading and management.
//!
//! An [`ExtractorConfig`] describes the two providers (endpoints, deadlines,
//! payload knobs), where the API token comes from, and how provider output is
//! cleaned up. It can be loaded from TOML, YAML, or JSON, discovered from a
//! `docsift.toml` in the project hierarchy, or built programmatically.

use crate::{DocsiftError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Name of the configuration file searched by [`ExtractorConfig::discover`].
pub const CONFIG_FILE_NAME: &str = "docsift.toml";

/// Instruction sent to the fallback provider alongside the document.
pub const DEFAULT_FALLBACK_INSTRUCTION: &str =
    "Extract all text from this document exactly as written. Preserve the original language, \
     line breaks, tables and mathematical notation. Return only the extracted text.";

/// Main extractor configuration.
///
/// # Example
///
/// ```rust
/// use docsift::core::config::ExtractorConfig;
///
/// let mut config = ExtractorConfig::default();
/// config.primary.endpoint = "https://inference.example.com/models/ocr".to_string();
/// config.fallback.endpoint = "https://space.example.com/run/predict".to_string();
/// assert_eq!(config.primary.timeout_secs, 45);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Primary provider (tried first, under a hard deadline)
    #[serde(default)]
    pub primary: InferenceProviderConfig,

    /// Fallback provider (tried once after any primary failure)
    #[serde(default)]
    pub fallback: GradioProviderConfig,

    /// Environment variable holding the bearer token
    #[serde(default = "default_token_env")]
    pub api_token_env: String,

    /// Post-extraction text cleanup
    #[serde(default)]
    pub cleanup: TextCleanupConfig,
}

/// Primary provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceProviderConfig {
    /// Absolute http(s) URL of the inference endpoint
    #[serde(default)]
    pub endpoint: String,

    /// Hard deadline for one attempt, in seconds
    #[serde(default = "default_primary_timeout_secs")]
    pub timeout_secs: u64,

    /// Upper bound on generated tokens, forwarded as a generation parameter
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: u32,

    /// Ask the provider to block until a cold model is loaded
    #[serde(default)]
    pub wait_for_model: bool,

    /// Send the bearer token with requests
    #[serde(default = "default_true")]
    pub requires_auth: bool,
}

/// Fallback provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradioProviderConfig {
    /// Absolute http(s) URL of the prediction endpoint
    #[serde(default)]
    pub endpoint: String,

    /// Instruction string sent with the payload
    #[serde(default = "default_instruction")]
    pub instruction: String,

    /// Model tag sent as the third positional input
    #[serde(default = "default_model_tag")]
    pub model_tag: String,

    /// Transport timeout for one attempt, in seconds
    #[serde(default = "default_fallback_timeout_secs")]
    pub timeout_secs: u64,

    /// Send the bearer token with requests
    #[serde(default)]
    pub requires_auth: bool,
}

/// Cleanup applied to raw provider text before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextCleanupConfig {
    /// Strip control characters and normalize whitespace
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Replace digits that sit inside words with look-alike letters (0→O, 1→I, 5→S)
    #[serde(default)]
    pub substitute_confusables: bool,
}

fn default_true() -> bool {
    true
}
fn default_token_env() -> String {
    "DOCSIFT_API_TOKEN".to_string()
}
fn default_primary_timeout_secs() -> u64 {
    45
}
fn default_fallback_timeout_secs() -> u64 {
    90
}
fn default_max_new_tokens() -> u32 {
    2048
}
fn default_instruction() -> String {
    DEFAULT_FALLBACK_INSTRUCTION.to_string()
}
fn default_model_tag() -> String {
    "default".to_string()
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            primary: InferenceProviderConfig::default(),
            fallback: GradioProviderConfig::default(),
            api_token_env: default_token_env(),
            cleanup: TextCleanupConfig::default(),
        }
    }
}

impl Default for InferenceProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            timeout_secs: default_primary_timeout_secs(),
            max_new_tokens: default_max_new_tokens(),
            wait_for_model: false,
            requires_auth: true,
        }
    }
}

impl Default for GradioProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            instruction: default_instruction(),
            model_tag: default_model_tag(),
            timeout_secs: default_fallback_timeout_secs(),
            requires_auth: false,
        }
    }
}

impl Default for TextCleanupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            substitute_confusables: false,
        }
    }
}

impl InferenceProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl GradioProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ExtractorConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `DocsiftError::Validation` if the file can't be read or is invalid TOML.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;
        toml::from_str(&content)
            .map_err(|e| DocsiftError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;
        serde_yaml_ng::from_str(&content)
            .map_err(|e| DocsiftError::validation(format!("Invalid YAML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;
        serde_json::from_str(&content)
            .map_err(|e| DocsiftError::validation(format!("Invalid JSON in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration, picking the parser from the file extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("toml") => Self::from_toml_file(path),
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(DocsiftError::validation(format!(
                "Unsupported config file extension: {}",
                path.display()
            ))),
        }
    }

    /// Discover `docsift.toml` in the current directory or any parent.
    ///
    /// # Returns
    ///
    /// - `Some(config)` if found
    /// - `None` if no config file found
    pub fn discover() -> Result<Option<Self>> {
        let mut current = std::env::current_dir().map_err(DocsiftError::Io)?;

        loop {
            let candidate = current.join(CONFIG_FILE_NAME);
            if candidate.exists() {
                tracing::debug!("Using configuration from {}", candidate.display());
                return Ok(Some(Self::from_toml_file(candidate)?));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }

    /// Read the API token from the configured environment variable.
    ///
    /// Empty values count as unset.
    pub fn api_token(&self) -> Option<String> {
        std::env::var(&self.api_token_env)
            .ok()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
    }

    /// Check endpoints and timeouts.
    ///
    /// # Errors
    ///
    /// Returns `DocsiftError::Validation` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        validate_endpoint("primary.endpoint", &self.primary.endpoint)?;
        validate_endpoint("fallback.endpoint", &self.fallback.endpoint)?;

        if self.primary.timeout_secs == 0 {
            return Err(DocsiftError::validation("primary.timeout_secs must be greater than 0"));
        }
        if self.fallback.timeout_secs == 0 {
            return Err(DocsiftError::validation("fallback.timeout_secs must be greater than 0"));
        }
        if self.api_token_env.trim().is_empty() {
            return Err(DocsiftError::validation("api_token_env must not be empty"));
        }

        Ok(())
    }
}

fn read_config(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| DocsiftError::validation(format!("Failed to read config file {}: {}", path.display(), e)))
}

fn validate_endpoint(field: &str, endpoint: &str) -> Result<()> {
    if endpoint.trim().is_empty() {
        return Err(DocsiftError::validation(format!("{field} must be set")));
    }

    let url = reqwest::Url::parse(endpoint)
        .map_err(|e| DocsiftError::validation_with_source(format!("{field} is not a valid URL: {endpoint}"), e))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(DocsiftError::validation(format!(
            "{field} must use http or https, got '{other}'"
        ))),
    }
}
