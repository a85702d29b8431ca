//! Configuration for a fact checker.
//!
//! Loaded from a TOML file, then overridden from the environment:
//!
//! ```toml
//! api_key = "gsk-..."
//! model = "llama-3.3-70b-versatile"
//! max_links = 3
//!
//! [search]
//! search_timeout_seconds = 25
//! fetch_timeout_seconds = 30
//! ```
//!
//! `VERACITY_API_KEY` (or `GROQ_API_KEY`) and `VERACITY_MODEL` take
//! precedence over the file.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use veracity_search::SearchConfig;

use crate::error::{FactCheckError, Result};
use crate::llm::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE, OpenAiConfig};

/// Primary API key variable.
pub const API_KEY_ENV: &str = "VERACITY_API_KEY";

/// API key variable consulted when [`API_KEY_ENV`] is unset.
pub const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";

/// Model override variable.
pub const MODEL_ENV: &str = "VERACITY_MODEL";

/// Top-level configuration.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactCheckConfig {
    /// Credential for the reasoning provider. Required.
    pub api_key: String,
    /// Model identifier sent to the provider.
    pub model: String,
    /// Root URL of the OpenAI-compatible API.
    pub base_url: String,
    /// Sampling temperature for the reasoning call.
    pub temperature: f32,
    /// Timeout for the reasoning call, in seconds.
    pub request_timeout_seconds: u64,
    /// Cap on distinct sources visited per claim. Overrides `search.max_links`.
    pub max_links: usize,
    /// Evidence-gathering settings.
    pub search: SearchConfig,
}

impl std::fmt::Debug for FactCheckConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactCheckConfig")
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("max_links", &self.max_links)
            .field("search", &self.search)
            .finish()
    }
}

impl Default for FactCheckConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            temperature: DEFAULT_TEMPERATURE,
            request_timeout_seconds: 60,
            max_links: veracity_search::config::DEFAULT_MAX_LINKS,
            search: SearchConfig::default(),
        }
    }
}

impl FactCheckConfig {
    /// A default config using `api_key`.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| FactCheckError::Config(e.to_string()))
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides using `lookup` to read variables.
    ///
    /// Empty values are ignored.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = read(API_KEY_ENV).or_else(|| read(GROQ_API_KEY_ENV)) {
            self.api_key = key;
        }
        if let Some(model) = read(MODEL_ENV) {
            self.model = model;
        }
    }

    /// Load from `path` if given, then apply environment overrides and
    /// validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded or the result is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FactCheckError::Config`] naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(FactCheckError::Config(format!(
                "api_key is required (set it in the config file or {API_KEY_ENV})"
            )));
        }
        if self.model.trim().is_empty() {
            return Err(FactCheckError::Config("model must not be empty".into()));
        }
        if self.max_links == 0 {
            return Err(FactCheckError::Config(
                "max_links must be greater than 0".into(),
            ));
        }
        if self.request_timeout_seconds == 0 {
            return Err(FactCheckError::Config(
                "request_timeout_seconds must be greater than 0".into(),
            ));
        }
        self.search_config().validate()?;
        Ok(())
    }

    /// The search settings with the top-level `max_links` applied.
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            max_links: self.max_links,
            ..self.search.clone()
        }
    }

    /// Settings for the reasoning provider.
    pub fn provider_config(&self) -> OpenAiConfig {
        OpenAiConfig::new(self.api_key.clone(), self.model.clone())
            .with_base_url(self.base_url.clone())
            .with_temperature(self.temperature)
            .with_timeout(Duration::from_secs(self.request_timeout_seconds))
    }
}
