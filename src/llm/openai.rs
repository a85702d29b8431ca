//! OpenAI-compatible chat completions provider.
//!
//! Sends one non-streaming request to `/v1/chat/completions` and returns
//! the first choice's text with the reported token usage. Defaults point
//! at Groq's OpenAI-compatible endpoint; any server speaking the same
//! protocol works with a different `base_url`.
//!
//! # Examples
//!
//! ```rust,no_run
//! use veracity::llm::openai::{OpenAiConfig, OpenAiProvider};
//! use veracity::llm::provider::ReasoningProvider;
//!
//! # async fn example() -> Result<(), veracity::llm::error::LlmError> {
//! let provider = OpenAiProvider::new(OpenAiConfig::new("gsk-...", "llama-3.3-70b-versatile"))?;
//! let reply = provider.generate("You are terse.", "Say hi").await?;
//! println!("{} ({} tokens)", reply.text, reply.usage.total());
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::error::LlmError;
use super::provider::{Generation, ReasoningProvider};
use super::usage::TokenUsage;

/// Groq's OpenAI-compatible API root.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Sampling temperature used when none is configured.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

// ── Configuration ─────────────────────────────────────────────

/// Configuration for the OpenAI-compatible provider.
#[derive(Clone)]
pub struct OpenAiConfig {
    /// API key for authentication.
    pub api_key: String,
    /// Base URL (defaults to [`DEFAULT_BASE_URL`]).
    pub base_url: String,
    /// The model to use.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Timeout for the whole request.
    pub timeout: Duration,
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl OpenAiConfig {
    /// Create a new config with the given API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.into(),
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the chat completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

// ── Request / response bodies ─────────────────────────────────

/// Build the JSON request body for one system + user exchange.
pub fn build_completions_request(
    model: &str,
    temperature: f32,
    system_prompt: &str,
    user_prompt: &str,
) -> serde_json::Value {
    serde_json::json!({
        "model": model,
        "messages": [
            {"role": "system", "content": system_prompt},
            {"role": "user", "content": user_prompt},
        ],
        "temperature": temperature,
        "stream": false,
    })
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<UsageBody>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageBody {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

/// Parse a chat completions response body into a [`Generation`].
///
/// # Errors
///
/// Returns [`LlmError::Response`] if the body is not a completion or
/// carries no message content.
pub fn parse_completion(body: &str) -> Result<Generation, LlmError> {
    let response: CompletionResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::Response(format!("malformed completion body: {e}")))?;

    let usage = response
        .usage
        .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
        .unwrap_or_default();

    let text = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| LlmError::Response("completion has no message content".into()))?;

    Ok(Generation::new(text, usage))
}

// ── Provider ──────────────────────────────────────────────────

/// OpenAI-compatible reasoning provider.
pub struct OpenAiProvider {
    config: OpenAiConfig,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("model", &self.config.model)
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

impl OpenAiProvider {
    /// Create a provider with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Config`] if the API key is empty or the
    /// HTTP client cannot be built.
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        if config.api_key.trim().is_empty() {
            return Err(LlmError::Config("api_key must not be empty".into()));
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    /// The configured model name.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Map an HTTP error status to the appropriate [`LlmError`].
    fn map_http_error(status: reqwest::StatusCode, body: &str) -> LlmError {
        let message = extract_error_message(body);
        match status.as_u16() {
            401 | 403 => LlmError::Auth(format!("authentication failed: {message}")),
            429 => LlmError::Request(format!("rate limited: {message}")),
            code => LlmError::Provider(format!("HTTP {code}: {message}")),
        }
    }
}

/// Extract an error message from an OpenAI-style error response body.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl ReasoningProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai-compatible"
    }

    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<Generation, LlmError> {
        let url = self.config.completions_url();
        let body = build_completions_request(
            &self.config.model,
            self.config.temperature,
            system_prompt,
            user_prompt,
        );

        tracing::debug!(model = %self.config.model, "sending reasoning request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(format!("reasoning request timed out: {e}"))
                } else {
                    LlmError::Request(format!("reasoning request failed: {e}"))
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::Request(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(Self::map_http_error(status, &text));
        }

        let generation = parse_completion(&text)?;
        tracing::debug!(
            input_tokens = generation.usage.prompt_tokens,
            output_tokens = generation.usage.completion_tokens,
            "reasoning response received"
        );
        Ok(generation)
    }
}
