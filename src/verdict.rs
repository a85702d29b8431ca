//! The verdict returned for every claim.
//!
//! [`VerdictResult`] serializes to the JSON object consumed by callers:
//!
//! ```json
//! {
//!   "is_correct": false,
//!   "confidence": "high",
//!   "explanation": "...",
//!   "facts_found": ["..."],
//!   "inaccuracies": ["..."],
//!   "missing_context": "...",
//!   "sources": ["https://..."],
//!   "token_usage": {"input_tokens": 0, "output_tokens": 0, "total_tokens": 0},
//!   "cumulative_token_usage": {"total_input_tokens": 0, "total_output_tokens": 0, "total_tokens": 0}
//! }
//! ```
//!
//! Every key is always present; `is_correct` is `null` when the claim could
//! not be judged.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::llm::usage::TokenUsage;

/// How sure the verdict is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
    /// No judgment was possible.
    None,
}

impl Confidence {
    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::None => "none",
        }
    }

    /// Parse a reasoning-model confidence label. Unknown labels map to
    /// [`Confidence::Low`].
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            "none" => Self::None,
            _ => Self::Low,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token counts for the call that produced this verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsageReport {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
}

impl From<TokenUsage> for TokenUsageReport {
    fn from(usage: TokenUsage) -> Self {
        Self {
            input_tokens: usage.prompt_tokens,
            output_tokens: usage.completion_tokens,
            total_tokens: usage.total(),
        }
    }
}

/// Lifetime token counts of the checker that produced this verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CumulativeTokenUsage {
    pub total_input_tokens: u64,
    pub total_output_tokens: u64,
    pub total_tokens: u64,
}

impl From<TokenUsage> for CumulativeTokenUsage {
    fn from(usage: TokenUsage) -> Self {
        Self {
            total_input_tokens: usage.prompt_tokens,
            total_output_tokens: usage.completion_tokens,
            total_tokens: usage.total(),
        }
    }
}

/// Structured judgment of one claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictResult {
    /// `Some(true)` only when the evidence fully supports the claim.
    pub is_correct: Option<bool>,
    pub confidence: Confidence,
    pub explanation: String,
    pub facts_found: Vec<String>,
    pub inaccuracies: Vec<String>,
    pub missing_context: String,
    pub sources: Vec<String>,
    pub token_usage: TokenUsageReport,
    pub cumulative_token_usage: CumulativeTokenUsage,
}

impl VerdictResult {
    /// A `confidence = "none"` result with zeroed token usage.
    fn unverified(
        explanation: impl Into<String>,
        inaccuracy: &str,
        missing_context: &str,
        sources: Vec<String>,
    ) -> Self {
        Self {
            is_correct: None,
            confidence: Confidence::None,
            explanation: explanation.into(),
            facts_found: Vec::new(),
            inaccuracies: vec![inaccuracy.to_owned()],
            missing_context: missing_context.to_owned(),
            sources,
            token_usage: TokenUsageReport::default(),
            cumulative_token_usage: CumulativeTokenUsage::default(),
        }
    }

    /// The claim was empty after trimming.
    pub fn invalid_claim() -> Self {
        Self::unverified(
            "Empty claim provided.",
            "No claim to verify",
            "A non-empty statement is required for fact checking",
            Vec::new(),
        )
    }

    /// No trusted source was selected.
    pub fn no_sources() -> Self {
        Self::unverified(
            "Could not find reliable sources to verify this statement. This may indicate \
             the statement is too specific, recent, or not widely fact-checked.",
            "No trusted sources available for verification",
            "Unable to verify without access to reliable fact-checking sources",
            Vec::new(),
        )
    }

    /// Sources were selected but none yielded usable content.
    pub fn no_content(attempted: Vec<String>) -> Self {
        Self::unverified(
            "Failed to extract content from any of the linked pages.",
            "No content could be extracted from sources",
            "Unable to verify due to content extraction failures",
            attempted,
        )
    }

    /// The reasoning call failed or its reply could not be parsed.
    pub fn reasoning_error(error: &dyn fmt::Display, sources: Vec<String>) -> Self {
        Self::unverified(
            format!("Error occurred during fact checking: {error}"),
            "Error processing fact check",
            "Could not complete the fact check due to an error",
            sources,
        )
    }

    /// Attach the per-call and cumulative token counts.
    pub fn with_usage(mut self, call: TokenUsage, cumulative: TokenUsage) -> Self {
        self.token_usage = call.into();
        self.cumulative_token_usage = cumulative.into();
        self
    }

    /// Serialize to the wire JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        // Every field serializes infallibly (strings, numbers, bools, enums).
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: &[&str] = &[
        "is_correct",
        "confidence",
        "explanation",
        "facts_found",
        "inaccuracies",
        "missing_context",
        "sources",
        "token_usage",
        "cumulative_token_usage",
    ];

    #[test]
    fn every_key_serialized() {
        let json = VerdictResult::no_sources().to_json();
        let object = json.as_object().unwrap();
        for key in KEYS {
            assert!(object.contains_key(*key), "missing {key}");
        }
        assert_eq!(object.len(), KEYS.len());
    }

    #[test]
    fn unverified_is_null_and_none() {
        let json = VerdictResult::no_sources().to_json();
        assert!(json["is_correct"].is_null());
        assert_eq!(json["confidence"], "none");
        assert_eq!(json["sources"], serde_json::json!([]));
        assert_eq!(json["token_usage"]["total_tokens"], 0);
    }

    #[test]
    fn no_content_keeps_attempted_links() {
        let result = VerdictResult::no_content(vec!["https://www.snopes.com/a".into()]);
        assert_eq!(result.sources, vec!["https://www.snopes.com/a"]);
        assert_eq!(result.inaccuracies, vec!["No content could be extracted from sources"]);
    }

    #[test]
    fn reasoning_error_embeds_message() {
        let result = VerdictResult::reasoning_error(&"[TIMEOUT_ERROR] 60s", vec![]);
        assert_eq!(
            result.explanation,
            "Error occurred during fact checking: [TIMEOUT_ERROR] 60s"
        );
        assert_eq!(result.inaccuracies, vec!["Error processing fact check"]);
        assert_eq!(result.confidence, Confidence::None);
    }

    #[test]
    fn usage_keys_match_wire_names() {
        let result = VerdictResult::no_sources()
            .with_usage(TokenUsage::new(10, 4), TokenUsage::new(30, 12));
        let json = result.to_json();
        assert_eq!(
            json["token_usage"],
            serde_json::json!({"input_tokens": 10, "output_tokens": 4, "total_tokens": 14})
        );
        assert_eq!(
            json["cumulative_token_usage"],
            serde_json::json!({
                "total_input_tokens": 30,
                "total_output_tokens": 12,
                "total_tokens": 42
            })
        );
    }

    #[test]
    fn confidence_labels() {
        assert_eq!(Confidence::from_label("HIGH"), Confidence::High);
        assert_eq!(Confidence::from_label(" medium "), Confidence::Medium);
        assert_eq!(Confidence::from_label("none"), Confidence::None);
        assert_eq!(Confidence::from_label("very sure"), Confidence::Low);
        assert_eq!(Confidence::Medium.to_string(), "medium");
    }

    #[test]
    fn round_trips_through_json() {
        let result = VerdictResult::invalid_claim();
        let back: VerdictResult = serde_json::from_value(result.to_json()).unwrap();
        assert_eq!(back, result);
    }
}
