//! Verdict synthesis: one reasoning call over the gathered evidence.
//!
//! [`build_prompt`] lays the evidence out as `SOURCE:` blocks under fixed
//! verification rules, [`parse_verdict`] reads the reply leniently, and
//! [`synthesize`] runs the call and records its token usage.

use serde_json::Value;
use veracity_search::EvidenceSource;

use crate::error::FactCheckError;
use crate::llm::provider::ReasoningProvider;
use crate::llm::usage::{CumulativeUsage, TokenUsage};
use crate::verdict::{Confidence, VerdictResult};

/// System prompt sent with every reasoning call.
pub const SYSTEM_PROMPT: &str =
    "You are a fact-checking assistant that verifies statements against reliable sources.";

const RESPONSE_SCHEMA: &str = r#"{
    "is_correct": true/false,
    "confidence": "high/medium/low",
    "explanation": "A detailed explanation of why the statement is correct or incorrect",
    "facts_found": ["relevant fact 1", "relevant fact 2", "relevant fact 3"],
    "inaccuracies": ["inaccuracy 1", "inaccuracy 2"],
    "missing_context": "Important context that might be missing from the statement",
    "sources": ["source URL 1", "source URL 2"]
}"#;

const RULES: &str = "\
1. Only mark a statement as correct if it is fully supported by the sources
2. If the statement is partially correct, mark it as incorrect and explain which parts are correct and which are not
3. If there isn't enough information to verify, indicate low confidence
4. Be specific about why something is factually correct or incorrect
5. Respond with exactly one JSON object and nothing else";

/// Build the user prompt for `claim` over `evidence`.
///
/// Each source contributes one `SOURCE: <url>\n<content>\n\n` block, in
/// evidence order.
pub fn build_prompt(claim: &str, evidence: &[EvidenceSource]) -> String {
    let mut blocks = String::new();
    for source in evidence {
        blocks.push_str("SOURCE: ");
        blocks.push_str(&source.url);
        blocks.push('\n');
        blocks.push_str(&source.content);
        blocks.push_str("\n\n");
    }

    format!(
        "Given the following statement and content from multiple web sources, verify if the \
         statement is factually correct.\n\n\
         STATEMENT TO VERIFY: \"{claim}\"\n\n\
         CONTENT FROM VARIOUS SOURCES:\n\
         {blocks}\
         Return your analysis as a JSON object with the following structure:\n\
         {RESPONSE_SCHEMA}\n\n\
         Rules for verification:\n\
         {RULES}\n"
    )
}

/// Locate the JSON object in a reasoning reply.
///
/// Tries the whole reply first, then the span from the first `{` to the
/// last `}`.
pub fn extract_json_object(text: &str) -> Option<serde_json::Map<String, Value>> {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(text.trim()) {
        return Some(map);
    }
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    match serde_json::from_str::<Value>(&text[start..=end]) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Read a reasoning reply into a verdict.
///
/// Missing or mistyped fields fall back: `is_correct` to null, unknown
/// confidence labels to `low`, text fields to empty, and absent or empty
/// `sources` to `evidence_urls`. Token usage is left at zero.
///
/// # Errors
///
/// Returns [`FactCheckError::ReasoningParse`] if no JSON object can be found.
pub fn parse_verdict(text: &str, evidence_urls: &[String]) -> Result<VerdictResult, FactCheckError> {
    let object = extract_json_object(text).ok_or_else(|| {
        FactCheckError::ReasoningParse(format!(
            "no JSON object in reply ({} chars)",
            text.chars().count()
        ))
    })?;

    let confidence = object
        .get("confidence")
        .and_then(Value::as_str)
        .map_or(Confidence::Low, Confidence::from_label);

    let mut sources = string_list(object.get("sources"));
    if sources.is_empty() {
        sources = evidence_urls.to_vec();
    }

    Ok(VerdictResult {
        is_correct: object.get("is_correct").and_then(Value::as_bool),
        confidence,
        explanation: string_field(object.get("explanation")),
        facts_found: string_list(object.get("facts_found")),
        inaccuracies: string_list(object.get("inaccuracies")),
        missing_context: string_field(object.get("missing_context")),
        sources,
        token_usage: Default::default(),
        cumulative_token_usage: Default::default(),
    })
}

fn string_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(" "),
        _ => String::new(),
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

/// Outcome of the synthesis stage.
#[derive(Debug)]
pub struct Synthesis {
    /// The verdict, with both usage blocks attached.
    pub result: VerdictResult,
    /// The user prompt that was sent.
    pub prompt: String,
    /// Tokens reported for this call (zero if the call failed).
    pub usage: TokenUsage,
    /// Why the verdict is degraded, if it is.
    pub error: Option<FactCheckError>,
}

/// Invoke `provider` once for `claim` over `evidence`.
///
/// Never fails: call and parse errors become a degraded verdict carrying
/// the error message. Reported token counts are added to `cumulative`
/// whether or not the reply parses.
pub async fn synthesize<P: ReasoningProvider + ?Sized>(
    claim: &str,
    evidence: &[EvidenceSource],
    provider: &P,
    cumulative: &CumulativeUsage,
) -> Synthesis {
    let prompt = build_prompt(claim, evidence);
    let evidence_urls: Vec<String> = evidence.iter().map(|e| e.url.clone()).collect();

    tracing::info!(provider = provider.name(), sources = evidence.len(), "synthesizing verdict");

    let generation = match provider.generate(SYSTEM_PROMPT, &prompt).await {
        Ok(generation) => generation,
        Err(err) => {
            tracing::warn!(
                code = err.code(),
                retryable = err.is_retryable(),
                error = %err,
                "reasoning call failed"
            );
            let err = FactCheckError::Llm(err);
            return Synthesis {
                result: VerdictResult::reasoning_error(&err, evidence_urls)
                    .with_usage(TokenUsage::default(), cumulative.snapshot()),
                prompt,
                usage: TokenUsage::default(),
                error: Some(err),
            };
        }
    };

    cumulative.record(&generation.usage);
    let usage = generation.usage;
    tracing::debug!(
        input_tokens = usage.prompt_tokens,
        output_tokens = usage.completion_tokens,
        total_tokens = usage.total(),
        "reasoning call complete"
    );

    match parse_verdict(&generation.text, &evidence_urls) {
        Ok(verdict) => Synthesis {
            result: verdict.with_usage(usage, cumulative.snapshot()),
            prompt,
            usage,
            error: None,
        },
        Err(err) => {
            tracing::warn!(error = %err, "reasoning reply unusable");
            Synthesis {
                result: VerdictResult::reasoning_error(&err, evidence_urls)
                    .with_usage(usage, cumulative.snapshot()),
                prompt,
                usage,
                error: Some(err),
            }
        }
    }
}
