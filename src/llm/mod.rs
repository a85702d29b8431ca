//! Reasoning provider layer.
//!
//! - [`provider`]: the [`ReasoningProvider`] trait a run calls once per claim
//! - [`openai`]: OpenAI-compatible chat completions client (Groq by default)
//! - [`usage`]: per-call [`TokenUsage`] and shared [`CumulativeUsage`]
//! - [`error`]: [`LlmError`] with stable codes

pub mod error;
pub mod openai;
pub mod provider;
pub mod usage;

pub use error::LlmError;
pub use openai::{OpenAiConfig, OpenAiProvider};
pub use provider::{Generation, ReasoningProvider};
pub use usage::{CumulativeUsage, TokenUsage};
