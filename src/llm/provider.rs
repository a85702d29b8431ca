//! The reasoning capability seam.
//!
//! A run calls [`ReasoningProvider::generate`] exactly once with a system
//! prompt and a user prompt, and gets back raw text plus token counts.
//! Parsing that text into a verdict is the synthesizer's job.

use async_trait::async_trait;

use super::error::LlmError;
use super::usage::TokenUsage;

/// Raw output of one reasoning call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generation {
    /// The model's reply, unparsed.
    pub text: String,
    /// Token counts reported for the call.
    pub usage: TokenUsage,
}

impl Generation {
    /// Create a generation from its parts.
    pub fn new(text: impl Into<String>, usage: TokenUsage) -> Self {
        Self {
            text: text.into(),
            usage,
        }
    }
}

/// A backend that turns prompts into text.
///
/// The reply may be malformed; only transport, auth and protocol problems
/// are errors.
#[async_trait]
pub trait ReasoningProvider: Send + Sync {
    /// Short provider name used in logs.
    fn name(&self) -> &str;

    /// Run one completion.
    async fn generate(&self, system_prompt: &str, user_prompt: &str)
    -> Result<Generation, LlmError>;
}

#[async_trait]
impl<P: ReasoningProvider + ?Sized> ReasoningProvider for std::sync::Arc<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<Generation, LlmError> {
        (**self).generate(system_prompt, user_prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Echo;

    #[async_trait]
    impl ReasoningProvider for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        async fn generate(
            &self,
            system_prompt: &str,
            user_prompt: &str,
        ) -> Result<Generation, LlmError> {
            Ok(Generation::new(
                format!("{system_prompt}|{user_prompt}"),
                TokenUsage::new(2, 1),
            ))
        }
    }

    #[tokio::test]
    async fn arc_forwards_to_inner_provider() {
        let provider: Arc<dyn ReasoningProvider> = Arc::new(Echo);
        assert_eq!(provider.name(), "echo");
        let generation = provider.generate("sys", "user").await.unwrap();
        assert_eq!(generation.text, "sys|user");
        assert_eq!(generation.usage.total(), 3);
    }
}
