//! Veracity: claim verification against trusted fact-check sources.
//!
//! One claim goes through a fixed pipeline:
//! Query planning → Search → Source selection → Page fetching → Verdict
//!
//! # Architecture
//!
//! - **Evidence gathering** lives in the `veracity-search` crate: query
//!   variants, search dispatch with backoff and fallback, link vetting,
//!   trusted-domain ranking, page cleaning
//! - **Reasoning**: one OpenAI-compatible chat completion over the
//!   gathered evidence ([`llm`])
//! - **Synthesis**: prompt construction and lenient reply parsing
//!   ([`synthesizer`])
//! - **Orchestration**: [`checker::FactChecker`] runs the stages and turns
//!   every failure into a well-formed [`verdict::VerdictResult`]
//!
//! # Examples
//!
//! ```no_run
//! # async fn example() -> veracity::error::Result<()> {
//! let config = veracity::FactCheckConfig::load(None)?;
//! let checker = veracity::FactChecker::from_config(&config)?;
//! let verdict = checker.verify_statement("the earth is flat").await;
//! println!("{}", verdict.to_json());
//! # Ok(())
//! # }
//! ```

pub mod checker;
pub mod config;
pub mod error;
pub mod llm;
pub mod synthesizer;
pub mod verdict;

pub use checker::{FactChecker, RunReport, RunStage};
pub use config::FactCheckConfig;
pub use error::FactCheckError;
pub use verdict::{Confidence, VerdictResult};
