//! Error types for the reasoning provider layer.
//!
//! Every [`LlmError`] maps to one code from [`error_codes`]. The code leads
//! the Display text and is what callers and logs should key on.

/// Codes that stay fixed across releases.
pub mod error_codes {
    /// Provider settings are unusable.
    pub const CONFIG_INVALID: &str = "CONFIG_INVALID";

    /// The endpoint rejected the API key.
    pub const AUTH_FAILED: &str = "AUTH_FAILED";

    /// Request to the provider failed before a response arrived.
    pub const REQUEST_FAILED: &str = "REQUEST_FAILED";

    /// No reply within the request timeout.
    pub const TIMEOUT_ERROR: &str = "TIMEOUT_ERROR";

    /// Any other non-success status.
    pub const PROVIDER_ERROR: &str = "PROVIDER_ERROR";

    /// The provider answered, but not with a usable completion.
    pub const RESPONSE_INVALID: &str = "RESPONSE_INVALID";
}

/// A failed reasoning call, displayed as `[CODE] message`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LlmError {
    /// Missing key, bad base URL, or a client that cannot be built.
    #[error("[{}] {}", error_codes::CONFIG_INVALID, .0)]
    Config(String),

    /// HTTP 401 or 403.
    #[error("[{}] {}", error_codes::AUTH_FAILED, .0)]
    Auth(String),

    /// Transport failure or HTTP 429.
    #[error("[{}] {}", error_codes::REQUEST_FAILED, .0)]
    Request(String),

    #[error("[{}] {}", error_codes::TIMEOUT_ERROR, .0)]
    Timeout(String),

    /// Any other non-2xx status.
    #[error("[{}] {}", error_codes::PROVIDER_ERROR, .0)]
    Provider(String),

    /// A 2xx body without a completion in it.
    #[error("[{}] {}", error_codes::RESPONSE_INVALID, .0)]
    Response(String),
}

impl LlmError {
    /// The code from [`error_codes`] for this failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => error_codes::CONFIG_INVALID,
            Self::Auth(_) => error_codes::AUTH_FAILED,
            Self::Request(_) => error_codes::REQUEST_FAILED,
            Self::Timeout(_) => error_codes::TIMEOUT_ERROR,
            Self::Provider(_) => error_codes::PROVIDER_ERROR,
            Self::Response(_) => error_codes::RESPONSE_INVALID,
        }
    }

    /// The detail text, without the `[CODE]` prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Config(m)
            | Self::Auth(m)
            | Self::Request(m)
            | Self::Timeout(m)
            | Self::Provider(m)
            | Self::Response(m) => m,
        }
    }

    /// Returns true if this error represents a transient failure.
    ///
    /// A run never retries the reasoning call itself; callers that wrap a
    /// provider can use this to decide.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Config(_) | Self::Auth(_) | Self::Response(_) => false,
            Self::Request(_) | Self::Timeout(_) | Self::Provider(_) => true,
        }
    }
}

/// Convenience alias for provider results.
pub type Result<T> = std::result::Result<T, LlmError>;
