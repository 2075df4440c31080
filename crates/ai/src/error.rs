//! Error types for the text-generation boundary.

use std::time::Duration;

use thiserror::Error;

/// Failures on the path from a prompt to a generated reply.
#[derive(Debug, Clone, Error)]
pub enum AiError {
    /// No API key available at construction time.
    #[error("GROQ_API_KEY environment variable not set")]
    MissingApiKey,

    /// Network-level failure reaching the provider.
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider answered with an error status or payload.
    #[error("An error occurred with the LLM API: {0}")]
    Provider(String),

    /// The provider answered successfully but with no usable text.
    #[error("the model returned an empty reply")]
    EmptyReply,

    /// The session is over its chat limit and no memoized reply applies.
    #[error("rate limit reached, retry in {}s", retry_after.as_secs())]
    RateLimited { retry_after: Duration },
}

impl From<reqwest::Error> for AiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AiError::Transport(format!("request timed out: {err}"))
        } else {
            AiError::Transport(err.to_string())
        }
    }
}
