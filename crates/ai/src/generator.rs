//! The prompt-to-reply boundary.

use async_trait::async_trait;

use crate::error::AiError;

/// A black-box text generator: one prompt in, one reply or error out.
///
/// Implementations may be slow and may fail; callers decide what context
/// data goes into the prompt and what to do with the reply. Tests swap in
/// scripted implementations.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, AiError>;
}
