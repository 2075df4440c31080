//! Per-session chat orchestration.

use std::sync::Arc;

use log::debug;
use nepsehub_core::{Admission, Session};

use crate::error::AiError;
use crate::generator::TextGenerator;

/// A delivered reply, flagged when it was replayed from the session's
/// last exchange instead of freshly generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantReply {
    pub text: String,
    pub replayed: bool,
}

/// Routes prompts through a session's rate limiter to a [`TextGenerator`].
pub struct Assistant {
    generator: Arc<dyn TextGenerator>,
}

impl Assistant {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Answer `prompt` within `session`'s chat rate limit.
    ///
    /// An admitted prompt is sent to the generator and the exchange is
    /// remembered on the session. A denied prompt is served from the
    /// remembered exchange when it repeats the last served prompt;
    /// otherwise it fails with [`AiError::RateLimited`]. An admitted
    /// prompt whose generation fails still counts against the window.
    pub async fn respond(
        &self,
        session: &Session,
        prompt: &str,
    ) -> Result<AssistantReply, AiError> {
        match session.admit() {
            Admission::Allowed => {
                let text = self.generator.generate(prompt).await?;
                session.remember_exchange(prompt, &text);
                Ok(AssistantReply {
                    text,
                    replayed: false,
                })
            }
            Admission::Denied { retry_after } => match session.replay(prompt) {
                Some(text) => {
                    debug!("replaying last reply for rate-limited session {}", session.id());
                    Ok(AssistantReply {
                        text,
                        replayed: true,
                    })
                }
                None => Err(AiError::RateLimited { retry_after }),
            },
        }
    }
}
