//! NEPSE Hub AI Crate
//!
//! The generated-text side of the dashboard:
//!
//! - [`generator`]: the [`TextGenerator`] trait, the black-box boundary
//!   from a prompt to a reply
//! - [`groq`]: the production implementation over the Groq
//!   chat-completions API
//! - [`assistant`]: per-session orchestration tying the rate limiter and
//!   reply memo from `nepsehub-core` to a generator
//!
//! Prompt wording is the caller's business; this crate transports prompts
//! and replies and turns provider failures into typed errors.

pub mod assistant;
pub mod error;
pub mod generator;
pub mod groq;

pub use assistant::{Assistant, AssistantReply};
pub use error::AiError;
pub use generator::TextGenerator;
pub use groq::{GroqClient, GroqConfig};
