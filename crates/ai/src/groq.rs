//! Groq chat-completions client.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::AiError;
use crate::generator::TextGenerator;

const CHAT_COMPLETIONS_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const API_KEY_ENV: &str = "GROQ_API_KEY";

const DEFAULT_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_COMPLETION_TOKENS: u32 = 1024;
const DEFAULT_TOP_P: f32 = 1.0;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Generation settings for [`GroqClient`].
#[derive(Debug, Clone)]
pub struct GroqConfig {
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_completion_tokens: u32,
    pub top_p: f32,
}

impl GroqConfig {
    /// Default generation parameters with the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_completion_tokens: DEFAULT_MAX_COMPLETION_TOKENS,
            top_p: DEFAULT_TOP_P,
        }
    }

    /// Read the API key from the `GROQ_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, AiError> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key)),
            _ => Err(AiError::MissingApiKey),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_completion_tokens: u32,
    top_p: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Production [`TextGenerator`] over the Groq OpenAI-compatible API.
///
/// Sends the prompt as a single user message; the reply is the first
/// choice's message content.
pub struct GroqClient {
    client: Client,
    config: GroqConfig,
}

impl GroqClient {
    pub fn new(config: GroqConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");
        Self { client, config }
    }

    /// Client configured entirely from the environment.
    pub fn from_env() -> Result<Self, AiError> {
        Ok(Self::new(GroqConfig::from_env()?))
    }
}

fn parse_reply(body: &str) -> Result<String, AiError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| AiError::Provider(format!("malformed response: {e}")))?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(AiError::EmptyReply)
}

#[async_trait]
impl TextGenerator for GroqClient {
    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        debug!("requesting completion from {}", self.config.model);

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
            max_completion_tokens: self.config.max_completion_tokens,
            top_p: self.config.top_p,
        };

        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AiError::Provider(format!("status {status}: {message}")));
        }

        let body = response.text().await?;
        parse_reply(&body)
    }
}
