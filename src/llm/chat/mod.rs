pub mod gemini;
pub mod rllm_backend;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use super::{ LlmConfig, LlmType };
use self::gemini::GeminiChatClient;
use self::rllm_backend::RllmChatClient;
use crate::models::chat::ChatMessage;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Provider returned an empty response")]
    EmptyResponse,

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Invalid provider configuration: {0}")]
    Config(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    pub response: String,
}

/// A provider that answers the latest user turn given the whole conversation.
///
/// `history` is ordered oldest first and always ends with the user message
/// being answered.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(&self, history: &[ChatMessage]) -> Result<CompletionResponse, ProviderError>;

    fn get_model(&self) -> String;
    fn get_base_url(&self) -> Option<String>;
}

pub fn new_client(config: &LlmConfig) -> Result<Arc<dyn ChatClient>, ProviderError> {
    let client: Arc<dyn ChatClient> = match config.llm_type {
        LlmType::Gemini => Arc::new(GeminiChatClient::from_config(config)?),
        LlmType::Ollama
        | LlmType::OpenAI
        | LlmType::Anthropic
        | LlmType::DeepSeek
        | LlmType::XAI
        | LlmType::Groq => Arc::new(RllmChatClient::from_config(config)?),
    };
    Ok(client)
}
