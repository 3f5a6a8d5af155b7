use async_trait::async_trait;
use log::info;
use rllm::builder::{ LLMBackend, LLMBuilder };
use rllm::chat::{ ChatMessage as RllmMessage, ChatRole, MessageType };
use rllm::LLMProvider;

use super::{ ChatClient, CompletionResponse, ProviderError };
use crate::llm::{ LlmConfig, LlmType };
use crate::models::chat::{ ChatMessage, Role };

fn backend_for(llm_type: LlmType) -> Result<LLMBackend, ProviderError> {
    match llm_type {
        LlmType::Ollama => Ok(LLMBackend::Ollama),
        LlmType::OpenAI => Ok(LLMBackend::OpenAI),
        LlmType::Anthropic => Ok(LLMBackend::Anthropic),
        LlmType::DeepSeek => Ok(LLMBackend::DeepSeek),
        LlmType::XAI => Ok(LLMBackend::XAI),
        LlmType::Groq => Ok(LLMBackend::Groq),
        LlmType::Gemini =>
            Err(ProviderError::Config("Gemini is served by GeminiChatClient".into())),
    }
}

fn to_rllm_messages(history: &[ChatMessage]) -> Vec<RllmMessage> {
    history
        .iter()
        .map(|msg| RllmMessage {
            role: match msg.role {
                Role::User => ChatRole::User,
                Role::Model => ChatRole::Assistant,
            },
            content: msg.content.clone(),
            message_type: MessageType::Text,
        })
        .collect()
}

/// Chat client for every provider other than Gemini, driven through `rllm`.
pub struct RllmChatClient {
    llm: Box<dyn LLMProvider + Send + Sync>,
    llm_type: LlmType,
    model: String,
    base_url: Option<String>,
}

impl RllmChatClient {
    pub fn from_config(config: &LlmConfig) -> Result<Self, ProviderError> {
        let backend = backend_for(config.llm_type)?;
        let model = config.completion_model
            .clone()
            .unwrap_or_else(|| config.llm_type.default_model().to_string());

        let mut builder = LLMBuilder::new()
            .backend(backend)
            .model(&model)
            .stream(false);

        if let Some(key) = config.api_key.as_ref().filter(|k| !k.trim().is_empty()) {
            builder = builder.api_key(key.clone());
        }
        if let Some(url) = &config.base_url {
            builder = builder.base_url(url);
        }
        if let Some(system) = config.system_instruction.as_ref().filter(|s| !s.trim().is_empty()) {
            builder = builder.system(system.clone());
        }

        let llm = builder.build().map_err(|e| ProviderError::Config(e.to_string()))?;

        Ok(Self {
            llm,
            llm_type: config.llm_type,
            model,
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait]
impl ChatClient for RllmChatClient {
    async fn complete(&self, history: &[ChatMessage]) -> Result<CompletionResponse, ProviderError> {
        let messages = to_rllm_messages(history);
        info!(
            "RllmChatClient::complete() → type={} model={} base_url={:?}",
            self.llm_type,
            self.model,
            self.base_url
        );
        let resp = self.llm
            .chat(&messages).await
            .map_err(|e| ProviderError::Backend(e.to_string()))?;
        let text = resp
            .text()
            .map(|s| s.to_string())
            .unwrap_or_else(|| resp.to_string());
        if text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(CompletionResponse { response: text })
    }

    fn get_model(&self) -> String {
        self.model.clone()
    }

    fn get_base_url(&self) -> Option<String> {
        self.base_url.clone()
    }
}
