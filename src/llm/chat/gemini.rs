use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{ Deserialize, Serialize };
use log::{ info, warn };

use super::{ ChatClient, CompletionResponse, ProviderError };
use crate::llm::{ LlmConfig, LlmType };
use crate::models::chat::ChatMessage;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const MISSING_KEY_MESSAGE: &str =
    "Google API key is required for Gemini; set GOOGLE_API_KEY or --chat-api-key. Server not started";

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    contents: Vec<GeminiContent>,
}

#[derive(Serialize, Deserialize, Debug)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Deserialize, Debug)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize, Debug)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize, Debug)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

fn text_content(role: Option<&str>, text: &str) -> GeminiContent {
    GeminiContent {
        role: role.map(str::to_string),
        parts: vec![GeminiPart { text: text.to_string() }],
    }
}

fn build_request(system_instruction: Option<&str>, history: &[ChatMessage]) -> GenerateContentRequest {
    GenerateContentRequest {
        system_instruction: system_instruction
            .filter(|s| !s.trim().is_empty())
            .map(|s| text_content(None, s)),
        contents: history
            .iter()
            .map(|msg| text_content(Some(msg.role.as_str()), &msg.content))
            .collect(),
    }
}

fn response_text(resp: GenerateContentResponse) -> Option<String> {
    let content = resp.candidates.into_iter().next()?.content?;
    let text: String = content.parts
        .into_iter()
        .map(|p| p.text)
        .collect();
    if text.is_empty() { None } else { Some(text) }
}

pub struct GeminiChatClient {
    http: HttpClient,
    api_key: String,
    model: String,
    base_url: String,
    system_instruction: Option<String>,
}

impl GeminiChatClient {
    pub fn new(
        api_key: String,
        model: Option<String>,
        base_url: Option<String>,
        system_instruction: Option<String>
    ) -> Self {
        let model = model.unwrap_or_else(|| LlmType::Gemini.default_model().to_string());
        // Accept both "gemini-2.5-pro" and the SDK style "models/gemini-2.5-pro".
        let model = model.trim_start_matches("models/").to_string();
        let base_url = base_url
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            http: HttpClient::new(),
            api_key,
            model,
            base_url,
            system_instruction,
        }
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, ProviderError> {
        let api_key = config.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ProviderError::Config(MISSING_KEY_MESSAGE.into()))?;

        Ok(Self::new(
            api_key,
            config.completion_model.clone(),
            config.base_url.clone(),
            config.system_instruction.clone()
        ))
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url.trim_end_matches('/'), self.model)
    }
}

#[async_trait]
impl ChatClient for GeminiChatClient {
    async fn complete(&self, history: &[ChatMessage]) -> Result<CompletionResponse, ProviderError> {
        let payload = build_request(self.system_instruction.as_deref(), history);
        info!(
            "GeminiChatClient::complete() → model={} turns={}",
            self.model,
            payload.contents.len()
        );

        let resp = self.http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            warn!("Gemini returned {}: {}", status, message);
            return Err(ProviderError::Api { status: status.as_u16(), message });
        }

        let body = resp.json::<GenerateContentResponse>().await?;
        let text = response_text(body).ok_or(ProviderError::EmptyResponse)?;
        Ok(CompletionResponse { response: text })
    }

    fn get_model(&self) -> String {
        self.model.clone()
    }

    fn get_base_url(&self) -> Option<String> {
        Some(self.base_url.clone())
    }
}
