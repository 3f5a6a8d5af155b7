use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Chat LLM Provider Args ---
    /// Type of LLM provider for chat completion (gemini, ollama, openai, anthropic, deepseek, xai, groq)
    #[arg(long, env = "CHAT_LLM_TYPE", default_value = "gemini")]
    pub chat_llm_type: String,

    /// Base URL for the Chat LLM provider API. Adapters fall back to the public endpoint when unset.
    #[arg(long, env = "CHAT_BASE_URL")]
    pub chat_base_url: Option<String>,

    /// API Key for the Chat LLM provider
    #[arg(long, env = "GOOGLE_API_KEY", default_value = "")]
    pub chat_api_key: String,

    /// Model name for chat completion (e.g., gemini-2.5-pro, gpt-4o, llama3)
    #[arg(long, env = "CHAT_MODEL")]
    pub chat_model: Option<String>,

    /// Seconds to wait for the provider before failing the request.
    #[arg(long, env = "PROVIDER_TIMEOUT_SECS", default_value = "60")]
    pub provider_timeout_secs: u64,

    // --- Conversation Args ---
    /// Number of user/model exchanges kept in the shared conversation. 0 keeps everything.
    #[arg(long, env = "MAX_HISTORY_TURNS", default_value = "0")]
    pub max_history_turns: usize,

    /// Path to the persona file ({"system_instruction": "..."}). Built-in persona when missing.
    #[arg(long, env = "PROMPTS_PATH", default_value = "json/prompts.json")]
    pub prompts_path: String,

    /// Path to the destination knowledge file. Missing is tolerated.
    #[arg(long, env = "KNOWLEDGE_PATH", default_value = "sabah_data.json")]
    pub knowledge_path: String,

    // --- Server Args ---
    /// Host address and port for the server to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "127.0.0.1:5000")]
    pub server_addr: String,

    /// Static entry page served at `/`.
    #[arg(long, env = "INDEX_PATH", default_value = "index.html")]
    pub index_path: String,

    /// Optional path to the TLS certificate file (PEM format). Requires --tls-key-path.
    #[arg(long, env = "TLS_CERT_PATH")]
    pub tls_cert_path: Option<String>,

    /// Optional path to the TLS private key file (PEM format). Requires --tls-cert-path.
    #[arg(long, env = "TLS_KEY_PATH")]
    pub tls_key_path: Option<String>,

    #[arg(long, env = "ENABLE_TLS", default_value = "false")]
    pub enable_tls: bool,
}
