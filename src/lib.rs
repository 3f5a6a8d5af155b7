pub mod classifier;
pub mod cli;
pub mod config;
pub mod llm;
pub mod models;
pub mod server;
pub mod session;

use cli::Args;
use config::knowledge::load_knowledge;
use config::prompt::load_prompts;
use llm::chat::new_client as new_chat_client;
use llm::{ LlmConfig, LlmType };
use log::{ info, warn };
use server::api::AppState;
use server::Server;
use session::ConversationSession;
use std::error::Error;
use std::time::Duration;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Server Address: {}", args.server_addr);
    info!("Chat LLM Type: {}", args.chat_llm_type);
    info!("Chat Model: {}", args.chat_model.as_deref().unwrap_or("adapter default"));
    info!("Chat Base URL: {}", args.chat_base_url.as_deref().unwrap_or("adapter default"));
    info!("Provider Timeout: {}s", args.provider_timeout_secs);
    info!("Max History Turns: {}", args.max_history_turns);
    info!("Prompts Path: {}", args.prompts_path);
    info!("Knowledge Path: {}", args.knowledge_path);
    info!("Index Path: {}", args.index_path);
    info!("TLS Enabled: {}", args.enable_tls);
    info!("-------------------------");

    let prompt_config = load_prompts(&args.prompts_path)?;

    let llm_type: LlmType = args.chat_llm_type.parse()?;
    let api_key = Some(args.chat_api_key.clone()).filter(|k| !k.trim().is_empty());
    if api_key.is_none() && llm_type != LlmType::Gemini {
        warn!("No API key configured for the {} provider", llm_type);
    }
    let chat_config = LlmConfig {
        llm_type,
        api_key,
        completion_model: args.chat_model.clone(),
        base_url: args.chat_base_url.clone(),
        system_instruction: Some(prompt_config.system_instruction),
    };
    let chat_client = new_chat_client(&chat_config)?;
    info!(
        "Chat client configured: Type={}, Model={}, BaseURL={:?}",
        llm_type,
        chat_client.get_model(),
        chat_client.get_base_url()
    );

    let session = ConversationSession::new(chat_client)
        .with_timeout(Duration::from_secs(args.provider_timeout_secs))
        .with_max_turns(args.max_history_turns);
    info!("Conversation session {} started", session.id());

    let knowledge = load_knowledge(&args.knowledge_path);
    let state = AppState::new(session.into_shared(), knowledge, &args.index_path);

    let server = Server::new(args.server_addr.clone(), state, args.clone());
    server.run().await?;

    Ok(())
}
