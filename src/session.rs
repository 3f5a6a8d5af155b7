//! The single conversation shared by every request.
//!
//! There is no per-user isolation. The session is handed to the HTTP layer as
//! a [`SharedSession`] and the lock is held across the whole provider call
//! and the history update that follows, so concurrent requests queue and
//! history never interleaves.

use log::{ info, warn };
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::llm::chat::{ ChatClient, ProviderError };
use crate::models::chat::ChatMessage;

pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(60);

pub type SharedSession = Arc<Mutex<ConversationSession>>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(#[source] ProviderError),
}

pub struct ConversationSession {
    id: String,
    client: Arc<dyn ChatClient>,
    history: Vec<ChatMessage>,
    provider_timeout: Duration,
    max_turns: usize,
}

impl ConversationSession {
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            client,
            history: Vec::new(),
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
            max_turns: 0,
        }
    }

    pub fn with_timeout(mut self, provider_timeout: Duration) -> Self {
        self.provider_timeout = provider_timeout;
        self
    }

    /// Keep at most `max_turns` user/model exchanges. Zero means unbounded.
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn into_shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Asks the provider for a reply to `message` conditioned on the whole
    /// history, then records both and returns the reply.
    ///
    /// History is only written once the provider has answered, so a failed,
    /// panicked or cancelled call leaves it holding complete turns only.
    pub async fn send(&mut self, message: &str) -> Result<String, SessionError> {
        let user_message = ChatMessage::user(message);
        let mut context = self.history.clone();
        context.push(user_message.clone());

        let outcome = match
            tokio::time::timeout(self.provider_timeout, self.client.complete(&context)).await
        {
            Ok(result) => result.map(|resp| resp.response),
            Err(_) => Err(ProviderError::Timeout(self.provider_timeout)),
        };

        match outcome {
            Ok(reply) => {
                self.history.push(user_message);
                self.history.push(ChatMessage::model(reply.clone()));
                self.apply_window();
                info!(
                    "Session {}: turn complete, {} messages in history",
                    self.id,
                    self.history.len()
                );
                Ok(reply)
            }
            Err(e) => {
                warn!("Session {}: provider call failed: {}", self.id, e);
                Err(SessionError::ProviderUnavailable(e))
            }
        }
    }

    fn apply_window(&mut self) {
        if self.max_turns == 0 {
            return;
        }
        let keep = self.max_turns * 2;
        if self.history.len() > keep {
            let excess = self.history.len() - keep;
            self.history.drain(..excess);
        }
    }
}
