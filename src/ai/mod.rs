//! AI service integration for text generation
//!
//! Provides the [`ChatService`] seam between the textgen service and the
//! vendor chat-completion API, with a Groq implementation and a mock.

pub mod groq;
pub mod mock;

pub use groq::GroqChatClient;
pub use mock::MockChatClient;

use crate::Result;
use async_trait::async_trait;

/// Text extracted from a chat completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Content of the first choice's message.
    Message(String),
    /// The response did not have the expected shape; best-effort text
    /// representation of whatever came back, possibly empty.
    Fallback(String),
}

impl Completion {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Completion::Fallback(_))
    }

    pub fn into_text(self) -> String {
        match self {
            Completion::Message(text) | Completion::Fallback(text) => text,
        }
    }
}

#[async_trait]
pub trait ChatService: Send + Sync {
    /// Run a single system + user exchange.
    async fn complete(&self, system: &str, prompt: &str) -> Result<Completion>;
}
