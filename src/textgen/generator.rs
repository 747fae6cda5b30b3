use crate::ai::{ChatService, Completion};
use crate::models::Prompt;
use crate::words::{self, MAX_WORDS};
use crate::{prompts, Error, Result};
use std::sync::Arc;
use tracing::{debug, error, warn};

pub const MISSING_PROMPT: &str = "Missing 'prompt' in JSON body";
pub const CLIENT_UNAVAILABLE: &str =
    "GROQ API key not set or Groq client unavailable on the server.";

/// Prompt-to-capped-text pipeline behind `POST /generate`.
#[derive(Clone)]
pub struct TextGenerator {
    chat: Option<Arc<dyn ChatService>>,
}

impl TextGenerator {
    /// `chat` is `None` when no vendor client could be configured.
    pub fn new(chat: Option<Arc<dyn ChatService>>) -> Self {
        Self { chat }
    }

    /// Validate `raw`, ask the vendor, and cap the answer at [`MAX_WORDS`].
    pub async fn generate(&self, raw: &str) -> Result<String> {
        let prompt = Prompt::parse(raw).ok_or_else(|| Error::Validation(MISSING_PROMPT.into()))?;

        let chat = self
            .chat
            .as_deref()
            .ok_or_else(|| Error::Misconfiguration(CLIENT_UNAVAILABLE.into()))?;

        let completion = chat
            .complete(prompts::TEXTGEN_SYSTEM, prompt.as_str())
            .await
            .map_err(|e| {
                error!("Groq completion failed: {}", e);
                match e {
                    Error::Vendor(_) => e,
                    other => Error::Vendor(other.to_string()),
                }
            })?;

        if let Completion::Fallback(text) = &completion {
            warn!(len = text.len(), "Using fallback text from unexpected completion shape");
        }

        let raw_text = completion.into_text();
        let count = words::word_count(&raw_text);
        if count > MAX_WORDS {
            debug!(words = count, "Truncating completion to {} words", MAX_WORDS);
        }

        Ok(words::cap_words(&raw_text, MAX_WORDS))
    }
}
