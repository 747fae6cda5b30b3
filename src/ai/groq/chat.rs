use super::client::GroqHttpClient;
use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::ai::{ChatService, Completion};
use crate::Result;
use async_trait::async_trait;
use secrecy::SecretString;
use std::time::Duration;

pub struct GroqChatClient {
    http: GroqHttpClient,
    model: String,
}

impl GroqChatClient {
    pub fn new(api_key: SecretString, model: String, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: GroqHttpClient::new(api_key, timeout)?,
            model,
        })
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }
}

/// Pull the generated text out of a raw chat completion body.
///
/// Falls back to a top-level `content` string, then to the body itself, when
/// the first choice carries no message content.
pub fn completion_from_body(body: &str) -> Completion {
    if let Ok(response) = serde_json::from_str::<ChatCompletionResponse>(body) {
        if let Some(choice) = response.choices.into_iter().next() {
            if let Some(text) = choice.message.content {
                tracing::debug!(finish_reason = ?choice.finish_reason, "Groq completion received");
                return Completion::Message(text);
            }
        }
    }

    let content = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("content")?.as_str().map(str::to_string))
        .filter(|content| !content.is_empty());

    tracing::warn!("Unexpected Groq response shape, falling back to raw text");
    Completion::Fallback(content.unwrap_or_else(|| body.to_string()))
}

#[async_trait]
impl ChatService for GroqChatClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<Completion> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(prompt)],
        };

        tracing::debug!(model = %self.model, "Sending chat completion request to Groq");
        let body = self.http.chat_completion(&request).await?;

        Ok(completion_from_body(&body))
    }
}
