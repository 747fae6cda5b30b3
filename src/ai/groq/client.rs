use super::types::ChatCompletionRequest;
use crate::{Error, Result};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com";

const CHAT_COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";

pub struct GroqHttpClient {
    client: Client,
    api_key: SecretString,
    base_url: String,
}

impl GroqHttpClient {
    pub fn new(api_key: SecretString, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// POST `request` and return the raw success body.
    ///
    /// Transport failures and non-success statuses become [`Error::Vendor`].
    pub async fn post<Req: Serialize>(&self, path: &str, request: &Req) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!("Failed to send request to Groq: {}", e);
                Error::Vendor(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::debug!("Failed to read Groq response body: {}", e);
            Error::Vendor(e.to_string())
        })?;

        if !status.is_success() {
            tracing::debug!("Groq API error (status {}): {}", status, body);
            return Err(Error::Vendor(format!(
                "API error (status {}): {}",
                status, body
            )));
        }

        Ok(body)
    }

    pub async fn chat_completion(&self, request: &ChatCompletionRequest) -> Result<String> {
        self.post(CHAT_COMPLETIONS_PATH, request).await
    }
}
