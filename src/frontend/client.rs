use crate::models::{GenerateRequest, GenerateResponse, Prompt};
use crate::{Error, Result};
use reqwest::Client;
use std::time::Duration;

/// HTTP client for the textgen service's `POST /generate`.
#[derive(Clone)]
pub struct TextgenClient {
    client: Client,
    base_url: String,
}

impl TextgenClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn generate(&self, prompt: &Prompt) -> Result<String> {
        let url = format!("{}/generate", self.base_url);
        tracing::debug!("Forwarding prompt to {}", url);

        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest::from(prompt))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach textgen service: {}", e);
                Error::UpstreamUnreachable(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::UpstreamUnreachable(e.to_string()))?;

        if !status.is_success() {
            tracing::error!("Textgen service error (status {}): {}", status, body);
            return Err(Error::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse textgen response: {}\nBody: {}", e, body);
            Error::Upstream {
                status: status.as_u16(),
                body: format!("invalid response body: {}", e),
            }
        })?;

        Ok(parsed.generated)
    }
}
