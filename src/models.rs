//! Data models and structures
//!
//! Defines the per-request values exchanged between the browser, the
//! frontend relay and the textgen service. Nothing here is persisted.

use serde::{Deserialize, Serialize};

/// User input with surrounding whitespace removed. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    /// Trim `raw`, returning `None` when nothing is left.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of `POST /generate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: String,
}

impl From<&Prompt> for GenerateRequest {
    fn from(prompt: &Prompt) -> Self {
        Self {
            prompt: prompt.as_str().to_string(),
        }
    }
}

/// Successful reply from `POST /generate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub generated: String,
}

/// Form submitted by the browser on `POST /`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptForm {
    pub prompt: String,
}

impl PromptForm {
    /// Decode a `POST /` body without ever rejecting it.
    ///
    /// Anything other than a readable urlencoded form yields an empty prompt.
    /// When `prompt` repeats, the first value wins.
    pub fn from_body(content_type: Option<&str>, body: &[u8]) -> Self {
        let is_urlencoded = content_type
            .and_then(|value| value.split(';').next())
            .map(|mime| {
                mime.trim()
                    .eq_ignore_ascii_case("application/x-www-form-urlencoded")
            })
            .unwrap_or(false);
        if !is_urlencoded {
            tracing::debug!(?content_type, "Treating non-form body as empty prompt");
            return Self::default();
        }

        match serde_urlencoded::from_bytes::<Vec<(String, String)>>(body) {
            Ok(fields) => Self {
                prompt: fields
                    .into_iter()
                    .find(|(name, _)| name == "prompt")
                    .map(|(_, value)| value)
                    .unwrap_or_default(),
            },
            Err(e) => {
                tracing::debug!("Treating unreadable form body as empty prompt: {}", e);
                Self::default()
            }
        }
    }
}

/// Decoded `POST /generate` body.
///
/// Bodies that are not a JSON object with an optional string `prompt` land in
/// `Malformed` and are treated like an empty object.
#[derive(Debug)]
pub enum RequestBody {
    Parsed(GenerateRequest),
    Malformed,
}

impl RequestBody {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        match serde_json::from_slice::<GenerateRequest>(bytes) {
            Ok(request) => RequestBody::Parsed(request),
            Err(e) => {
                tracing::debug!("Treating malformed generate body as empty: {}", e);
                RequestBody::Malformed
            }
        }
    }

    pub fn prompt(&self) -> &str {
        match self {
            RequestBody::Parsed(request) => &request.prompt,
            RequestBody::Malformed => "",
        }
    }
}
