//! Generation backend: `POST /generate` turns a prompt into at most 20 words
//! of vendor-generated text.

pub mod generator;

pub use generator::TextGenerator;

use crate::ai::{ChatService, GroqChatClient};
use crate::config::TextgenConfig;
use crate::models::{GenerateResponse, RequestBody};
use crate::{prompts, shutdown_signal, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[derive(Clone)]
pub struct TextgenState {
    pub generator: TextGenerator,
}

impl TextgenState {
    pub fn new(chat: Option<Arc<dyn ChatService>>) -> Self {
        Self {
            generator: TextGenerator::new(chat),
        }
    }

    /// Build the Groq client from configuration.
    ///
    /// A missing key or a client that fails to build is logged and leaves the
    /// service running without a vendor client.
    pub fn from_config(config: &TextgenConfig) -> Self {
        let Some(api_key) = config.groq_api_key.clone() else {
            warn!("GROQ_API_KEY not set. Set it in the environment or in the root .env file.");
            return Self::new(None);
        };

        match GroqChatClient::new(api_key, prompts::TEXTGEN_MODEL.to_string(), config.groq_timeout)
        {
            Ok(client) => {
                info!("Chat provider: Groq (model: {})", prompts::TEXTGEN_MODEL);
                let client = client.with_base_url(config.groq_base_url.clone());
                Self::new(Some(Arc::new(client)))
            }
            Err(e) => {
                warn!("Could not initialize Groq client: {}", e);
                Self::new(None)
            }
        }
    }
}

async fn generate(
    State(state): State<TextgenState>,
    body: Bytes,
) -> Result<Json<GenerateResponse>> {
    let body = RequestBody::from_bytes(&body);
    let generated = state.generator.generate(body.prompt()).await.map_err(|e| {
        warn!(kind = %e.kind(), "Generation request failed: {}", e);
        e
    })?;

    Ok(Json(GenerateResponse { generated }))
}

async fn health_check() -> &'static str {
    "OK"
}

pub fn build_router(state: TextgenState) -> Router {
    Router::new()
        .route("/generate", post(generate))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http().make_span_with(
            |request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    service = "textgen",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            },
        ))
        .with_state(state)
}

/// Bind and serve the textgen service until shutdown.
pub async fn serve(config: TextgenConfig) -> Result<()> {
    let state = TextgenState::from_config(&config);
    let listener = tokio::net::TcpListener::bind(config.bind).await.map_err(|e| {
        tracing::error!("Failed to bind TCP listener to {}: {}", config.bind, e);
        e
    })?;

    info!("Starting textgen service on {}", listener.local_addr()?);
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Textgen service shutdown complete");
    Ok(())
}
