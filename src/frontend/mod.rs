//! Browser-facing relay: renders the prompt form and forwards submissions to
//! the textgen service.

pub mod client;
pub mod page;

pub use client::TextgenClient;
pub use page::IndexPage;

use crate::config::FrontendConfig;
use crate::models::{Prompt, PromptForm};
use crate::{shutdown_signal, Error, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

pub const EMPTY_PROMPT: &str = "Prompt cannot be empty.";

#[derive(Clone)]
pub struct FrontendState {
    pub textgen: TextgenClient,
}

impl FrontendState {
    pub fn new(textgen: TextgenClient) -> Self {
        Self { textgen }
    }

    pub fn from_config(config: &FrontendConfig) -> Result<Self> {
        let textgen = TextgenClient::new(&config.textgen_host, config.textgen_timeout)?;
        info!("Relaying prompts to {}", textgen.base_url());
        Ok(Self::new(textgen))
    }

    /// Validate `raw` and forward it to the textgen service.
    pub async fn relay(&self, raw: &str) -> Result<String> {
        let prompt = Prompt::parse(raw).ok_or_else(|| Error::Validation(EMPTY_PROMPT.into()))?;
        self.textgen.generate(&prompt).await
    }
}

async fn index() -> IndexPage {
    IndexPage::empty()
}

async fn submit(State(state): State<FrontendState>, headers: HeaderMap, body: Bytes) -> IndexPage {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    let form = PromptForm::from_body(content_type, &body);
    let prompt = form.prompt.trim().to_string();

    match state.relay(&form.prompt).await {
        Ok(result) => IndexPage::with_result(prompt, result),
        Err(e) => {
            tracing::warn!(kind = %e.kind(), "Prompt relay failed: {}", e);
            IndexPage::with_error(prompt, e.report())
        }
    }
}

async fn health_check() -> &'static str {
    "OK"
}

pub fn build_router(state: FrontendState) -> Router {
    Router::new()
        .route("/", get(index).post(submit))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http().make_span_with(
            |request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    service = "frontend",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            },
        ))
        .with_state(state)
}

/// Bind and serve the frontend until shutdown.
pub async fn serve(config: FrontendConfig) -> Result<()> {
    let state = FrontendState::from_config(&config)?;
    let listener = tokio::net::TcpListener::bind(config.bind).await.map_err(|e| {
        tracing::error!("Failed to bind TCP listener to {}: {}", config.bind, e);
        e
    })?;

    info!("Starting frontend on {}", listener.local_addr()?);
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Frontend shutdown complete");
    Ok(())
}
