//! Error handling and custom error types
//!
//! Provides unified error handling across both services using thiserror. The
//! request-level variants map one-to-one onto the [`ErrorKind`] taxonomy that
//! is shown to end users.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("TextGen service unreachable: {0}")]
    UpstreamUnreachable(String),

    #[error("TextGen service error: {status} - {body}")]
    Upstream { status: u16, body: String },

    #[error("Exception while calling Groq API: {0}")]
    Vendor(String),

    #[error("{0}")]
    Misconfiguration(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Category of a failed request, as reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    Validation,
    UpstreamUnreachable,
    UpstreamError,
    VendorError,
    Misconfiguration,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::UpstreamUnreachable => "upstream-unreachable",
            ErrorKind::UpstreamError => "upstream-error",
            ErrorKind::VendorError => "vendor-error",
            ErrorKind::Misconfiguration => "misconfiguration",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-facing summary of a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub message: String,
}

impl Error {
    /// Classify the error. Process-level failures (config, IO, client
    /// construction) surface as misconfiguration.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::UpstreamUnreachable(_) => ErrorKind::UpstreamUnreachable,
            Error::Upstream { .. } => ErrorKind::UpstreamError,
            Error::Vendor(_) => ErrorKind::VendorError,
            Error::Misconfiguration(_) | Error::Config(_) | Error::Io(_) | Error::Http(_) => {
                ErrorKind::Misconfiguration
            }
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            kind: self.kind(),
            message: self.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
