//! mini-gen - a prompt form and a word-limited text generation service
//!
//! The `frontend` relay renders a form and forwards prompts to the `textgen`
//! service, which asks an LLM vendor for an answer and caps it at 20 words.

pub mod ai;
pub mod config;
pub mod error;
pub mod frontend;
pub mod models;
pub mod prompts;
pub mod shutdown;
pub mod textgen;
pub mod words;

pub use error::{Error, ErrorKind, ErrorReport, Result};
pub use shutdown::shutdown_signal;
