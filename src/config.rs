//! Process configuration for the two services.
//!
//! Values come from the environment, optionally pre-populated from a local
//! `.env` file for runs outside a container.

use crate::ai::groq::client::DEFAULT_BASE_URL;
use crate::{Error, Result};
use secrecy::SecretString;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_TEXTGEN_HOST: &str = "http://localhost:5001";
pub const DEFAULT_TEXTGEN_BIND: &str = "0.0.0.0:5001";
pub const DEFAULT_FRONTEND_BIND: &str = "0.0.0.0:5000";
pub const DEFAULT_TEXTGEN_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_GROQ_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct TextgenConfig {
    pub bind: SocketAddr,
    /// `None` when unset or blank. The service still starts but answers
    /// every generation request with a misconfiguration error.
    pub groq_api_key: Option<SecretString>,
    pub groq_base_url: String,
    pub groq_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct FrontendConfig {
    pub bind: SocketAddr,
    pub textgen_host: String,
    pub textgen_timeout: Duration,
}

impl TextgenConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let groq_api_key = lookup("GROQ_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .map(SecretString::new);

        Ok(Self {
            bind: parse_bind(&lookup, "TEXTGEN_BIND", DEFAULT_TEXTGEN_BIND)?,
            groq_api_key,
            groq_base_url: lookup("GROQ_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            groq_timeout: parse_secs(&lookup, "GROQ_TIMEOUT_SECS", DEFAULT_GROQ_TIMEOUT_SECS)?,
        })
    }
}

impl FrontendConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            bind: parse_bind(&lookup, "FRONTEND_BIND", DEFAULT_FRONTEND_BIND)?,
            textgen_host: lookup("TEXTGEN_HOST")
                .unwrap_or_else(|| DEFAULT_TEXTGEN_HOST.to_string()),
            textgen_timeout: parse_secs(
                &lookup,
                "TEXTGEN_TIMEOUT_SECS",
                DEFAULT_TEXTGEN_TIMEOUT_SECS,
            )?,
        })
    }
}

fn parse_bind<F>(lookup: &F, key: &str, default: &str) -> Result<SocketAddr>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    raw.parse()
        .map_err(|e| Error::Config(format!("{} '{}' is not a socket address: {}", key, raw, e)))
}

fn parse_secs<F>(lookup: &F, key: &str, default: u64) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let secs = match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|e| Error::Config(format!("{} '{}' is not a number: {}", key, raw, e)))?,
        None => default,
    };

    if secs == 0 {
        return Err(Error::Config(format!("{} must be greater than zero", key)));
    }

    Ok(Duration::from_secs(secs))
}
