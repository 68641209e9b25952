use std::time::Duration;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Backend origin; the REST surface lives under `<backend_url>/api`.
    pub backend_url: String,
    pub http_timeout: Duration,
    /// Completions are slow, so chat requests get their own budget.
    pub chat_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let backend_url = lookup("BACKEND_URL").context("BACKEND_URL is not set")?;
        let http_timeout = Duration::from_secs(
            lookup("HTTP_TIMEOUT_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(30),
        );
        let chat_timeout = Duration::from_secs(
            lookup("CHAT_TIMEOUT_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(120),
        );
        Ok(Self {
            backend_url,
            http_timeout,
            chat_timeout,
        })
    }

    pub fn for_backend(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
            http_timeout: Duration::from_secs(30),
            chat_timeout: Duration::from_secs(120),
        }
    }
}
