//! Configuration for the stats client and the AI chat endpoint.
//!
//! Both configs can be built programmatically or read from the environment:
//!
//! - `FORTNITE_API_BASE_URL` (default: `https://fortnite-api.com`)
//! - `FORTNITE_API_KEY` (optional)
//! - `AI_BASE_URL` (required for chat)
//! - `AI_API_KEY` (required for chat)
//!
//! A missing AI key or base URL is a hard [`Configuration`] error — no
//! network attempt is made.
//!
//! [`Configuration`]: crate::HuginnError::Configuration

use std::time::Duration;

use crate::{HuginnError, Result};

/// Default base URL for the Fortnite API.
pub const DEFAULT_STATS_BASE_URL: &str = "https://fortnite-api.com";

/// Default model identifier for chat completions.
pub const DEFAULT_CHAT_MODEL: &str = "x-ai/grok-4.1-fast";

fn default_timeout() -> Duration {
    Duration::from_secs(120)
}

/// Configuration for [`StatsClient`](crate::StatsClient).
#[derive(Debug, Clone)]
pub struct StatsConfig {
    /// Base URL of the Fortnite API.
    pub base_url: String,
    /// Optional API key, sent as a bare `Authorization` header.
    pub api_key: Option<String>,
    /// Per-request timeout. Default: 120 seconds.
    pub timeout: Duration,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_STATS_BASE_URL.to_string(),
            api_key: None,
            timeout: default_timeout(),
        }
    }
}

impl StatsConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read from `FORTNITE_API_BASE_URL` / `FORTNITE_API_KEY`.
    ///
    /// The base URL falls back to [`DEFAULT_STATS_BASE_URL`]; the key is
    /// optional.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("FORTNITE_API_BASE_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_STATS_BASE_URL.to_string()),
            api_key: std::env::var("FORTNITE_API_KEY")
                .ok()
                .filter(|s| !s.is_empty()),
            timeout: default_timeout(),
        }
    }

    /// Set the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Configuration for [`CompletionsClient`](crate::chat::CompletionsClient).
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Bearer token for the chat-completions endpoint.
    pub api_key: String,
    /// Base URL, normalized by [`AiConfig::endpoint_url`] before use.
    pub base_url: String,
    /// Model identifier. Default: [`DEFAULT_CHAT_MODEL`].
    pub model: String,
    /// Value for the `HTTP-Referer` attribution header.
    pub referer: String,
    /// Value for the `X-Title` attribution header.
    pub title: String,
    /// Per-request timeout. Default: 120 seconds.
    ///
    /// The original system had no upper bound on a chat round-trip; here a
    /// hung upstream resolves into a transport error instead of leaving the
    /// session in-flight forever.
    pub timeout: Duration,
}

impl AiConfig {
    /// Create a config from the required key and base URL.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: DEFAULT_CHAT_MODEL.to_string(),
            referer: "https://fortnite-platform.example".to_string(),
            title: "Fortnite Platform".to_string(),
            timeout: default_timeout(),
        }
    }

    /// Read from `AI_API_KEY` / `AI_BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`HuginnError::Configuration`] when either variable is
    /// missing or empty.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("AI_API_KEY")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| HuginnError::Configuration("AI configuration is missing.".into()))?;
        let base_url = std::env::var("AI_BASE_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| HuginnError::Configuration("Base URL is missing".into()))?;
        Ok(Self::new(api_key, base_url))
    }

    /// Set the model identifier.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the `HTTP-Referer` header value.
    pub fn referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = referer.into();
        self
    }

    /// Set the `X-Title` header value.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve the full chat-completions URL from the configured base.
    ///
    /// Normalization rules, in order:
    /// 1. strip a trailing slash;
    /// 2. OpenRouter hosts without their versioned path get `/api/v1`;
    /// 3. append `/chat/completions` unless already the suffix.
    pub fn endpoint_url(&self) -> String {
        let mut url = self.base_url.clone();
        if url.ends_with('/') {
            url.pop();
        }
        if url.contains("openrouter.ai") && !url.contains("/api/v1") {
            url.push_str("/api/v1");
        }
        if !url.ends_with("/chat/completions") {
            url.push_str("/chat/completions");
        }
        url
    }
}
