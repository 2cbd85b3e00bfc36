//! Chat-completions HTTP client.
//!
//! One POST per round against `{base}/chat/completions`, OpenAI wire shape,
//! with reasoning enabled. The base URL is normalized once at construction
//! (see [`AiConfig::endpoint_url`]).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::chat::message::ChatMessage;
use crate::client::extract_error_message;
use crate::config::AiConfig;
use crate::telemetry;
use crate::{HuginnError, Result};

/// Client for an OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct CompletionsClient {
    http: reqwest::Client,
    config: AiConfig,
    endpoint: String,
}

#[derive(Serialize)]
struct CompletionsRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    reasoning: ReasoningConfig,
}

#[derive(Serialize)]
struct ReasoningConfig {
    enabled: bool,
}

#[derive(Deserialize)]
struct CompletionsResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    reasoning_details: Option<Value>,
}

impl CompletionsClient {
    /// Create a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HuginnError::Configuration`] when the API key or base URL
    /// is empty, or if the HTTP client cannot be constructed. These are the
    /// hard configuration errors: nothing is sent over the network.
    pub fn new(config: AiConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(HuginnError::Configuration(
                "AI configuration is missing.".into(),
            ));
        }
        if config.base_url.is_empty() {
            return Err(HuginnError::Configuration("Base URL is missing".into()));
        }
        let endpoint = config.endpoint_url();
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                HuginnError::Configuration(format!("failed to build HTTP client: {e}"))
            })?;
        Ok(Self {
            http,
            config,
            endpoint,
        })
    }

    /// Create a client configured from the environment.
    pub fn from_env() -> Result<Self> {
        Self::new(AiConfig::from_env()?)
    }

    /// The resolved chat-completions URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submit the transcript and return the assistant's reply.
    ///
    /// Missing content in the reply becomes an empty string rather than an
    /// error; the session layer decides what an empty reply means.
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatMessage> {
        debug!(
            endpoint = self.endpoint,
            transcript_len = messages.len(),
            "submitting transcript"
        );

        let request = CompletionsRequest {
            model: &self.config.model,
            messages,
            reasoning: ReasoningConfig { enabled: true },
        };

        let response = self
            .http
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.title)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                metrics::counter!(telemetry::CHAT_REQUESTS_TOTAL, "status" => "error")
                    .increment(1);
                HuginnError::Http(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            metrics::counter!(telemetry::CHAT_REQUESTS_TOTAL, "status" => "error").increment(1);
            let body = response.text().await.unwrap_or_default();
            return Err(HuginnError::Api {
                status: status.as_u16(),
                message: extract_error_message(&body, status.as_u16()),
            });
        }

        let body: CompletionsResponse = response.json().await.map_err(|e| {
            metrics::counter!(telemetry::CHAT_REQUESTS_TOTAL, "status" => "error").increment(1);
            HuginnError::Http(e.to_string())
        })?;

        let Some(choice) = body.choices.into_iter().next() else {
            metrics::counter!(telemetry::CHAT_REQUESTS_TOTAL, "status" => "error").increment(1);
            return Err(HuginnError::EmptyResponse);
        };

        metrics::counter!(telemetry::CHAT_REQUESTS_TOTAL, "status" => "ok").increment(1);
        Ok(
            ChatMessage::assistant(choice.message.content.unwrap_or_default())
                .with_reasoning(choice.message.reasoning_details),
        )
    }
}
