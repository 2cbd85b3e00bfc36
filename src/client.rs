//! HTTP client for the Fortnite API.
//!
//! [`StatsClient`] wraps a [`reqwest::Client`] with the base URL, optional
//! API key, and the upstream's response envelope conventions: bodies arrive
//! either as `{ "data": T, ... }` or as `T` directly, and failures carry a
//! human-readable `error` or `message` field worth surfacing.
//!
//! The typed helpers ([`player_stats`](StatsClient::player_stats),
//! [`shop`](StatsClient::shop), [`news`](StatsClient::news),
//! [`map`](StatsClient::map)) cover the endpoints consumers are known to
//! hit; anything else goes through [`get`](StatsClient::get).

use serde_json::Value;
use tracing::debug;

use crate::config::StatsConfig;
use crate::telemetry;
use crate::types::{MapData, NewsResponse, PlayerStats, ShopResponse};
use crate::{HuginnError, Result};

/// Ordered query parameters.
///
/// A vec of pairs rather than a map: the serialization order is part of the
/// cache key, so it must be deterministic by construction.
pub type Params = Vec<(String, String)>;

/// Build a single-parameter [`Params`] list.
pub fn params1(key: impl Into<String>, value: impl Into<String>) -> Params {
    vec![(key.into(), value.into())]
}

/// Client for the Fortnite read-only REST API.
#[derive(Debug, Clone)]
pub struct StatsClient {
    http: reqwest::Client,
    config: StatsConfig,
}

impl StatsClient {
    /// Create a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HuginnError::Configuration`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(config: StatsConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                HuginnError::Configuration(format!("failed to build HTTP client: {e}"))
            })?;
        Ok(Self { http, config })
    }

    /// Create a client configured from the environment.
    pub fn from_env() -> Result<Self> {
        Self::new(StatsConfig::from_env())
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &StatsConfig {
        &self.config
    }

    /// Issue a GET and return the full response body, envelope included.
    ///
    /// The tool-call path in the chat orchestrator uses this: the model is
    /// shown the body exactly as the upstream returned it.
    pub async fn get_raw(&self, endpoint: &str, params: &Params) -> Result<Value> {
        let url = format!("{}{}", self.config.base_url, endpoint);
        debug!(endpoint, "fetching from upstream");

        let mut request = self.http.get(&url).query(params);
        if let Some(key) = &self.config.api_key {
            request = request.header("Authorization", key);
        }

        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                metrics::counter!(telemetry::REQUESTS_TOTAL,
                    "endpoint" => endpoint.to_string(), "status" => "error")
                .increment(1);
                return Err(HuginnError::Http(e.to_string()));
            }
        };

        let status = response.status();
        if !status.is_success() {
            metrics::counter!(telemetry::REQUESTS_TOTAL,
                "endpoint" => endpoint.to_string(), "status" => "error")
            .increment(1);
            let body = response.text().await.unwrap_or_default();
            return Err(HuginnError::Api {
                status: status.as_u16(),
                message: extract_error_message(&body, status.as_u16()),
            });
        }

        let body: Value = response.json().await.map_err(|e| {
            metrics::counter!(telemetry::REQUESTS_TOTAL,
                "endpoint" => endpoint.to_string(), "status" => "error")
            .increment(1);
            HuginnError::Http(e.to_string())
        })?;

        metrics::counter!(telemetry::REQUESTS_TOTAL,
            "endpoint" => endpoint.to_string(), "status" => "ok")
        .increment(1);
        Ok(body)
    }

    /// Issue a GET and return the payload.
    ///
    /// Unwraps the upstream's `{ "data": ... }` envelope when present,
    /// otherwise returns the body as-is.
    pub async fn get(&self, endpoint: &str, params: &Params) -> Result<Value> {
        let mut body = self.get_raw(endpoint, params).await?;
        match body.get_mut("data") {
            Some(data) => Ok(data.take()),
            None => Ok(body),
        }
    }

    /// Battle royale stats for a player, by display name.
    pub async fn player_stats(&self, name: &str) -> Result<PlayerStats> {
        let value = self.get("/v2/stats/br/v2", &params1("name", name)).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// The current item shop.
    pub async fn shop(&self) -> Result<ShopResponse> {
        let value = self.get("/v2/shop", &Params::new()).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Current news for both game modes.
    pub async fn news(&self) -> Result<NewsResponse> {
        let value = self.get("/v2/news", &Params::new()).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// The current battle royale map and its points of interest.
    pub async fn map(&self) -> Result<MapData> {
        let value = self.get("/v1/map", &Params::new()).await?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Pull the most specific error message out of a failure response body.
///
/// Precedence: body `error` field, body `message` field, then a generic
/// status-code description.
pub(crate) fn extract_error_message(body: &str, status: u16) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        for field in ["error", "message"] {
            if let Some(msg) = json.get(field).and_then(Value::as_str) {
                if !msg.is_empty() {
                    return msg.to_string();
                }
            }
        }
    }
    format!("Request failed with status code {status}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_field_takes_precedence() {
        let body = r#"{"error": "Account not found", "message": "other"}"#;
        assert_eq!(extract_error_message(body, 404), "Account not found");
    }

    #[test]
    fn message_field_is_fallback() {
        let body = r#"{"message": "Invalid API key"}"#;
        assert_eq!(extract_error_message(body, 401), "Invalid API key");
    }

    #[test]
    fn unparseable_body_yields_status_text() {
        assert_eq!(
            extract_error_message("<html>teapot</html>", 418),
            "Request failed with status code 418"
        );
    }

    #[test]
    fn empty_error_field_is_skipped() {
        let body = r#"{"error": "", "message": "real reason"}"#;
        assert_eq!(extract_error_message(body, 500), "real reason");
    }
}
