//! Conversation state and the two-round tool-call flow.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::Result;
use crate::chat::completions::CompletionsClient;
use crate::chat::message::ChatMessage;
use crate::chat::parse::{ParsedReply, Tool, parse_reply};
use crate::client::{StatsClient, params1};
use crate::telemetry;

/// Fixed system preamble, prepended lazily on the first send of a session.
pub const SYSTEM_PROMPT: &str = r#"You are a Fortnite Expert AI Assistant. Your goal is to help players improve their game, analyze their stats, and provide hardware recommendations.

Capabilities:
1.  Win Probability: Calculate win probability based on stats (Win %, K/D, Matches).
2.  Skill Advice: Give specific tips to improve based on their weak points.
3.  PC Recommendations: Recommend PC specs for Fortnite (High FPS, Low Latency).

CRITICAL INSTRUCTION FOR STATS:
When a user asks about their stats or win probability, you MUST first obtain their Fortnite username.
If you have the username, you MUST output a "Tool Call" to fetch their stats.
The Tool Call format is: `[[get_stats: <username>]]`
Example: `[[get_stats: Ninja]]`

Do NOT make up stats. Only use the stats provided by the System in response to your Tool Call.
If you receive stats JSON, analyze it and answer the user's question.

STYLE GUIDELINES:
- Do NOT explain your math or formulas. Just state the probability or result.
- Be concise and friendly.
- Use Markdown formatting for better readability:
  - Use **bold** for emphasis
  - Use `code` for technical terms
  - Use bullet points (- item) for lists
  - Use ### for section headers
  - Use tables when comparing data
  - Use > for important notes or tips"#;

/// Fallback payload when the tool-side stats fetch fails.
const STATS_ERROR_PAYLOAD: &str = "Player not found or API error";

/// Seam between the chat orchestrator and the stats API.
///
/// The session doesn't care how stats arrive, only that every lookup
/// produces *some* JSON to show the model — a failed lookup is an error
/// payload, never a failed send.
#[async_trait]
pub trait StatsFetcher: Send + Sync {
    /// Raw stats response body for a username, or an error payload.
    async fn stats_for(&self, username: &str) -> Value;
}

#[async_trait]
impl StatsFetcher for StatsClient {
    async fn stats_for(&self, username: &str) -> Value {
        match self.get_raw("/v2/stats/br/v2", &params1("name", username)).await {
            Ok(body) => body,
            Err(err) => {
                warn!(username, error = %err, "tool-side stats fetch failed");
                serde_json::json!({ "error": STATS_ERROR_PAYLOAD })
            }
        }
    }
}

/// One chat session: an append-only transcript plus the send flow.
///
/// A send is at most two completion rounds. Round 1 submits the transcript;
/// if the assistant's reply carries a tool marker, the tool result is
/// appended as a system message and the transcript goes out once more.
/// Round 1's reply stays in the transcript verbatim, marker included —
/// filtering it from display is the caller's concern.
///
/// Overlapping sends are impossible by construction: [`send`](Self::send)
/// takes `&mut self`, so the borrow checker is the serialization guard the
/// original system delegated to its input widget.
pub struct ChatSession {
    completions: CompletionsClient,
    stats: Arc<dyn StatsFetcher>,
    messages: Vec<ChatMessage>,
    last_error: Option<String>,
}

impl ChatSession {
    /// Create a session over the given completion client and stats seam.
    pub fn new(completions: CompletionsClient, stats: Arc<dyn StatsFetcher>) -> Self {
        Self {
            completions,
            stats,
            messages: Vec::new(),
            last_error: None,
        }
    }

    /// Create a session configured entirely from the environment.
    pub fn from_env() -> Result<Self> {
        let completions = CompletionsClient::from_env()?;
        let stats = Arc::new(StatsClient::from_env()?);
        Ok(Self::new(completions, stats))
    }

    /// The transcript accumulated so far.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The failure message from the most recent send, if it failed.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Reset the transcript and clear any recorded error.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.last_error = None;
        debug!("transcript cleared");
    }

    /// Send a user message and run up to two completion rounds.
    ///
    /// Blank input is a no-op returning `Ok(None)`. On success, returns the
    /// final assistant reply (also appended to the transcript). On failure
    /// at any round, the error message is recorded in
    /// [`last_error`](Self::last_error) and the transcript keeps everything
    /// accumulated up to the failure — partial progress is never rolled
    /// back.
    pub async fn send(&mut self, text: &str) -> Result<Option<&ChatMessage>> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        if self.messages.is_empty() {
            self.messages.push(ChatMessage::system(SYSTEM_PROMPT));
        }
        self.messages.push(ChatMessage::user(text));
        self.last_error = None;

        match self.run_rounds().await {
            Ok(()) => Ok(self.messages.last()),
            Err(err) => {
                let message = err.user_message();
                warn!(error = %message, "send failed");
                self.last_error = Some(message);
                Err(err)
            }
        }
    }

    async fn run_rounds(&mut self) -> Result<()> {
        let reply = self.completions.complete(&self.messages).await?;
        let parsed = parse_reply(&reply.content);
        self.messages.push(reply);

        if let ParsedReply::ToolInvocation { tool, args } = parsed {
            match tool {
                Tool::GetStats => {
                    metrics::counter!(telemetry::TOOL_CALLS_TOTAL).increment(1);
                    info!(username = args, "tool call: fetching stats");

                    let stats = self.stats.stats_for(&args).await;
                    self.messages
                        .push(ChatMessage::system(format!("Stats for {args}: {stats}")));

                    let followup = self.completions.complete(&self.messages).await?;
                    self.messages.push(followup);
                }
            }
        }
        Ok(())
    }
}
