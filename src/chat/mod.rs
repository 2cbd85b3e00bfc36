//! AI chat assistant core.
//!
//! The chat flow is a thin protocol over an OpenAI-compatible completions
//! endpoint, plus one string-level convention: the model may embed a
//! `[[get_stats: <username>]]` marker in a reply to request player stats
//! before answering. [`ChatSession`] owns the transcript and drives the
//! resulting two-round exchange; [`parse_reply`] classifies each assistant
//! turn; [`CompletionsClient`] speaks the wire format.

pub mod completions;
pub mod message;
pub mod parse;
pub mod session;

pub use completions::CompletionsClient;
pub use message::{ChatMessage, Role};
pub use parse::{ParsedReply, Tool, parse_reply};
pub use session::{ChatSession, SYSTEM_PROMPT, StatsFetcher};
