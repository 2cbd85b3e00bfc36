//! Huginn — cached Fortnite API client and AI assistant core
//!
//! This crate is the data layer of a Fortnite stats platform: a read-only
//! client for the Fortnite API with short-lived result caching and request
//! de-duplication, and a chat session that drives an LLM assistant able to
//! fetch player stats mid-conversation via an embedded tool-call marker.
//!
//! # Stats Example
//!
//! ```rust,no_run
//! use huginn::{Query, StatsClient, StatsConfig, StatsService, params1};
//!
//! #[tokio::main]
//! async fn main() -> huginn::Result<()> {
//!     let client = StatsClient::new(StatsConfig::from_env())?;
//!     let service = StatsService::new(client);
//!
//!     let mut query = Query::new(service, "/v2/stats/br/v2");
//!     let mut updates = query.subscribe();
//!     query.set_params(Some(params1("name", "Ninja")));
//!
//!     updates.changed().await.ok();
//!     println!("{:?}", query.state());
//!     Ok(())
//! }
//! ```
//!
//! # Chat Example
//!
//! ```rust,no_run
//! use huginn::chat::ChatSession;
//!
//! #[tokio::main]
//! async fn main() -> huginn::Result<()> {
//!     let mut session = ChatSession::from_env()?;
//!     if let Some(reply) = session.send("What are Ninja's stats?").await? {
//!         println!("{}", reply.content);
//!     }
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod chat;
pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use cache::{CacheConfig, ResultCache, StatsService};
pub use chat::{ChatMessage, ChatSession, CompletionsClient, Role};
pub use client::{Params, StatsClient, params1};
pub use config::{AiConfig, StatsConfig};
pub use error::{FetchError, HuginnError, Result};
pub use query::{Query, QueryState};
pub use types::{MapData, NewsResponse, PlayerStats, ShopResponse};
