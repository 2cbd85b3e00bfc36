//! Telemetry metric name constants.
//!
//! Centralised metric names for huginn operations. Consumers install their
//! own `metrics` recorder (e.g. prometheus, statsd); without a recorder
//! installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `huginn_`. Counters end in `_total`.
//!
//! # Common labels
//!
//! - `endpoint` — upstream endpoint path (e.g. "/v2/shop")
//! - `status` — outcome: "ok" or "error"

/// Total upstream API requests actually issued (cache misses only).
///
/// Labels: `endpoint`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "huginn_requests_total";

/// Total cache hits, split by which side of the cache answered.
///
/// Labels: `kind` ("success" | "error").
pub const CACHE_HITS_TOTAL: &str = "huginn_cache_hits_total";

/// Total cache misses.
pub const CACHE_MISSES_TOTAL: &str = "huginn_cache_misses_total";

/// Total fetches coalesced onto an already-in-flight request.
pub const FLIGHTS_JOINED_TOTAL: &str = "huginn_flights_joined_total";

/// Total chat-completions requests issued.
///
/// Labels: `status` ("ok" | "error").
pub const CHAT_REQUESTS_TOTAL: &str = "huginn_chat_requests_total";

/// Total tool calls detected and dispatched from assistant replies.
pub const TOOL_CALLS_TOTAL: &str = "huginn_tool_calls_total";
