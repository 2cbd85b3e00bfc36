//! Caching subsystem.
//!
//! [`ResultCache`] is a paired success/error store for upstream responses,
//! keyed by endpoint + serialized query parameters. Successes and failures
//! are cached for the same short window (120 seconds by default), so a
//! burst of identical lookups — several consumers landing on the same
//! resource at once — costs one upstream request, including when that
//! request fails.
//!
//! The cache is an explicitly constructed object owned by
//! [`StatsService`](service::StatsService), not a process-wide global:
//! tests get isolation for free and eviction policy is swappable per
//! instance.
//!
//! Invariant: a key is live in at most one of the two sides. Recording a
//! success evicts any cached failure for that key and vice versa.

pub mod service;

pub use service::{FetchResult, StatsService};

use std::time::Duration;

use serde_json::Value;

use crate::client::Params;
use crate::telemetry;

/// Default time-to-live for cached results, success and failure alike.
const DEFAULT_TTL: Duration = Duration::from_secs(120);

/// Default maximum number of entries per cache side.
const DEFAULT_MAX_ENTRIES: u64 = 10_000;

/// Configuration for [`ResultCache`].
///
/// ```rust
/// # use huginn::cache::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new()
///     .max_entries(500)
///     .ttl(Duration::from_secs(30));
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries per side. Default: 10,000.
    pub max_entries: u64,
    /// Time-to-live for cached entries. Default: 120 seconds.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            ttl: DEFAULT_TTL,
        }
    }
}

impl CacheConfig {
    /// Create a new config with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of entries per side.
    pub fn max_entries(mut self, n: u64) -> Self {
        self.max_entries = n;
        self
    }

    /// Set the time-to-live for cached entries.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Outcome of a cache lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// A cached success payload.
    Hit(Value),
    /// A cached failure message.
    Failure(String),
    /// Nothing cached for this key.
    Miss,
}

/// Paired success/error store with per-entry TTL.
pub struct ResultCache {
    values: moka::sync::Cache<String, Value>,
    errors: moka::sync::Cache<String, String>,
}

impl ResultCache {
    /// Create a cache from the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let values = moka::sync::Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl)
            .build();
        let errors = moka::sync::Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl)
            .build();
        Self { values, errors }
    }

    /// Look up a key in both sides. Emits cache hit/miss metrics.
    pub fn lookup(&self, key: &str) -> Lookup {
        if let Some(value) = self.values.get(key) {
            metrics::counter!(telemetry::CACHE_HITS_TOTAL, "kind" => "success").increment(1);
            return Lookup::Hit(value);
        }
        if let Some(message) = self.errors.get(key) {
            metrics::counter!(telemetry::CACHE_HITS_TOTAL, "kind" => "error").increment(1);
            return Lookup::Failure(message);
        }
        metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);
        Lookup::Miss
    }

    /// Record a success, evicting any cached failure for the key.
    pub fn insert_ok(&self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
        self.errors.invalidate(key);
    }

    /// Record a failure, evicting any cached success for the key.
    pub fn insert_err(&self, key: &str, message: String) {
        self.errors.insert(key.to_string(), message);
        self.values.invalidate(key);
    }

    /// Evict everything from both sides.
    pub fn clear(&self) {
        self.values.invalidate_all();
        self.errors.invalidate_all();
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

/// Build the cache key for an (endpoint, params) pair.
///
/// Parameters serialize in list order, which callers keep stable, so the
/// key is deterministic. A bare endpoint keys on the path alone.
pub fn cache_key(endpoint: &str, params: &Params) -> String {
    if params.is_empty() {
        return endpoint.to_string();
    }
    let query: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("{endpoint}?{}", query.join("&"))
}
