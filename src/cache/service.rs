//! Cached, de-duplicated access to the stats API.
//!
//! [`StatsService`] sits between consumers and [`StatsClient`]:
//!
//! 1. cache lookup — a hit (success or remembered failure) resolves
//!    without touching the network;
//! 2. single-flight — concurrent misses for the same key share one
//!    in-flight request instead of issuing duplicates;
//! 3. the flight's outcome lands in the appropriate cache side before any
//!    waiter observes it.
//!
//! Flights run as detached tasks: a consumer that loses interest (see the
//! [`query`](crate::query) layer) stops observing, but the flight still
//! completes and populates the cache for everyone else.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::{CacheConfig, Lookup, ResultCache, cache_key};
use crate::client::{Params, StatsClient};
use crate::error::FetchError;
use crate::telemetry;

/// What a fetch resolves to: the payload, or the cacheable failure message.
pub type FetchResult = std::result::Result<Value, FetchError>;

type SharedFlight = Shared<BoxFuture<'static, FetchResult>>;

/// Cached single-flight fetcher over a [`StatsClient`].
///
/// Cheap to clone; all clones share the same cache and in-flight map.
#[derive(Clone)]
pub struct StatsService {
    inner: Arc<Inner>,
}

struct Inner {
    client: StatsClient,
    cache: ResultCache,
    flights: Mutex<HashMap<String, SharedFlight>>,
}

impl StatsService {
    /// Create a service with the default cache configuration.
    pub fn new(client: StatsClient) -> Self {
        Self::with_cache_config(client, &CacheConfig::default())
    }

    /// Create a service with a custom cache configuration.
    pub fn with_cache_config(client: StatsClient, config: &CacheConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                client,
                cache: ResultCache::new(config),
                flights: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// The underlying HTTP client.
    pub fn client(&self) -> &StatsClient {
        &self.inner.client
    }

    /// The shared result cache.
    pub fn cache(&self) -> &ResultCache {
        &self.inner.cache
    }

    /// Fetch the payload for an (endpoint, params) pair.
    ///
    /// Consults the cache first; on a miss, joins or starts the single
    /// flight for the key. Within one TTL window, any number of calls for
    /// the same key cost at most one upstream request. Failures resolve to
    /// the extracted upstream message and are cached like successes; there
    /// is no automatic retry.
    pub async fn fetch(&self, endpoint: &str, params: &Params) -> FetchResult {
        let key = cache_key(endpoint, params);
        match self.inner.cache.lookup(&key) {
            Lookup::Hit(value) => {
                debug!(key, "cache hit");
                return Ok(value);
            }
            Lookup::Failure(message) => {
                debug!(key, "cached failure replayed");
                return Err(FetchError(message));
            }
            Lookup::Miss => {}
        }
        self.flight_for(key, endpoint, params).await
    }

    /// Join the in-flight request for `key`, or start one.
    fn flight_for(&self, key: String, endpoint: &str, params: &Params) -> SharedFlight {
        let mut flights = self
            .inner
            .flights
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(flight) = flights.get(&key) {
            metrics::counter!(telemetry::FLIGHTS_JOINED_TOTAL).increment(1);
            debug!(key, "joining in-flight request");
            return flight.clone();
        }

        let inner = Arc::clone(&self.inner);
        let endpoint = endpoint.to_string();
        let params = params.clone();
        let task_key = key.clone();
        let handle = tokio::spawn(async move {
            let result = match inner.client.get(&endpoint, &params).await {
                Ok(value) => {
                    inner.cache.insert_ok(&task_key, value.clone());
                    Ok(value)
                }
                Err(err) => {
                    let fetch = FetchError::from(&err);
                    warn!(key = task_key, error = %fetch, "upstream fetch failed");
                    inner.cache.insert_err(&task_key, fetch.0.clone());
                    Err(fetch)
                }
            };
            // Cache write precedes removal, so a racing fetch either joins
            // this flight or hits the cache.
            inner
                .flights
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&task_key);
            result
        });

        let flight: SharedFlight = async move {
            handle
                .await
                .unwrap_or_else(|e| Err(FetchError(format!("request task failed: {e}"))))
        }
        .boxed()
        .shared();
        flights.insert(key, flight.clone());
        flight
    }
}
