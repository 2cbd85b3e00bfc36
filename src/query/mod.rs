//! Reactive query handles over [`StatsService`].
//!
//! [`Query`] is the consumer-facing fetch surface: give it an endpoint and
//! a parameter set and watch a [`QueryState`] evolve. It mirrors how a UI
//! consumes the service — one query per view, parameters changing as the
//! user types, the previous request superseded rather than awaited.
//!
//! Semantics:
//!
//! - `set_params(None)` is the "no query yet" sentinel: state resets to
//!   idle and nothing is fetched.
//! - A cache hit (success or remembered failure) publishes synchronously,
//!   with no task spawned.
//! - A miss publishes `loading` (prior data and error cleared) and spawns
//!   a watcher task that awaits the service fetch.
//! - A new `set_params` call, or dropping the query, aborts the current
//!   watcher: a superseded request never writes state. The underlying
//!   flight is shared and detached, so aborting a watcher does not cancel
//!   the request for other interested parties or for the cache.

use serde_json::Value;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::cache::{Lookup, StatsService, cache_key};
use crate::client::Params;

/// Observable state of one query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    /// The decoded payload, on success.
    pub data: Option<Value>,
    /// Whether a request is in flight.
    pub loading: bool,
    /// The failure message, on error. Never set alongside `data`.
    pub error: Option<String>,
}

impl QueryState {
    fn loading() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }

    fn ok(data: Value) -> Self {
        Self {
            data: Some(data),
            loading: false,
            error: None,
        }
    }

    fn failed(message: String) -> Self {
        Self {
            data: None,
            loading: false,
            error: Some(message),
        }
    }
}

/// A live query against one endpoint.
pub struct Query {
    service: StatsService,
    endpoint: String,
    tx: watch::Sender<QueryState>,
    task: Option<JoinHandle<()>>,
}

impl Query {
    /// Create an idle query for `endpoint`. No fetch happens until
    /// [`set_params`](Query::set_params) provides parameters.
    pub fn new(service: StatsService, endpoint: impl Into<String>) -> Self {
        let (tx, _) = watch::channel(QueryState::default());
        Self {
            service,
            endpoint: endpoint.into(),
            tx,
            task: None,
        }
    }

    /// The endpoint this query targets.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> QueryState {
        self.tx.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<QueryState> {
        self.tx.subscribe()
    }

    /// Replace the query parameters, superseding any in-flight request.
    ///
    /// `None` resets to idle. Otherwise the cache answers synchronously
    /// when it can; a miss goes through the service (which de-duplicates
    /// concurrent requests for the same key) on a background task.
    pub fn set_params(&mut self, params: Option<Params>) {
        if let Some(task) = self.task.take() {
            task.abort();
        }

        let Some(params) = params else {
            self.tx.send_replace(QueryState::default());
            return;
        };

        let key = cache_key(&self.endpoint, &params);
        match self.service.cache().lookup(&key) {
            Lookup::Hit(value) => {
                self.tx.send_replace(QueryState::ok(value));
            }
            Lookup::Failure(message) => {
                self.tx.send_replace(QueryState::failed(message));
            }
            Lookup::Miss => {
                self.tx.send_replace(QueryState::loading());
                let service = self.service.clone();
                let endpoint = self.endpoint.clone();
                let tx = self.tx.clone();
                self.task = Some(tokio::spawn(async move {
                    let state = match service.fetch(&endpoint, &params).await {
                        Ok(value) => QueryState::ok(value),
                        Err(err) => QueryState::failed(err.0),
                    };
                    tx.send_replace(state);
                }));
            }
        }
    }
}

impl Drop for Query {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
