//! The cache bookkeeping: per-query state machine, subscribers, and the
//! request-identity guard against superseded in-flight responses.
//!
//! All mutation of this state happens on the UI thread; the mutex is interior
//! mutability, not a concurrency protocol.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use stocklist_catalog::{Product, ProductCategory};
use stocklist_client::Query;

use crate::policy;
use crate::tag::Tag;

/// Identity of one issued fetch. Monotonic per context; only the newest
/// request for a key may apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

/// Lifecycle of a cached query result. No terminal state: `Stale` and `Error`
/// both re-enter `Fetching` on the next subscriber access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryStatus {
    #[default]
    Unfetched,
    Fetching,
    Fresh,
    Stale,
    Error,
}

/// Payload of a resolved query, shaped by the query kind.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryData {
    Products(Vec<Product>),
    Product(Product),
    Categories(Vec<ProductCategory>),
    Category(ProductCategory),
}

/// What a subscriber should do after registering interest in a key.
#[derive(Debug, Clone, PartialEq)]
pub enum SubscribeOutcome {
    /// The entry is fresh; use the cached data as-is.
    Cached(QueryData),
    /// A fetch was issued (or re-issued) under this request identity; perform
    /// it and resolve with the outcome.
    Fetch(RequestId),
}

#[derive(Debug, Default)]
struct Entry {
    status: QueryStatus,
    data: Option<QueryData>,
    provided: Vec<Tag>,
    subscribers: usize,
    in_flight: Option<RequestId>,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<Query, Entry>,
    next_request: u64,
}

impl CacheState {
    fn issue_request(&mut self) -> RequestId {
        let id = RequestId(self.next_request);
        self.next_request += 1;
        id
    }
}

/// Process-wide cache bookkeeping, held explicitly by whoever owns the client
/// (created at application start, dropped on teardown) rather than living in
/// ambient global state.
#[derive(Debug, Default)]
pub struct CacheContext {
    inner: Mutex<CacheState>,
}

impl CacheContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        // Single UI thread; a poisoned lock only means a panicked test.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a subscriber for `query`.
    ///
    /// A fresh entry short-circuits to its cached data. Anything else
    /// (unfetched, stale, error — or an already-fetching entry) issues a new
    /// request identity; the newer identity supersedes any older in-flight
    /// one, whose late result will be dropped by [`CacheContext::resolve_ok`].
    pub fn subscribe(&self, query: Query) -> SubscribeOutcome {
        let mut state = self.lock();
        let request = state.issue_request();
        let entry = state.entries.entry(query).or_default();
        entry.subscribers += 1;

        match entry.status {
            QueryStatus::Fresh => {
                // Data is always present when fresh.
                if let Some(data) = entry.data.clone() {
                    return SubscribeOutcome::Cached(data);
                }
                SubscribeOutcome::Fetch(issue(entry, request))
            }
            _ => SubscribeOutcome::Fetch(issue(entry, request)),
        }
    }

    /// Drop one subscriber for `query`. When the last subscriber of a
    /// fetching entry leaves, the in-flight request is cancelled (its eventual
    /// resolution will be ignored). Returns true if a fetch was cancelled.
    pub fn unsubscribe(&self, query: Query) -> bool {
        let mut state = self.lock();
        let Some(entry) = state.entries.get_mut(&query) else {
            return false;
        };
        entry.subscribers = entry.subscribers.saturating_sub(1);

        if entry.subscribers == 0 && entry.status == QueryStatus::Fetching {
            entry.in_flight = None;
            entry.status = if entry.data.is_some() {
                QueryStatus::Stale
            } else {
                QueryStatus::Unfetched
            };
            return true;
        }
        false
    }

    /// Apply a successful fetch, unless `request` has been superseded or
    /// cancelled — a later-arriving response for an older request must not
    /// overwrite fresher data. Returns true if the result was applied.
    pub fn resolve_ok(&self, query: Query, request: RequestId, data: QueryData) -> bool {
        let mut state = self.lock();
        let Some(entry) = state.entries.get_mut(&query) else {
            return false;
        };
        if entry.in_flight != Some(request) {
            tracing::debug!(?query, "dropping superseded fetch result");
            return false;
        }

        entry.provided = policy::provided_tags(&query, &data);
        entry.data = Some(data);
        entry.status = QueryStatus::Fresh;
        entry.in_flight = None;
        true
    }

    /// Apply a failed fetch (same superseded-request guard). The entry lands
    /// in `Error`, never `Fresh`; previously cached data is kept for display
    /// but its tags no longer bind.
    pub fn resolve_err(&self, query: Query, request: RequestId) -> bool {
        let mut state = self.lock();
        let Some(entry) = state.entries.get_mut(&query) else {
            return false;
        };
        if entry.in_flight != Some(request) {
            return false;
        }

        entry.provided.clear();
        entry.status = QueryStatus::Error;
        entry.in_flight = None;
        true
    }

    /// Invalidate every entry whose provided tags are covered by any of
    /// `tags`. Covered fresh entries with live subscribers flip straight to
    /// fetching and come back as the refetch plan the caller must execute
    /// immediately; unsubscribed entries go stale until their next access.
    /// A covered entry that is already fetching (its tags persist from the
    /// prior resolution) has its in-flight request superseded, so a response
    /// read before this write cannot land as fresh.
    pub fn invalidate(&self, tags: &[Tag]) -> Vec<(Query, RequestId)> {
        let mut state = self.lock();
        let mut refetch = Vec::new();

        // Collect first: issuing request ids needs `&mut state` as a whole.
        let hit: Vec<Query> = state
            .entries
            .iter()
            .filter(|(_, entry)| {
                matches!(entry.status, QueryStatus::Fresh | QueryStatus::Fetching)
                    && entry
                        .provided
                        .iter()
                        .any(|provided| tags.iter().any(|tag| tag.covers(provided)))
            })
            .map(|(query, _)| *query)
            .collect();

        for query in hit {
            let request = state.issue_request();
            let Some(entry) = state.entries.get_mut(&query) else {
                continue;
            };
            if entry.subscribers > 0 {
                issue(entry, request);
                refetch.push((query, request));
            } else {
                entry.in_flight = None;
                entry.status = QueryStatus::Stale;
            }
        }

        refetch
    }

    /// Current lifecycle state of `query` (`Unfetched` when never seen).
    pub fn status(&self, query: Query) -> QueryStatus {
        self.lock()
            .entries
            .get(&query)
            .map(|entry| entry.status)
            .unwrap_or(QueryStatus::Unfetched)
    }

    /// Last successfully cached data for `query`, regardless of freshness.
    pub fn data(&self, query: Query) -> Option<QueryData> {
        self.lock().entries.get(&query).and_then(|entry| entry.data.clone())
    }

    /// Number of live subscribers for `query`.
    pub fn subscribers(&self, query: Query) -> usize {
        self.lock()
            .entries
            .get(&query)
            .map(|entry| entry.subscribers)
            .unwrap_or(0)
    }
}

fn issue(entry: &mut Entry, request: RequestId) -> RequestId {
    entry.status = QueryStatus::Fetching;
    entry.in_flight = Some(request);
    request
}
