//! Query Client
//!
//! Keyed, time-based cache over caller-supplied loaders.
//!
//! ## Guarantees
//! - At most one fetch per key is in flight; concurrent callers attach to it
//! - Stale values are served immediately while one background refetch runs
//! - Expired values are never served
//! - Invalidated fetches are never written back to the cache
//!
//! Fetches run as spawned tasks shared through [`futures::future::Shared`],
//! so a caller that goes away never leaves a fetch half-committed.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::{BoxFuture, FutureExt, Shared};
use platform::retry::retry_with_backoff;
use tokio::time::Instant;

use crate::application::options::QueryOptions;
use crate::domain::entry::{CacheEntry, CacheState, CachedValue};
use crate::domain::key::{Namespace, QueryKey};
use crate::error::{QueryError, QueryResult};

type SharedFetch = Shared<BoxFuture<'static, QueryResult<CachedValue>>>;

struct InFlight {
    id: u64,
    fetch: SharedFetch,
}

#[derive(Default)]
struct CacheTable {
    entries: HashMap<QueryKey, CacheEntry>,
    in_flight: HashMap<QueryKey, InFlight>,
    next_fetch_id: u64,
}

/// Query cache handle
///
/// Cheap to clone; clones share one cache. Construct one per process (or
/// per test) and pass it to whoever needs it.
#[derive(Clone, Default)]
pub struct QueryClient {
    table: Arc<Mutex<CacheTable>>,
}

impl QueryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch `key`, serving from cache when the entry allows it
    pub async fn fetch<T, F, Fut>(
        &self,
        key: &QueryKey,
        loader: F,
        options: &QueryOptions,
    ) -> QueryResult<T>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = QueryResult<T>> + Send + 'static,
    {
        let pending = {
            let mut guard = self.lock();
            let table = &mut *guard;

            let now = Instant::now();
            let fetching = table.in_flight.contains_key(key);
            let cached = table
                .entries
                .get(key)
                .map(|entry| (entry.state(now, fetching), entry.value.clone()));

            match cached {
                Some((CacheState::Fresh, Some(value))) => {
                    tracing::trace!(key = %key, "Cache hit");
                    return downcast(key, &value);
                }
                Some((CacheState::Stale, Some(value))) => {
                    if !fetching {
                        tracing::debug!(key = %key, "Serving stale value, refreshing in background");
                        self.start_fetch(table, key, loader, options);
                    }
                    return downcast(key, &value);
                }
                Some((CacheState::Expired, _)) => {
                    tracing::debug!(key = %key, "Discarding expired value");
                    table.entries.remove(key);
                }
                _ => {}
            }

            match table.in_flight.get(key) {
                Some(in_flight) => {
                    tracing::trace!(key = %key, "Attaching to in-flight fetch");
                    in_flight.fetch.clone()
                }
                None => self.start_fetch(table, key, loader, options),
            }
        };

        let value = pending.await?;
        downcast(key, &value)
    }

    /// Evict every entry under `namespace` and forget its in-flight fetches
    ///
    /// Returns the number of evicted entries.
    pub fn invalidate(&self, namespace: &Namespace) -> usize {
        let mut guard = self.lock();
        let table = &mut *guard;

        let before = table.entries.len();
        table.entries.retain(|key, _| !key.is_under(namespace));
        table.in_flight.retain(|key, _| !key.is_under(namespace));
        let evicted = before - table.entries.len();

        tracing::debug!(namespace = %namespace, evicted, "Invalidated cache namespace");
        evicted
    }

    pub fn invalidate_all(&self) -> usize {
        self.invalidate(&Namespace::all())
    }

    /// Current lifecycle state of `key`, `None` when nothing is known about it
    pub fn state(&self, key: &QueryKey) -> Option<CacheState> {
        let table = self.lock();
        let fetching = table.in_flight.contains_key(key);

        match table.entries.get(key) {
            Some(entry) => Some(entry.state(Instant::now(), fetching)),
            None if fetching => Some(CacheState::Fetching),
            None => None,
        }
    }

    /// Most recent failure recorded for `key`
    pub fn last_error(&self, key: &QueryKey) -> Option<QueryError> {
        self.lock()
            .entries
            .get(key)
            .and_then(|entry| entry.last_error.clone())
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn start_fetch<T, F, Fut>(
        &self,
        table: &mut CacheTable,
        key: &QueryKey,
        loader: F,
        options: &QueryOptions,
    ) -> SharedFetch
    where
        T: Clone + Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = QueryResult<T>> + Send + 'static,
    {
        table.next_fetch_id += 1;
        let id = table.next_fetch_id;

        let cache = Arc::downgrade(&self.table);
        let fetch_key = key.clone();
        let options = options.clone();

        let fetch = async move {
            let result = retry_with_backoff(&options.retry, QueryError::is_retryable, || loader())
                .await
                .map(|value| Arc::new(value) as CachedValue);

            if let Some(cache) = cache.upgrade() {
                commit(&cache, &fetch_key, id, &result, &options);
            }
            result
        }
        .boxed()
        .shared();

        table.in_flight.insert(
            key.clone(),
            InFlight {
                id,
                fetch: fetch.clone(),
            },
        );
        tokio::spawn(fetch.clone());

        fetch
    }

    fn lock(&self) -> MutexGuard<'_, CacheTable> {
        lock_table(&self.table)
    }
}

fn lock_table(table: &Mutex<CacheTable>) -> MutexGuard<'_, CacheTable> {
    table.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Write a finished fetch back, unless it was invalidated meanwhile
fn commit(
    cache: &Mutex<CacheTable>,
    key: &QueryKey,
    id: u64,
    result: &QueryResult<CachedValue>,
    options: &QueryOptions,
) {
    let mut guard = lock_table(cache);
    let table = &mut *guard;

    if table.in_flight.get(key).map(|in_flight| in_flight.id) != Some(id) {
        tracing::debug!(key = %key, "Discarding result of superseded fetch");
        return;
    }
    table.in_flight.remove(key);

    let now = Instant::now();
    match result {
        Ok(value) => {
            table.entries.insert(
                key.clone(),
                CacheEntry::ready(
                    key.clone(),
                    value.clone(),
                    now,
                    options.stale_after,
                    options.expire_after,
                ),
            );
        }
        Err(error) => {
            let kept_stale = match table.entries.get_mut(key) {
                Some(entry) if entry.value.is_some() => {
                    entry.last_error = Some(error.clone());
                    true
                }
                _ => false,
            };

            if kept_stale {
                tracing::warn!(key = %key, error = %error, "Background refetch failed, keeping stale value");
            } else {
                tracing::debug!(key = %key, error = %error, "Fetch failed");
                table.entries.insert(
                    key.clone(),
                    CacheEntry::failed(
                        key.clone(),
                        error.clone(),
                        now,
                        options.stale_after,
                        options.expire_after,
                    ),
                );
            }
        }
    }
}

fn downcast<T: Clone + 'static>(key: &QueryKey, value: &CachedValue) -> QueryResult<T> {
    value
        .as_ref()
        .downcast_ref::<T>()
        .cloned()
        .ok_or_else(|| QueryError::TypeMismatch(key.to_string()))
}
