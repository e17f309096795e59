//! Cache Entry Entity
//!
//! One cached resource and its aging windows. The lifecycle is an explicit
//! [`CacheState`] derived from the entry, the clock and the in-flight table.

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use derive_more::Display;
use tokio::time::Instant;

use crate::domain::key::QueryKey;
use crate::error::QueryError;

/// Type-erased cached value
pub type CachedValue = Arc<dyn Any + Send + Sync>;

/// Lifecycle state of a cache entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CacheState {
    /// Within `stale_after`: served without a network call
    #[display("fresh")]
    Fresh,
    /// Past `stale_after`: served while a background refetch runs
    #[display("stale")]
    Stale,
    /// Past `expire_after`: not servable, caller waits for a new fetch
    #[display("expired")]
    Expired,
    /// No value yet, first fetch in flight
    #[display("fetching")]
    Fetching,
    /// No value, last fetch failed
    #[display("error")]
    Error,
}

/// Cache entry
#[derive(Clone)]
pub struct CacheEntry {
    pub key: QueryKey,
    pub value: Option<CachedValue>,
    pub fetched_at: Instant,
    pub stale_after: Duration,
    pub expire_after: Duration,
    /// Most recent failure, including background refetch failures
    pub last_error: Option<QueryError>,
}

impl CacheEntry {
    /// Entry holding a freshly fetched value
    pub fn ready(
        key: QueryKey,
        value: CachedValue,
        fetched_at: Instant,
        stale_after: Duration,
        expire_after: Duration,
    ) -> Self {
        Self {
            key,
            value: Some(value),
            fetched_at,
            stale_after,
            expire_after,
            last_error: None,
        }
    }

    /// Entry recording a failed fetch with nothing to serve
    pub fn failed(
        key: QueryKey,
        error: QueryError,
        fetched_at: Instant,
        stale_after: Duration,
        expire_after: Duration,
    ) -> Self {
        Self {
            key,
            value: None,
            fetched_at,
            stale_after,
            expire_after,
            last_error: Some(error),
        }
    }

    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.fetched_at)
    }

    pub fn state(&self, now: Instant, fetching: bool) -> CacheState {
        match (&self.value, fetching) {
            (Some(_), _) => {
                let age = self.age(now);
                if age >= self.expire_after {
                    CacheState::Expired
                } else if age >= self.stale_after {
                    CacheState::Stale
                } else {
                    CacheState::Fresh
                }
            }
            (None, true) => CacheState::Fetching,
            (None, false) => CacheState::Error,
        }
    }
}

impl fmt::Debug for CacheEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("key", &self.key)
            .field("has_value", &self.value.is_some())
            .field("fetched_at", &self.fetched_at)
            .field("stale_after", &self.stale_after)
            .field("expire_after", &self.expire_after)
            .field("last_error", &self.last_error)
            .finish()
    }
}
