//! Query Options
//!
//! Per-resource aging windows and retry policy.

use std::time::Duration;

use platform::retry::RetryPolicy;

pub const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(30);
pub const DEFAULT_EXPIRE_AFTER: Duration = Duration::from_secs(5 * 60);

/// Fetch options
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOptions {
    /// Age after which a value is served stale and refreshed in the background
    pub stale_after: Duration,
    /// Age after which a value is discarded
    pub expire_after: Duration,
    /// Retry policy for the loader
    pub retry: RetryPolicy,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            stale_after: DEFAULT_STALE_AFTER,
            expire_after: DEFAULT_EXPIRE_AFTER,
            retry: RetryPolicy::default(),
        }
    }
}

impl QueryOptions {
    pub fn new(stale_after: Duration, expire_after: Duration) -> Self {
        Self {
            stale_after,
            expire_after,
            ..Self::default()
        }
        .validated()
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry.validated();
        self
    }

    /// `expire_after` never precedes `stale_after`
    pub fn validated(mut self) -> Self {
        if self.expire_after < self.stale_after {
            self.expire_after = self.stale_after;
        }
        self.retry = self.retry.validated();
        self
    }
}
