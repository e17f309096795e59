//! Query Cache Module
//!
//! Clean Architecture structure:
//! - `domain/` - Cache keys, namespaces, entries and their lifecycle
//! - `application/` - Query client and fetch options
//!
//! ## Features
//! - Fresh / stale / expired aging per resource
//! - One in-flight fetch per key, shared by every waiting caller
//! - Background refresh of stale values
//! - Retry with exponential backoff for transient failures
//! - Namespace invalidation (used on login and logout)

pub mod application;
pub mod domain;
pub mod error;

// Re-exports for convenience
pub use application::{QueryClient, QueryOptions};
pub use domain::{CacheEntry, CacheState, Namespace, QueryKey};
pub use error::{QueryError, QueryResult};

#[cfg(test)]
mod tests;
