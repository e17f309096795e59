//! Domain Layer
//!
//! Cache keys, namespaces and entries.

pub mod entry;
pub mod key;

// Re-exports
pub use entry::{CacheEntry, CacheState, CachedValue};
pub use key::{Namespace, QueryKey};
