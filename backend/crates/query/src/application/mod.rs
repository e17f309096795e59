//! Application Layer
//!
//! Query client and per-resource fetch options.

pub mod client;
pub mod options;

// Re-exports
pub use client::QueryClient;
pub use options::QueryOptions;
