//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Durable cookie jar with storage-level expiry
//! - Retry with exponential backoff for upstream calls

pub mod cookie;
pub mod retry;

pub use cookie::{CookieConfig, CookieError, CookieJar, CookieResult, StoredCookie};
pub use retry::{RetryPolicy, retry_with_backoff};
