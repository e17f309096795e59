//! Shared Kernel - Cross-crate minimal core
//!
//! The smallest vocabulary every dashboard crate agrees on:
//! - Unified error type ([`error::app_error::AppError`]) rendered as problem JSON
//! - Error classification ([`error::kind::ErrorKind`]) mapped to HTTP status codes
//!
//! **Design Principle**: only things that are hard to change and mean the
//! same thing in the session, query and wallet crates live here.

pub mod error {
    pub mod app_error;
    #[cfg(feature = "axum")]
    pub mod conversions;
    pub mod kind;
}

pub use error::app_error::AppError;
pub use error::kind::ErrorKind;
