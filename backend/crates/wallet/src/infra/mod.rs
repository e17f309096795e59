//! Infrastructure Layer
//!
//! HTTP client for the upstream dashboard API.

pub mod http_client;

pub use http_client::DashboardApi;
