//! Wallet Dashboard Module
//!
//! Clean Architecture structure:
//! - `domain/` - Wallet and evacuation entities, request parameters
//! - `application/` - Cached queries, derived metrics, config
//! - `infra/` - Authenticated HTTP client for the dashboard API
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Wallet list, summary and analytics through the query cache
//! - Evacuation history with success rate and averages
//! - Bearer token taken from the credential store on every request

pub mod application;
pub mod domain;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{
    ApiConfig, CachePolicies, DashboardQueries, EvacuationAnalytics, WalletTotals,
};
pub use domain::{
    AnalyticsPeriod, EvacuationFilter, EvacuationRecord, Paginated, Wallet, WalletAnalytics,
    WalletListParams, WalletSummary,
};
pub use infra::DashboardApi;
pub use presentation::router::dashboard_router;

#[cfg(test)]
mod tests;
