//! Application Layer
//!
//! Cached queries, derived metrics and configuration.

pub mod config;
pub mod metrics;
pub mod queries;

// Re-exports
pub use config::{ApiConfig, CachePolicies};
pub use metrics::{EvacuationAnalytics, WalletTotals, average, success_rate, sum_amounts};
pub use queries::DashboardQueries;
