//! Domain Layer
//!
//! Wallet and evacuation entities, request parameters.

pub mod entity;
pub mod value_object;

// Re-exports
pub use entity::{
    AnalyticsPoint, EvacuationRecord, Paginated, Wallet, WalletAnalytics, WalletSummary,
};
pub use value_object::params::{AnalyticsPeriod, EvacuationFilter, WalletListParams};
