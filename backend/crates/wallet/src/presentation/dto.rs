//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::metrics::{EvacuationAnalytics, WalletTotals};
use crate::domain::entity::{EvacuationRecord, Paginated, Wallet};
use crate::domain::value_object::params::AnalyticsPeriod;

/// Wallet page with figures for the visible rows
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletsResponse {
    pub wallets: Paginated<Wallet>,
    pub total_pages: u64,
    pub has_next: bool,
    pub totals: WalletTotals,
}

impl From<Paginated<Wallet>> for WalletsResponse {
    fn from(wallets: Paginated<Wallet>) -> Self {
        Self {
            total_pages: wallets.total_pages(),
            has_next: wallets.has_next(),
            totals: WalletTotals::from_wallets(&wallets.data),
            wallets,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsQuery {
    #[serde(default)]
    pub period: AnalyticsPeriod,
}

/// Evacuation history with its derived analytics
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvacuationsResponse {
    pub records: Vec<EvacuationRecord>,
    pub analytics: EvacuationAnalytics,
}

/// Cache entries dropped by a manual refresh
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub evicted: usize,
}
