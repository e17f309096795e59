//! Derived Metrics
//!
//! Pure folds from raw records to the figures shown on the dashboard.
//! Record order never changes a result; empty input gives all zeros.

use serde::Serialize;

use crate::domain::entity::{EvacuationRecord, Wallet};

pub fn sum_amounts(amounts: impl IntoIterator<Item = f64>) -> f64 {
    amounts.into_iter().filter(|amount| amount.is_finite()).sum()
}

/// `(processed - failed) / processed * 100`, 0 when nothing was processed
pub fn success_rate(processed: u64, failed: u64) -> f64 {
    if processed == 0 {
        return 0.0;
    }
    processed.saturating_sub(failed) as f64 / processed as f64 * 100.0
}

/// `total / count`, 0 for an empty set
pub fn average(total: f64, count: u64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    total / count as f64
}

/// Aggregate view of an evacuation history
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvacuationAnalytics {
    pub total_amount_evacuated: f64,
    pub total_accounts_processed: u64,
    pub total_failures: u64,
    pub evacuation_count: u64,
    /// Percentage, 0..=100
    pub success_rate: f64,
    pub average_amount_per_evacuation: f64,
}

impl EvacuationAnalytics {
    pub fn from_records(records: &[EvacuationRecord]) -> Self {
        let total_amount_evacuated = sum_amounts(records.iter().map(|r| r.total_amount_moved));
        let total_accounts_processed = records
            .iter()
            .fold(0u64, |acc, r| acc.saturating_add(r.total_accounts_processed));
        let total_failures = records
            .iter()
            .fold(0u64, |acc, r| acc.saturating_add(r.total_failures));
        let evacuation_count = records.len() as u64;

        Self {
            total_amount_evacuated,
            total_accounts_processed,
            total_failures,
            evacuation_count,
            success_rate: success_rate(total_accounts_processed, total_failures),
            average_amount_per_evacuation: average(total_amount_evacuated, evacuation_count),
        }
    }
}

/// Overview figures for one page of wallets
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletTotals {
    pub wallet_count: u64,
    pub active_wallets: u64,
    pub total_balance: f64,
    pub average_balance: f64,
}

impl WalletTotals {
    pub fn from_wallets(wallets: &[Wallet]) -> Self {
        let wallet_count = wallets.len() as u64;
        let total_balance = sum_amounts(wallets.iter().map(|w| w.balance));

        Self {
            wallet_count,
            active_wallets: wallets.iter().filter(|w| w.is_active()).count() as u64,
            total_balance,
            average_balance: average(total_balance, wallet_count),
        }
    }
}
