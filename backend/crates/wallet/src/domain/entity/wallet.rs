//! Wallet Entities
//!
//! Wallet rows, the paginated list envelope, the overview summary and the
//! per-period analytics report.

use serde::{Deserialize, Serialize};

use crate::domain::value_object::lenient;

/// Customer wallet
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, alias = "owner_name", alias = "owner")]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub balance: f64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "created_at")]
    pub created_at: Option<String>,
}

impl Wallet {
    pub fn is_active(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|status| status.eq_ignore_ascii_case("active"))
    }
}

/// One page of a list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    #[serde(default = "Vec::new", alias = "items", alias = "results")]
    pub data: Vec<T>,
    #[serde(default = "first_page", deserialize_with = "lenient::count_u32")]
    pub page: u32,
    #[serde(default, alias = "page_size", alias = "limit", deserialize_with = "lenient::count_u32")]
    pub page_size: u32,
    #[serde(default, alias = "total_count", alias = "count", deserialize_with = "lenient::count")]
    pub total: u64,
}

fn first_page() -> u32 {
    1
}

impl<T> Paginated<T> {
    /// Pages needed for `total`, at least 1
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 1;
        }
        self.total.div_ceil(self.page_size as u64).max(1)
    }

    pub fn has_next(&self) -> bool {
        (self.page as u64) < self.total_pages()
    }
}

/// Overview figures for the dashboard landing page
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSummary {
    #[serde(default, alias = "total_wallets", deserialize_with = "lenient::count")]
    pub total_wallets: u64,
    #[serde(default, alias = "active_wallets", deserialize_with = "lenient::count")]
    pub active_wallets: u64,
    #[serde(default, alias = "total_balance", deserialize_with = "lenient::amount")]
    pub total_balance: f64,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Activity for one reporting window
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletAnalytics {
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default, alias = "total_volume", deserialize_with = "lenient::amount")]
    pub total_volume: f64,
    #[serde(default, alias = "transaction_count", deserialize_with = "lenient::count")]
    pub transaction_count: u64,
    #[serde(default, alias = "new_wallets", deserialize_with = "lenient::count")]
    pub new_wallets: u64,
    #[serde(default)]
    pub series: Vec<AnalyticsPoint>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsPoint {
    #[serde(default)]
    pub date: String,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub volume: f64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub count: u64,
}
