//! Evacuation Record Entity
//!
//! One bulk transfer of funds out of a source wallet.

use serde::{Deserialize, Serialize};

use crate::domain::value_object::lenient;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EvacuationRecord {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, alias = "transferredFrom")]
    pub transferred_from: Option<String>,
    #[serde(
        default,
        alias = "totalAmountMoved",
        alias = "amount",
        deserialize_with = "lenient::amount"
    )]
    pub total_amount_moved: f64,
    #[serde(
        default,
        alias = "totalAccountsProcessed",
        alias = "accountsProcessed",
        deserialize_with = "lenient::count"
    )]
    pub total_accounts_processed: u64,
    #[serde(
        default,
        alias = "totalFailures",
        alias = "failures",
        deserialize_with = "lenient::count"
    )]
    pub total_failures: u64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
}
