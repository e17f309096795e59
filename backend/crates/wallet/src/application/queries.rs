//! Dashboard Queries
//!
//! Cached access to the dashboard resources. Owns the cache-key conventions:
//!
//! | Resource | Key |
//! |----------|-----|
//! | wallet list | `wallets/list?page=..&page_size=..` |
//! | wallet summary | `wallets/summary` |
//! | analytics | `analytics/period?period=..` |
//! | evacuation history | `evacuation/history?transferred_from=..&from=..&to=..` |

use auth::CredentialStore;
use query::{Namespace, QueryClient, QueryKey, QueryResult};

use crate::application::config::CachePolicies;
use crate::application::metrics::EvacuationAnalytics;
use crate::domain::entity::{EvacuationRecord, Paginated, Wallet, WalletAnalytics, WalletSummary};
use crate::domain::value_object::params::{AnalyticsPeriod, EvacuationFilter, WalletListParams};
use crate::infra::http_client::DashboardApi;

pub mod keys {
    use super::*;

    pub const WALLETS: &str = "wallets";
    pub const ANALYTICS: &str = "analytics";
    pub const EVACUATION: &str = "evacuation";

    pub fn wallet_list(params: &WalletListParams) -> QueryKey {
        QueryKey::new(WALLETS)
            .child("list")
            .param("page", params.page)
            .param("page_size", params.page_size)
            .param_opt("search", params.search.as_deref())
            .param_opt("status", params.status.as_deref())
    }

    pub fn wallet_summary() -> QueryKey {
        QueryKey::new(WALLETS).child("summary")
    }

    pub fn analytics(period: &AnalyticsPeriod) -> QueryKey {
        QueryKey::new(ANALYTICS)
            .child("period")
            .param("period", period)
    }

    pub fn evacuation_history(filter: &EvacuationFilter) -> QueryKey {
        QueryKey::new(EVACUATION)
            .child("history")
            .param_opt("transferred_from", filter.transferred_from.as_deref())
            .param_opt("from", filter.from)
            .param_opt("to", filter.to)
    }
}

/// Cached dashboard data
pub struct DashboardQueries<S>
where
    S: CredentialStore + 'static,
{
    api: DashboardApi<S>,
    client: QueryClient,
    policies: CachePolicies,
}

impl<S: CredentialStore + 'static> DashboardQueries<S> {
    pub fn new(api: DashboardApi<S>, client: QueryClient) -> Self {
        Self {
            api,
            client,
            policies: CachePolicies::default(),
        }
    }

    pub fn with_policies(mut self, policies: CachePolicies) -> Self {
        self.policies = policies;
        self
    }

    pub fn client(&self) -> &QueryClient {
        &self.client
    }

    pub async fn wallets(&self, params: &WalletListParams) -> QueryResult<Paginated<Wallet>> {
        let api = self.api.clone();
        let params = params.clone().normalized();
        let key = keys::wallet_list(&params);

        self.client
            .fetch(
                &key,
                move || {
                    let api = api.clone();
                    let params = params.clone();
                    async move { api.wallets(&params).await }
                },
                &self.policies.wallets,
            )
            .await
    }

    pub async fn wallet_summary(&self) -> QueryResult<WalletSummary> {
        let api = self.api.clone();

        self.client
            .fetch(
                &keys::wallet_summary(),
                move || {
                    let api = api.clone();
                    async move { api.wallet_summary().await }
                },
                &self.policies.wallet_summary,
            )
            .await
    }

    pub async fn analytics(&self, period: AnalyticsPeriod) -> QueryResult<WalletAnalytics> {
        let api = self.api.clone();

        self.client
            .fetch(
                &keys::analytics(&period),
                move || {
                    let api = api.clone();
                    async move { api.analytics(&period).await }
                },
                &self.policies.analytics,
            )
            .await
    }

    pub async fn evacuation_history(
        &self,
        filter: &EvacuationFilter,
    ) -> QueryResult<Vec<EvacuationRecord>> {
        let api = self.api.clone();
        let filter = filter.clone();
        let key = keys::evacuation_history(&filter);

        self.client
            .fetch(
                &key,
                move || {
                    let api = api.clone();
                    let filter = filter.clone();
                    async move { api.evacuation_history(&filter).await }
                },
                &self.policies.evacuation_history,
            )
            .await
    }

    /// History for `filter` folded into aggregate figures
    pub async fn evacuation_analytics(
        &self,
        filter: &EvacuationFilter,
    ) -> QueryResult<EvacuationAnalytics> {
        let records = self.evacuation_history(filter).await?;
        Ok(EvacuationAnalytics::from_records(&records))
    }

    /// Drop every cached dashboard resource; the next read refetches
    pub fn refresh(&self) -> usize {
        [keys::WALLETS, keys::ANALYTICS, keys::EVACUATION]
            .into_iter()
            .map(|root| self.client.invalidate(&Namespace::new(root)))
            .sum()
    }
}
