//! Dashboard API Client
//!
//! reqwest client for the wallet endpoints. The bearer token is read from
//! the credential store on every call, so logout takes effect immediately.

use std::sync::Arc;

use auth::CredentialStore;
use query::{QueryError, QueryResult};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::application::config::ApiConfig;
use crate::domain::entity::{EvacuationRecord, Paginated, Wallet, WalletAnalytics, WalletSummary};
use crate::domain::value_object::params::{AnalyticsPeriod, EvacuationFilter, WalletListParams};

/// History arrives either bare or wrapped in `{ "data": [...] }`
#[derive(Deserialize)]
#[serde(untagged)]
enum RecordList {
    Bare(Vec<EvacuationRecord>),
    Wrapped { data: Vec<EvacuationRecord> },
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Authenticated client for the dashboard API
pub struct DashboardApi<S>
where
    S: CredentialStore,
{
    client: Client,
    config: Arc<ApiConfig>,
    store: Arc<S>,
}

impl<S: CredentialStore> Clone for DashboardApi<S> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            config: self.config.clone(),
            store: self.store.clone(),
        }
    }
}

impl<S: CredentialStore> DashboardApi<S> {
    pub fn new(config: Arc<ApiConfig>, store: Arc<S>) -> Self {
        Self::with_client(Client::new(), config, store)
    }

    pub fn with_client(client: Client, config: Arc<ApiConfig>, store: Arc<S>) -> Self {
        Self {
            client,
            config,
            store,
        }
    }

    pub async fn wallets(&self, params: &WalletListParams) -> QueryResult<Paginated<Wallet>> {
        self.get_json(&self.config.wallets_path, &params.to_query())
            .await
    }

    pub async fn wallet_summary(&self) -> QueryResult<WalletSummary> {
        self.get_json(&self.config.wallet_summary_path, &[]).await
    }

    pub async fn analytics(&self, period: &AnalyticsPeriod) -> QueryResult<WalletAnalytics> {
        self.get_json(&self.config.analytics_path, &[("period", period.to_string())])
            .await
    }

    pub async fn evacuation_history(
        &self,
        filter: &EvacuationFilter,
    ) -> QueryResult<Vec<EvacuationRecord>> {
        let list: RecordList = self
            .get_json(&self.config.evacuation_history_path, &filter.to_query())
            .await?;

        Ok(match list {
            RecordList::Bare(records) | RecordList::Wrapped { data: records } => records,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> QueryResult<T> {
        let token = self.store.token().ok_or(QueryError::MissingToken)?;

        let response = self
            .client
            .get(self.config.url(path))
            .bearer_auth(token)
            .query(query)
            .send()
            .await
            .map_err(|e| QueryError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            tracing::debug!(path, status = status.as_u16(), "Upstream request failed");

            return Err(if status == StatusCode::UNAUTHORIZED {
                QueryError::Unauthorized(message)
            } else {
                QueryError::Api {
                    status: status.as_u16(),
                    message,
                }
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| QueryError::Transport(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| QueryError::Decode(format!("{path}: {e}")))
    }
}

async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.bytes().await.unwrap_or_default();

    serde_json::from_slice::<ErrorBody>(&body)
        .ok()
        .and_then(|body| body.message.or(body.error))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Upstream error")
                .to_string()
        })
}
