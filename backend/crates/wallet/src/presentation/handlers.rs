//! HTTP Handlers
//!
//! Dashboard pages served from the query cache.

use std::sync::Arc;

use auth::CredentialStore;
use axum::Json;
use axum::extract::{Query, State};
use query::QueryError;

use crate::application::metrics::EvacuationAnalytics;
use crate::application::queries::DashboardQueries;
use crate::domain::entity::{WalletAnalytics, WalletSummary};
use crate::domain::value_object::params::{EvacuationFilter, WalletListParams};
use crate::presentation::dto::{
    AnalyticsQuery, EvacuationsResponse, RefreshResponse, WalletsResponse,
};

/// Application state for dashboard handlers
pub struct DashboardState<S>
where
    S: CredentialStore + 'static,
{
    pub queries: Arc<DashboardQueries<S>>,
}

impl<S: CredentialStore + 'static> Clone for DashboardState<S> {
    fn clone(&self) -> Self {
        Self {
            queries: self.queries.clone(),
        }
    }
}

/// GET /dashboard
pub async fn overview<S>(
    State(state): State<DashboardState<S>>,
) -> Result<Json<WalletSummary>, QueryError>
where
    S: CredentialStore + 'static,
{
    Ok(Json(state.queries.wallet_summary().await?))
}

/// GET /dashboard/wallets
pub async fn wallets<S>(
    State(state): State<DashboardState<S>>,
    Query(params): Query<WalletListParams>,
) -> Result<Json<WalletsResponse>, QueryError>
where
    S: CredentialStore + 'static,
{
    let wallets = state.queries.wallets(&params).await?;
    Ok(Json(WalletsResponse::from(wallets)))
}

/// GET /dashboard/analytics
pub async fn analytics<S>(
    State(state): State<DashboardState<S>>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<WalletAnalytics>, QueryError>
where
    S: CredentialStore + 'static,
{
    Ok(Json(state.queries.analytics(query.period).await?))
}

/// GET /dashboard/evacuations
pub async fn evacuations<S>(
    State(state): State<DashboardState<S>>,
    Query(filter): Query<EvacuationFilter>,
) -> Result<Json<EvacuationsResponse>, QueryError>
where
    S: CredentialStore + 'static,
{
    let records = state.queries.evacuation_history(&filter).await?;
    let analytics = EvacuationAnalytics::from_records(&records);
    Ok(Json(EvacuationsResponse { records, analytics }))
}

/// POST /dashboard/refresh - drop every cached dashboard resource
pub async fn refresh<S>(State(state): State<DashboardState<S>>) -> Json<RefreshResponse>
where
    S: CredentialStore + 'static,
{
    let evicted = state.queries.refresh();
    tracing::info!(evicted, "Dashboard cache refreshed");
    Json(RefreshResponse { evicted })
}
