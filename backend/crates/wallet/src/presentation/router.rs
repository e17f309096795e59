//! Dashboard Router

use std::sync::Arc;

use auth::CredentialStore;
use axum::{
    Router,
    routing::{get, post},
};

use crate::application::queries::DashboardQueries;
use crate::presentation::handlers::{self, DashboardState};

/// Protected dashboard routes under `/dashboard`
pub fn dashboard_router<S>(queries: Arc<DashboardQueries<S>>) -> Router
where
    S: CredentialStore + 'static,
{
    let state = DashboardState { queries };

    Router::new()
        .route("/dashboard", get(handlers::overview::<S>))
        .route("/dashboard/wallets", get(handlers::wallets::<S>))
        .route("/dashboard/analytics", get(handlers::analytics::<S>))
        .route("/dashboard/evacuations", get(handlers::evacuations::<S>))
        .route("/dashboard/refresh", post(handlers::refresh::<S>))
        .with_state(state)
}
