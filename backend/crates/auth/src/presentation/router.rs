//! Auth Router

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::application::auth_state::AuthController;
use crate::domain::repository::{AuthGateway, CredentialStore};
use crate::presentation::handlers::{self, AuthAppState};

/// Public auth routes: `/`, `/login`, `/logout`, `/session`
pub fn auth_router<S, G>(controller: Arc<AuthController<S, G>>) -> Router
where
    S: CredentialStore + 'static,
    G: AuthGateway + Sync + 'static,
{
    let state = AuthAppState { controller };

    Router::new()
        .route("/", get(handlers::status::<S, G>))
        .route("/login", post(handlers::login::<S, G>))
        .route("/logout", post(handlers::logout::<S, G>))
        .route("/session", get(handlers::session::<S, G>))
        .with_state(state)
}
