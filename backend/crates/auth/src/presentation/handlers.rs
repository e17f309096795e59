//! HTTP Handlers
//!
//! Login, logout and session inspection over the auth controller.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::Redirect;

use crate::application::auth_state::AuthController;
use crate::domain::repository::{AuthGateway, CredentialStore};
use crate::error::AuthError;
use crate::presentation::dto::{LoginRequest, SessionResponse, StatusResponse};

/// Application state for auth handlers
pub struct AuthAppState<S, G>
where
    S: CredentialStore,
    G: AuthGateway,
{
    pub controller: Arc<AuthController<S, G>>,
}

impl<S: CredentialStore, G: AuthGateway> Clone for AuthAppState<S, G> {
    fn clone(&self) -> Self {
        Self {
            controller: self.controller.clone(),
        }
    }
}

/// GET / - whether a session is stored
pub async fn status<S, G>(State(state): State<AuthAppState<S, G>>) -> Json<StatusResponse>
where
    S: CredentialStore + 'static,
    G: AuthGateway + Sync + 'static,
{
    Json(StatusResponse::from(state.controller.store().user()))
}

/// POST /login - `303` to the dashboard on success
pub async fn login<S, G>(
    State(state): State<AuthAppState<S, G>>,
    Json(req): Json<LoginRequest>,
) -> Result<Redirect, AuthError>
where
    S: CredentialStore + 'static,
    G: AuthGateway + Sync + 'static,
{
    let navigation = state
        .controller
        .login(req.identifier.trim(), &req.password)
        .await?;
    Ok(Redirect::to(&navigation.to))
}

/// POST /logout - `303` to the public root
pub async fn logout<S, G>(State(state): State<AuthAppState<S, G>>) -> Redirect
where
    S: CredentialStore + 'static,
    G: AuthGateway + Sync + 'static,
{
    let navigation = state.controller.logout();
    Redirect::to(&navigation.to)
}

/// GET /session - controller snapshot; the pending error is shown once
pub async fn session<S, G>(State(state): State<AuthAppState<S, G>>) -> Json<SessionResponse>
where
    S: CredentialStore + 'static,
    G: AuthGateway + Sync + 'static,
{
    let snapshot = state.controller.snapshot();
    state.controller.take_error();
    Json(snapshot.into())
}
