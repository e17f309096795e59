//! Gatekeeper Middleware
//!
//! Runs the session gatekeeper in front of every route. Token presence is read
//! from the durable credential store, never from controller memory.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use crate::application::gatekeeper::{GateDecision, Gatekeeper};
use crate::domain::repository::CredentialStore;

/// Middleware state
pub struct GatekeeperState<S>
where
    S: CredentialStore,
{
    pub store: Arc<S>,
    pub gatekeeper: Arc<Gatekeeper>,
}

impl<S: CredentialStore> Clone for GatekeeperState<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            gatekeeper: self.gatekeeper.clone(),
        }
    }
}

impl<S: CredentialStore> GatekeeperState<S> {
    pub fn new(store: Arc<S>, gatekeeper: Gatekeeper) -> Self {
        Self {
            store,
            gatekeeper: Arc::new(gatekeeper),
        }
    }
}

/// Redirect anonymous requests for protected paths (`307`)
pub async fn session_gatekeeper<S>(
    State(state): State<GatekeeperState<S>>,
    req: Request,
    next: Next,
) -> Response
where
    S: CredentialStore + 'static,
{
    let token_present = state.store.token().is_some();
    let decision = state.gatekeeper.decide(req.uri().path(), token_present);

    match decision {
        GateDecision::Allow => next.run(req).await,
        GateDecision::Redirect(location) => {
            tracing::debug!(path = %req.uri().path(), location = %location, "Redirecting anonymous request");
            Redirect::temporary(&location).into_response()
        }
    }
}
