//! Auth State Controller
//!
//! Owns the in-process view of the session (status, loading flag, last
//! error) and mediates login/logout. The durable credential store stays the
//! source of truth; the controller only mirrors it.

use std::sync::{Arc, Mutex, MutexGuard};

use derive_more::Display;
use platform::retry::retry_with_backoff;
use query::QueryClient;

use crate::application::config::AuthConfig;
use crate::domain::entity::UserProfile;
use crate::domain::repository::{AuthGateway, CredentialStore};
use crate::error::{AuthError, AuthResult};

/// Session status as seen by the UI
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum AuthStatus {
    #[display("uninitialized")]
    Uninitialized,
    #[display("authenticated")]
    Authenticated(UserProfile),
    #[display("anonymous")]
    Anonymous,
}

/// Point-in-time copy of the controller state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSnapshot {
    pub status: AuthStatus,
    pub loading: bool,
    pub error: Option<String>,
}

impl AuthSnapshot {
    pub fn user(&self) -> Option<&UserProfile> {
        match &self.status {
            AuthStatus::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }
}

/// Where the caller should navigate next
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub to: String,
}

impl Navigation {
    pub fn to(path: impl Into<String>) -> Self {
        Self { to: path.into() }
    }
}

#[derive(Debug)]
struct ControllerState {
    status: AuthStatus,
    loading: bool,
    error: Option<String>,
}

/// Auth state controller
pub struct AuthController<S, G>
where
    S: CredentialStore,
    G: AuthGateway,
{
    store: Arc<S>,
    gateway: Arc<G>,
    queries: QueryClient,
    config: Arc<AuthConfig>,
    state: Mutex<ControllerState>,
    login_gate: tokio::sync::Mutex<()>,
}

impl<S, G> AuthController<S, G>
where
    S: CredentialStore,
    G: AuthGateway + Sync,
{
    pub fn new(
        store: Arc<S>,
        gateway: Arc<G>,
        queries: QueryClient,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            store,
            gateway,
            queries,
            config,
            state: Mutex::new(ControllerState {
                status: AuthStatus::Uninitialized,
                loading: true,
                error: None,
            }),
            login_gate: tokio::sync::Mutex::new(()),
        }
    }

    /// Adopt whatever the store holds; no network round-trip
    pub fn initialize(&self) -> AuthSnapshot {
        let status = match self.store.user() {
            Some(user) => AuthStatus::Authenticated(user),
            None => AuthStatus::Anonymous,
        };
        tracing::debug!(status = %status, "Auth state initialized from store");

        let mut state = self.lock();
        state.status = status;
        state.loading = false;
        Self::snapshot_of(&state)
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        Self::snapshot_of(&self.lock())
    }

    /// Hand out the pending error once
    pub fn take_error(&self) -> Option<String> {
        self.lock().error.take()
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn queries(&self) -> &QueryClient {
        &self.queries
    }

    /// Sign in and persist the session
    ///
    /// A second call while one is pending fails with
    /// [`AuthError::LoginInProgress`] and leaves the state untouched.
    pub async fn login(&self, identifier: &str, secret: &str) -> AuthResult<Navigation> {
        let _attempt = self.login_gate.try_lock().map_err(|_| {
            tracing::debug!("Rejecting concurrent login attempt");
            AuthError::LoginInProgress
        })?;

        let _loading = LoadingGuard::begin(&self.state);

        let outcome = retry_with_backoff(&self.config.login_retry, AuthError::is_retryable, || {
            self.gateway.sign_in(identifier, secret)
        })
        .await
        .and_then(|output| {
            self.store.save(&output.token, &output.user)?;
            Ok(output.user)
        });

        match outcome {
            Ok(user) => {
                tracing::info!(user_id = %user.id, role = %user.role, "Signed in");
                self.lock().status = AuthStatus::Authenticated(user);
                let evicted = self.queries.invalidate_all();
                tracing::debug!(evicted, "Cleared query cache after login");

                Ok(Navigation::to(&self.config.after_login_path))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Login failed");
                self.lock().error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Drop the session; never fails
    pub fn logout(&self) -> Navigation {
        if let Err(e) = self.store.clear() {
            tracing::error!(error = %e, "Failed to clear stored credentials");
        }

        {
            let mut state = self.lock();
            state.status = AuthStatus::Anonymous;
            state.loading = false;
        }

        let evicted = self.queries.invalidate_all();
        tracing::info!(evicted, "Signed out");

        Navigation::to(&self.config.after_logout_path)
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        lock_state(&self.state)
    }

    fn snapshot_of(state: &ControllerState) -> AuthSnapshot {
        AuthSnapshot {
            status: state.status.clone(),
            loading: state.loading,
            error: state.error.clone(),
        }
    }
}

fn lock_state(state: &Mutex<ControllerState>) -> MutexGuard<'_, ControllerState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Holds `loading` for one login attempt; released on every exit, including
/// a dropped future
struct LoadingGuard<'a> {
    state: &'a Mutex<ControllerState>,
}

impl<'a> LoadingGuard<'a> {
    fn begin(state: &'a Mutex<ControllerState>) -> Self {
        let mut guard = lock_state(state);
        guard.loading = true;
        guard.error = None;
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        lock_state(self.state).loading = false;
    }
}
