//! Repository Traits
//!
//! Interfaces for credential persistence and remote sign-in.
//! Implementations are in the infrastructure layer.

use crate::domain::entity::{Session, SignInOutput, UserProfile};
use crate::error::AuthResult;

/// Durable store for the profile's single session
///
/// Token and user are written and cleared together; no reader ever sees one
/// without the other. Expiry is enforced by the store itself.
pub trait CredentialStore: Send + Sync {
    /// Persist a new session, replacing any existing one
    fn save(&self, token: &str, user: &UserProfile) -> AuthResult<()>;

    /// Remove the session; succeeds when nothing is stored
    fn clear(&self) -> AuthResult<()>;

    /// Both halves of the session, read from one snapshot
    fn session(&self) -> Option<Session>;

    fn token(&self) -> Option<String> {
        self.session().map(|session| session.token)
    }

    fn user(&self) -> Option<UserProfile> {
        self.session().map(|session| session.user)
    }
}

/// Remote authentication endpoint
#[trait_variant::make(AuthGateway: Send)]
pub trait LocalAuthGateway {
    /// Exchange an identifier and secret for a token and profile
    async fn sign_in(&self, identifier: &str, secret: &str) -> AuthResult<SignInOutput>;
}
