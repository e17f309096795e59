//! Session Entity
//!
//! The single signed-in session of this profile: a bearer token paired with
//! the user it was issued to.

use crate::domain::entity::user_profile::UserProfile;

/// Stored session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
    /// When the token was stored (Unix timestamp ms)
    pub issued_at_ms: i64,
}

/// Result of a successful remote sign-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInOutput {
    pub token: String,
    pub user: UserProfile,
}
