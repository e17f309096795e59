//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::auth_state::AuthSnapshot;
use crate::domain::entity::UserProfile;

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Email or username
    pub identifier: String,
    pub password: String,
}

// ============================================================================
// Status
// ============================================================================

/// Public status response, read from the credential store
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub authenticated: bool,
    pub display_name: Option<String>,
    pub is_admin: bool,
    pub user: Option<UserProfile>,
}

impl From<Option<UserProfile>> for StatusResponse {
    fn from(user: Option<UserProfile>) -> Self {
        Self {
            authenticated: user.is_some(),
            display_name: user.as_ref().map(UserProfile::display_name),
            is_admin: user.as_ref().is_some_and(|u| u.role.is_admin_or_higher()),
            user,
        }
    }
}

/// Controller snapshot response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub status: String,
    pub loading: bool,
    pub error: Option<String>,
    pub user: Option<UserProfile>,
}

impl From<AuthSnapshot> for SessionResponse {
    fn from(snapshot: AuthSnapshot) -> Self {
        Self {
            status: snapshot.status.to_string(),
            loading: snapshot.loading,
            user: snapshot.user().cloned(),
            error: snapshot.error,
        }
    }
}
