//! Cookie-backed Credential Store
//!
//! Keeps the token and the JSON user profile as two cookie slots in one
//! [`CookieJar`]. Both slots are written and removed in a single jar update.

use platform::cookie::{CookieConfig, CookieJar};

use crate::application::config::AuthConfig;
use crate::domain::entity::{Session, UserProfile};
use crate::domain::repository::CredentialStore;
use crate::error::{AuthError, AuthResult};

/// Credential store over a cookie jar
#[derive(Debug)]
pub struct CookieCredentialStore {
    jar: CookieJar,
    token_cookie: CookieConfig,
    user_cookie: CookieConfig,
}

impl CookieCredentialStore {
    /// File-backed store at `config.credentials_path`
    pub fn open(config: &AuthConfig) -> AuthResult<Self> {
        let jar = CookieJar::open(&config.credentials_path)?;
        tracing::debug!(path = %config.credentials_path.display(), "Opened credential store");
        Ok(Self::with_jar(jar, config))
    }

    /// Store that forgets everything when the process exits
    pub fn in_memory(config: &AuthConfig) -> Self {
        Self::with_jar(CookieJar::in_memory(), config)
    }

    pub fn with_jar(jar: CookieJar, config: &AuthConfig) -> Self {
        Self {
            jar,
            token_cookie: config.token_cookie(),
            user_cookie: config.user_cookie(),
        }
    }
}

impl CredentialStore for CookieCredentialStore {
    fn save(&self, token: &str, user: &UserProfile) -> AuthResult<()> {
        if token.is_empty() {
            return Err(AuthError::Internal("Refusing to store an empty token".into()));
        }
        let user_json = serde_json::to_string(user)
            .map_err(|e| AuthError::Internal(format!("Failed to encode user profile: {e}")))?;

        self.jar.set_all(&[
            (&self.token_cookie, token),
            (&self.user_cookie, user_json.as_str()),
        ])?;

        tracing::debug!(user_id = %user.id, "Stored session credentials");
        Ok(())
    }

    fn clear(&self) -> AuthResult<()> {
        self.jar
            .remove_all(&[self.token_cookie.name.as_str(), self.user_cookie.name.as_str()])?;
        Ok(())
    }

    fn session(&self) -> Option<Session> {
        let mut slots = self
            .jar
            .get_all(&[self.token_cookie.name.as_str(), self.user_cookie.name.as_str()])
            .into_iter();
        let token = slots.next().flatten()?;
        let user = slots.next().flatten()?;

        let user = match serde_json::from_str::<UserProfile>(&user.value) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable stored user profile");
                return None;
            }
        };

        Some(Session {
            token: token.value,
            user,
            issued_at_ms: token.created_at_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn user() -> UserProfile {
        serde_json::from_value(serde_json::json!({
            "id": "u-1",
            "email": "ops@example.com",
            "role": "admin"
        }))
        .unwrap()
    }

    #[test]
    fn test_save_then_read_both_halves() {
        let store = CookieCredentialStore::in_memory(&AuthConfig::default());
        store.save("tok-1", &user()).unwrap();

        assert_eq!(store.token().as_deref(), Some("tok-1"));
        assert_eq!(store.user(), Some(user()));
        assert!(store.session().unwrap().issued_at_ms > 0);
    }

    #[test]
    fn test_clear_removes_both_and_is_idempotent() {
        let store = CookieCredentialStore::in_memory(&AuthConfig::default());
        store.save("tok-1", &user()).unwrap();

        store.clear().unwrap();
        store.clear().unwrap();

        assert_eq!(store.token(), None);
        assert_eq!(store.user(), None);
    }

    #[test]
    fn test_session_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let config = AuthConfig::default().with_credentials_path(dir.path().join("jar.json"));

        CookieCredentialStore::open(&config)
            .unwrap()
            .save("tok-1", &user())
            .unwrap();
        let reopened = CookieCredentialStore::open(&config).unwrap();

        assert_eq!(reopened.token().as_deref(), Some("tok-1"));
        assert_eq!(reopened.user().map(|u| u.email), Some("ops@example.com".into()));
    }

    #[test]
    fn test_unknown_role_reads_back_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let config = AuthConfig::default().with_credentials_path(dir.path().join("jar.json"));
        let signed_in: UserProfile = serde_json::from_value(serde_json::json!({
            "id": "u-2",
            "email": "finance@example.com",
            "role": "finance_officer"
        }))
        .unwrap();

        CookieCredentialStore::open(&config)
            .unwrap()
            .save("tok-2", &signed_in)
            .unwrap();
        let stored = CookieCredentialStore::open(&config).unwrap().user().unwrap();

        assert_eq!(stored, signed_in);
        assert_eq!(stored.role.code(), "finance_officer");
    }

    #[test]
    fn test_expired_session_is_unreadable() {
        let config = AuthConfig {
            session_ttl: Duration::ZERO,
            ..AuthConfig::default()
        };
        let store = CookieCredentialStore::in_memory(&config);
        store.save("tok-1", &user()).unwrap();

        assert_eq!(store.session(), None);
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_empty_token_rejected() {
        let store = CookieCredentialStore::in_memory(&AuthConfig::default());
        assert!(store.save("", &user()).is_err());
        assert_eq!(store.session(), None);
    }
}
