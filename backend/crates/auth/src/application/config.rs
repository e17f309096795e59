//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::path::PathBuf;
use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::retry::RetryPolicy;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// File holding the credential cookie jar
    pub credentials_path: PathBuf,
    /// Storage-level lifetime of both credential slots (7 days)
    pub session_ttl: Duration,
    /// Slot holding the bearer token
    pub token_cookie_name: String,
    /// Slot holding the JSON user profile
    pub user_cookie_name: String,
    /// Base URL of the auth backend
    pub api_base_url: String,
    /// Sign-in endpoint, relative to `api_base_url`
    pub signin_path: String,
    /// Retry policy for sign-in (transport failures only)
    pub login_retry: RetryPolicy,
    /// Where to go after a successful login
    pub after_login_path: String,
    /// Where to go after logout
    pub after_logout_path: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            credentials_path: PathBuf::from("credentials.json"),
            session_ttl: Duration::from_secs(7 * 24 * 3600), // 1 week
            token_cookie_name: "token".to_string(),
            user_cookie_name: "user".to_string(),
            api_base_url: "http://localhost:8000".to_string(),
            signin_path: "/auth/signin".to_string(),
            login_retry: RetryPolicy::login(),
            after_login_path: "/dashboard".to_string(),
            after_logout_path: "/".to_string(),
        }
    }
}

impl AuthConfig {
    /// Create config for development (local backend, jar under `.dev/`)
    pub fn development() -> Self {
        Self {
            credentials_path: PathBuf::from(".dev/credentials.json"),
            api_base_url: "http://127.0.0.1:8000".to_string(),
            ..Default::default()
        }
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = path.into();
        self
    }

    /// Absolute sign-in URL
    pub fn signin_url(&self) -> String {
        format!(
            "{}{}",
            self.api_base_url.trim_end_matches('/'),
            self.signin_path
        )
    }

    pub fn token_cookie(&self) -> CookieConfig {
        CookieConfig::new(&self.token_cookie_name).with_max_age(self.session_ttl)
    }

    pub fn user_cookie(&self) -> CookieConfig {
        CookieConfig::new(&self.user_cookie_name).with_max_age(self.session_ttl)
    }
}
