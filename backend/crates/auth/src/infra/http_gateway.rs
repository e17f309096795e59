//! HTTP Auth Gateway
//!
//! `POST {base}/auth/signin` with `{field, password}`.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::entity::{SignInOutput, UserProfile};
use crate::domain::repository::AuthGateway;
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Serialize)]
struct SignInRequest<'a> {
    field: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct SignInResponse {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<UserProfile>,
    #[serde(default)]
    message: Option<String>,
}

/// reqwest-backed sign-in
#[derive(Debug, Clone)]
pub struct HttpAuthGateway {
    client: Client,
    signin_url: String,
}

impl HttpAuthGateway {
    pub fn new(config: &AuthConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &AuthConfig) -> Self {
        Self {
            client,
            signin_url: config.signin_url(),
        }
    }
}

impl AuthGateway for HttpAuthGateway {
    async fn sign_in(&self, identifier: &str, secret: &str) -> AuthResult<SignInOutput> {
        let response = self
            .client
            .post(&self.signin_url)
            .json(&SignInRequest {
                field: identifier,
                password: secret,
            })
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;
        let parsed = serde_json::from_slice::<SignInResponse>(&body);

        if status.is_server_error() {
            return Err(AuthError::Transport(format!("auth backend returned {status}")));
        }
        if !status.is_success() {
            let message = parsed.ok().and_then(|body| body.message);
            return Err(AuthError::InvalidCredentials(message));
        }

        let parsed = parsed
            .map_err(|e| AuthError::Internal(format!("Undecodable sign-in response: {e}")))?;
        if parsed.success == Some(false) {
            return Err(AuthError::InvalidCredentials(parsed.message));
        }

        match (parsed.token, parsed.user) {
            (Some(token), Some(user)) if !token.is_empty() => Ok(SignInOutput { token, user }),
            _ => Err(AuthError::Internal(
                "Sign-in response is missing token or user".into(),
            )),
        }
    }
}
