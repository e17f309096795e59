//! User Profile Entity
//!
//! Identity snapshot returned by sign-in. Persisted as the `user` slot of the
//! credential store and never refreshed until the next sign-in.

use serde::{Deserialize, Serialize};

use crate::domain::value_object::user_role::UserRole;

/// Signed-in staff user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, alias = "first_name")]
    pub first_name: Option<String>,
    #[serde(default, alias = "last_name")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default, alias = "is_email_verified")]
    pub is_email_verified: bool,
    #[serde(default, alias = "is_phone_verified")]
    pub is_phone_verified: bool,
    #[serde(default)]
    pub tier: Option<String>,
}

impl UserProfile {
    /// "First Last", falling back to the username and then the email
    pub fn display_name(&self) -> String {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if !full.is_empty() {
            return full;
        }
        self.username
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.email.clone())
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    })
}
