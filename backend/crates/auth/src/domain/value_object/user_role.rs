use serde::{Deserialize, Serialize};
use std::fmt;

/// Staff role as reported by the auth backend
///
/// Codes are matched case-insensitively; anything unrecognised is kept
/// verbatim in [`UserRole::Other`] so the profile reads back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
    #[default]
    User,
    Admin,
    SuperAdmin,
    Other(String),
}

impl UserRole {
    #[inline]
    pub fn code(&self) -> &str {
        use UserRole::*;
        match self {
            User => "user",
            Admin => "admin",
            SuperAdmin => "super_admin",
            Other(code) => code,
        }
    }

    #[inline]
    pub const fn is_admin_or_higher(&self) -> bool {
        use UserRole::*;
        matches!(self, Admin | SuperAdmin)
    }

    pub fn from_code(code: &str) -> Self {
        use UserRole::*;
        match code.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "user" => User,
            "admin" => Admin,
            "super_admin" | "superadmin" => SuperAdmin,
            _ => {
                tracing::debug!(code, "Unrecognised user role");
                Other(code.to_string())
            }
        }
    }
}

impl From<String> for UserRole {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Other(code) => code,
            known => known.code().to_string(),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
