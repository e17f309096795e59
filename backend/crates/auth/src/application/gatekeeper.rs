//! Session Gatekeeper
//!
//! Decides, before any handler runs, whether a request may proceed. The
//! decision is local: it looks at the path and at whether a token is stored,
//! never at whether the token is still valid upstream.

use derive_more::Display;

/// Gatekeeper configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatekeeperConfig {
    /// Paths that are always allowed
    pub public_paths: Vec<String>,
    /// Prefix whose paths need a stored token
    pub protected_prefix: String,
    /// Where anonymous requests for protected paths are sent
    pub redirect_to: String,
    /// Query parameter carrying the original path
    pub recovery_param: String,
}

impl Default for GatekeeperConfig {
    fn default() -> Self {
        Self {
            public_paths: ["/", "/login", "/signup", "/forgot-password"]
                .into_iter()
                .map(String::from)
                .collect(),
            protected_prefix: "/dashboard".to_string(),
            redirect_to: "/".to_string(),
            recovery_param: "from".to_string(),
        }
    }
}

/// Outcome for one request
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GateDecision {
    #[display("allow")]
    Allow,
    #[display("redirect to {_0}")]
    Redirect(String),
}

#[derive(Debug, Clone, Default)]
pub struct Gatekeeper {
    config: GatekeeperConfig,
}

impl Gatekeeper {
    pub fn new(config: GatekeeperConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GatekeeperConfig {
        &self.config
    }

    pub fn decide(&self, path: &str, token_present: bool) -> GateDecision {
        if self.is_public(path) || !self.is_protected(path) || token_present {
            return GateDecision::Allow;
        }
        GateDecision::Redirect(self.redirect_target(path))
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.config.public_paths.iter().any(|public| public == path)
    }

    /// `/dashboard` and everything below it, but not `/dashboards`
    pub fn is_protected(&self, path: &str) -> bool {
        let prefix = self.config.protected_prefix.trim_end_matches('/');
        match path.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    fn redirect_target(&self, path: &str) -> String {
        format!(
            "{}?{}={}",
            self.config.redirect_to,
            self.config.recovery_param,
            encode_path(path)
        )
    }
}

/// Percent-encode everything except unreserved characters and `/`
fn encode_path(path: &str) -> String {
    let mut encoded = String::with_capacity(path.len());
    for byte in path.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gatekeeper() -> Gatekeeper {
        Gatekeeper::default()
    }

    #[test]
    fn test_public_paths_always_allowed() {
        for path in ["/", "/login", "/signup", "/forgot-password"] {
            assert_eq!(gatekeeper().decide(path, false), GateDecision::Allow);
            assert_eq!(gatekeeper().decide(path, true), GateDecision::Allow);
        }
    }

    #[test]
    fn test_protected_without_token_redirects_with_recovery_path() {
        assert_eq!(
            gatekeeper().decide("/dashboard/anything", false),
            GateDecision::Redirect("/?from=/dashboard/anything".to_string())
        );
        assert_eq!(
            gatekeeper().decide("/dashboard", false),
            GateDecision::Redirect("/?from=/dashboard".to_string())
        );
    }

    #[test]
    fn test_protected_with_token_allowed() {
        assert_eq!(
            gatekeeper().decide("/dashboard/wallets", true),
            GateDecision::Allow
        );
    }

    #[test]
    fn test_other_paths_allowed() {
        assert_eq!(gatekeeper().decide("/about", false), GateDecision::Allow);
        assert_eq!(gatekeeper().decide("/dashboards", false), GateDecision::Allow);
    }

    #[test]
    fn test_recovery_path_is_encoded() {
        assert_eq!(
            gatekeeper().decide("/dashboard/a b&c", false),
            GateDecision::Redirect("/?from=/dashboard/a%20b%26c".to_string())
        );
    }

    #[test]
    fn test_custom_config() {
        let gatekeeper = Gatekeeper::new(GatekeeperConfig {
            protected_prefix: "/admin/".to_string(),
            redirect_to: "/login".to_string(),
            recovery_param: "next".to_string(),
            ..GatekeeperConfig::default()
        });

        assert!(gatekeeper.is_protected("/admin/users"));
        assert_eq!(
            gatekeeper.decide("/admin", false),
            GateDecision::Redirect("/login?next=/admin".to_string())
        );
    }
}
