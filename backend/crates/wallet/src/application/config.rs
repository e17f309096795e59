//! Application Configuration
//!
//! Upstream endpoints and per-resource cache policies.

use std::time::Duration;

use query::QueryOptions;

/// Upstream dashboard API configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub wallets_path: String,
    pub wallet_summary_path: String,
    pub analytics_path: String,
    pub evacuation_history_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            wallets_path: "/wallets".to_string(),
            wallet_summary_path: "/wallets/summary".to_string(),
            analytics_path: "/wallets/analytics".to_string(),
            evacuation_history_path: "/funds/history".to_string(),
        }
    }
}

impl ApiConfig {
    /// Create config for development (local backend)
    pub fn development() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Cache aging per resource family
#[derive(Debug, Clone, PartialEq)]
pub struct CachePolicies {
    pub wallets: QueryOptions,
    pub wallet_summary: QueryOptions,
    pub analytics: QueryOptions,
    pub evacuation_history: QueryOptions,
}

impl Default for CachePolicies {
    fn default() -> Self {
        Self {
            wallets: QueryOptions::new(Duration::from_secs(30), Duration::from_secs(5 * 60)),
            wallet_summary: QueryOptions::new(Duration::from_secs(30), Duration::from_secs(5 * 60)),
            // Analytics move slowly
            analytics: QueryOptions::new(Duration::from_secs(5 * 60), Duration::from_secs(10 * 60)),
            evacuation_history: QueryOptions::new(Duration::from_secs(60), Duration::from_secs(5 * 60)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join() {
        let config = ApiConfig::default().with_base_url("https://api.example.com/");
        assert_eq!(
            config.url(&config.evacuation_history_path),
            "https://api.example.com/funds/history"
        );
    }

    #[test]
    fn test_analytics_age_slower_than_wallets() {
        let policies = CachePolicies::default();
        assert!(policies.analytics.stale_after > policies.wallets.stale_after);
        assert!(policies.analytics.expire_after >= policies.analytics.stale_after);
    }
}
