//! Request Parameters
//!
//! Filters for the dashboard resources. Each one knows how to become a
//! query string and a cache-key parameter set.

use std::str::FromStr;

use chrono::NaiveDate;
use derive_more::Display;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Wallet list paging and filters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletListParams {
    pub page: u32,
    pub page_size: u32,
    pub search: Option<String>,
    pub status: Option<String>,
}

impl Default for WalletListParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search: None,
            status: None,
        }
    }
}

impl WalletListParams {
    /// Page numbers start at 1; page size stays within 1..=100
    pub fn normalized(mut self) -> Self {
        self.page = self.page.max(1);
        self.page_size = self.page_size.clamp(1, MAX_PAGE_SIZE);
        self.search = self.search.filter(|s| !s.trim().is_empty());
        self.status = self.status.filter(|s| !s.trim().is_empty());
        self
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("page", self.page.to_string()),
            ("page_size", self.page_size.to_string()),
        ];
        if let Some(search) = &self.search {
            query.push(("search", search.clone()));
        }
        if let Some(status) = &self.status {
            query.push(("status", status.clone()));
        }
        query
    }
}

/// Analytics reporting window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
pub enum AnalyticsPeriod {
    #[serde(rename = "7d")]
    #[display("7d")]
    Week,
    #[default]
    #[serde(rename = "30d")]
    #[display("30d")]
    Month,
    #[serde(rename = "90d")]
    #[display("90d")]
    Quarter,
    #[serde(rename = "1y")]
    #[display("1y")]
    Year,
}

impl FromStr for AnalyticsPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "7d" | "week" => Ok(Self::Week),
            "30d" | "month" => Ok(Self::Month),
            "90d" | "quarter" => Ok(Self::Quarter),
            "1y" | "365d" | "year" => Ok(Self::Year),
            other => Err(format!("unknown analytics period: {other}")),
        }
    }
}

/// Evacuation history filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct EvacuationFilter {
    /// Source wallet of the evacuation
    pub transferred_from: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl EvacuationFilter {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(source) = &self.transferred_from {
            query.push(("transferred_from", source.clone()));
        }
        if let Some(from) = self.from {
            query.push(("from", from.to_string()));
        }
        if let Some(to) = self.to {
            query.push(("to", to.to_string()));
        }
        query
    }
}
