//! Query Keys and Namespaces
//!
//! A key is a resource path (`wallets/list`) plus an ordered parameter set.
//! Parameters live in a `BTreeMap`, so the same parameters given in any
//! order produce the same key and the same display form.

use std::collections::BTreeMap;
use std::fmt;

/// Structured cache key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey {
    path: Vec<String>,
    params: BTreeMap<String, String>,
}

impl QueryKey {
    /// Key rooted at a resource family (`wallets`, `analytics`, ...)
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            path: vec![root.into()],
            params: BTreeMap::new(),
        }
    }

    pub fn child(mut self, segment: impl Into<String>) -> Self {
        self.path.push(segment.into());
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(name.into(), value.to_string());
        self
    }

    /// Add a parameter only when a value is present
    pub fn param_opt<V: ToString>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(name, value),
            None => self,
        }
    }

    pub fn root(&self) -> &str {
        &self.path[0]
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn is_under(&self, namespace: &Namespace) -> bool {
        self.path.starts_with(&namespace.segments)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.join("/"))?;

        let mut params = self.params.iter();
        if let Some((name, value)) = params.next() {
            write!(f, "?{}={}", name, value)?;
            for (name, value) in params {
                write!(f, "&{}={}", name, value)?;
            }
        }
        Ok(())
    }
}

/// Path prefix selecting a group of keys for bulk invalidation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Namespace {
    segments: Vec<String>,
}

impl Namespace {
    /// Every key
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(root: impl Into<String>) -> Self {
        Self {
            segments: vec![root.into()],
        }
    }

    pub fn child(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub fn is_all(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_all() {
            write!(f, "*")
        } else {
            write!(f, "{}", self.segments.join("/"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_order_does_not_matter() {
        let a = QueryKey::new("wallets")
            .child("list")
            .param("page", 1)
            .param("page_size", 20);
        let b = QueryKey::new("wallets")
            .child("list")
            .param("page_size", 20)
            .param("page", 1);

        assert_eq!(a, b);
        assert_eq!(a.to_string(), "wallets/list?page=1&page_size=20");
    }

    #[test]
    fn test_display_without_params() {
        let key = QueryKey::new("wallets").child("summary");
        assert_eq!(key.to_string(), "wallets/summary");
        assert_eq!(key.root(), "wallets");
    }

    #[test]
    fn test_param_opt_skips_none() {
        let key = QueryKey::new("evacuation")
            .child("history")
            .param_opt("from", Some("2024-01-01"))
            .param_opt::<&str>("to", None);

        assert_eq!(key.params().len(), 1);
        assert_eq!(key.to_string(), "evacuation/history?from=2024-01-01");
    }

    #[test]
    fn test_namespace_membership() {
        let key = QueryKey::new("wallets").child("list").param("page", 2);

        assert!(key.is_under(&Namespace::all()));
        assert!(key.is_under(&Namespace::new("wallets")));
        assert!(key.is_under(&Namespace::new("wallets").child("list")));
        assert!(!key.is_under(&Namespace::new("wallets").child("summary")));
        assert!(!key.is_under(&Namespace::new("analytics")));
    }

    #[test]
    fn test_namespace_is_segment_based() {
        let key = QueryKey::new("wallets_archive");
        assert!(!key.is_under(&Namespace::new("wallets")));
    }
}
