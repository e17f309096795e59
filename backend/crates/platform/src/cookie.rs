//! Cookie Jar Infrastructure
//!
//! Durable name/value slots with cookie semantics: every slot carries its own
//! `Max-Age`, and the jar (not the caller) refuses to hand out a slot once it
//! has expired. Multi-slot writes and removals are applied as one file
//! replacement, so a reader sees either all of a write or none of it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cookie jar errors
#[derive(Debug, Error)]
pub enum CookieError {
    #[error("Cookie jar I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cookie jar serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type CookieResult<T> = Result<T, CookieError>;

/// Cookie slot configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieConfig {
    pub name: String,
    pub max_age_secs: Option<i64>,
}

impl CookieConfig {
    /// Session cookie (no expiry)
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_age_secs: None,
        }
    }

    /// Oversized durations saturate to "never expires in practice"
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age_secs = Some(i64::try_from(max_age.as_secs()).unwrap_or(i64::MAX));
        self
    }
}

/// A slot as persisted in the jar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCookie {
    pub value: String,
    pub created_at_ms: i64,
    pub expires_at_ms: Option<i64>,
}

impl StoredCookie {
    fn new(config: &CookieConfig, value: &str, now_ms: i64) -> Self {
        Self {
            value: value.to_string(),
            created_at_ms: now_ms,
            expires_at_ms: config
                .max_age_secs
                .map(|secs| now_ms.saturating_add(secs.saturating_mul(1000))),
        }
    }

    pub fn is_expired(&self, now_ms: i64) -> bool {
        self.expires_at_ms.is_some_and(|expires| now_ms >= expires)
    }
}

#[derive(Debug)]
enum Backing {
    File(PathBuf),
    Memory,
}

/// Durable cookie jar
#[derive(Debug)]
pub struct CookieJar {
    backing: Backing,
    cookies: Mutex<BTreeMap<String, StoredCookie>>,
}

impl CookieJar {
    /// Open (or lazily create) a file-backed jar
    ///
    /// A missing file is an empty jar. An unreadable or corrupt file is also
    /// treated as empty, the same way a browser drops a damaged cookie store.
    pub fn open(path: impl AsRef<Path>) -> CookieResult<Self> {
        let path = path.as_ref().to_path_buf();

        let cookies = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(cookies) => cookies,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Discarding corrupt cookie jar");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(CookieError::Io { path, source }),
        };

        Ok(Self {
            backing: Backing::File(path),
            cookies: Mutex::new(cookies),
        })
    }

    /// Jar that lives only as long as the process
    pub fn in_memory() -> Self {
        Self {
            backing: Backing::Memory,
            cookies: Mutex::new(BTreeMap::new()),
        }
    }

    /// Read one slot; expired slots are never returned
    pub fn get(&self, name: &str) -> Option<StoredCookie> {
        self.get_all(&[name]).pop().flatten()
    }

    /// Read several slots from one snapshot of the jar
    pub fn get_all(&self, names: &[&str]) -> Vec<Option<StoredCookie>> {
        let now_ms = Utc::now().timestamp_millis();
        let mut cookies = self.lock();

        cookies.retain(|_, cookie| !cookie.is_expired(now_ms));

        names.iter().map(|name| cookies.get(*name).cloned()).collect()
    }

    /// Write several slots in one replacement
    pub fn set_all(&self, entries: &[(&CookieConfig, &str)]) -> CookieResult<()> {
        let now_ms = Utc::now().timestamp_millis();
        let mut cookies = self.lock();

        let mut next = cookies.clone();
        for (config, value) in entries {
            next.insert(config.name.clone(), StoredCookie::new(config, value, now_ms));
        }

        self.persist(&next)?;
        *cookies = next;
        Ok(())
    }

    /// Remove several slots in one replacement; absent slots are ignored
    pub fn remove_all(&self, names: &[&str]) -> CookieResult<()> {
        let mut cookies = self.lock();

        if !names.iter().any(|name| cookies.contains_key(*name)) {
            return Ok(());
        }

        let mut next = cookies.clone();
        for name in names {
            next.remove(*name);
        }

        self.persist(&next)?;
        *cookies = next;
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, StoredCookie>> {
        // The map is only replaced after persist succeeds, so poison is harmless.
        self.cookies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn persist(&self, cookies: &BTreeMap<String, StoredCookie>) -> CookieResult<()> {
        let Backing::File(path) = &self.backing else {
            return Ok(());
        };

        let io_err = |source: std::io::Error| CookieError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let contents = serde_json::to_string_pretty(cookies)?;
        let tmp_path = tmp_path(path);
        std::fs::write(&tmp_path, contents).map_err(io_err)?;
        std::fs::rename(&tmp_path, path).map_err(io_err)?;

        Ok(())
    }
}

/// Sibling path for the staged write: `<file name>.tmp`
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
