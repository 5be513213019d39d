// src/core/cache.rs
//! Persistent HTTP response store.
//!
//! One entry per request signature, kept under `<base>/.store/http_cache/`:
//! - `<key>.json`: metadata (url, status, content type, time stored)
//! - `<key>.body`: raw response bytes
//!
//! `key` is the SHA-256 of `"<METHOD> <url>"`. The metadata file is written
//! last, so an entry only counts once both halves are on disk.
//!
//! The store is process-wide and shared across runs. It has no locking:
//! the tool is single-threaded and single-process.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::ScrapeError;

const META_EXT: &str = "json";
const BODY_EXT: &str = "body";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CachedResponse {
    pub url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
    pub stored_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize)]
struct EntryMeta {
    url: String,
    status: u16,
    content_type: Option<String>,
    stored_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct ResponseCache {
    dir: PathBuf,
    expire_after: Option<Duration>,
}

impl ResponseCache {
    /// Open (creating if needed) the store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, ScrapeError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| ScrapeError::Cache { path: dir.clone(), source })?;
        Ok(Self { dir, expire_after: None })
    }

    pub fn with_expiry(mut self, expire_after: Option<Duration>) -> Self {
        self.expire_after = expire_after;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Request signature → file stem.
    pub fn key(method: &str, url: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(method.to_ascii_uppercase().as_bytes());
        hasher.update(b" ");
        hasher.update(url.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    fn paths(&self, key: &str) -> (PathBuf, PathBuf) {
        (
            self.dir.join(format!("{key}.{META_EXT}")),
            self.dir.join(format!("{key}.{BODY_EXT}")),
        )
    }

    /// Stored response for `GET url`, or `None` on a miss or an expired entry.
    pub fn get(&self, url: &str) -> Result<Option<CachedResponse>, ScrapeError> {
        let key = Self::key("GET", url);
        let (meta_path, body_path) = self.paths(&key);

        let meta_text = match fs::read_to_string(&meta_path) {
            Ok(t) => t,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(ScrapeError::Cache { path: meta_path, source }),
        };
        let meta: EntryMeta = serde_json::from_str(&meta_text)
            .map_err(|source| ScrapeError::CacheFormat { path: meta_path.clone(), source })?;

        if self.is_expired(&meta) {
            logd!("Cache: entry for {} expired (stored {})", url, meta.stored_at);
            self.evict(&key)?;
            return Ok(None);
        }

        let body = match fs::read(&body_path) {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                logw!("Cache: body missing for {}, dropping entry", url);
                self.evict(&key)?;
                return Ok(None);
            }
            Err(source) => return Err(ScrapeError::Cache { path: body_path, source }),
        };

        Ok(Some(CachedResponse {
            url: meta.url,
            status: meta.status,
            content_type: meta.content_type,
            body,
            stored_at: meta.stored_at,
        }))
    }

    pub fn put(&self, resp: &CachedResponse) -> Result<(), ScrapeError> {
        let key = Self::key("GET", &resp.url);
        let (meta_path, body_path) = self.paths(&key);

        fs::write(&body_path, &resp.body)
            .map_err(|source| ScrapeError::Cache { path: body_path.clone(), source })?;

        let meta = EntryMeta {
            url: resp.url.clone(),
            status: resp.status,
            content_type: resp.content_type.clone(),
            stored_at: resp.stored_at,
        };
        let text = serde_json::to_string_pretty(&meta)
            .map_err(|source| ScrapeError::CacheFormat { path: meta_path.clone(), source })?;
        fs::write(&meta_path, text).map_err(|source| ScrapeError::Cache { path: meta_path, source })
    }

    /// Remove every entry. Destructive; returns how many entries were dropped.
    pub fn clear(&self) -> Result<usize, ScrapeError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(rd) => rd,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(source) => return Err(ScrapeError::Cache { path: self.dir.clone(), source }),
        };

        let mut removed = 0usize;
        for entry in entries {
            let path = entry
                .map_err(|source| ScrapeError::Cache { path: self.dir.clone(), source })?
                .path();
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if ext != META_EXT && ext != BODY_EXT {
                continue;
            }
            fs::remove_file(&path).map_err(|source| ScrapeError::Cache { path: path.clone(), source })?;
            if ext == META_EXT {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Number of stored entries (expired ones included until next read).
    pub fn len(&self) -> Result<usize, ScrapeError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(rd) => rd,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(source) => return Err(ScrapeError::Cache { path: self.dir.clone(), source }),
        };
        Ok(entries
            .filter_map(Result::ok)
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some(META_EXT))
            .count())
    }

    pub fn is_empty(&self) -> Result<bool, ScrapeError> {
        Ok(self.len()? == 0)
    }

    fn is_expired(&self, meta: &EntryMeta) -> bool {
        let Some(ttl) = self.expire_after else { return false };
        match TimeDelta::from_std(ttl) {
            Ok(ttl) => Utc::now() - meta.stored_at > ttl,
            Err(_) => false, // longer than chrono can represent: never expires
        }
    }

    fn evict(&self, key: &str) -> Result<(), ScrapeError> {
        let (meta_path, body_path) = self.paths(key);
        for path in [meta_path, body_path] {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(source) => return Err(ScrapeError::Cache { path, source }),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(url: &str, body: &str) -> CachedResponse {
        CachedResponse {
            url: s!(url),
            status: 200,
            content_type: Some(s!("text/html; charset=utf-8")),
            body: body.as_bytes().to_vec(),
            stored_at: Utc::now(),
        }
    }

    #[test]
    fn key_depends_on_method_and_url() {
        let a = ResponseCache::key("GET", "https://docs.python.org/3/");
        assert_eq!(a, ResponseCache::key("get", "https://docs.python.org/3/"));
        assert_ne!(a, ResponseCache::key("GET", "https://docs.python.org/3/whatsnew/"));
        assert_ne!(a, ResponseCache::key("HEAD", "https://docs.python.org/3/"));
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn put_then_get_survives_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = ResponseCache::open(tmp.path()).unwrap();
        cache.put(&response("https://x/a", "<p>a</p>")).unwrap();

        let reopened = ResponseCache::open(tmp.path()).unwrap();
        let hit = reopened.get("https://x/a").unwrap().unwrap();
        assert_eq!(hit.body, b"<p>a</p>");
        assert_eq!(hit.content_type.as_deref(), Some("text/html; charset=utf-8"));
        assert!(reopened.get("https://x/b").unwrap().is_none());
    }

    #[test]
    fn clear_removes_everything_and_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = ResponseCache::open(tmp.path()).unwrap();
        cache.put(&response("https://x/a", "a")).unwrap();
        cache.put(&response("https://x/b", "b")).unwrap();
        assert_eq!(cache.len().unwrap(), 2);

        assert_eq!(cache.clear().unwrap(), 2);
        assert!(cache.is_empty().unwrap());
        assert!(cache.get("https://x/a").unwrap().is_none());
        assert_eq!(cache.clear().unwrap(), 0);
    }

    #[test]
    fn expired_entries_are_evicted_on_read() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = ResponseCache::open(tmp.path())
            .unwrap()
            .with_expiry(Some(Duration::from_secs(60)));

        let mut old = response("https://x/old", "old");
        old.stored_at = Utc::now() - TimeDelta::hours(2);
        cache.put(&old).unwrap();
        cache.put(&response("https://x/new", "new")).unwrap();

        assert!(cache.get("https://x/old").unwrap().is_none());
        assert!(cache.get("https://x/new").unwrap().is_some());
        assert_eq!(cache.len().unwrap(), 1);
    }

    #[test]
    fn corrupt_metadata_fails_loudly() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = ResponseCache::open(tmp.path()).unwrap();
        let key = ResponseCache::key("GET", "https://x/a");
        fs::write(tmp.path().join(format!("{key}.json")), "{not json").unwrap();

        let err = cache.get("https://x/a").unwrap_err();
        assert!(matches!(err, ScrapeError::CacheFormat { .. }));
    }
}
