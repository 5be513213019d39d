// src/error.rs
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a scrape. Nothing here is retried; the runner
/// propagates the first error to the caller.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("network error fetching {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("page structure changed at {url}: {what}")]
    Structure { url: String, what: String },

    #[error("cache store error at {}: {source}", .path.display())]
    Cache {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("corrupt cache entry {}: {source}", .path.display())]
    CacheFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot resolve URL {input:?}: {source}")]
    Url {
        input: String,
        #[source]
        source: url::ParseError,
    },
}

impl ScrapeError {
    pub fn structure(url: impl Into<String>, what: impl Into<String>) -> Self {
        ScrapeError::Structure { url: url.into(), what: what.into() }
    }

    /// Transport failures and non-success statuses.
    pub fn is_network(&self) -> bool {
        matches!(self, ScrapeError::Network { .. } | ScrapeError::HttpStatus { .. })
    }

    /// An expected HTML anchor was missing.
    pub fn is_structure(&self) -> bool {
        matches!(self, ScrapeError::Structure { .. })
    }
}
