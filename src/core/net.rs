// src/core/net.rs
//! HTTP GET with a persistent response cache in front of it.
//!
//! A URL is fetched from the network at most once per cache state: later
//! calls are served from `ResponseCache` until `clear()` runs or the entry
//! expires. Transport failures are never retried.

use chrono::Utc;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::config::consts::USER_AGENT;
use crate::core::cache::{CachedResponse, ResponseCache};
use crate::error::ScrapeError;

/// A fetched page (or binary), plus the charset used to decode it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub url: Url,
    pub bytes: Vec<u8>,
    pub encoding: String,
    pub from_cache: bool,
}

impl Document {
    /// Override the declared charset. The docs site does not reliably declare
    /// one, so text pages are forced to UTF-8 before parsing.
    pub fn force_encoding(mut self, label: &str) -> Self {
        self.encoding = label.to_ascii_lowercase();
        self
    }

    pub fn text(&self) -> String {
        decode(&self.bytes, &self.encoding)
    }
}

pub struct Fetcher {
    client: Client,
    cache: ResponseCache,
}

impl Fetcher {
    /// `cache` is owned by the caller's choice of directory; the Fetcher
    /// never clears it on its own.
    pub fn new(cache: ResponseCache) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| ScrapeError::Network { url: s!(), source })?;
        Ok(Self::with_client(client, cache))
    }

    pub fn with_client(client: Client, cache: ResponseCache) -> Self {
        Self { client, cache }
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn get(&self, url: &Url) -> Result<Document, ScrapeError> {
        if let Some(hit) = self.cache.get(url.as_str())? {
            logd!("GET {} (cache)", url);
            return Ok(document_from(url.clone(), hit, true));
        }

        logd!("GET {}", url);
        let resp = self
            .client
            .get(url.clone())
            .send()
            .map_err(|source| ScrapeError::Network { url: url.to_string(), source })?;

        let status = resp.status();
        if !status.is_success() {
            logw!("GET {} -> HTTP {}", url, status.as_u16());
            return Err(ScrapeError::HttpStatus { url: url.to_string(), status: status.as_u16() });
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp
            .bytes()
            .map_err(|source| ScrapeError::Network { url: url.to_string(), source })?
            .to_vec();
        logd!("GET {} -> {} ({} bytes)", url, status.as_u16(), body.len());

        let stored = CachedResponse {
            url: url.to_string(),
            status: status.as_u16(),
            content_type,
            body,
            stored_at: Utc::now(),
        };
        self.cache.put(&stored)?;
        Ok(document_from(url.clone(), stored, false))
    }

    /// Drop every cached response. Destructive; only called on explicit request.
    pub fn clear(&self) -> Result<usize, ScrapeError> {
        let removed = self.cache.clear()?;
        logf!("Cache cleared: {} entries removed from {}", removed, self.cache.dir().display());
        Ok(removed)
    }
}

fn document_from(url: Url, resp: CachedResponse, from_cache: bool) -> Document {
    let encoding = declared_encoding(resp.content_type.as_deref());
    Document { url, bytes: resp.body, encoding, from_cache }
}

/// `charset=` from a Content-Type value. `text/*` without one is ISO-8859-1
/// (HTTP/1.1 default), anything else UTF-8.
pub fn declared_encoding(content_type: Option<&str>) -> String {
    let Some(ct) = content_type else { return s!("utf-8") };
    let lc = ct.to_ascii_lowercase();

    for param in lc.split(';').skip(1) {
        if let Some(v) = param.trim().strip_prefix("charset=") {
            let v = v.trim_matches(|c| c == '"' || c == '\'').trim();
            if !v.is_empty() {
                return s!(v);
            }
        }
    }
    if lc.trim_start().starts_with("text/") { s!("iso-8859-1") } else { s!("utf-8") }
}

fn decode(bytes: &[u8], label: &str) -> String {
    match label {
        "iso-8859-1" | "latin-1" | "latin1" | "l1" | "us-ascii" | "ascii" => {
            bytes.iter().map(|&b| b as char).collect()
        }
        "utf-8" | "utf8" => String::from_utf8_lossy(bytes).into_owned(),
        other => {
            logd!("Decode: unsupported charset {:?}, reading as UTF-8", other);
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_detection() {
        assert_eq!(declared_encoding(Some("text/html; charset=UTF-8")), "utf-8");
        assert_eq!(declared_encoding(Some("text/html;charset=\"windows-1251\"")), "windows-1251");
        assert_eq!(declared_encoding(Some("text/html")), "iso-8859-1");
        assert_eq!(declared_encoding(Some("application/zip")), "utf-8");
        assert_eq!(declared_encoding(None), "utf-8");
    }

    #[test]
    fn unknown_charset_reads_as_utf8() {
        assert_eq!(decode("Łódź".as_bytes(), "windows-1251"), "Łódź");
        assert_eq!(decode(&[0xe9], "latin1"), "é");
    }

    #[test]
    fn forcing_utf8_fixes_mojibake() {
        let doc = Document {
            url: Url::parse("https://x/").unwrap(),
            bytes: "Łukasz Langa".as_bytes().to_vec(),
            encoding: s!("iso-8859-1"),
            from_cache: false,
        };
        assert_ne!(doc.text(), "Łukasz Langa");
        assert_eq!(doc.force_encoding("UTF-8").text(), "Łukasz Langa");
    }
}
