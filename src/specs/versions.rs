// src/specs/versions.rs
//! Scraping *spec* for the documentation versions list.
//!
//! Root page sidebar: `div.sphinxsidebarwrapper` holds several `<ul>`; the
//! one whose text mentions "All versions" enumerates every published version.
//! Each anchor text is `Python X.Y (status)`; anything else is kept verbatim
//! as the version with an empty status.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::config::consts::{ALL_VERSIONS_MARKER, SIDEBAR_CLASS, VERSION_STATUS_PATTERN};
use crate::core::html::{self, Page, any, has_class, text_contains, text_of};
use crate::core::net::Fetcher;
use crate::data::{DataSet, VersionEntry};
use crate::error::ScrapeError;
use crate::progress::Progress;

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(VERSION_STATUS_PATTERN).expect("Failed to compile version/status regex"));

pub fn fetch(fetcher: &Fetcher, root: &Url, progress: &mut dyn Progress) -> Result<DataSet, ScrapeError> {
    let doc = fetcher.get(root)?.force_encoding("utf-8");
    let entries = parse_versions(&Page::parse(&doc))?;
    logf!("Latest versions: {} entries at {}", entries.len(), root);

    progress.begin(entries.len());
    for e in &entries {
        progress.item_done(&e.version);
    }
    Ok(DataSet::from_entries(&entries, Vec::new()))
}

/// `"Python 3.11 (bugfix)"` → `("3.11", "bugfix")`; no match → `(text, "")`.
pub fn parse_version_status(text: &str) -> (String, String) {
    match VERSION_RE.captures(text) {
        Some(caps) => (s!(&caps["version"]), s!(&caps["status"])),
        None => (s!(text), s!()),
    }
}

pub fn parse_versions(page: &Page) -> Result<Vec<VersionEntry>, ScrapeError> {
    let sidebar = page.find_one("div", has_class(SIDEBAR_CLASS)).required(page.url())?;

    // Several lists live in the sidebar; take the first that mentions the marker.
    let mentions_marker = text_contains(ALL_VERSIONS_MARKER);
    let list = html::find_all(sidebar, "ul", any)
        .into_iter()
        .find(|ul| mentions_marker(ul))
        .ok_or_else(|| {
            ScrapeError::structure(page.url().as_str(), format!("nothing found: no sidebar list mentions {ALL_VERSIONS_MARKER:?}"))
        })?;

    html::find_all(list, "a", any)
        .into_iter()
        .map(|a| {
            let href = html::href(&a)
                .ok_or_else(|| ScrapeError::structure(page.url().as_str(), "version link has no href"))?;
            let (version, status) = parse_version_status(&text_of(a, false));
            Ok(VersionEntry { doc_url: page.resolve(href)?.to_string(), version, status })
        })
        .collect()
}
