// src/specs/download.rs
//! Scraping *spec* for the downloads page.
//!
//! `<root>/download.html` lists archives in its first `<table>`; the PDF (A4)
//! zip is the anchor whose href ends in `pdf-a4.zip`, wherever it sits in the
//! table. The href is resolved against the downloads page itself and the
//! archive lands in `<base>/downloads/<final path segment>`.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::config::consts::{ARCHIVE_PATTERN, DOWNLOADS_PATH};
use crate::core::html::{self, Page, any, attr_matches};
use crate::core::net::Fetcher;
use crate::core::sanitize::last_path_segment;
use crate::data::DownloadTarget;
use crate::error::ScrapeError;
use crate::file::{ensure_directory, write_bytes};
use crate::progress::Progress;

static ARCHIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ARCHIVE_PATTERN).expect("Failed to compile archive regex"));

pub fn downloads_url(root: &Url) -> Result<Url, ScrapeError> {
    root.join(DOWNLOADS_PATH)
        .map_err(|source| ScrapeError::Url { input: s!(DOWNLOADS_PATH), source })
}

/// Locate the archive, fetch it and write it under `dir`. Returns the target and the written path.
pub fn fetch(
    fetcher: &Fetcher,
    root: &Url,
    dir: &Path,
    progress: &mut dyn Progress,
) -> Result<(DownloadTarget, PathBuf), ScrapeError> {
    let url = downloads_url(root)?;
    let target = find_archive(&Page::parse(&fetcher.get(&url)?))?;
    logf!("Download: archive {} found on {}", target.archive_url, url);

    progress.begin(1);
    let path = save_archive(fetcher, &target, dir)?;
    progress.item_done(&target.filename);
    Ok((target, path))
}

pub fn find_archive(page: &Page) -> Result<DownloadTarget, ScrapeError> {
    let table = page.find_one("table", any).required(page.url())?;
    let a = html::find_one(table, "a", attr_matches("href", &ARCHIVE_RE)).required(page.url())?;
    let href = html::href(&a).unwrap_or_default();
    let archive_url = page.resolve(href)?;

    let filename = s!(last_path_segment(archive_url.path()));
    if filename.is_empty() {
        return Err(ScrapeError::structure(
            page.url().as_str(),
            format!("archive link {archive_url} has no file name"),
        ));
    }
    Ok(DownloadTarget { archive_url: archive_url.to_string(), filename })
}

/// Fetch the archive bytes and write `<dir>/<filename>`, replacing any previous copy.
pub fn save_archive(fetcher: &Fetcher, target: &DownloadTarget, dir: &Path) -> Result<PathBuf, ScrapeError> {
    let url = Url::parse(&target.archive_url)
        .map_err(|source| ScrapeError::Url { input: target.archive_url.clone(), source })?;

    ensure_directory(dir)?;
    let doc = fetcher.get(&url)?;
    let path = dir.join(&target.filename);
    write_bytes(&path, &doc.bytes)?;
    logf!("Download: archive saved to {} ({} bytes)", path.display(), doc.bytes.len());
    Ok(path)
}
