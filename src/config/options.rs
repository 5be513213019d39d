// src/config/options.rs
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;
use url::Url;

use super::consts::*;
use crate::error::ScrapeError;

/// Which page extraction to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum Mode {
    WhatsNew,
    LatestVersions,
    Download,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::WhatsNew => "whats-new",
            Mode::LatestVersions => "latest-versions",
            Mode::Download => "download",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the row sequence is presented. `None` in `AppOptions` means plain console lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    Pretty,
    File,
}

/// What a per-item failure inside a batch does to the run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strictness {
    /// First failure aborts the mode; no partial rows.
    #[default]
    Strict,
    /// Failed items are recorded in `DataSet::skipped` and the batch continues.
    Lenient,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheOptions {
    /// Entries older than this are evicted on read. `None` keeps them forever.
    pub expire_after: Option<Duration>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub mode: Mode,
    /// Documentation root every other page is resolved against.
    pub doc_root: String,
    pub base_dir: PathBuf,
    pub clear_cache: bool,
    pub output: Option<OutputMode>,
    pub strictness: Strictness,
    pub cache: CacheOptions,
}

impl AppOptions {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            doc_root: s!(DOC_ROOT_URL),
            base_dir: PathBuf::from("."),
            clear_cache: false,
            output: None,
            strictness: Strictness::default(),
            cache: CacheOptions::default(),
        }
    }

    pub fn doc_root_url(&self) -> Result<Url, ScrapeError> {
        let mut root = self.doc_root.trim().to_string();
        // A root without a trailing slash would make relative joins drop its last segment.
        if !root.ends_with('/') {
            root.push('/');
        }
        Url::parse(&root).map_err(|source| ScrapeError::Url { input: root, source })
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.base_dir.join(STORE_DIR).join(HTTP_CACHE_SUBDIR)
    }

    pub fn downloads_dir(&self) -> PathBuf {
        self.base_dir.join(DOWNLOADS_SUBDIR)
    }

    pub fn results_dir(&self) -> PathBuf {
        self.base_dir.join(RESULTS_SUBDIR)
    }
}

impl Default for AppOptions {
    fn default() -> Self {
        Self::new(Mode::WhatsNew)
    }
}
