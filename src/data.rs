// src/data.rs
//
// Extracted records and the header-first table they are shaped into.
//
// - *Entry types: one record per item found on a page.
// - Row: fixed column labels + how a record becomes cells.
// - DataSet: immutable result of one run (header row + data rows, in page
//            order), plus the items a lenient run had to skip.

/// One release-notes page linked from the what's-new index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WhatsNewEntry {
    pub source_url: String,
    pub title: String,
    pub summary: String,
}

/// One documentation version from the sidebar "All versions" list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionEntry {
    pub doc_url: String,
    pub version: String,
    pub status: String,
}

/// The PDF (A4) archive on the downloads page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadTarget {
    pub archive_url: String,
    pub filename: String,
}

/// An item a lenient run could not extract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Skipped {
    pub url: String,
    pub reason: String,
}

pub trait Row {
    const HEADERS: &'static [&'static str];
    fn cells(&self) -> Vec<String>;
}

impl Row for WhatsNewEntry {
    const HEADERS: &'static [&'static str] = &["Link", "Title", "Editor/Author"];

    fn cells(&self) -> Vec<String> {
        vec![self.source_url.clone(), self.title.clone(), self.summary.clone()]
    }
}

impl Row for VersionEntry {
    const HEADERS: &'static [&'static str] = &["Link", "Version", "Status"];

    fn cells(&self) -> Vec<String> {
        vec![self.doc_url.clone(), self.version.clone(), self.status.clone()]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataSet {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    skipped: Vec<Skipped>,
}

impl DataSet {
    pub fn from_entries<R: Row>(entries: &[R], skipped: Vec<Skipped>) -> Self {
        Self {
            headers: R::HEADERS.iter().map(|h| s!(*h)).collect(),
            rows: entries.iter().map(R::cells).collect(),
            skipped,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows only, in page order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn skipped(&self) -> &[Skipped] {
        &self.skipped
    }

    /// Header row first, then every data row.
    pub fn table(&self) -> impl Iterator<Item = &[String]> {
        std::iter::once(self.headers.as_slice()).chain(self.rows.iter().map(Vec::as_slice))
    }
}
