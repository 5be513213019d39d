// src/specs/whats_new.rs
//! Scraping *spec* for the what's-new index.
//!
//! Index page (`<root>/whatsnew/`):
//!   `section#what-s-new-in-python > div.toctree-wrapper > li.toctree-l1 > a`
//! One entry per first-level item, in index order. Each linked release page
//! gives `title` = first `<h1>` and `summary` = first `<dl>` flattened to one
//! line (the editor/author block).
//!
//! N+1 sequential requests for N releases; the Fetcher cache makes reruns cheap.

use url::Url;

use crate::config::consts::{TOCTREE_L1_CLASS, TOCTREE_WRAPPER_CLASS, WHATS_NEW_PATH, WHATS_NEW_SECTION_ID};
use crate::config::options::Strictness;
use crate::core::html::{self, Page, any, attr_eq, has_class, text_of};
use crate::core::net::Fetcher;
use crate::data::{DataSet, Skipped, WhatsNewEntry};
use crate::error::ScrapeError;
use crate::progress::Progress;

pub fn index_url(root: &Url) -> Result<Url, ScrapeError> {
    root.join(WHATS_NEW_PATH)
        .map_err(|source| ScrapeError::Url { input: s!(WHATS_NEW_PATH), source })
}

pub fn fetch(
    fetcher: &Fetcher,
    root: &Url,
    strictness: Strictness,
    progress: &mut dyn Progress,
) -> Result<DataSet, ScrapeError> {
    let url = index_url(root)?;
    let index = Page::parse(&fetcher.get(&url)?);
    let links = parse_index(&index)?;
    logf!("What's new: {} release pages listed at {}", links.len(), url);

    progress.begin(links.len());
    let mut entries = Vec::with_capacity(links.len());
    let mut skipped = Vec::new();

    for link in links {
        match fetch_release(fetcher, &link) {
            Ok(entry) => entries.push(entry),
            Err(e) if strictness == Strictness::Lenient && is_per_item(&e) => {
                logw!("What's new: skipping {}: {}", link, e);
                progress.log(&format!("Skipped {link}"));
                skipped.push(Skipped { url: link.to_string(), reason: e.to_string() });
            }
            Err(e) => return Err(e),
        }
        progress.item_done(link.as_str());
    }

    Ok(DataSet::from_entries(&entries, skipped))
}

fn fetch_release(fetcher: &Fetcher, link: &Url) -> Result<WhatsNewEntry, ScrapeError> {
    let doc = fetcher.get(link)?.force_encoding("utf-8");
    parse_release_page(&Page::parse(&doc))
}

// Cache/filesystem trouble is never an item-level problem.
fn is_per_item(e: &ScrapeError) -> bool {
    e.is_structure() || e.is_network()
}

/// Absolute release-page URLs from the index, in document order.
pub fn parse_index(page: &Page) -> Result<Vec<Url>, ScrapeError> {
    let section = page
        .find_one("section", attr_eq("id", WHATS_NEW_SECTION_ID))
        .required(page.url())?;
    let wrapper = html::find_one(section, "div", has_class(TOCTREE_WRAPPER_CLASS)).required(page.url())?;

    html::find_all(wrapper, "li", has_class(TOCTREE_L1_CLASS))
        .into_iter()
        .map(|li| {
            let a = html::find_one(li, "a", any).required(page.url())?;
            let href = html::href(&a)
                .ok_or_else(|| ScrapeError::structure(page.url().as_str(), "index item link has no href"))?;
            page.resolve(href)
        })
        .collect()
}

pub fn parse_release_page(page: &Page) -> Result<WhatsNewEntry, ScrapeError> {
    let h1 = page.find_one("h1", any).required(page.url())?;
    let dl = page.find_one("dl", any).required(page.url())?;
    Ok(WhatsNewEntry {
        source_url: page.url().to_string(),
        title: text_of(h1, true),
        summary: text_of(dl, true),
    })
}
