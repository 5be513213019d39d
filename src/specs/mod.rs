//! # Scraping “specs” module
//!
//! This module hosts the **page-specific extraction specifications** for the
//! Python documentation site. Each spec focuses on a single page and encodes
//! *where the ground truth lives in the HTML* and *how to reach it*.
//!
//! ## What lives here
//! - **Structural anchors** for each page: a section by id, a list by the text
//!   it contains, a table by the href pattern of a link inside it.
//! - **Pure parsing** (`parse_*` / `find_*`) over a `core::html::Page`, testable
//!   offline against inline fixtures.
//! - A thin **`fetch`** per spec that pulls pages through `core::net::Fetcher`
//!   and shapes records into a header-first `data::DataSet`.
//!
//! ## What does **not** live here
//! - **Caching** – the Fetcher's `ResponseCache` handles it.
//! - **Presentation** – `output` renders tables, `file` writes them.
//! - **Mode dispatch** – `runner` maps a mode to a spec.
//!
//! ## Conventions & invariants
//! - Rows come out in **document order**; no sorting, no deduplication.
//! - A missing anchor is a `ScrapeError::Structure`, never an empty success.
//! - Relative links are resolved against **the page they were found on**.
//!
//! ## Current specs
//! - `whats_new` – release-notes index + one page per release.
//! - `versions` – sidebar "All versions" list on the root page.
//! - `download` – PDF (A4) archive from the downloads table.
pub mod download;
pub mod versions;
pub mod whats_new;
