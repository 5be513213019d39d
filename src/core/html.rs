// src/core/html.rs
//! Element lookup over a parsed page.
//!
//! The docs pages have no ids or classes reserved for the data we want, so
//! lookups are "tag + predicate" scans in document order. A single-element
//! lookup yields a `Lookup` so each extractor decides whether a miss is fatal.

use regex::Regex;
use scraper::{ElementRef, Html};
use url::Url;

use crate::core::net::Document;
use crate::core::sanitize::flatten_lines;
use crate::error::ScrapeError;

/// Result of a single-element lookup.
#[derive(Debug)]
pub enum Lookup<'a> {
    Found(ElementRef<'a>),
    NotFound(String),
}

impl<'a> Lookup<'a> {
    /// Miss → `ScrapeError::Structure` tagged with the page URL.
    pub fn required(self, url: &Url) -> Result<ElementRef<'a>, ScrapeError> {
        match self {
            Lookup::Found(el) => Ok(el),
            Lookup::NotFound(what) => Err(ScrapeError::structure(url.as_str(), what)),
        }
    }
}

/// A parsed page together with the URL its relative links resolve against.
pub struct Page {
    url: Url,
    html: Html,
}

impl Page {
    pub fn parse(doc: &Document) -> Self {
        Self::from_html(doc.url.clone(), &doc.text())
    }

    pub fn from_html(url: Url, html: &str) -> Self {
        Self { url, html: Html::parse_document(html) }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    pub fn find_one<P>(&self, tag: &str, pred: P) -> Lookup<'_>
    where
        P: Fn(&ElementRef<'_>) -> bool,
    {
        let root = self.root();
        if root.value().name() == tag && pred(&root) {
            return Lookup::Found(root);
        }
        find_one(root, tag, pred)
    }

    pub fn find_all<P>(&self, tag: &str, pred: P) -> Vec<ElementRef<'_>>
    where
        P: Fn(&ElementRef<'_>) -> bool,
    {
        find_all(self.root(), tag, pred)
    }

    /// Join `href` against this page's own URL.
    pub fn resolve(&self, href: &str) -> Result<Url, ScrapeError> {
        self.url
            .join(href)
            .map_err(|source| ScrapeError::Url { input: s!(href), source })
    }
}

/// First descendant of `scope` (not `scope` itself) named `tag` that satisfies `pred`.
pub fn find_one<'a, P>(scope: ElementRef<'a>, tag: &str, pred: P) -> Lookup<'a>
where
    P: Fn(&ElementRef<'a>) -> bool,
{
    descendants(scope)
        .find(|el| el.value().name() == tag && pred(el))
        .map(Lookup::Found)
        .unwrap_or_else(|| Lookup::NotFound(format!("no matching <{tag}>")))
}

/// Every descendant of `scope` named `tag` that satisfies `pred`, in document order.
pub fn find_all<'a, P>(scope: ElementRef<'a>, tag: &str, pred: P) -> Vec<ElementRef<'a>>
where
    P: Fn(&ElementRef<'a>) -> bool,
{
    descendants(scope)
        .filter(|el| el.value().name() == tag && pred(el))
        .collect()
}

fn descendants(scope: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    scope.descendants().skip(1).filter_map(ElementRef::wrap)
}

/// Concatenated text of `el`. With `collapse_newlines`, line breaks become
/// single spaces; either way the ends are trimmed.
pub fn text_of(el: ElementRef<'_>, collapse_newlines: bool) -> String {
    let raw: String = el.text().collect();
    if collapse_newlines { flatten_lines(&raw) } else { raw.trim().to_string() }
}

pub fn href<'a>(el: &ElementRef<'a>) -> Option<&'a str> {
    el.value().attr("href")
}

/* ---------------- predicates ---------------- */

pub fn any(_: &ElementRef<'_>) -> bool {
    true
}

pub fn attr_eq<'p>(name: &'p str, value: &'p str) -> impl Fn(&ElementRef<'_>) -> bool + 'p {
    move |el: &ElementRef<'_>| el.value().attr(name) == Some(value)
}

pub fn has_class(class: &str) -> impl Fn(&ElementRef<'_>) -> bool + '_ {
    move |el: &ElementRef<'_>| el.value().classes().any(|c| c == class)
}

pub fn attr_matches<'p>(name: &'p str, re: &'p Regex) -> impl Fn(&ElementRef<'_>) -> bool + 'p {
    move |el: &ElementRef<'_>| el.value().attr(name).is_some_and(|v| re.is_match(v))
}

pub fn text_contains(needle: &str) -> impl Fn(&ElementRef<'_>) -> bool + '_ {
    move |el: &ElementRef<'_>| el.text().collect::<String>().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
        <html><body>
          <section id="top">
            <ul class="nav"><li><a href="one.html">One</a></li></ul>
            <ul class="nav main"><li><a href="sub/two.html">Two</a></li></ul>
          </section>
          <dl><dt>Editor</dt>
          <dd>Jane
          Doe</dd></dl>
        </body></html>
    "#;

    fn page() -> Page {
        Page::from_html(Url::parse("https://docs.example.org/3/whatsnew/").unwrap(), DOC)
    }

    #[test]
    fn find_one_by_attr_and_class() {
        let p = page();
        let section = p.find_one("section", attr_eq("id", "top")).required(p.url()).unwrap();
        let ul = find_one(section, "ul", has_class("main")).required(p.url()).unwrap();
        let a = find_one(ul, "a", any).required(p.url()).unwrap();
        assert_eq!(href(&a), Some("sub/two.html"));
    }

    #[test]
    fn miss_is_structure_error() {
        let p = page();
        let miss = p.find_one("table", any);
        assert!(matches!(miss, Lookup::NotFound(_)));
        let err = miss.required(p.url()).unwrap_err();
        assert!(err.is_structure());
        assert!(err.to_string().contains("<table>"));
    }

    #[test]
    fn scoped_search_excludes_scope_itself() {
        let p = page();
        let ul = p.find_one("ul", any).required(p.url()).unwrap();
        assert!(matches!(find_one(ul, "ul", any), Lookup::NotFound(_)));
    }

    #[test]
    fn find_all_in_document_order() {
        let p = page();
        let links: Vec<_> = p.find_all("a", any).iter().filter_map(href).collect();
        assert_eq!(links, ["one.html", "sub/two.html"]);
        assert_eq!(p.find_all("ul", text_contains("Two")).len(), 1);
    }

    #[test]
    fn text_flattening() {
        let p = page();
        let dl = p.find_one("dl", any).required(p.url()).unwrap();
        assert_eq!(text_of(dl, true), "Editor Jane Doe");
        assert!(text_of(dl, false).contains('\n'));
    }

    #[test]
    fn relative_links_resolve_against_page_url() {
        let p = page();
        assert_eq!(
            p.resolve("3.12.html").unwrap().as_str(),
            "https://docs.example.org/3/whatsnew/3.12.html"
        );
        assert_eq!(
            p.resolve("../download.html").unwrap().as_str(),
            "https://docs.example.org/3/download.html"
        );
    }

    #[test]
    fn attr_regex_predicate() {
        let re = Regex::new(r"two\.html$").unwrap();
        let p = page();
        let a = p.find_one("a", attr_matches("href", &re)).required(p.url()).unwrap();
        assert_eq!(text_of(a, false), "Two");
    }
}
