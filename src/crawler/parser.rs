//! HTML link extraction
//!
//! This module walks a parsed HTML document, collects the `href` of every
//! anchor element and resolves each one against a base URL.
//!
//! Parsing never fails: malformed markup produces a best-effort tree, which
//! usually means fewer anchors rather than an error.

use crate::LinkError;
use scraper::Html;
use url::Url;

/// Links found on one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedLinks {
    /// Absolute URLs in document order; duplicates are kept
    pub links: Vec<String>,

    /// Set when some hrefs had to be dropped
    pub error: Option<LinkError>,
}

/// Parses HTML content and extracts resolved anchor links
///
/// # Resolution Rules
///
/// - An href that is already an absolute URL with a host is kept exactly as written
/// - Anything else (paths, `../`, `?query`, `//host/x`, `mailto:`) is resolved
///   against `base_url` with RFC 3986 reference resolution
/// - Hrefs that cannot be resolved are skipped and reported through
///   [`LinkError::InvalidLinks`]
/// - If `base_url` itself is invalid, hrefs that need it are dropped and the
///   error is [`LinkError::InvalidBase`]; absolute hrefs are still returned
///
/// # Example
///
/// ```
/// use site_tally::crawler::extract_links;
///
/// let html = r#"<html><body><a href="/a">A</a><a href="c">C</a></body></html>"#;
/// let extracted = extract_links(html, "https://example.com/b/");
/// assert_eq!(extracted.links, vec!["https://example.com/a", "https://example.com/b/c"]);
/// assert!(extracted.error.is_none());
/// ```
pub fn extract_links(html: &str, base_url: &str) -> ExtractedLinks {
    let document = Html::parse_document(html);
    resolve_links(collect_hrefs(&document), base_url)
}

/// Collects anchor `href` values in depth-first document order
pub fn collect_hrefs(document: &Html) -> Vec<&str> {
    document
        .tree
        .root()
        .descendants()
        .filter_map(|node| node.value().as_element())
        .filter(|element| element.name() == "a")
        .flat_map(|element| {
            element
                .attrs()
                .filter(|(name, _)| *name == "href")
                .map(|(_, value)| value)
        })
        .collect()
}

/// Resolves raw hrefs against a base URL
pub fn resolve_links<'a, I>(hrefs: I, base_url: &str) -> ExtractedLinks
where
    I: IntoIterator<Item = &'a str>,
{
    let base = Url::parse(base_url).ok();
    let mut links = Vec::new();
    let mut invalid = 0;

    for href in hrefs {
        match resolve_href(href, base.as_ref()) {
            Resolved::Link(link) => links.push(link),
            Resolved::NeedsBase => {}
            Resolved::Invalid => {
                tracing::trace!("Skipping unparseable href {:?}", href);
                invalid += 1;
            }
        }
    }

    let error = if base.is_none() {
        Some(LinkError::InvalidBase(base_url.to_string()))
    } else if invalid > 0 {
        Some(LinkError::InvalidLinks(invalid))
    } else {
        None
    };

    ExtractedLinks { links, error }
}

enum Resolved {
    Link(String),
    NeedsBase,
    Invalid,
}

fn resolve_href(href: &str, base: Option<&Url>) -> Resolved {
    let href = href.trim();

    match Url::parse(href) {
        Ok(url) if url.host_str().is_some_and(|h| !h.is_empty()) => {
            return Resolved::Link(href.to_string());
        }
        Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => {}
        Err(_) => return Resolved::Invalid,
    }

    match base {
        Some(base) => match base.join(href) {
            Ok(resolved) => Resolved::Link(resolved.to_string()),
            Err(_) => Resolved::Invalid,
        },
        None => Resolved::NeedsBase,
    }
}
