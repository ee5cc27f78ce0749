// src/inspect/links.rs
// =============================================================================
// Finds every <a href> on the page and sorts it into internal or external.
//
// For each href, in document order:
// - `mailto:` / `javascript:` prefixes (case-sensitive) are discarded
// - the rest are resolved against the page URL; failures are discarded
// - a resolved link whose hostname equals the page hostname is internal,
//   anything else is external
//
// Discarded hrefs never reach the link checker and never show up in any
// count, so "discarded" and "broken" stay distinct outcomes.
//
// Hostnames are compared exactly as the url crate reports them: no "www."
// stripping and no scheme comparison, so http://a.com and https://a.com are
// both internal to a page on a.com. The url crate itself folds domain case
// and converts IDNs to punycode while parsing, so Example.COM and
// example.com are the same host here.
// =============================================================================

use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

const SKIPPED_PREFIXES: [&str; 2] = ["mailto:", "javascript:"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkScope {
    Internal,
    External,
}

/// A link that survived resolution and will be checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLink {
    pub href: String,
    pub url: String,
    pub scope: LinkScope,
}

/// All links of a page, classified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSummary {
    pub candidates: Vec<CandidateLink>,
    pub internal: usize,
    pub external: usize,
    pub discarded: usize,
}

impl LinkSummary {
    /// Resolved URLs in document order, ready for the checker.
    pub fn urls(&self) -> Vec<String> {
        self.candidates.iter().map(|c| c.url.clone()).collect()
    }

    fn push(&mut self, candidate: CandidateLink) {
        match candidate.scope {
            LinkScope::Internal => self.internal += 1,
            LinkScope::External => self.external += 1,
        }
        self.candidates.push(candidate);
    }
}

#[derive(Debug, Clone)]
pub struct LinkExtractor {
    anchors: Selector,
}

impl LinkExtractor {
    pub fn new() -> Self {
        Self {
            anchors: Selector::parse("a[href]").expect("static CSS selector is valid"),
        }
    }

    pub fn extract(&self, document: &Html, base: &Url) -> LinkSummary {
        let mut summary = LinkSummary::default();

        for element in document.select(&self.anchors) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };

            match classify(base, href) {
                Some(candidate) => summary.push(candidate),
                None => {
                    debug!(href, "discarding link");
                    summary.discarded += 1;
                }
            }
        }

        summary
    }
}

impl Default for LinkExtractor {
    fn default() -> Self {
        Self::new()
    }
}

// Resolves one href against the page URL
//
// Returns None when the href is skipped or cannot be resolved.
fn classify(base: &Url, href: &str) -> Option<CandidateLink> {
    if SKIPPED_PREFIXES.iter().any(|prefix| href.starts_with(prefix)) {
        return None;
    }

    let resolved = base.join(href).ok()?;
    let scope = if resolved.host_str() == base.host_str() {
        LinkScope::Internal
    } else {
        LinkScope::External
    };

    Some(CandidateLink {
        href: href.to_string(),
        url: resolved.to_string(),
        scope,
    })
}
