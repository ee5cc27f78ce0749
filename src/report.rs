// src/report.rs
// =============================================================================
// The result of analyzing one page.
//
// A CrawlResult is only ever built by `CrawlResult::assemble`, which merges
// the outputs of every stage. Fields are private so the counts cannot drift
// apart after construction: broken_link_count is always the length of the
// broken link list.
//
// Serialized field names match what the persistence layer stores
// (html_version, h1_count, internal_links, broken_link_details, ...).
// =============================================================================

use serde::Serialize;

use crate::checker::BrokenLink;
use crate::inspect::{DocumentFacts, HeadingCounts, HtmlVersion, LinkSummary};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlResult {
    html_version: HtmlVersion,
    title: String,
    #[serde(flatten)]
    headings: HeadingCounts,
    #[serde(rename = "internal_links")]
    internal_link_count: usize,
    #[serde(rename = "external_links")]
    external_link_count: usize,
    has_login_form: bool,
    #[serde(rename = "broken_links")]
    broken_link_count: usize,
    #[serde(rename = "broken_link_details")]
    broken_links: Vec<BrokenLink>,
}

impl CrawlResult {
    /// Merges the stage outputs. Pure, cannot fail.
    pub fn assemble(
        html_version: HtmlVersion,
        document: DocumentFacts,
        links: &LinkSummary,
        broken_links: Vec<BrokenLink>,
    ) -> Self {
        Self {
            html_version,
            title: document.title,
            headings: document.headings,
            internal_link_count: links.internal,
            external_link_count: links.external,
            has_login_form: document.has_login_form,
            broken_link_count: broken_links.len(),
            broken_links,
        }
    }

    pub fn html_version(&self) -> HtmlVersion {
        self.html_version
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn headings(&self) -> &HeadingCounts {
        &self.headings
    }

    pub fn internal_link_count(&self) -> usize {
        self.internal_link_count
    }

    pub fn external_link_count(&self) -> usize {
        self.external_link_count
    }

    pub fn has_login_form(&self) -> bool {
        self.has_login_form
    }

    pub fn broken_link_count(&self) -> usize {
        self.broken_link_count
    }

    /// Broken links in the order their checks completed.
    pub fn broken_links(&self) -> &[BrokenLink] {
        &self.broken_links
    }
}
