// src/inspect/mod.rs
// =============================================================================
// The synchronous analysis stages, run one after another on a fetched page:
// - version: which HTML dialect the raw bytes declare
// - document: title, heading counts, login form heuristic
// - links: hrefs resolved and split into internal / external
// =============================================================================

mod document;
mod links;
mod version;

pub use document::{DocumentAnalyzer, DocumentFacts, HeadingCounts};
pub use links::{CandidateLink, LinkExtractor, LinkScope, LinkSummary};
pub use version::{HtmlVersion, VersionDetector, VERSION_PREFIX_LEN};
