// src/lib.rs
// =============================================================================
// page-analyzer: analyze one web page on demand.
//
// Given a URL, `analyze` fetches the page and reports:
// - the declared HTML version
// - the page title and h1..h6 counts
// - whether the page has a login form
// - how many links are internal / external, and which of them are broken
//
// Modules, in pipeline order:
// - fetch:    GET the page
// - inspect:  version detection, document facts, link extraction
// - checker:  concurrent HEAD checks of every extracted link
// - report:   the immutable CrawlResult
// - pipeline: wires the stages together behind `analyze`
// =============================================================================

pub mod checker;
pub mod error;
pub mod fetch;
pub mod inspect;
pub mod pipeline;
pub mod report;

pub use checker::{BrokenLink, LinkOutcome, LinkProbe};
pub use error::{AnalyzeError, BaseUrlError};
pub use inspect::{HeadingCounts, HtmlVersion};
pub use pipeline::{analyze, Analyzer};
pub use report::CrawlResult;
