// src/error.rs
// =============================================================================
// Errors that abort a page analysis.
//
// Every variant is fatal: when one is returned no CrawlResult exists.
// Failures of individual link checks are NOT errors, the checker turns them
// into broken links with status 0 instead.
//
// Each variant keeps the underlying error as its `source()`, so callers (and
// anyhow's `{:#}` formatting) can see the whole chain.
// =============================================================================

use thiserror::Error;

/// Why an analysis of `url` stopped before producing a result.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The GET never completed: no response, a timeout (including one while
    /// the body was streaming), a dropped connection, or a URL the HTTP
    /// client refused.
    #[error("failed to fetch {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The body arrived but could not be decoded into a document.
    #[error("failed to parse document from {url}")]
    Parse {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The target URL cannot be used as a base for resolving links.
    #[error("invalid base URL {url}")]
    Url {
        url: String,
        #[source]
        source: BaseUrlError,
    },
}

/// Why a target URL is unusable as a resolution base.
#[derive(Debug, Error)]
pub enum BaseUrlError {
    #[error(transparent)]
    Parse(#[from] url::ParseError),

    #[error("URL cannot be a base")]
    CannotBeABase,
}

impl AnalyzeError {
    pub(crate) fn fetch(url: &str, source: reqwest::Error) -> Self {
        AnalyzeError::Fetch {
            url: url.to_string(),
            source,
        }
    }

    pub(crate) fn parse(url: &str, source: reqwest::Error) -> Self {
        AnalyzeError::Parse {
            url: url.to_string(),
            source,
        }
    }

    pub(crate) fn url(url: &str, source: impl Into<BaseUrlError>) -> Self {
        AnalyzeError::Url {
            url: url.to_string(),
            source: source.into(),
        }
    }

    /// Name of the pipeline stage that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            AnalyzeError::Fetch { .. } => "fetch",
            AnalyzeError::Parse { .. } => "parse",
            AnalyzeError::Url { .. } => "url",
        }
    }
}
