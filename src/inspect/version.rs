// src/inspect/version.rs
// =============================================================================
// Classifies which HTML dialect a page declares.
//
// Only the first 1024 bytes of the body are looked at. A doctype that shows
// up later than that is reported as Unknown; this keeps detection cheap and
// is part of the contract, not an oversight.
//
// Rules, first match wins (on the lower-cased prefix):
//   1. contains `<!doctype html>`                                -> HTML5
//   2. matches the HTML 4.01 Strict public identifier            -> HTML 4.01 Strict
//   3. matches the HTML 4.01 Transitional public identifier      -> HTML 4.01 Transitional
//   4. anything else                                             -> Unknown
// =============================================================================

use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Number of leading body bytes the detector inspects.
pub const VERSION_PREFIX_LEN: usize = 1024;

const HTML5_DOCTYPE: &str = "<!doctype html>";
const HTML4_STRICT_DOCTYPE: &str = r#"<!doctype html public "-//w3c//dtd html 4.01//en""#;
const HTML4_TRANSITIONAL_DOCTYPE: &str =
    r#"<!doctype html public "-//w3c//dtd html 4.01 transitional//en""#;

/// The markup dialect a page declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HtmlVersion {
    #[serde(rename = "HTML5")]
    Html5,
    #[serde(rename = "HTML 4.01 Strict")]
    Html401Strict,
    #[serde(rename = "HTML 4.01 Transitional")]
    Html401Transitional,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl HtmlVersion {
    pub fn label(&self) -> &'static str {
        match self {
            HtmlVersion::Html5 => "HTML5",
            HtmlVersion::Html401Strict => "HTML 4.01 Strict",
            HtmlVersion::Html401Transitional => "HTML 4.01 Transitional",
            HtmlVersion::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for HtmlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Holds the compiled HTML 4.01 patterns so they are built once per analyzer
/// instead of living in process-wide statics.
#[derive(Debug, Clone)]
pub struct VersionDetector {
    html4_strict: Regex,
    html4_transitional: Regex,
}

impl VersionDetector {
    pub fn new() -> Self {
        // Both patterns are escaped literals, so compiling cannot fail
        Self {
            html4_strict: Regex::new(&regex::escape(HTML4_STRICT_DOCTYPE))
                .expect("escaped literal is a valid regex"),
            html4_transitional: Regex::new(&regex::escape(HTML4_TRANSITIONAL_DOCTYPE))
                .expect("escaped literal is a valid regex"),
        }
    }

    /// Classifies a page from its raw body. Only the prefix is read.
    pub fn detect(&self, body: &[u8]) -> HtmlVersion {
        let end = body.len().min(VERSION_PREFIX_LEN);
        let prefix = String::from_utf8_lossy(&body[..end]).to_lowercase();

        if prefix.contains(HTML5_DOCTYPE) {
            HtmlVersion::Html5
        } else if self.html4_strict.is_match(&prefix) {
            HtmlVersion::Html401Strict
        } else if self.html4_transitional.is_match(&prefix) {
            HtmlVersion::Html401Transitional
        } else {
            HtmlVersion::Unknown
        }
    }
}

impl Default for VersionDetector {
    fn default() -> Self {
        Self::new()
    }
}
