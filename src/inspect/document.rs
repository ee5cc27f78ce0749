// src/inspect/document.rs
// =============================================================================
// Extracts structural facts from a parsed page:
// - the trimmed text of the first <title>
// - how many h1..h6 elements the page has
// - whether any <form> contains a password input (the login form heuristic)
//
// Selectors are parsed once when the analyzer is built and reused for every
// document it looks at.
// =============================================================================

use scraper::{Html, Selector};
use serde::Serialize;

/// Count of h1..h6 elements. Nested headings are counted for their own tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HeadingCounts {
    #[serde(rename = "h1_count")]
    pub h1: usize,
    #[serde(rename = "h2_count")]
    pub h2: usize,
    #[serde(rename = "h3_count")]
    pub h3: usize,
    #[serde(rename = "h4_count")]
    pub h4: usize,
    #[serde(rename = "h5_count")]
    pub h5: usize,
    #[serde(rename = "h6_count")]
    pub h6: usize,
}

impl HeadingCounts {
    /// Count for heading level 1..=6, None for any other level.
    pub fn level(&self, level: u8) -> Option<usize> {
        match level {
            1 => Some(self.h1),
            2 => Some(self.h2),
            3 => Some(self.h3),
            4 => Some(self.h4),
            5 => Some(self.h5),
            6 => Some(self.h6),
            _ => None,
        }
    }
}

/// What the analyzer found in one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFacts {
    pub title: String,
    pub headings: HeadingCounts,
    pub has_login_form: bool,
}

#[derive(Debug, Clone)]
pub struct DocumentAnalyzer {
    title: Selector,
    headings: [Selector; 6],
    form: Selector,
    password_input: Selector,
}

impl DocumentAnalyzer {
    pub fn new() -> Self {
        Self {
            title: selector("title"),
            headings: [
                selector("h1"),
                selector("h2"),
                selector("h3"),
                selector("h4"),
                selector("h5"),
                selector("h6"),
            ],
            form: selector("form"),
            password_input: selector(r#"input[type="password"]"#),
        }
    }

    pub fn analyze(&self, document: &Html) -> DocumentFacts {
        DocumentFacts {
            title: self.title(document),
            headings: self.heading_counts(document),
            has_login_form: self.has_login_form(document),
        }
    }

    fn title(&self, document: &Html) -> String {
        document
            .select(&self.title)
            .next()
            .map(|title| title.text().collect::<String>().trim().to_string())
            .unwrap_or_default()
    }

    fn heading_counts(&self, document: &Html) -> HeadingCounts {
        let [h1, h2, h3, h4, h5, h6] = &self.headings;
        let count = |sel: &Selector| document.select(sel).count();

        HeadingCounts {
            h1: count(h1),
            h2: count(h2),
            h3: count(h3),
            h4: count(h4),
            h5: count(h5),
            h6: count(h6),
        }
    }

    // Forms are scanned in document order and the scan stops at the first
    // one holding a password field.
    fn has_login_form(&self, document: &Html) -> bool {
        for form in document.select(&self.form) {
            if form.select(&self.password_input).next().is_some() {
                return true;
            }
        }
        false
    }
}

impl Default for DocumentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

// Our selectors are constants known to be valid, so a parse failure here
// would be a programming mistake.
fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static CSS selector is valid")
}
