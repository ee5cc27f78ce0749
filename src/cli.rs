// src/cli.rs
// =============================================================================
// Command-line interface, defined with clap's derive API.
//
// The analysis itself takes no options; the CLI only chooses how the result
// is printed. Log verbosity comes from RUST_LOG.
// =============================================================================

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "page-analyzer",
    version,
    about = "Analyze a web page: HTML version, headings, login forms and broken links",
    long_about = "page-analyzer fetches a single page, reports its HTML version, title, \
                  heading counts and login form presence, and checks every link on it. \
                  Set RUST_LOG (e.g. RUST_LOG=page_analyzer=debug) for more detail."
)]
pub struct Cli {
    /// Absolute URL of the page to analyze (e.g., https://example.com)
    pub url: String,

    /// Output the result as JSON instead of a report
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_and_json_flag() {
        let cli = Cli::try_parse_from(["page-analyzer", "https://example.com", "--json"]).unwrap();
        assert_eq!(cli.url, "https://example.com");
        assert!(cli.json);
    }

    #[test]
    fn test_url_is_required() {
        assert!(Cli::try_parse_from(["page-analyzer"]).is_err());
    }
}
