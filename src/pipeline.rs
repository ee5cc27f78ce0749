// src/pipeline.rs
// =============================================================================
// Runs the full analysis of one page.
//
//   fetch -> read body -> detect version -> parse + inspect document
//         -> resolve base URL -> extract links -> check links -> assemble
//
// Everything up to link extraction runs in order on the caller's task. Only
// the link checks run concurrently, and `analyze` waits for all of them.
// Any fatal error stops the pipeline before a single link is checked, and no
// partial result is ever returned.
// =============================================================================

use reqwest::Client;
use scraper::Html;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::checker::{check_links, HttpProbe, CHECK_TIMEOUT};
use crate::error::{AnalyzeError, BaseUrlError};
use crate::fetch::{fetch_page, read_body, FETCH_TIMEOUT};
use crate::inspect::{
    DocumentAnalyzer, DocumentFacts, HtmlVersion, LinkExtractor, LinkSummary, VersionDetector,
};
use crate::report::CrawlResult;

// Timeouts are fixed for callers; tests shorten them to keep runs fast.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Settings {
    pub(crate) fetch_timeout: Duration,
    pub(crate) check_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fetch_timeout: FETCH_TIMEOUT,
            check_timeout: CHECK_TIMEOUT,
        }
    }
}

/// Analyzes web pages.
///
/// Holds an HTTP client plus the compiled version patterns and CSS selectors.
/// Building one per job (which is what [`analyze`] does) keeps calls fully
/// independent; reusing one only lets reqwest reuse connections.
#[derive(Debug, Clone)]
pub struct Analyzer {
    client: Client,
    settings: Settings,
    versions: VersionDetector,
    document: DocumentAnalyzer,
    links: LinkExtractor,
}

impl Analyzer {
    pub fn new() -> reqwest::Result<Self> {
        Ok(Self::with_client(Client::builder().build()?))
    }

    pub fn with_client(client: Client) -> Self {
        Self::with_settings(client, Settings::default())
    }

    pub(crate) fn with_settings(client: Client, settings: Settings) -> Self {
        Self {
            client,
            settings,
            versions: VersionDetector::new(),
            document: DocumentAnalyzer::new(),
            links: LinkExtractor::new(),
        }
    }

    /// Fetches `target` and produces its full report.
    pub async fn analyze(&self, target: &str) -> Result<CrawlResult, AnalyzeError> {
        info!(url = target, "analyzing page");

        let result = self.run(target).await;
        match &result {
            Ok(report) => info!(
                url = target,
                html_version = %report.html_version(),
                internal = report.internal_link_count(),
                external = report.external_link_count(),
                broken = report.broken_link_count(),
                "analysis finished"
            ),
            Err(e) => warn!(url = target, stage = e.stage(), error = ?e, "analysis failed"),
        }
        result
    }

    async fn run(&self, target: &str) -> Result<CrawlResult, AnalyzeError> {
        let response = fetch_page(&self.client, target, self.settings.fetch_timeout).await?;
        let body = read_body(target, response).await?;

        let (html_version, facts, links) = self.inspect(target, &body)?;

        debug!(url = target, links = links.candidates.len(), "checking links");
        let probe = HttpProbe::with_timeout(self.client.clone(), self.settings.check_timeout);
        let broken = check_links(&probe, links.urls()).await;

        Ok(CrawlResult::assemble(html_version, facts, &links, broken))
    }

    // The synchronous stages. The parsed tree is not Send, so it lives only
    // inside this function and never across an await.
    fn inspect(
        &self,
        target: &str,
        body: &[u8],
    ) -> Result<(HtmlVersion, DocumentFacts, LinkSummary), AnalyzeError> {
        let html_version = self.versions.detect(body);
        debug!(url = target, html_version = %html_version, "detected version");

        let document = Html::parse_document(&String::from_utf8_lossy(body));
        let facts = self.document.analyze(&document);
        debug!(url = target, title = %facts.title, login_form = facts.has_login_form, "inspected document");

        let base = base_url(target)?;
        let links = self.links.extract(&document, &base);
        debug!(
            url = target,
            internal = links.internal,
            external = links.external,
            discarded = links.discarded,
            "extracted links"
        );

        Ok((html_version, facts, links))
    }
}

/// Analyzes one page with a fresh [`Analyzer`].
///
/// This is the single entry point used by the job runner: it either returns a
/// complete [`CrawlResult`] or the error of the stage that failed.
pub async fn analyze(target: &str) -> Result<CrawlResult, AnalyzeError> {
    let analyzer = Analyzer::new().map_err(|e| AnalyzeError::fetch(target, e))?;
    analyzer.analyze(target).await
}

fn base_url(target: &str) -> Result<Url, AnalyzeError> {
    let base = Url::parse(target).map_err(|e| AnalyzeError::url(target, e))?;
    if base.cannot_be_a_base() {
        return Err(AnalyzeError::url(target, BaseUrlError::CannotBeABase));
    }
    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_settings() -> Settings {
        Settings {
            fetch_timeout: Duration::from_millis(200),
            check_timeout: Duration::from_millis(200),
        }
    }

    #[test]
    fn test_base_url_must_be_absolute() {
        assert_eq!(base_url("/relative").unwrap_err().stage(), "url");
        assert_eq!(base_url("mailto:a@b.c").unwrap_err().stage(), "url");
        assert!(base_url("https://example.com/a").is_ok());
    }

    #[tokio::test]
    async fn test_fetch_timeout_dispatches_no_checks() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"<a href="/x">x</a>"#)
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let analyzer = Analyzer::with_settings(Client::new(), fast_settings());
        let err = analyzer.analyze(&server.uri()).await.unwrap_err();
        assert!(matches!(err, AnalyzeError::Fetch { .. }));

        let requests = server.received_requests().await.unwrap();
        assert!(requests.iter().all(|r| r.method.as_str() == "GET"));
    }

    #[tokio::test]
    async fn test_slow_link_counts_as_broken_with_status_zero() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"<a href="/slow">s</a>"#))
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let analyzer = Analyzer::with_settings(Client::new(), fast_settings());
        let report = analyzer.analyze(&server.uri()).await.unwrap();

        assert_eq!(report.internal_link_count(), 1);
        assert_eq!(report.broken_link_count(), 1);
        assert_eq!(report.broken_links()[0].status, 0);
        assert_eq!(report.broken_links()[0].link, format!("{}/slow", server.uri()));
    }

    #[tokio::test]
    async fn test_body_stall_is_fetch_error() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        // Sends the head and part of the body, then goes quiet
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            let _ = socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n<html>")
                .await;
            tokio::time::sleep(Duration::from_secs(3)).await;
        });

        let analyzer = Analyzer::with_settings(Client::new(), fast_settings());
        let err = analyzer.analyze(&format!("http://{addr}/")).await.unwrap_err();
        assert_eq!(err.stage(), "fetch");
    }
}
