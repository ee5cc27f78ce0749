// src/checker/mod.rs
// =============================================================================
// Decides which of a page's links are broken.
//
// A link is broken when:
// - its check produced no response at all (recorded with status 0), or
// - the response status is 400 or above (recorded with that status)
// 2xx and 3xx responses are fine. Redirects are followed by the HTTP client,
// so the final response is the one that counts.
//
// Concurrency:
// - at most MAX_CONCURRENT_CHECKS checks are in flight at any moment
// - check_links returns only after every link has an outcome
// - broken links come back in the order their checks FINISHED, which is not
//   the order they were passed in
//
// The actual request is behind the LinkProbe trait so tests can swap in
// probes with fixed outcomes instead of depending on network timing.
// =============================================================================

mod http;

pub use http::{HttpProbe, CHECK_TIMEOUT};

use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::future::Future;
use tracing::{debug, warn};

/// Upper bound on checks running at the same time.
pub const MAX_CONCURRENT_CHECKS: usize = 10;

/// Lowest status code that marks a link as broken.
pub const BROKEN_STATUS_THRESHOLD: u16 = 400;

/// What happened when a single link was checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// The server answered with this status code.
    Responded(u16),
    /// No response: DNS failure, refused connection, timeout, bad request...
    Failed(String),
}

impl LinkOutcome {
    /// The status to record if this outcome means the link is broken.
    pub fn broken_status(&self) -> Option<u16> {
        match self {
            LinkOutcome::Failed(_) => Some(0),
            LinkOutcome::Responded(status) if *status >= BROKEN_STATUS_THRESHOLD => Some(*status),
            LinkOutcome::Responded(_) => None,
        }
    }
}

/// A link that failed its check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokenLink {
    /// Absolute URL that was checked
    pub link: String,
    /// Status code received, or 0 when there was no response
    pub status: u16,
}

/// Something that can check whether one URL is reachable.
pub trait LinkProbe {
    fn probe(&self, url: &str) -> impl Future<Output = LinkOutcome> + Send;
}

// Checks every link and returns the broken ones
//
// Each check is independent: a failure never cancels or delays the others,
// and nothing is retried.
pub async fn check_links<P: LinkProbe>(probe: &P, urls: Vec<String>) -> Vec<BrokenLink> {
    let checks = urls.into_iter().map(|url| async move {
        let outcome = probe.probe(&url).await;
        debug!(url = %url, outcome = ?outcome, "checked link");

        let status = outcome.broken_status()?;
        warn!(url = %url, status, "broken link");
        Some(BrokenLink { link: url, status })
    });

    // buffer_unordered keeps at most N futures alive and yields them as they
    // finish; collecting here is the single consumer of all outcomes.
    stream::iter(checks)
        .buffer_unordered(MAX_CONCURRENT_CHECKS)
        .filter_map(|broken| async move { broken })
        .collect()
        .await
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why buffer_unordered instead of tokio::spawn + Semaphore?
//    - The stream itself is the limit: it never holds more than N futures
//    - Futures borrow the probe, so nothing needs to be 'static or Arc'd
//    - The awaiting collect() is the fan-in point; when it returns, every
//      check has finished
//
// 2. Why `impl Future + Send` in LinkProbe?
//    - Implementors can simply write `async fn probe`
//    - The Send bound keeps `analyze` usable from spawned tasks
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    // Answers from a fixed table; unknown URLs fail
    struct FixedProbe {
        outcomes: HashMap<String, LinkOutcome>,
    }

    impl FixedProbe {
        fn new(entries: &[(&str, LinkOutcome)]) -> Self {
            Self {
                outcomes: entries
                    .iter()
                    .map(|(url, outcome)| (url.to_string(), outcome.clone()))
                    .collect(),
            }
        }
    }

    impl LinkProbe for FixedProbe {
        async fn probe(&self, url: &str) -> LinkOutcome {
            self.outcomes
                .get(url)
                .cloned()
                .unwrap_or_else(|| LinkOutcome::Failed("unknown".to_string()))
        }
    }

    // Sleeps on every check and records how many checks overlap
    #[derive(Default)]
    struct SlowProbe {
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl LinkProbe for SlowProbe {
        async fn probe(&self, _url: &str) -> LinkOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);

            tokio::time::sleep(Duration::from_millis(20)).await;

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            LinkOutcome::Responded(200)
        }
    }

    fn urls(list: &[&str]) -> Vec<String> {
        list.iter().map(|u| u.to_string()).collect()
    }

    #[test]
    fn test_broken_status_rules() {
        assert_eq!(LinkOutcome::Responded(200).broken_status(), None);
        assert_eq!(LinkOutcome::Responded(301).broken_status(), None);
        assert_eq!(LinkOutcome::Responded(399).broken_status(), None);
        assert_eq!(LinkOutcome::Responded(400).broken_status(), Some(400));
        assert_eq!(LinkOutcome::Responded(503).broken_status(), Some(503));
        assert_eq!(
            LinkOutcome::Failed("timed out".to_string()).broken_status(),
            Some(0)
        );
    }

    #[tokio::test]
    async fn test_only_broken_links_are_returned() {
        let probe = FixedProbe::new(&[
            ("https://a.test/ok", LinkOutcome::Responded(200)),
            ("https://a.test/moved", LinkOutcome::Responded(302)),
            ("https://a.test/gone", LinkOutcome::Responded(404)),
            ("https://b.test/down", LinkOutcome::Failed("refused".to_string())),
        ]);

        let mut broken = check_links(
            &probe,
            urls(&[
                "https://a.test/ok",
                "https://a.test/moved",
                "https://a.test/gone",
                "https://b.test/down",
            ]),
        )
        .await;
        broken.sort_by(|a, b| a.link.cmp(&b.link));

        assert_eq!(
            broken,
            vec![
                BrokenLink { link: "https://a.test/gone".to_string(), status: 404 },
                BrokenLink { link: "https://b.test/down".to_string(), status: 0 },
            ]
        );
    }

    #[tokio::test]
    async fn test_duplicate_links_are_each_checked() {
        let probe = FixedProbe::new(&[("https://a.test/gone", LinkOutcome::Responded(410))]);
        let broken = check_links(&probe, urls(&["https://a.test/gone", "https://a.test/gone"])).await;
        assert_eq!(broken.len(), 2);
    }

    #[tokio::test]
    async fn test_no_links_no_checks() {
        let probe = SlowProbe::default();
        let broken = check_links(&probe, Vec::new()).await;
        assert!(broken.is_empty());
        assert_eq!(probe.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_concurrency_never_exceeds_limit() {
        let probe = SlowProbe::default();
        let links: Vec<String> = (0..25).map(|i| format!("https://a.test/{i}")).collect();

        let broken = check_links(&probe, links).await;

        assert!(broken.is_empty());
        assert_eq!(probe.calls.load(Ordering::SeqCst), 25);
        assert_eq!(probe.in_flight.load(Ordering::SeqCst), 0);
        assert_eq!(probe.peak.load(Ordering::SeqCst), MAX_CONCURRENT_CHECKS);
    }
}
