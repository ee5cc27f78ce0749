// src/checker/http.rs
// =============================================================================
// The production link probe: one HTTP HEAD request per link.
//
// - HEAD only, no body download and no fallback to GET
// - 5 second timeout per request
// - redirects are followed by reqwest (its default policy), so the status we
//   see is the final one
// - errors are turned into a short human-readable reason
// =============================================================================

use reqwest::Client;
use std::time::Duration;

use super::{LinkOutcome, LinkProbe};

/// How long a single link check may take.
pub const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
    timeout: Duration,
}

impl HttpProbe {
    pub fn new(client: Client) -> Self {
        Self::with_timeout(client, CHECK_TIMEOUT)
    }

    pub(crate) fn with_timeout(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

impl LinkProbe for HttpProbe {
    async fn probe(&self, url: &str) -> LinkOutcome {
        match self.client.head(url).timeout(self.timeout).send().await {
            Ok(response) => LinkOutcome::Responded(response.status().as_u16()),
            Err(e) => LinkOutcome::Failed(describe_error(&e)),
        }
    }
}

// Categorizes the reqwest error kinds we care to tell apart in logs
fn describe_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_redirect() {
        "too many redirects".to_string()
    } else if error.is_connect() {
        "connection failed".to_string()
    } else if error.is_builder() {
        format!("invalid request: {}", error)
    } else {
        error.to_string()
    }
}
