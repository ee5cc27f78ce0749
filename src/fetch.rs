// src/fetch.rs
// =============================================================================
// Fetches the page being analyzed.
//
// The HTTP status of the page is deliberately NOT checked: a 404 or 500 page
// is still HTML we can analyze. Only a GET that never completes is fatal.
//
// Fetching is split in two steps:
// - fetch_page: send the GET and wait for the response head
// - read_body: pull the body into memory for the parser
// The GET is only complete once the whole body is in, so a timeout or a
// dropped connection in either step is a FetchError. Only a body that
// arrived but could not be decoded is a ParseError.
//
// The connection goes back to reqwest as soon as the Response is dropped,
// which happens on every path out of read_body.
// =============================================================================

use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;

use crate::error::AnalyzeError;

/// How long the page GET may take.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

// Sends a GET for the target page
//
// Any response counts as success, including 4xx/5xx.
pub async fn fetch_page(
    client: &Client,
    url: &str,
    timeout: Duration,
) -> Result<Response, AnalyzeError> {
    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| AnalyzeError::fetch(url, e))?;

    debug!(url, status = response.status().as_u16(), "fetched page");
    Ok(response)
}

// Reads the whole response body
//
// The request timeout set in fetch_page still runs while the body streams.
pub async fn read_body(url: &str, response: Response) -> Result<Vec<u8>, AnalyzeError> {
    let body = response.bytes().await.map_err(|e| {
        if e.is_decode() {
            AnalyzeError::parse(url, e)
        } else {
            AnalyzeError::fetch(url, e)
        }
    })?;

    debug!(url, bytes = body.len(), "read page body");
    Ok(body.to_vec())
}
