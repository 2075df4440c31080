//! Page fetching over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;

use crate::errors::NewsError;

/// ShareSansar blocks default HTTP client identities, so every request
/// carries a fixed browser User-Agent.
pub const PAGE_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Fetches one page body by URL.
///
/// The scraper depends on this trait so tests can substitute canned pages
/// and injected failures for live HTTP.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, NewsError>;
}

/// Production fetcher: reqwest with the fixed User-Agent and a 10 second
/// timeout per request. A timeout surfaces as a transport error.
pub struct HttpPageFetcher {
    client: Client,
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(PAGE_USER_AGENT));
    headers
}

impl HttpPageFetcher {
    pub fn new() -> Self {
        let client = Client::builder()
            .default_headers(default_headers())
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");
        Self { client }
    }
}

impl Default for HttpPageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, NewsError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NewsError::Upstream {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }
}
