//! HTTP page fetching
//!
//! [`PageFetcher`] is the seam between the pipeline and the network: it
//! turns a URL into the page's raw tables. [`HttpPageFetcher`] is the
//! reqwest-backed implementation used in production; tests substitute
//! scripted fetchers.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, info};

use crate::domain::RawTable;
use crate::error::FetchError;
use crate::infrastructure::config::{HttpConfig, defaults};
use crate::infrastructure::parsing::extract_tables;

/// Source of page tables
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Every `<table>` of the page at `url`, in document order
    ///
    /// A page with no tables is an error.
    async fn fetch_tables(&self, url: &str) -> Result<Vec<RawTable>, FetchError>;
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for Arc<T> {
    async fn fetch_tables(&self, url: &str) -> Result<Vec<RawTable>, FetchError> {
        (**self).fetch_tables(url).await
    }
}

/// reqwest-backed fetcher with a per-request timeout and rotating headers
pub struct HttpPageFetcher {
    client: Client,
    config: HttpConfig,
}

impl HttpPageFetcher {
    /// Create a new fetcher with the given configuration
    pub fn new(config: HttpConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(|source| FetchError::ClientBuild { source })?;

        Ok(Self { client, config })
    }

    /// Browser-like headers with a user agent picked from the pool
    fn request_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let agent = if self.config.user_agents.is_empty() {
            defaults::USER_AGENTS[fastrand::usize(..defaults::USER_AGENTS.len())]
        } else {
            self.config.user_agents[fastrand::usize(..self.config.user_agents.len())].as_str()
        };
        if let Ok(value) = HeaderValue::from_str(agent) {
            headers.insert(USER_AGENT, value);
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-CA,en;q=0.9"));
        headers
    }

    fn classify(&self, url: &str, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                seconds: self.config.timeout_seconds,
            }
        } else {
            FetchError::Transport {
                url: url.to_string(),
                source: error,
            }
        }
    }

    /// Get the configuration
    pub const fn config(&self) -> &HttpConfig {
        &self.config
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_tables(&self, url: &str) -> Result<Vec<RawTable>, FetchError> {
        info!("Fetching URL: {}", url);

        let response = self
            .client
            .get(url)
            .headers(self.request_headers())
            .send()
            .await
            .map_err(|e| self.classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::status(url, status.as_u16()));
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                self.classify(url, e)
            } else {
                FetchError::Body {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        let tables = extract_tables(&body);
        if tables.is_empty() {
            return Err(FetchError::no_tables(url));
        }
        debug!("Successfully fetched: {} ({} tables)", url, tables.len());
        Ok(tables)
    }
}
