//! OpenAlex API client.
//!
//! `WorkFetcher` is the seam between the traversal logic and the network;
//! the collector is generic over it so tests can substitute an in-memory
//! fake and account for exactly which requests were issued.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::HarvestError;
use crate::models::{CitingPage, Work};

/// Base URL for building work locators from short ids.
pub const API_BASE: &str = "https://api.openalex.org";

/// Default user agent sent with every request.
pub const USER_AGENT: &str = concat!("citeharvest/", env!("CARGO_PKG_VERSION"));

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the metadata locator for a work id, e.g. `W123` ->
/// `https://api.openalex.org/works/W123`.
pub fn work_url(id: &str) -> String {
    format!("{}/works/{}", API_BASE, id)
}

/// Read-only access to work metadata and paginated citation results.
#[async_trait]
pub trait WorkFetcher {
    /// Fetch a work's metadata from its locator. Error bodies decode into an
    /// empty work, so a missing record surfaces as an absent cited-by
    /// endpoint rather than a failure.
    async fn fetch_work(&self, url: &str) -> Result<Work, HarvestError>;

    /// Fetch one page of a cited-by query. Non-success statuses are errors.
    async fn fetch_citing_page(&self, api_url: &str, page: u32)
        -> Result<CitingPage, HarvestError>;
}

/// HTTP-backed fetcher for the OpenAlex REST API.
#[derive(Clone)]
pub struct OpenAlexClient {
    client: Client,
    /// Contact email appended as the `mailto` parameter, which routes
    /// requests into the OpenAlex polite pool.
    mailto: Option<String>,
}

impl OpenAlexClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .gzip(true)
            .brotli(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            mailto: None,
        }
    }

    /// Set the polite-pool contact email.
    pub fn with_mailto(mut self, mailto: Option<String>) -> Self {
        self.mailto = mailto;
        self
    }

    /// Parse a locator and append the query parameters for this request.
    fn request_url(&self, base: &str, page: Option<u32>) -> Result<Url, HarvestError> {
        let mut url = Url::parse(base).map_err(|source| HarvestError::Endpoint {
            url: base.to_string(),
            source,
        })?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(page) = page {
                pairs.append_pair("page", &page.to_string());
            }
            if let Some(ref mailto) = self.mailto {
                pairs.append_pair("mailto", mailto);
            }
        }
        Ok(url)
    }
}

impl Default for OpenAlexClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WorkFetcher for OpenAlexClient {
    async fn fetch_work(&self, url: &str) -> Result<Work, HarvestError> {
        let request_url = self.request_url(url, None)?;
        let response = self
            .client
            .get(request_url)
            .send()
            .await
            .map_err(|source| HarvestError::Request {
                url: url.to_string(),
                source,
            })?;

        response
            .json::<Work>()
            .await
            .map_err(|source| HarvestError::Request {
                url: url.to_string(),
                source,
            })
    }

    async fn fetch_citing_page(
        &self,
        api_url: &str,
        page: u32,
    ) -> Result<CitingPage, HarvestError> {
        let request_url = self.request_url(api_url, Some(page))?;
        let request_url_str = request_url.to_string();

        let response = self
            .client
            .get(request_url)
            .send()
            .await
            .map_err(|source| HarvestError::Request {
                url: request_url_str.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(HarvestError::Status {
                status: response.status().as_u16(),
                url: request_url_str,
            });
        }

        response
            .json::<CitingPage>()
            .await
            .map_err(|source| HarvestError::Request {
                url: request_url_str,
                source,
            })
    }
}
