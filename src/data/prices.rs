//! elprisetjustnu.se price service client
//!
//! Fetches one day's price list for an area as raw bytes. Parsing is left to
//! the caller so that a malformed payload can be told apart from a failed
//! request.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;

use super::AreaCode;

/// Base URL for the price service
pub const DEFAULT_BASE_URL: &str = "https://www.elprisetjustnu.se";

/// Errors that can occur when fetching a price list
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be created
    #[error("could not create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request could not be sent or its body could not be read
    #[error("could not fetch daily prices from {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with something other than 200 OK
    #[error("calling {url} responded with status code {status}, expected status 200 OK")]
    Status { url: String, status: StatusCode },
}

/// Source of raw daily price lists
#[async_trait]
pub trait PriceFetcher: Send + Sync {
    /// Fetches the price list for `area` on `date`, unparsed
    async fn fetch(&self, area: AreaCode, date: NaiveDate) -> Result<Vec<u8>, FetchError>;
}

/// Client for fetching price lists from elprisetjustnu.se
#[derive(Debug, Clone)]
pub struct PricesClient {
    client: Client,
    base_url: String,
}

impl PricesClient {
    /// Creates a client for the given service root with a request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self::with_client(client, base_url))
    }

    /// Creates a client that reuses an existing HTTP client
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Address of the price list for `area` on `date`
    ///
    /// e.g. `https://www.elprisetjustnu.se/api/v1/prices/2024/01-05_SE3.json`
    pub fn url_for(&self, area: AreaCode, date: NaiveDate) -> String {
        format!(
            "{}/api/v1/prices/{}/{:02}-{:02}_{}.json",
            self.base_url,
            date.year(),
            date.month(),
            date.day(),
            area
        )
    }
}

#[async_trait]
impl PriceFetcher for PricesClient {
    async fn fetch(&self, area: AreaCode, date: NaiveDate) -> Result<Vec<u8>, FetchError> {
        let url = self.url_for(area, date);
        debug!(%url, "Fetching new price list");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status { url, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;
        debug!(bytes = body.len(), "Downloaded price list");

        Ok(body.to_vec())
    }
}
