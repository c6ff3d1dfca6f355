//! REST Countries v3.1 source.
//!
//! Endpoints used:
//! - `GET /v3.1/all?fields=...` for the list view
//! - `GET /v3.1/name/{name}?fullText=true` for an exact name match
//! - `GET /v3.1/alpha/{code}` for border lookups
//!
//! Every lookup endpoint answers with a JSON array; we take its single element.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Url;

use crate::countries::{CountrySource, RawCountryRecord, SourceError};

pub const DEFAULT_BASE_URL: &str = "https://restcountries.com";

/// Fields requested for the list. The API caps `fields` at ten, which is
/// exactly what the detail view needs to skip its own primary fetch.
const LIST_FIELDS: &str =
    "name,population,region,subregion,capital,flags,tld,languages,currencies,borders";

pub struct RestCountriesSource {
    base_url: String,
    client: reqwest::Client,
}

impl RestCountriesSource {
    pub fn new(base_url: Option<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout, using defaults: {}", e);
                reqwest::Client::new()
            });

        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client,
        }
    }

    /// Joins path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, SourceError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| SourceError::Config(format!("invalid base URL '{}': {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| SourceError::Config(format!("base URL '{}' cannot hold a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_records(&self, url: Url) -> Result<Vec<RawCountryRecord>, SourceError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            debug!("REST Countries error: {} - {}", status, message);
            return Err(SourceError::Api { status, message });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| SourceError::Parse(e.to_string()))
    }

    async fn get_single(&self, url: Url) -> Result<RawCountryRecord, SourceError> {
        self.get_records(url)
            .await?
            .into_iter()
            .next()
            .ok_or(SourceError::Empty)
    }
}

#[async_trait]
impl CountrySource for RestCountriesSource {
    fn name(&self) -> &str {
        "restcountries"
    }

    async fn all_countries(&self) -> Result<Vec<RawCountryRecord>, SourceError> {
        let mut url = self.endpoint(&["v3.1", "all"])?;
        url.query_pairs_mut().append_pair("fields", LIST_FIELDS);

        let records = self.get_records(url).await?;
        info!("Fetched {} countries", records.len());
        Ok(records)
    }

    async fn by_name(&self, name: &str) -> Result<RawCountryRecord, SourceError> {
        let mut url = self.endpoint(&["v3.1", "name", name])?;
        url.query_pairs_mut().append_pair("fullText", "true");
        self.get_single(url).await
    }

    async fn by_code(&self, code: &str) -> Result<RawCountryRecord, SourceError> {
        let url = self.endpoint(&["v3.1", "alpha", code])?;
        self.get_single(url).await
    }
}
