//! HTTP client for the plant catalog API.

use std::fmt::Debug;
use std::time::Duration;

use bytes::Bytes;
use rand::Rng;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::config::{CatalogConfig, RANDOM_PAGE_RANGE};
use crate::error::CatalogError;
use crate::types::{PlantDetails, PlantId, PlantSummary, SearchPage};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// A client for the plant catalog service.
///
/// Every call is a single request: no retry, no backoff and no caching.
/// Cloning is cheap and clones share one connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    config: CatalogConfig,
}

impl Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Create a new catalog client from configuration.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        debug!(
            base_url = %config.base_url,
            timeout_secs = config.timeout.as_secs(),
            "building catalog HTTP client"
        );

        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| CatalogError::Client(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Get the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path)
    }

    /// Send an authenticated GET and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: String,
        query: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        let response = self
            .http
            .get(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .query(query)
            .send()
            .await
            // the request URL carries the API key
            .map_err(|e| CatalogError::fetch_failed(operation, e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, operation, "catalog returned an error status");
            return Err(CatalogError::fetch_failed(
                operation,
                format!("catalog returned status {status}"),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::fetch_failed(operation, e.without_url()))
    }

    /// Download a plant image.
    ///
    /// Image URLs are absolute and served by a CDN, so the API key is not
    /// attached.
    #[instrument(skip(self))]
    pub async fn image(&self, url: &str) -> Result<Bytes, CatalogError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| CatalogError::fetch_failed("image", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::fetch_failed(
                "image",
                format!("image host returned status {status}"),
            ));
        }

        response
            .bytes()
            .await
            .map_err(|e| CatalogError::fetch_failed("image", e))
    }
}

// ---------------------------------------------------------------------------
// Catalog trait
// ---------------------------------------------------------------------------

/// The catalog API interface.
///
/// Implemented over HTTP by [`CatalogClient`]; tests substitute a client
/// with canned responses.
#[allow(async_fn_in_trait)]
pub trait ClientTrait {
    /// Search plants by keyword. Only the first page is returned.
    async fn search(&self, query: &str) -> Result<SearchPage, CatalogError>;

    /// Fetch the extended record of one plant.
    async fn details(&self, id: PlantId) -> Result<PlantDetails, CatalogError>;

    /// List one page of the species catalog.
    async fn species_page(&self, page: u32) -> Result<SearchPage, CatalogError>;

    /// Pick a plant from a random page of the catalog.
    ///
    /// Fails with [`CatalogError::EmptyResult`] if the chosen page is empty.
    async fn random_plant<R>(&self, rng: &mut R) -> Result<PlantSummary, CatalogError>
    where
        R: Rng + Send,
    {
        let page = rng.gen_range(RANDOM_PAGE_RANGE);
        let mut listing = self.species_page(page).await?;

        if listing.data.is_empty() {
            return Err(CatalogError::EmptyResult { page });
        }

        let index = rng.gen_range(0..listing.data.len());
        Ok(listing.data.swap_remove(index))
    }
}

impl ClientTrait for CatalogClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<SearchPage, CatalogError> {
        debug!("sending search request");
        let page: SearchPage = self
            .get_json("plants", self.endpoint("species-list"), &[("q", query)])
            .await?;
        debug!(results = page.data.len(), total = ?page.total, "received search results");
        Ok(page)
    }

    #[instrument(skip(self))]
    async fn details(&self, id: PlantId) -> Result<PlantDetails, CatalogError> {
        debug!("sending details request");
        self.get_json(
            "plant details",
            self.endpoint(&format!("v2/species/details/{id}")),
            &[],
        )
        .await
    }

    #[instrument(skip(self))]
    async fn species_page(&self, page: u32) -> Result<SearchPage, CatalogError> {
        debug!("sending species page request");
        let page = page.to_string();
        self.get_json(
            "species page",
            self.endpoint("species-list"),
            &[("page", page.as_str())],
        )
        .await
    }
}
