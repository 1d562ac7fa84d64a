//! Client for the Perenual plant catalog API.
//!
//! This crate provides:
//! - The records the API returns ([`PlantSummary`], [`PlantDetails`], [`SearchPage`])
//! - An HTTP client with keyword search, detail lookup and a random pick
//! - A single error type mapping every transport or status failure to
//!   [`CatalogError::FetchFailed`]
//!
//! ## Usage
//!
//! ```ignore
//! use plant_catalog::{CatalogClient, CatalogConfig, ClientTrait};
//!
//! let client = CatalogClient::new(CatalogConfig::new(api_key))?;
//! let page = client.search("rose").await?;
//! let details = client.details(page.data[0].id).await?;
//! ```

mod client;
mod config;
mod error;
mod types;

#[cfg(test)]
mod mock;

pub use client::{CatalogClient, ClientTrait};
pub use config::{CatalogConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, RANDOM_PAGE_RANGE};
pub use error::CatalogError;
pub use types::{ImageRecord, PlantDetails, PlantId, PlantSummary, SearchPage};
