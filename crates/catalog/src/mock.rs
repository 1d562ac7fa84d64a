//! Canned in-memory catalog for tests that must not touch the network.

use std::collections::HashMap;

use crate::client::ClientTrait;
use crate::error::CatalogError;
use crate::types::{PlantDetails, PlantId, SearchPage};

/// A [`ClientTrait`] implementation answering from fixed tables.
///
/// Anything not registered fails with [`CatalogError::FetchFailed`], the
/// same way an error status from the real API would.
#[derive(Debug, Clone, Default)]
pub struct MockClient {
    searches: HashMap<String, SearchPage>,
    details: HashMap<PlantId, PlantDetails>,
    pages: HashMap<u32, SearchPage>,
}

impl MockClient {
    pub fn with_search(mut self, query: impl Into<String>, page: SearchPage) -> Self {
        self.searches.insert(query.into(), page);
        self
    }

    pub fn with_details(mut self, details: PlantDetails) -> Self {
        self.details.insert(details.id, details);
        self
    }

    /// Register the same listing for every page number in `pages`
    pub fn with_pages(mut self, pages: impl IntoIterator<Item = u32>, listing: SearchPage) -> Self {
        for page in pages {
            self.pages.insert(page, listing.clone());
        }
        self
    }
}

fn not_registered(operation: &'static str) -> CatalogError {
    CatalogError::FetchFailed {
        operation,
        reason: "catalog returned status 404 Not Found".to_string(),
    }
}

impl ClientTrait for MockClient {
    async fn search(&self, query: &str) -> Result<SearchPage, CatalogError> {
        self.searches
            .get(query)
            .cloned()
            .ok_or_else(|| not_registered("plants"))
    }

    async fn details(&self, id: PlantId) -> Result<PlantDetails, CatalogError> {
        self.details
            .get(&id)
            .cloned()
            .ok_or_else(|| not_registered("plant details"))
    }

    async fn species_page(&self, page: u32) -> Result<SearchPage, CatalogError> {
        self.pages
            .get(&page)
            .cloned()
            .ok_or_else(|| not_registered("species page"))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::config::RANDOM_PAGE_RANGE;
    use crate::types::PlantSummary;

    #[tokio::test]
    async fn random_plant_draws_from_listing() {
        let listing = SearchPage {
            data: vec![PlantSummary::new(10, "Aloe"), PlantSummary::new(11, "Agave")],
            ..Default::default()
        };
        let client = MockClient::default().with_pages(RANDOM_PAGE_RANGE, listing);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..20 {
            let plant = client.random_plant(&mut rng).await.unwrap();
            assert!(plant.id == PlantId(10) || plant.id == PlantId(11));
        }
    }

    #[tokio::test]
    async fn random_plant_propagates_fetch_failure() {
        let client = MockClient::default();
        let mut rng = StdRng::seed_from_u64(42);

        let err = client.random_plant(&mut rng).await.unwrap_err();

        assert!(matches!(err, CatalogError::FetchFailed { .. }));
    }

    #[tokio::test]
    async fn unknown_search_fails() {
        let client = MockClient::default().with_search("rose", SearchPage::default());

        assert!(client.search("rose").await.unwrap().data.is_empty());
        assert!(client.search("tulip").await.is_err());
    }

    #[tokio::test]
    async fn details_are_keyed_by_id() {
        let details = PlantDetails {
            id: PlantId(5),
            common_name: "Boxwood".to_string(),
            scientific_name: vec!["Buxus".to_string()],
            plant_type: "Shrub".to_string(),
            edible_leaf: false,
            medicinal: false,
            indoor: false,
            soil: Vec::new(),
            watering: "Average".to_string(),
            sunlight: Vec::new(),
            pruning_month: Vec::new(),
        };
        let client = MockClient::default().with_details(details.clone());

        assert_eq!(client.details(PlantId(5)).await, Ok(details));
        assert!(client.details(PlantId(6)).await.is_err());
    }
}
