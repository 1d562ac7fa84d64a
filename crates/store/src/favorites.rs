//! The persisted favorites list

use crate::storage::{Storage, StorageError};
use plant_catalog::{PlantId, PlantSummary};
use thiserror::Error;
use tracing::{debug, warn};

/// Slot holding the JSON array of favorited plant summaries
pub const FAVORITES_KEY: &str = "plant-favorites";

/// Failure of a favorites operation
#[derive(Debug, Error)]
pub enum StoreError {
    /// The slot holds something other than a list of plant summaries
    #[error("stored favorites are not a list of plants: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to encode favorites: {0}")]
    Encode(#[source] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The user's favorited plants, kept in a single storage slot
///
/// Every mutation reads the whole list, changes it and writes the whole
/// list back, so the list never holds two entries with the same id.
/// Entries keep the order in which they were added.
pub struct FavoritesStore {
    storage: Box<dyn Storage + Send>,
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore").finish_non_exhaustive()
    }
}

impl FavoritesStore {
    pub fn new(storage: impl Storage + Send + 'static) -> Self {
        Self {
            storage: Box::new(storage),
        }
    }

    /// All favorites in insertion order
    ///
    /// An absent or undecodable slot reads as an empty list.
    pub fn get_all(&self) -> Vec<PlantSummary> {
        self.try_get_all().unwrap_or_else(|err| {
            warn!(%err, "treating unreadable favorites as empty");
            Vec::new()
        })
    }

    /// All favorites, reporting an undecodable slot instead of hiding it
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Decode`] if the slot is not a list of plants.
    pub fn try_get_all(&self) -> Result<Vec<PlantSummary>, StoreError> {
        match self.storage.get(FAVORITES_KEY) {
            None => Ok(Vec::new()),
            Some(json) => serde_json::from_str(&json).map_err(StoreError::Decode),
        }
    }

    /// Add a plant unless one with the same id is already present
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be encoded or the storage write
    /// fails. The stored list is unchanged in that case.
    pub fn add(&mut self, plant: &PlantSummary) -> Result<(), StoreError> {
        self.modify(|favorites| {
            if favorites.iter().any(|favorite| favorite.id == plant.id) {
                return false;
            }
            favorites.push(plant.clone());
            true
        })
    }

    /// Remove every entry with `id`; absent ids leave the list untouched
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be encoded or the storage write
    /// fails. The stored list is unchanged in that case.
    pub fn remove(&mut self, id: PlantId) -> Result<(), StoreError> {
        self.modify(|favorites| {
            let before = favorites.len();
            favorites.retain(|favorite| favorite.id != id);
            favorites.len() != before
        })
    }

    pub fn contains(&self, id: PlantId) -> bool {
        self.get_all().iter().any(|favorite| favorite.id == id)
    }

    pub fn len(&self) -> usize {
        self.get_all().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every favorite by clearing the slot
    ///
    /// # Errors
    ///
    /// Returns an error if the storage write fails.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.storage.remove(FAVORITES_KEY)?;
        Ok(())
    }

    /// Load the list, apply `modifier` and write the list back if the
    /// modifier reports a change.
    fn modify<F>(&mut self, modifier: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Vec<PlantSummary>) -> bool,
    {
        let mut favorites = self.get_all();
        if !modifier(&mut favorites) {
            return Ok(());
        }

        let json = serde_json::to_string(&favorites).map_err(StoreError::Encode)?;
        self.storage.set(FAVORITES_KEY, json)?;
        debug!(count = favorites.len(), "saved favorites");
        Ok(())
    }
}
