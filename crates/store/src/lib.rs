//! Local persistence for the plant catalog viewer
//!
//! Storage is a set of named text slots behind the [`Storage`] port.
//! [`FileStorage`] keeps the slots of one group in a JSON file in the
//! platform config directory; [`MemoryStorage`] keeps them in memory.
//!
//! [`FavoritesStore`] keeps the user's favorite plants as a JSON array in
//! the [`FAVORITES_KEY`] slot.
//!
//! # Example
//!
//! ```no_run
//! use plant_catalog::{PlantId, PlantSummary};
//! use plant_store::{AppName, FavoritesStore, FileStorage};
//!
//! let app_name = AppName::new("com", "example", "plants");
//! let mut favorites = FavoritesStore::new(FileStorage::open(&app_name, "favorites"));
//!
//! favorites.add(&PlantSummary::new(1, "Rose"))?;
//! assert!(favorites.contains(PlantId(1)));
//! # Ok::<(), plant_store::StoreError>(())
//! ```

mod app_name;
mod favorites;
mod storage;

pub use app_name::AppName;
pub use favorites::{FAVORITES_KEY, FavoritesStore, StoreError};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError, get_group_path};
