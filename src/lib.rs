//! Plant Favorites
//!
//! A desktop viewer for the Perenual plant catalog. Search results and saved
//! plants are shown as cards that flip between a summary and a detail face;
//! the heart on each card adds or removes the plant from a favorites list
//! that survives restarts.
//!
//! ```no_run
//! use plant_catalog::CatalogClient;
//! use plant_favorites::{App, AppConfig};
//! use plant_store::{FavoritesStore, MemoryStorage};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let client = CatalogClient::new(config.catalog())?;
//! let (app, _task) = App::new(client, FavoritesStore::new(MemoryStorage::default()));
//! assert_eq!(app.active_tab(), plant_favorites::Tab::Search);
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod card;
pub mod config;
pub mod favorites;
pub mod logging;
pub mod search;
mod token;

pub use app::{App, Message, Tab};
pub use config::{AppConfig, ConfigError};
pub use token::Token;
