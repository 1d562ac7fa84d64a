//! Records returned by the catalog API

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Catalog identifier of a plant species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlantId(pub u64);

impl fmt::Display for PlantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for PlantId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Lightweight plant record returned by search and page listings
///
/// Two summaries describe the same plant iff their ids are equal.
/// The API leaves most fields null for sparsely documented species, so
/// every field but `id` decodes to its empty value when null or absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantSummary {
    pub id: PlantId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub common_name: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub scientific_name: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub other_name: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cycle: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub watering: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub sunlight: Vec<String>,
    #[serde(default)]
    pub default_image: Option<ImageRecord>,
}

impl PlantSummary {
    /// Create a summary with only an id and a common name
    pub fn new(id: u64, common_name: impl Into<String>) -> Self {
        Self {
            id: PlantId(id),
            common_name: common_name.into(),
            scientific_name: Vec::new(),
            other_name: Vec::new(),
            cycle: String::new(),
            watering: String::new(),
            sunlight: Vec::new(),
            default_image: None,
        }
    }

    /// URL of the image shown on the plant's card, if any
    pub fn image_url(&self) -> Option<&str> {
        self.default_image.as_ref().and_then(ImageRecord::preferred_url)
    }
}

/// Image of a plant at several resolutions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    #[serde(default)]
    pub license: Option<u32>,
    #[serde(default)]
    pub license_name: Option<String>,
    #[serde(default)]
    pub license_url: Option<String>,
    #[serde(default)]
    pub original_url: Option<String>,
    #[serde(default)]
    pub regular_url: Option<String>,
    #[serde(default)]
    pub medium_url: Option<String>,
    #[serde(default)]
    pub small_url: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl ImageRecord {
    /// Medium resolution if present, else regular
    pub fn preferred_url(&self) -> Option<&str> {
        [&self.medium_url, &self.regular_url]
            .into_iter()
            .filter_map(|url| url.as_deref())
            .find(|url| !url.is_empty())
    }
}

/// One page of a search or species listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<PlantSummary>,
    #[serde(default)]
    pub to: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub from: Option<u32>,
    #[serde(default)]
    pub last_page: Option<u32>,
    #[serde(default)]
    pub total: Option<u32>,
}

/// Extended record fetched on demand for a card's detail face
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantDetails {
    pub id: PlantId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub common_name: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub scientific_name: Vec<String>,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub plant_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub edible_leaf: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub medicinal: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub indoor: bool,
    #[serde(default, deserialize_with = "one_or_many")]
    pub soil: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub watering: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub sunlight: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub pruning_month: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Sequence fields are sometimes sent as a bare string
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
    })
}
