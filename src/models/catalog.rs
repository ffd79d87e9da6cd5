//! Game metadata documents cached by the catalog cache.

use serde::{Deserialize, Serialize};

/// Game metadata from the catalog, persisted in `catalog.json` keyed by
/// product id. Unknown fields from the source document are dropped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameDetail {
    pub id: u64,
    pub title: String,
    #[serde(rename = "type")]
    pub product_type: String,
    #[serde(default)]
    pub builds: Vec<BuildRef>,
    #[serde(default)]
    pub image_background: Option<String>,
    #[serde(default)]
    pub image_boxart: Option<String>,
    #[serde(default)]
    pub image_galaxy_background: Option<String>,
    #[serde(default)]
    pub image_icon: Option<String>,
    // Null or non-string for some older products; kept verbatim.
    #[serde(default)]
    pub image_icon_square: Option<serde_json::Value>,
    #[serde(default)]
    pub image_logo: Option<String>,
    #[serde(default)]
    pub includes_games: Vec<u64>,
}

/// Build reference inside a game detail document (id only).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BuildRef {
    pub id: serde_json::Number,
}
