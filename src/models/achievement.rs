//! Achievement models from the gameplay endpoint.
//!
//! Achievements are fetched fresh for every detail view and never persisted,
//! so they always reflect server truth before an edit session begins.

use serde::{Deserialize, Serialize};

/// A single achievement as returned by the gameplay endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub achievement_id: String,
    pub achievement_key: String,
    pub visible: bool,
    pub name: String,
    pub description: String,
    pub image_url_unlocked: String,
    pub image_url_locked: String,
    pub rarity: f64,
    /// Absent while the achievement is locked
    pub date_unlocked: Option<String>,
    pub rarity_level_description: String,
    pub rarity_level_slug: String,
}

/// Envelope around the achievement listing.
#[derive(Debug, Clone, Deserialize)]
pub struct AchievementsResponse {
    pub items: Vec<Achievement>,
}

/// Owned product ids from the embed endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct OwnedGamesResponse {
    pub owned: Vec<u64>,
}
