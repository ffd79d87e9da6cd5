// SPDX-License-Identifier: MIT

//! Shared fixtures for the integration tests.

use galaxy_achievements::config::Config;
use galaxy_achievements::models::AuthResponse;
use serde_json::json;
use std::path::Path;

/// Config with every endpoint pointed at the mock server and a short
/// debounce delay.
#[allow(dead_code)]
pub fn test_config(base_url: &str, cache_dir: &Path) -> Config {
    Config::test_default(base_url, cache_dir)
}

/// Token-exchange response body.
#[allow(dead_code)]
pub fn auth_json(access_token: &str) -> serde_json::Value {
    json!({
        "access_token": access_token,
        "refresh_token": "rotated_refresh",
        "expires_in": 3600,
        "user_id": "777",
    })
}

/// Auth record for seeding the credential store directly.
#[allow(dead_code)]
pub fn auth_record(access_token: &str) -> AuthResponse {
    AuthResponse {
        access_token: access_token.to_string(),
        refresh_token: "rotated_refresh".to_string(),
        expires_in: 3600,
        user_id: "777".to_string(),
        login_time: None,
        expire_time: None,
    }
}

/// Build-detail document carrying the product credentials.
#[allow(dead_code)]
pub fn build_detail_json(client_id: &str, client_secret: &str) -> serde_json::Value {
    json!({
        "clientId": client_id,
        "clientSecret": client_secret,
        "title": "ignored",
    })
}

/// Catalog game-detail document.
#[allow(dead_code)]
pub fn game_detail_json(id: u64, title: &str, image_logo: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "type": "game",
        "builds": [{"id": 1}],
        "image_background": "bg",
        "image_boxart": "box",
        "image_galaxy_background": "gbg",
        "image_icon": "icon",
        "image_icon_square": null,
        "image_logo": image_logo,
        "includes_games": [],
    })
}

/// One achievement in the gameplay listing.
#[allow(dead_code)]
pub fn achievement_json(id: &str, name: &str, date_unlocked: Option<&str>) -> serde_json::Value {
    json!({
        "achievement_id": id,
        "achievement_key": format!("key_{id}"),
        "visible": true,
        "name": name,
        "description": "do the thing",
        "image_url_unlocked": format!("{id}_unlocked"),
        "image_url_locked": format!("{id}_locked"),
        "rarity": 12.5,
        "date_unlocked": date_unlocked,
        "rarity_level_description": "Rare",
        "rarity_level_slug": "rare",
    })
}
