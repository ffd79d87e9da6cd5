// SPDX-License-Identifier: MIT

//! Achievement gateway: listing, unlock/lock mutations and the owned-games
//! listing.

use crate::error::{AppError, Result};
use crate::models::{Achievement, AchievementsResponse, OwnedGamesResponse};
use crate::services::upstream_error;
use crate::services::{ProductResolver, TokenManager};
use crate::time_utils;
use chrono::{DateTime, Utc};

/// Client for the gameplay and embed endpoints.
#[derive(Clone)]
pub struct AchievementGateway {
    http: reqwest::Client,
    gameplay_url: String,
    embed_url: String,
    locale: String,
    resolver: ProductResolver,
    tokens: TokenManager,
}

impl AchievementGateway {
    pub fn new(
        http: reqwest::Client,
        gameplay_url: impl Into<String>,
        embed_url: impl Into<String>,
        locale: impl Into<String>,
        resolver: ProductResolver,
        tokens: TokenManager,
    ) -> Self {
        Self {
            http,
            gameplay_url: gameplay_url.into(),
            embed_url: embed_url.into(),
            locale: locale.into(),
            resolver,
            tokens,
        }
    }

    /// Fetch the achievement list for a (product, user) pair.
    ///
    /// Listing works with an already-established session token; only
    /// mutations need a token scoped to the product's own credentials.
    pub async fn list_achievements(
        &self,
        product_id: u64,
        user_id: &str,
        access_token: &str,
    ) -> Result<Vec<Achievement>> {
        let credential = self.resolver.resolve_credentials(product_id).await?;

        let url = format!(
            "{}/clients/{}/users/{}/achievements",
            self.gameplay_url, credential.client_id, user_id
        );
        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .header("X-Gog-Lc", &self.locale)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(upstream_error(response).await);
        }

        let parsed: AchievementsResponse = response
            .json()
            .await
            .map_err(|e| AppError::Malformed(format!("achievement list: {e}")))?;

        tracing::info!(product_id, count = parsed.items.len(), "retrieved achievements");
        Ok(parsed.items)
    }

    /// Set an achievement's unlock state.
    ///
    /// `unlocked_at = None` re-locks the achievement (`date_unlocked: null`);
    /// a timestamp unlocks it, serialized with a numeric offset. The call
    /// needs an access token scoped to the product's client credentials,
    /// obtained through the token manager (cache-first).
    pub async fn set_achievement_unlocked(
        &self,
        product_id: u64,
        user_id: &str,
        achievement_id: &str,
        refresh_token: &str,
        unlocked_at: Option<DateTime<Utc>>,
    ) -> Result<()> {
        let credential = self.resolver.resolve_credentials(product_id).await?;
        let auth = self
            .tokens
            .access_token(refresh_token, &credential.client_id, &credential.client_secret)
            .await?;

        let body = serde_json::json!({
            "date_unlocked": unlocked_at.map(time_utils::format_unlock_timestamp),
        });

        let url = format!(
            "{}/clients/{}/users/{}/achievements/{}",
            self.gameplay_url, credential.client_id, user_id, achievement_id
        );
        let response = self
            .http
            .post(&url)
            .bearer_auth(&auth.access_token)
            .json(&body)
            .send()
            .await?;

        match response.status().as_u16() {
            200 | 201 | 204 => {
                tracing::info!(product_id, achievement_id, unlocked = unlocked_at.is_some(), "achievement state updated");
                Ok(())
            }
            _ => Err(upstream_error(response).await),
        }
    }

    /// List the product ids the user owns.
    pub async fn list_owned_game_ids(&self, access_token: &str) -> Result<Vec<u64>> {
        let url = format!("{}/user/data/games", self.embed_url);
        let response = self.http.get(&url).bearer_auth(access_token).send().await?;

        if !response.status().is_success() {
            return Err(upstream_error(response).await);
        }

        let parsed: OwnedGamesResponse = response
            .json()
            .await
            .map_err(|e| AppError::Malformed(format!("owned games list: {e}")))?;

        tracing::info!(count = parsed.owned.len(), "retrieved owned game ids");
        Ok(parsed.owned)
    }
}
