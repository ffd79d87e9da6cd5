// SPDX-License-Identifier: MIT

//! Orchestration layer: the operations the presentation shell consumes.
//!
//! List operations propagate their errors; per-item batch operations
//! degrade to absent so a single bad product only disappears from the grid.

use crate::config::Config;
use crate::error::Result;
use crate::models::AuthResponse;
use crate::services::{
    token, AchievementGateway, CatalogCache, ProductResolver, TokenManager, GALAXY_CLIENT_ID,
    GALAXY_CLIENT_SECRET,
};
use crate::store::{CatalogStore, CredentialStore};
use chrono::{DateTime, Utc};
use futures_util::{stream, StreamExt};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;

/// Bound on concurrent detail fetches during a grid load.
const MAX_CONCURRENT_FETCHES: usize = 6;

/// An authenticated session: the refresh token plus the auth response from
/// the default Galaxy client. Passed explicitly into the handlers that need
/// it, so the auth dependency is visible in the signatures.
#[derive(Debug, Clone)]
pub struct Session {
    pub refresh_token: String,
    pub auth: AuthResponse,
}

impl Session {
    pub fn user_id(&self) -> &str {
        &self.auth.user_id
    }

    pub fn access_token(&self) -> &str {
        &self.auth.access_token
    }
}

/// Card-grid view of a game.
#[derive(Debug, Clone, Serialize)]
pub struct GameSummary {
    pub id: u64,
    pub title: String,
    pub image_url: Option<String>,
}

/// Detail view of an achievement, image paths rewritten absolute.
#[derive(Debug, Clone, Serialize)]
pub struct AchievementView {
    pub achievement_id: String,
    pub name: String,
    pub description: String,
    pub image_url_unlocked: String,
    pub image_url_locked: String,
    pub date_unlocked: Option<String>,
}

/// Shared application services.
pub struct App {
    config: Config,
    tokens: TokenManager,
    gateway: AchievementGateway,
    catalog: CatalogCache,
}

impl App {
    pub fn new(config: Config) -> Self {
        let http = reqwest::Client::new();
        let credentials = CredentialStore::new(&config.cache_dir);

        let tokens = TokenManager::new(http.clone(), config.auth_url.clone(), credentials.clone());
        let resolver = ProductResolver::new(http.clone(), config.catalog_url.clone(), credentials);
        let gateway = AchievementGateway::new(
            http.clone(),
            config.gameplay_url.clone(),
            config.embed_url.clone(),
            config.locale.clone(),
            resolver,
            tokens.clone(),
        );
        let catalog = CatalogCache::new(
            http,
            config.catalog_url.clone(),
            CatalogStore::new(&config.cache_dir),
            Duration::from_millis(config.flush_delay_ms),
        );

        Self {
            config,
            tokens,
            gateway,
            catalog,
        }
    }

    /// Resolve the platform refresh token and exchange it with the default
    /// Galaxy client. Failure here is fatal to the whole session.
    pub async fn login(&self) -> Result<Session> {
        let refresh_token = token::resolve_refresh_token(&self.config)?;
        let auth = self
            .tokens
            .access_token(&refresh_token, GALAXY_CLIENT_ID, GALAXY_CLIENT_SECRET)
            .await?;
        Ok(Session {
            refresh_token,
            auth,
        })
    }

    /// List the product ids the user owns. Errors are surfaced; the shell
    /// renders them as a top-level error state.
    pub async fn owned_games(&self, session: &Session) -> Result<Vec<u64>> {
        self.gateway
            .list_owned_game_ids(session.access_token())
            .await
    }

    /// Fetch the card view for one game. Absent when the product has no
    /// catalog entry, no builds, or its fetch failed; failures are logged
    /// and the game is dropped from the batch.
    pub async fn game_summary(&self, product_id: u64) -> Option<GameSummary> {
        let detail = match self.catalog.game_detail(product_id).await {
            Ok(Some(detail)) => detail,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(product_id, error = %e, "dropping game from batch");
                return None;
            }
        };

        if detail.builds.is_empty() {
            return None;
        }

        let image_url = detail.image_logo.as_deref().map(|logo| {
            format!(
                "{}/{}_product_tile_extended_432x243.webp",
                self.config.images_url, logo
            )
        });

        Some(GameSummary {
            id: detail.id,
            title: detail.title,
            image_url,
        })
    }

    /// Fetch card views for a batch of games with bounded fan-out.
    ///
    /// Completion order is arbitrary; results are reconciled by product id
    /// and returned in input order, with unresolvable games dropped.
    pub async fn game_summaries(&self, product_ids: &[u64]) -> Vec<GameSummary> {
        let fetched: Vec<(u64, Option<GameSummary>)> = stream::iter(product_ids.iter().copied())
            .map(|id| async move { (id, self.game_summary(id).await) })
            .buffer_unordered(MAX_CONCURRENT_FETCHES)
            .collect()
            .await;

        let mut by_id: HashMap<u64, GameSummary> = fetched
            .into_iter()
            .filter_map(|(id, summary)| summary.map(|s| (id, s)))
            .collect();

        product_ids
            .iter()
            .filter_map(|id| by_id.remove(id))
            .collect()
    }

    /// Fetch the achievement list for a game, freshly from the server.
    pub async fn game_achievements(
        &self,
        session: &Session,
        product_id: u64,
    ) -> Result<Vec<AchievementView>> {
        let items = self
            .gateway
            .list_achievements(product_id, session.user_id(), session.access_token())
            .await?;

        let images = &self.config.images_url;
        Ok(items
            .into_iter()
            .map(|a| AchievementView {
                achievement_id: a.achievement_id,
                name: a.name,
                description: a.description,
                image_url_unlocked: format!("{}/{}", images, a.image_url_unlocked),
                image_url_locked: format!("{}/{}", images, a.image_url_locked),
                date_unlocked: a.date_unlocked,
            })
            .collect())
    }

    /// Unlock (`unlocked_at` present) or re-lock (`None`) an achievement.
    pub async fn set_achievement(
        &self,
        session: &Session,
        product_id: u64,
        achievement_id: &str,
        unlocked_at: Option<DateTime<Utc>>,
    ) -> Result<()> {
        self.gateway
            .set_achievement_unlocked(
                product_id,
                session.user_id(),
                achievement_id,
                &session.refresh_token,
                unlocked_at,
            )
            .await
    }

    /// Persist pending catalog writes now instead of waiting for the timer.
    /// Used on shutdown.
    pub async fn flush_catalog(&self) {
        self.catalog.flush().await;
    }
}
