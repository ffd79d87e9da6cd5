// SPDX-License-Identifier: MIT

//! Token manager: refresh-token resolution and access-token exchange.
//!
//! Handles:
//! - Reading the long-lived refresh token from the local Galaxy install
//! - Exchanging it for short-lived access tokens (refresh-token grant)
//! - Serving cached tokens until expiry (memory fast path, file store truth)

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::AuthResponse;
use crate::store::CredentialStore;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;

/// Default Galaxy client registration, used for the session login and the
/// owned-games listing. Per-product calls use the product's own credentials.
pub const GALAXY_CLIENT_ID: &str = "46899977096215655";
pub const GALAXY_CLIENT_SECRET: &str =
    "9d85c43b1482497dbbce61f6e4aa173a433796eeae2ca8c5f6129f2dc4de46d9";

/// Read the Galaxy refresh token.
///
/// `GOG_REFRESH_TOKEN` (via [`Config`]) takes precedence; otherwise the
/// value is read from the registry key the Galaxy client writes. Off
/// Windows the override is the only source.
pub fn resolve_refresh_token(config: &Config) -> Result<String> {
    if let Some(token) = &config.refresh_token {
        return Ok(token.clone());
    }
    registry_refresh_token()
}

#[cfg(windows)]
fn registry_refresh_token() -> Result<String> {
    use winreg::enums::HKEY_CURRENT_USER;
    use winreg::RegKey;

    let key = RegKey::predef(HKEY_CURRENT_USER)
        .open_subkey("Software\\GOG.com\\Galaxy")
        .map_err(|e| {
            AppError::PlatformCredentialUnavailable(format!("Galaxy registry key not found: {e}"))
        })?;

    let token: String = key.get_value("refreshToken").map_err(|e| {
        AppError::PlatformCredentialUnavailable(format!("refreshToken value not found: {e}"))
    })?;

    tracing::debug!("refresh token read from registry");
    Ok(token)
}

#[cfg(not(windows))]
fn registry_refresh_token() -> Result<String> {
    Err(AppError::PlatformCredentialUnavailable(
        "no local Galaxy client on this platform; set GOG_REFRESH_TOKEN".to_string(),
    ))
}

/// Obtains and caches access tokens, keyed by client id.
#[derive(Clone)]
pub struct TokenManager {
    http: reqwest::Client,
    auth_url: String,
    store: CredentialStore,
    /// In-memory fast path in front of the file store.
    cache: Arc<DashMap<String, AuthResponse>>,
}

impl TokenManager {
    pub fn new(http: reqwest::Client, auth_url: impl Into<String>, store: CredentialStore) -> Self {
        Self {
            http,
            auth_url: auth_url.into(),
            store,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Get a usable access token for `client_id`, exchanging the refresh
    /// token if no cached token survives the strict expiry check.
    ///
    /// Successful exchanges write through to the credential store; cache
    /// hits never touch it. No clock-skew margin is applied, so a token
    /// expiring in the next instant may still be served; the caller sees
    /// the resulting 401 as an [`AppError::Upstream`] and decides.
    pub async fn access_token(
        &self,
        refresh_token: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<AuthResponse> {
        let now = Utc::now();

        if let Some(cached) = self.cache.get(client_id) {
            if cached.is_usable(now) {
                return Ok(cached.clone());
            }
        }

        if let Some(stored) = self.store.token(client_id, now).await {
            self.cache.insert(client_id.to_string(), stored.clone());
            return Ok(stored);
        }

        tracing::info!(client_id, "fetching new access token");
        let response = self
            .http
            .get(format!("{}/token", self.auth_url))
            .query(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("without_new_session", "1"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::AuthenticationFailed {
                status: response.status().as_u16(),
            });
        }

        let auth: AuthResponse = response
            .json()
            .await
            .map_err(|e| AppError::Malformed(format!("token exchange response: {e}")))?;

        let auth = self.store.save_token(client_id, auth, now).await?;
        self.cache.insert(client_id.to_string(), auth.clone());
        Ok(auth)
    }
}
