// SPDX-License-Identifier: MIT

//! Credential store: cached access tokens and per-product credentials.

use crate::error::AppError;
use crate::models::{AuthResponse, ProductCredential};
use crate::store::documents::{load_map, store_map};
use crate::store::files;
use crate::time_utils;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::PathBuf;

/// Durable key-value store for auth records (`auths.json`, keyed by client
/// id) and product credentials (`products.json`, keyed by product id).
#[derive(Clone)]
pub struct CredentialStore {
    dir: PathBuf,
}

impl CredentialStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn auths_path(&self) -> PathBuf {
        self.dir.join(files::AUTHS)
    }

    fn products_path(&self) -> PathBuf {
        self.dir.join(files::PRODUCTS)
    }

    // ─── Access Tokens ───────────────────────────────────────────

    /// Get the stored auth record for a client id, if it is still usable at
    /// `now`. Expired records are reported absent, not deleted; the next
    /// save replaces them.
    pub async fn token(&self, client_id: &str, now: DateTime<Utc>) -> Option<AuthResponse> {
        let mut map: HashMap<String, AuthResponse> = load_map(&self.auths_path()).await;
        let auth = map.remove(client_id)?;

        if auth.is_usable(now) {
            tracing::debug!(client_id, expire_time = ?auth.expire_time, "using cached access token");
            Some(auth)
        } else {
            tracing::debug!(client_id, "cached access token has expired");
            None
        }
    }

    /// Store an auth record, stamping `login_time`/`expire_time` from `now`
    /// and the token lifetime. Returns the stamped record.
    pub async fn save_token(
        &self,
        client_id: &str,
        mut auth: AuthResponse,
        now: DateTime<Utc>,
    ) -> Result<AuthResponse, AppError> {
        auth.login_time = Some(time_utils::format_utc(now));
        auth.expire_time = Some(time_utils::format_utc(time_utils::expire_time(
            now,
            auth.expires_in,
        )));

        let path = self.auths_path();
        let mut map: HashMap<String, AuthResponse> = load_map(&path).await;
        map.insert(client_id.to_string(), auth.clone());
        store_map(&path, &map).await?;

        tracing::debug!(client_id, "updated cached auth");
        Ok(auth)
    }

    // ─── Product Credentials ─────────────────────────────────────

    pub async fn product_credential(&self, product_id: u64) -> Option<ProductCredential> {
        let mut map: HashMap<u64, ProductCredential> = load_map(&self.products_path()).await;
        map.remove(&product_id)
    }

    pub async fn save_product_credential(
        &self,
        product_id: u64,
        credential: &ProductCredential,
    ) -> Result<(), AppError> {
        let path = self.products_path();
        let mut map: HashMap<u64, ProductCredential> = load_map(&path).await;
        map.insert(product_id, credential.clone());
        store_map(&path, &map).await?;

        tracing::debug!(product_id, "updated cached product credentials");
        Ok(())
    }
}
