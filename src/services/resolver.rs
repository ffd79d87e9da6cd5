// SPDX-License-Identifier: MIT

//! Product resolver: picks the current build of a product and extracts the
//! client id/secret needed for its achievement endpoints.

use crate::error::{AppError, Result};
use crate::models::{Build, ProductCredential, ProductDocument};
use crate::services::upstream_error;
use crate::store::CredentialStore;
use dashmap::DashMap;
use std::sync::Arc;

/// Select the latest build: listed, with a publish date, maximum by
/// `date_published` (lexicographic ISO-8601 comparison; all dates share the
/// format). The sort is stable, so ties resolve to input order.
pub fn select_latest_build(builds: &[Build]) -> Option<&Build> {
    let mut valid: Vec<&Build> = builds
        .iter()
        .filter(|b| b.listed && b.date_published.is_some())
        .collect();
    valid.sort_by(|a, b| b.date_published.cmp(&a.date_published));
    valid.first().copied()
}

/// Resolves per-product credentials, consulting and populating the
/// credential store. Results are permanently cacheable.
#[derive(Clone)]
pub struct ProductResolver {
    http: reqwest::Client,
    catalog_url: String,
    store: CredentialStore,
    cache: Arc<DashMap<u64, ProductCredential>>,
}

impl ProductResolver {
    pub fn new(
        http: reqwest::Client,
        catalog_url: impl Into<String>,
        store: CredentialStore,
    ) -> Self {
        Self {
            http,
            catalog_url: catalog_url.into(),
            store,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Resolve the client id/secret for a product, cache-first.
    pub async fn resolve_credentials(&self, product_id: u64) -> Result<ProductCredential> {
        if let Some(credential) = self.cache.get(&product_id) {
            return Ok(credential.clone());
        }

        if let Some(credential) = self.store.product_credential(product_id).await {
            tracing::debug!(product_id, "using stored product credentials");
            self.cache.insert(product_id, credential.clone());
            return Ok(credential);
        }

        let url = format!("{}/products/{}/product.json", self.catalog_url, product_id);
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(upstream_error(response).await);
        }

        let product: ProductDocument = response
            .json()
            .await
            .map_err(|e| AppError::Malformed(format!("product document: {e}")))?;

        let latest = select_latest_build(&product.builds)
            .ok_or(AppError::ProductNotFound(product_id))?;
        tracing::debug!(
            product_id,
            build_id = %latest.id,
            date_published = ?latest.date_published,
            "selected latest build"
        );

        // The build id goes into the URL in its exact decimal form; ids can
        // exceed 2^53 and must not round-trip through a float.
        let url = format!(
            "{}/products/{}/builds/{}.json",
            self.catalog_url, product_id, latest.id
        );
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(upstream_error(response).await);
        }

        let credential: ProductCredential = response
            .json()
            .await
            .map_err(|e| AppError::Malformed(format!("build detail document: {e}")))?;

        self.store
            .save_product_credential(product_id, &credential)
            .await?;
        self.cache.insert(product_id, credential.clone());

        tracing::info!(product_id, "resolved product credentials");
        Ok(credential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(id: u64, date: Option<&str>, listed: bool) -> Build {
        Build {
            id: serde_json::Number::from(id),
            date_published: date.map(str::to_string),
            listed,
        }
    }

    #[test]
    fn picks_latest_listed_build() {
        let builds = vec![
            build(1, Some("2023-01-01"), true),
            build(2, Some("2023-06-01"), false),
            build(3, Some("2023-06-01"), true),
        ];
        let latest = select_latest_build(&builds).unwrap();
        assert_eq!(latest.id.as_u64(), Some(3));
    }

    #[test]
    fn ties_resolve_to_input_order() {
        let builds = vec![
            build(7, Some("2023-06-01"), true),
            build(8, Some("2023-06-01"), true),
        ];
        let latest = select_latest_build(&builds).unwrap();
        assert_eq!(latest.id.as_u64(), Some(7));
    }

    #[test]
    fn unlisted_and_undated_builds_are_excluded() {
        let builds = vec![
            build(1, Some("2024-01-01"), false),
            build(2, None, true),
        ];
        assert!(select_latest_build(&builds).is_none());
        assert!(select_latest_build(&[]).is_none());
    }
}
