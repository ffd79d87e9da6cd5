// SPDX-License-Identifier: MIT

//! Durable side of the catalog cache (`catalog.json`).

use crate::error::AppError;
use crate::models::GameDetail;
use crate::store::documents::{load_map, store_map};
use crate::store::files;
use std::collections::HashMap;
use std::path::PathBuf;

/// Game-detail document store, keyed by product id.
#[derive(Clone)]
pub struct CatalogStore {
    dir: PathBuf,
}

impl CatalogStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self) -> PathBuf {
        self.dir.join(files::CATALOG)
    }

    pub async fn get(&self, product_id: u64) -> Option<GameDetail> {
        let mut map: HashMap<u64, GameDetail> = load_map(&self.path()).await;
        map.remove(&product_id)
    }

    /// Merge a batch of entries into the document in one read-modify-write.
    pub async fn merge(&self, entries: &HashMap<u64, GameDetail>) -> Result<(), AppError> {
        let path = self.path();
        let mut map: HashMap<u64, GameDetail> = load_map(&path).await;
        for (id, detail) in entries {
            map.insert(*id, detail.clone());
        }
        store_map(&path, &map).await
    }
}
