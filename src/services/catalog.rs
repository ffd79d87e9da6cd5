// SPDX-License-Identifier: MIT

//! Catalog cache: game metadata with debounced batched persistence.
//!
//! Resolution order for a detail request: durable cache, then the in-memory
//! pending-write set, then the network. Per-item failures degrade to absent
//! so one bad product cannot abort a whole grid load.

use crate::error::{AppError, Result};
use crate::models::GameDetail;
use crate::store::CatalogStore;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

struct PendingState {
    entries: HashMap<u64, GameDetail>,
    /// True while a flush timer is scheduled. Exactly one timer may exist
    /// process-wide; a second would race the flush into double writes.
    timer_armed: bool,
}

/// Pending catalog writes plus the single debounce timer.
///
/// The timer is armed on the first add after the set was last empty and is
/// NOT re-armed per add, which bounds write latency under sustained load
/// while still batching bursts. `flush` clears the set whether or not the
/// durable write succeeded; a failed write is logged and the entries are
/// re-fetched after the next restart.
pub struct DebounceBuffer {
    state: Mutex<PendingState>,
    store: CatalogStore,
    delay: Duration,
}

impl DebounceBuffer {
    pub fn new(store: CatalogStore, delay: Duration) -> Self {
        Self {
            state: Mutex::new(PendingState {
                entries: HashMap::new(),
                timer_armed: false,
            }),
            store,
            delay,
        }
    }

    pub async fn get(&self, product_id: u64) -> Option<GameDetail> {
        self.state.lock().await.entries.get(&product_id).cloned()
    }

    /// Add an entry (last write wins) and arm the flush timer if it is not
    /// already running.
    pub async fn add(self: &Arc<Self>, product_id: u64, detail: GameDetail) {
        let mut state = self.state.lock().await;
        state.entries.insert(product_id, detail);

        if !state.timer_armed {
            state.timer_armed = true;
            let buffer = Arc::clone(self);
            tokio::spawn(async move {
                tokio::time::sleep(buffer.delay).await;
                buffer.flush().await;
            });
        }
    }

    /// Persist the entire pending set as one durable write, then clear it.
    pub async fn flush(&self) {
        let entries = {
            let mut state = self.state.lock().await;
            state.timer_armed = false;
            std::mem::take(&mut state.entries)
        };

        if entries.is_empty() {
            return;
        }

        match self.store.merge(&entries).await {
            Ok(()) => tracing::debug!(count = entries.len(), "catalog cache flushed"),
            Err(e) => tracing::error!(error = %e, "failed to persist catalog cache"),
        }
    }
}

/// Fetches and memoizes game metadata.
#[derive(Clone)]
pub struct CatalogCache {
    http: reqwest::Client,
    catalog_url: String,
    store: CatalogStore,
    buffer: Arc<DebounceBuffer>,
}

impl CatalogCache {
    pub fn new(
        http: reqwest::Client,
        catalog_url: impl Into<String>,
        store: CatalogStore,
        flush_delay: Duration,
    ) -> Self {
        Self {
            http,
            catalog_url: catalog_url.into(),
            buffer: Arc::new(DebounceBuffer::new(store.clone(), flush_delay)),
            store,
        }
    }

    /// Get the detail document for a product.
    ///
    /// `Ok(None)` covers both "the product has no catalog entry" (404) and
    /// any other upstream failure, which is logged and swallowed. Only a
    /// body that fails to parse is an error; the orchestration layer decides
    /// whether to degrade that too.
    ///
    /// Concurrent callers for the same uncached id may each hit the network;
    /// the fetch itself is deliberately not serialized.
    pub async fn game_detail(&self, product_id: u64) -> Result<Option<GameDetail>> {
        if let Some(detail) = self.store.get(product_id).await {
            return Ok(Some(detail));
        }
        if let Some(detail) = self.buffer.get(product_id).await {
            tracing::debug!(product_id, "serving detail from pending writes");
            return Ok(Some(detail));
        }

        let url = format!("{}/products/{}/product.json", self.catalog_url, product_id);
        let response = self.http.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!(product_id, "product has no catalog entry");
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(product_id, status, body = %body, "catalog detail fetch failed");
            return Ok(None);
        }

        let detail: GameDetail = response
            .json()
            .await
            .map_err(|e| AppError::Malformed(format!("game detail document: {e}")))?;

        self.buffer.add(product_id, detail.clone()).await;
        Ok(Some(detail))
    }

    /// Persist any pending entries immediately.
    pub async fn flush(&self) {
        self.buffer.flush().await;
    }
}
