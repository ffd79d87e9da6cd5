// SPDX-License-Identifier: MIT

//! Read-modify-write helpers for JSON map documents.

use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;
use std::path::Path;

/// Load a map document. Missing or unparseable files yield an empty map.
pub async fn load_map<K, V>(path: &Path) -> HashMap<K, V>
where
    K: DeserializeOwned + Eq + Hash,
    V: DeserializeOwned,
{
    let data = match tokio::fs::read(path).await {
        Ok(data) => data,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "cache file not readable, starting empty");
            return HashMap::new();
        }
    };

    match serde_json::from_slice(&data) {
        Ok(map) => map,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cache file unparseable, starting empty");
            HashMap::new()
        }
    }
}

/// Persist a map document.
///
/// Pretty-printed with 4-space indent so files written by earlier desktop
/// builds stay diffable against ours.
pub async fn store_map<K, V>(path: &Path, map: &HashMap<K, V>) -> Result<(), AppError>
where
    K: Serialize + Eq + Hash,
    V: Serialize,
{
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    map.serialize(&mut ser)
        .map_err(|e| AppError::Storage(format!("failed to encode {}: {}", path.display(), e)))?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::Storage(format!("failed to create {}: {}", parent.display(), e)))?;
    }

    tokio::fs::write(path, buf)
        .await
        .map_err(|e| AppError::Storage(format!("failed to write {}: {}", path.display(), e)))
}
