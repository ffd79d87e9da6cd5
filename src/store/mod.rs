// SPDX-License-Identifier: MIT

//! Durable storage layer: JSON map documents under the cache directory.
//!
//! Each document is read-modify-write. A missing or unparseable file is an
//! empty document, never a fatal error.

pub mod catalog;
pub mod credentials;
pub mod documents;

pub use catalog::CatalogStore;
pub use credentials::CredentialStore;

/// Cache file names as constants.
pub mod files {
    /// client id -> stored auth record
    pub const AUTHS: &str = "auths.json";
    /// product id -> client id/secret
    pub const PRODUCTS: &str = "products.json";
    /// product id -> game detail
    pub const CATALOG: &str = "catalog.json";
}
