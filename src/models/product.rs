//! Product and build documents from the catalog service.

use serde::{Deserialize, Serialize};

/// Product document, reduced to the build listing used for resolution.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductDocument {
    #[serde(default)]
    pub builds: Vec<Build>,
}

/// A published build of a product.
///
/// `id` can exceed 2^53, so it is kept as an opaque arbitrary-precision
/// number and only ever rendered back to its exact decimal form (for the
/// build-detail URL). It is never compared numerically; build selection
/// orders by `date_published`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Build {
    pub id: serde_json::Number,
    #[serde(default)]
    pub date_published: Option<String>,
    #[serde(default)]
    pub listed: bool,
}

/// Per-product OAuth credentials, extracted from the build detail document
/// and persisted in `products.json`. Write-once: a product's credentials do
/// not change across builds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductCredential {
    #[serde(rename = "clientId")]
    pub client_id: String,
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}
