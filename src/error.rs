// SPDX-License-Identifier: MIT

//! Application error types.
//!
//! Library functions fail with a typed [`AppError`]; the orchestration
//! layer decides per call-site whether to surface the error or degrade
//! to an absent value (per-item batch fetches).

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The local Galaxy client is not installed or carries no refresh token.
    /// Fatal to the session.
    #[error("Galaxy credentials unavailable: {0}")]
    PlatformCredentialUnavailable(String),

    /// The auth endpoint rejected the token exchange.
    #[error("authentication failed with status {status}")]
    AuthenticationFailed { status: u16 },

    /// No listed build with a publish date exists for the product.
    #[error("no valid build found for product {0}")]
    ProductNotFound(u64),

    /// Non-2xx from a dependent service.
    #[error("upstream error (HTTP {status}): {body}")]
    Upstream { status: u16, body: String },

    /// JSON parse or schema mismatch. Fatal to the single call.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Cache file could not be written.
    #[error("storage error: {0}")]
    Storage(String),

    /// Request never reached the service (DNS, TLS, connection reset).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, AppError>;
