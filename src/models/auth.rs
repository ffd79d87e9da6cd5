//! Auth token model for the wire and for storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Token-exchange response from the auth endpoint, also the record persisted
/// in `auths.json`. `login_time`/`expire_time` are computed at save time and
/// absent on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub user_id: String,
    /// When the token was stored (RFC 3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_time: Option<String>,
    /// When the token expires (RFC 3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_time: Option<String>,
}

impl AuthResponse {
    /// A token is usable iff `now` is strictly before its expiry. Records
    /// without an `expire_time` (or with one that does not parse) are
    /// treated as expired.
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        let Some(expire_time) = &self.expire_time else {
            return false;
        };
        match DateTime::parse_from_rfc3339(expire_time) {
            Ok(expires_at) => now < expires_at.with_timezone(&Utc),
            Err(_) => false,
        }
    }
}
