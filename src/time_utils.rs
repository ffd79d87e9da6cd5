// SPDX-License-Identifier: MIT

//! Shared helpers for date/time formatting.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC 3339 with millisecond precision and a `Z`
/// suffix, the form the cache files use for `login_time`/`expire_time`.
pub fn format_utc(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Compute the expiry instant for a token issued at `issued_at`.
pub fn expire_time(issued_at: DateTime<Utc>, expires_in_secs: i64) -> DateTime<Utc> {
    issued_at + Duration::seconds(expires_in_secs)
}

/// Format an unlock timestamp for the gameplay endpoint, which wants a
/// numeric offset rather than a `Z` suffix.
pub fn format_unlock_timestamp(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace('Z', "+0000")
}
