//! Client-side admin session.
//!
//! After a successful `POST /api/admin/verify` the browser stores a flag and a
//! timestamp in local storage. The editor stays unlocked while the timestamp
//! is younger than [`ADMIN_SESSION_TTL_MS`]. The server never sees this state,
//! so it only hides the editor UI and grants nothing.

/// Local storage key holding `"true"` once the password was accepted.
pub const AUTH_FLAG_KEY: &str = "blog-admin-auth";

/// Local storage key holding the acceptance time in epoch milliseconds.
pub const AUTH_TIME_KEY: &str = "blog-admin-auth-time";

/// Session lifetime: four hours.
pub const ADMIN_SESSION_TTL_MS: i64 = 4 * 60 * 60 * 1000;

/// Snapshot of the two local storage entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminSession {
    authenticated_at_ms: i64,
}

impl AdminSession {
    /// Session started at `now_ms`, as written after a successful verify.
    pub fn started_at(now_ms: i64) -> Self {
        Self {
            authenticated_at_ms: now_ms,
        }
    }

    /// Read the stored flag and timestamp. Anything other than a `"true"`
    /// flag with a numeric timestamp is no session.
    pub fn from_storage(flag: Option<&str>, time: Option<&str>) -> Option<Self> {
        if flag? != "true" {
            return None;
        }
        let authenticated_at_ms = time?.trim().parse().ok()?;
        Some(Self {
            authenticated_at_ms,
        })
    }

    /// Values to write back to local storage, keyed by storage key.
    pub fn to_storage(&self) -> [(&'static str, String); 2] {
        [
            (AUTH_FLAG_KEY, "true".to_string()),
            (AUTH_TIME_KEY, self.authenticated_at_ms.to_string()),
        ]
    }

    /// Whether the session is still inside its four hour window.
    pub fn is_active_at(&self, now_ms: i64) -> bool {
        now_ms - self.authenticated_at_ms < ADMIN_SESSION_TTL_MS
    }

    /// Milliseconds left before the session lapses, zero once expired.
    pub fn remaining_ms(&self, now_ms: i64) -> i64 {
        (self.authenticated_at_ms + ADMIN_SESSION_TTL_MS - now_ms).max(0)
    }
}
