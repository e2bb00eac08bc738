//! Session middleware configuration.
//!
//! Order sheets live in an in-memory tower-sessions store. They are lost on
//! restart, which is fine for a draft that is never persisted anyway.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "sg_session";

/// Idle time before a session and its open order sheet expire (2 hours).
const SESSION_EXPIRY_SECONDS: i64 = 2 * 60 * 60;

/// Create the session layer backed by a fresh [`MemoryStore`].
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
