//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};

/// Session middleware for in-process tests: fresh key per invocation and
/// no `Secure` flag so plain-HTTP test requests carry the cookie.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    crate::server::session_middleware(Key::generate(), false, SameSite::Lax)
}
