//! Session Tokens
//!
//! Opaque random tokens delivered in an HttpOnly cookie. Only the SHA-256
//! digest of a token is persisted; presenting the raw token is the only way
//! to resolve a session.

use axum_extra::extract::cookie::{Cookie, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "uw_session";

/// Generate a fresh opaque session token (32 bytes of OS entropy).
#[must_use]
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// SHA-256 digest of a session token, hex-encoded, for at-rest storage.
#[must_use]
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Build the session cookie carrying a raw token.
#[must_use]
pub fn session_cookie(token: String, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::seconds(max_age_secs))
        .build()
}

/// Build an expired cookie that clears the session on the client.
#[must_use]
pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::ZERO)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_unique_and_opaque() {
        let a = generate_session_token();
        let b = generate_session_token();
        assert_ne!(a, b);
        // 32 bytes of base64url without padding
        assert_eq!(a.len(), 43);
    }

    #[test]
    fn token_hash_is_stable_and_not_the_token() {
        let token = generate_session_token();
        let hash = hash_token(&token);
        assert_eq!(hash, hash_token(&token));
        assert_ne!(hash, token);
        assert_eq!(hash.len(), 64);
    }
}
