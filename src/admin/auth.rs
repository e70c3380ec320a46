// ABOUTME: Authentication for the admin panel: argon2 password hashing and the session guard
// ABOUTME: Login stores the admin username in the tower-sessions session; the guard checks for it

use anyhow::Result;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use rand::rngs::OsRng;
use tower_sessions::Session;

use crate::store::MediaStore;

/// Session key holding the logged-in admin's username
pub const SESSION_USER_KEY: &str = "admin";

/// Where unauthenticated admin requests are sent
pub const LOGIN_PATH: &str = "/admin/login";

/// Admin landing page; every successful admin action redirects here
pub const DASHBOARD_PATH: &str = "/admin";

/// The authenticated admin for the current request.
///
/// Inserted into request extensions by [`require_admin`]; handlers behind
/// the guard can take it as `Extension<CurrentAdmin>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentAdmin {
    pub username: String,
}

// =============================================================================
// Password hashing utilities
// =============================================================================

/// Hash a password using Argon2id
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Outcome of checking a password against a stored credential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordCheck {
    /// Matched an argon2 hash
    Valid,
    /// Matched a legacy plaintext value; the caller should re-hash it
    ValidLegacy,
    Invalid,
}

/// Check a password against the stored value.
///
/// Values that are not PHC strings are treated as legacy plaintext and
/// compared in constant time.
pub fn check_password(password: &str, stored: &str) -> PasswordCheck {
    if stored.starts_with('$') {
        return match PasswordHash::new(stored) {
            Ok(parsed) if Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok() =>
            {
                PasswordCheck::Valid
            }
            _ => PasswordCheck::Invalid,
        };
    }

    if !stored.is_empty() && constant_time_eq(password.as_bytes(), stored.as_bytes()) {
        PasswordCheck::ValidLegacy
    } else {
        PasswordCheck::Invalid
    }
}

/// Constant-time byte comparison to prevent timing attacks
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

/// Verify a username/password pair against the credential table.
///
/// A successful match against a legacy plaintext row rewrites it as an
/// argon2 hash.
pub fn authenticate(store: &MediaStore, username: &str, password: &str) -> Result<bool> {
    let Some(credential) = store.find_admin(username)? else {
        return Ok(false);
    };

    match check_password(password, &credential.password) {
        PasswordCheck::Valid => Ok(true),
        PasswordCheck::ValidLegacy => {
            let upgraded = hash_password(password)?;
            store.set_admin_password(username, &upgraded)?;
            tracing::info!(username = %username, "Upgraded plaintext admin password to argon2");
            Ok(true)
        }
        PasswordCheck::Invalid => Ok(false),
    }
}

// =============================================================================
// Middleware
// =============================================================================

/// Guard for every `/admin` route.
///
/// Requests without a logged-in admin in the session are redirected to the
/// login page with no message. Authenticated requests carry a
/// [`CurrentAdmin`] extension.
pub async fn require_admin(session: Session, mut request: Request, next: Next) -> Response {
    match session.get::<String>(SESSION_USER_KEY).await {
        Ok(Some(username)) => {
            request.extensions_mut().insert(CurrentAdmin { username });
            next.run(request).await
        }
        Ok(None) => Redirect::to(LOGIN_PATH).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to read admin session");
            Redirect::to(LOGIN_PATH).into_response()
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
