//! Token-based auth-state bootstrapping.
//!
//! On app start the device may hold a token from a previous session. The
//! bootstrap loads it through the [`TokenStore`] seam, verifies it against
//! the backend, and resolves the starting [`AuthState`]. A rejected token is
//! cleared; a connectivity failure propagates so the caller can tell
//! "offline" apart from "logged out".

use crate::client::ApiClient;
use crate::error::{classify, RawResult};
use crate::logging::{log_debug, log_info};
use async_trait::async_trait;
use serde::Deserialize;

/// Backend endpoint that validates a bearer token and returns the session.
pub const VERIFY_PATH: &str = "/api/auth/verify";

/// Persisted token storage. Device key-value mechanics stay behind this
/// seam; this crate only reads and clears one token string.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// The stored token, if any.
    async fn load(&self) -> Option<String>;

    /// Persist a token (after a fresh login).
    async fn save(&self, token: &str);

    /// Remove the stored token.
    async fn clear(&self);
}

/// Who the verified token belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub display_name: String,
    pub role: Role,
}

/// Product role attached to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Parent,
    Teacher,
    Admin,
}

/// Resolved authentication state after bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// The stored token was verified; requests should carry it.
    Authenticated {
        /// The verified bearer token.
        token: String,
        /// Session details returned by the backend.
        session: Session,
    },

    /// No usable token; the caller should show the login flow.
    Unauthenticated,
}

/// Resolve the starting auth state from the stored token.
///
/// # Errors
///
/// Propagates the raw failure when verification could not complete
/// (connectivity, server error). A 401/403 rejection is NOT an error: the
/// stored token is cleared and `Unauthenticated` is returned.
pub async fn bootstrap(store: &dyn TokenStore, client: &ApiClient) -> RawResult<AuthState> {
    let Some(token) = store.load().await else {
        log_debug!("no stored token, starting unauthenticated");
        return Ok(AuthState::Unauthenticated);
    };

    let authed = client.with_token(token.clone());
    match authed.get::<Session>(VERIFY_PATH).await {
        Ok(session) => {
            log_info!(user_id = %session.user_id, role = ?session.role, "stored session verified");
            Ok(AuthState::Authenticated { token, session })
        }

        Err(raw) => {
            let info = classify(&raw);
            match info.status_code {
                // An offline device must not discard a valid token, so only
                // an explicit rejection clears the store.
                Some(401) | Some(403) => {
                    store.clear().await;
                    log_info!(status = ?info.status_code, "stored token rejected, cleared");
                    Ok(AuthState::Unauthenticated)
                }
                _ => Err(raw),
            }
        }
    }
}
