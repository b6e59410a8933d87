//! Session token shared by every clone of a client handle.

use common::RedactedToken;

use std::sync::Arc;

use tokio::sync::RwLock;

/// Holder of the current session token.
///
/// Cloning shares the token; sign-in on one clone authenticates them all.
/// Writes (sign-in/sign-out) and reads (every request) go through an async
/// `RwLock`, so concurrent requests never observe a half-updated token.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<RedactedToken>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a token. Empty tokens clear the session instead.
    pub async fn set(&self, token: RedactedToken) {
        let mut guard = self.token.write().await;
        *guard = (!token.is_empty()).then_some(token);
    }

    pub async fn clear(&self) {
        self.token.write().await.take();
    }

    /// Snapshot of the current token.
    pub async fn token(&self) -> Option<RedactedToken> {
        self.token.read().await.clone()
    }

    pub async fn is_signed_in(&self) -> bool {
        self.token.read().await.is_some()
    }
}
