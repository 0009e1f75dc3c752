//! State shared by every handler.

use chrono::Duration;

use crate::keys::KeyStore;

/// Handler state. Cloned per request, so everything in it is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Current payment key, swapped in place on reload.
    pub key_store: KeyStore,
    /// Lifetime given to freshly issued numeric reset codes.
    pub reset_code_ttl: Duration,
    /// Lifetime given to freshly issued reset link tokens.
    pub reset_token_ttl: Duration,
}

impl AppState {
    pub fn new(key_store: KeyStore, reset_code_ttl: Duration, reset_token_ttl: Duration) -> Self {
        Self {
            key_store,
            reset_code_ttl,
            reset_token_ttl,
        }
    }
}

impl Default for AppState {
    /// Empty key store and the stock reset lifetimes; used by tests.
    fn default() -> Self {
        Self::new(
            KeyStore::new(),
            Duration::minutes(15),
            Duration::hours(1),
        )
    }
}
