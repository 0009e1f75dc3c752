//! [`KeyStore`]: swappable holder for the configured payment key material.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use shop_core::{derive_key, CipherError};
use thiserror::Error;

/// Errors produced by the key layer.
#[derive(Debug, Error)]
pub enum KeyStoreError {
    /// No key material has been loaded yet.
    #[error("payment key not yet loaded")]
    NotInitialised,
}

/// Base64 key material exactly as configured.
///
/// This is the string handed to every cipher call; the decoded key is never
/// kept. The buffer is overwritten with zeroes on drop.
pub struct KeyMaterial(String);

impl KeyMaterial {
    /// Borrow the base64 key material.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Drop for KeyMaterial {
    fn drop(&mut self) {
        let mut bytes = std::mem::take(&mut self.0).into_bytes();
        bytes.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material is never printed.
        f.write_str("KeyMaterial([REDACTED])")
    }
}

/// Lock-free store for the current payment key material.
///
/// Handlers load the current value without blocking; the reload task swaps in
/// a replacement atomically, so a request sees either the old or the new key
/// for all of its fields.
#[derive(Clone, Debug)]
pub struct KeyStore {
    inner: Arc<ArcSwapOption<KeyMaterial>>,
}

impl KeyStore {
    /// Create a new, empty [`KeyStore`].
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ArcSwapOption::empty()),
        }
    }

    /// Returns `true` if key material is currently loaded.
    pub fn is_ready(&self) -> bool {
        self.inner.load().is_some()
    }

    /// Store (or replace) the key material after checking it decodes to a
    /// valid key.
    ///
    /// # Errors
    ///
    /// Returns a configuration-class [`CipherError`] if `material` is not a
    /// base64 32-byte key; the previous value is kept.
    pub fn store(&self, material: String) -> Result<(), CipherError> {
        derive_key(&material)?;
        self.inner.store(Some(Arc::new(KeyMaterial(material))));
        Ok(())
    }

    /// Borrow the current key material.
    ///
    /// # Errors
    ///
    /// Returns [`KeyStoreError::NotInitialised`] if nothing has been stored yet.
    pub fn current(&self) -> Result<Arc<KeyMaterial>, KeyStoreError> {
        self.inner.load_full().ok_or(KeyStoreError::NotInitialised)
    }
}

impl Default for KeyStore {
    fn default() -> Self {
        Self::new()
    }
}
