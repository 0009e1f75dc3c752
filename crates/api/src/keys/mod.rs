//! Payment key loading, validation, and background reload.
//!
//! # Lifecycle
//!
//! 1. At startup, [`initial_load`] reads the key from `PAYMENT_ENC_KEY_FILE`
//!    when set, otherwise from `PAYMENT_ENC_KEY`, and seeds the [`KeyStore`].
//! 2. When a key file is configured, [`reload_task`] re-reads it on an
//!    interval. Writing a new key to the file rotates it.
//! 3. Handlers pass [`KeyStore::current`] material into each cipher call.
//!
//! # Security invariants
//!
//! - Key material is never logged, written to disk, or included in traces.
//! - An invalid replacement key is rejected and the previous key retained.

pub mod store;

pub use store::{KeyMaterial, KeyStore};

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::time;
use tracing::{debug, info, warn};

use crate::config::Config;

/// Where payment key material comes from.
#[cfg_attr(test, mockall::automock)]
pub trait KeySource: Send + Sync {
    /// Read the current base64 key material.
    fn load(&self) -> Result<String>;
}

/// Reads key material from a file, ignoring surrounding whitespace.
pub struct FileKeySource {
    path: PathBuf,
}

impl FileKeySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl KeySource for FileKeySource {
    fn load(&self) -> Result<String> {
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read payment key file {}", self.path.display()))?;
        Ok(text.trim().to_owned())
    }
}

/// Load key material from `source` into `store`.
///
/// Returns `true` if the stored value changed.
///
/// # Errors
///
/// Returns an error if the source cannot be read or the material is not a
/// valid key. The store is left untouched in both cases.
pub fn reload_once(source: &dyn KeySource, store: &KeyStore) -> Result<bool> {
    let material = source.load()?;
    let unchanged = store
        .current()
        .map(|current| current.expose() == material)
        .unwrap_or(false);
    if unchanged {
        return Ok(false);
    }
    store
        .store(material)
        .context("payment key must be 32 bytes (base64)")?;
    Ok(true)
}

/// Seed `store` from configuration.
///
/// Returns the file source when one is configured so the caller can start
/// [`reload_task`] with it.
///
/// # Errors
///
/// Returns an error if the configured key cannot be read or is invalid.
pub fn initial_load(cfg: &Config, store: &KeyStore) -> Result<Option<Arc<dyn KeySource>>> {
    if let Some(path) = cfg.payment_enc_key_file.as_deref().filter(|p| !p.trim().is_empty()) {
        let source: Arc<dyn KeySource> = Arc::new(FileKeySource::new(path));
        reload_once(source.as_ref(), store).context("failed to load initial payment key")?;
        info!(path = %path, "payment key loaded from file");
        return Ok(Some(source));
    }

    let material = cfg
        .payment_enc_key
        .clone()
        .context("PAYMENT_ENC_KEY missing")?;
    store
        .store(material)
        .context("PAYMENT_ENC_KEY must be 32 bytes (base64)")?;
    info!("payment key loaded from environment");
    Ok(None)
}

/// Spawn a background task that periodically re-reads the key from `source`.
///
/// The first reload fires after one full interval (startup load is assumed to
/// have already populated the store). On failure the previous key is retained
/// and a warning is emitted.
pub fn reload_task(
    source: Arc<dyn KeySource>,
    interval_secs: u64,
    store: KeyStore,
) -> tokio::task::JoinHandle<()> {
    let interval = std::time::Duration::from_secs(interval_secs);
    tokio::spawn(async move {
        let mut ticker = time::interval(interval);
        // First tick fires immediately; skip it so we don't double-load.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let source = Arc::clone(&source);
            let target = store.clone();
            match tokio::task::spawn_blocking(move || reload_once(source.as_ref(), &target)).await {
                Ok(Ok(true)) => info!("payment key rotated"),
                Ok(Ok(false)) => debug!("payment key unchanged"),
                Ok(Err(e)) => warn!(error = %e, "payment key reload failed; retaining previous key"),
                Err(e) => warn!(error = %e, "payment key reload aborted; retaining previous key"),
            }
        }
    })
}
