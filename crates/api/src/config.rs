//! Configuration loading and validation for the shop core service.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any required variable is missing or invalid.

use anyhow::{Context, Result};
use serde::Deserialize;
use shop_core::derive_key;

/// Validated service configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Base64-encoded 32-byte payment field key. Required unless
    /// `payment_enc_key_file` is set.
    #[serde(default)]
    pub payment_enc_key: Option<String>,

    /// File holding the base64 payment key. Re-read every
    /// `key_reload_interval_secs`, which is how the key is rotated.
    #[serde(default)]
    pub payment_enc_key_file: Option<String>,

    /// How often (seconds) to re-read `payment_enc_key_file`.
    #[serde(default = "default_key_reload_interval")]
    pub key_reload_interval_secs: u64,

    /// Port the HTTP server listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Lifetime (seconds) of a numeric reset code.
    #[serde(default = "default_reset_code_ttl")]
    pub reset_code_ttl_secs: u64,

    /// Lifetime (seconds) of a reset link token.
    #[serde(default = "default_reset_token_ttl")]
    pub reset_token_ttl_secs: u64,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_key_reload_interval() -> u64 {
    300
}
fn default_listen_port() -> u16 {
    8080
}
fn default_reset_code_ttl() -> u64 {
    900
}
fn default_reset_token_ttl() -> u64 {
    3600
}
fn default_log_level() -> String {
    "info".into()
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field(
                "payment_enc_key",
                &self.payment_enc_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("payment_enc_key_file", &self.payment_enc_key_file)
            .field("key_reload_interval_secs", &self.key_reload_interval_secs)
            .field("listen_port", &self.listen_port)
            .field("reset_code_ttl_secs", &self.reset_code_ttl_secs)
            .field("reset_token_ttl_secs", &self.reset_token_ttl_secs)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        let inline_key = self.payment_enc_key.as_deref().filter(|k| !k.is_empty());
        let key_file = self
            .payment_enc_key_file
            .as_deref()
            .filter(|p| !p.trim().is_empty());

        match (inline_key, key_file) {
            (None, None) => {
                anyhow::bail!("PAYMENT_ENC_KEY or PAYMENT_ENC_KEY_FILE is required")
            }
            (Some(key), _) => {
                derive_key(key).context("PAYMENT_ENC_KEY must be 32 bytes (base64)")?;
            }
            (None, Some(_)) => {}
        }

        if self.key_reload_interval_secs == 0 {
            anyhow::bail!("KEY_RELOAD_INTERVAL_SECS must be > 0");
        }
        if self.reset_code_ttl_secs == 0 {
            anyhow::bail!("RESET_CODE_TTL_SECS must be > 0");
        }
        if self.reset_token_ttl_secs == 0 {
            anyhow::bail!("RESET_TOKEN_TTL_SECS must be > 0");
        }
        Ok(())
    }
}
