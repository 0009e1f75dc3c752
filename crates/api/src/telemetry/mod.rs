//! Structured logging setup.
//!
//! # Telemetry invariants
//!
//! - **No key material, card data, or reset secrets** may appear in any span
//!   attribute or log field.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`), overridden
//!   by `RUST_LOG` when set.

pub mod init;

pub use init::init_telemetry;
