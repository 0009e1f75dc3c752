//! AES-256-GCM field encryption and one-way reset digests.
//!
//! This module has no HTTP or configuration dependencies. Key material is a
//! base64 string handed in by the caller on every call.
//!
//! # Stored field format
//!
//! ```text
//! { "iv": base64(nonce), "tag": base64(gcm tag), "data": base64(ciphertext) }
//! ```
//!
//! The tag is stored apart from the ciphertext so records written by the
//! existing Node.js backend decrypt unchanged.

pub mod cipher;
pub mod digest;
pub mod payment;
pub mod reset;

pub use cipher::{decrypt_field, derive_key, encrypt_field, CipherError, PaymentKey, KEY_LEN};
pub use digest::hash_token;
pub use payment::{encrypt_payment_card, summarize_payment_card};
pub use reset::{
    generate_reset_code, generate_reset_token, issue_reset_secret, verify_reset_secret,
};
