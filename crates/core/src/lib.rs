//! Core of the flower shop backend: payment field encryption, reset digests,
//! product tagging, and text normalization.
//!
//! Everything here is a synchronous function over its arguments. Nothing
//! holds state between calls, and key material is always passed in by the
//! caller.

pub mod catalog;
pub mod crypto;
pub mod tags;
pub mod text;

pub use crypto::{decrypt_field, derive_key, encrypt_field, hash_token, CipherError};
pub use tags::{auto_tag_from_name, match_free_text, resolve_product_tags};
