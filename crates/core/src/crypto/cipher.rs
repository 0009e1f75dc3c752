//! AES-256-GCM encryption and decryption of individual string fields.
//!
//! **Nonce handling:** every call to [`encrypt_field`] draws a fresh 96-bit
//! nonce from the OS CSPRNG. GCM nonce reuse under one key breaks both
//! confidentiality and authentication, so identical plaintexts must never
//! produce identical records.
//!
//! The key is never cached. Each call decodes the key material it is handed,
//! so replacing the configured value between calls rotates the key.

use aes_gcm::{
    aead::{rand_core::RngCore, AeadInPlace, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce, Tag,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::{EncryptedField, ServiceError};
use thiserror::Error;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of an AES-GCM nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of an AES-GCM authentication tag.
pub const TAG_LEN: usize = 16;

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// No key material was configured.
    #[error("payment key material missing")]
    MissingKey,

    /// The key material is not valid standard base64.
    #[error("payment key material is not valid base64")]
    InvalidKeyEncoding,

    /// The decoded key has the wrong length.
    #[error("invalid payment key length: expected {KEY_LEN} bytes, got {0}")]
    InvalidKeyLength(usize),

    /// The record is malformed, was tampered with, or was written under another key.
    #[error("encrypted field failed authentication")]
    Integrity,

    /// AES-GCM encryption failed.
    #[error("aead operation failed")]
    AeadFailure,
}

impl CipherError {
    /// `true` for errors caused by the key material rather than the data.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            CipherError::MissingKey
                | CipherError::InvalidKeyEncoding
                | CipherError::InvalidKeyLength(_)
        )
    }
}

impl From<CipherError> for ServiceError {
    fn from(err: CipherError) -> Self {
        match err {
            CipherError::Integrity => ServiceError::Integrity(err.to_string()),
            CipherError::AeadFailure => ServiceError::Internal(err.to_string()),
            _ => ServiceError::Configuration(err.to_string()),
        }
    }
}

/// Raw 256-bit key decoded from configured key material.
///
/// The bytes are overwritten with zeroes on drop.
pub struct PaymentKey(Box<[u8; KEY_LEN]>);

impl PaymentKey {
    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.0[..]))
    }
}

impl Drop for PaymentKey {
    fn drop(&mut self) {
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for PaymentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PaymentKey([REDACTED])")
    }
}

/// Decode base64 key material into a [`PaymentKey`].
///
/// # Errors
///
/// Returns [`CipherError::MissingKey`] for empty input,
/// [`CipherError::InvalidKeyEncoding`] if the input is not base64, and
/// [`CipherError::InvalidKeyLength`] if it does not decode to [`KEY_LEN`] bytes.
pub fn derive_key(secret_material: &str) -> Result<PaymentKey, CipherError> {
    if secret_material.is_empty() {
        return Err(CipherError::MissingKey);
    }
    let mut decoded = STANDARD
        .decode(secret_material)
        .map_err(|_| CipherError::InvalidKeyEncoding)?;
    if decoded.len() != KEY_LEN {
        let len = decoded.len();
        decoded.iter_mut().for_each(|b| *b = 0);
        return Err(CipherError::InvalidKeyLength(len));
    }
    let mut buf = Box::new([0u8; KEY_LEN]);
    buf.copy_from_slice(&decoded);
    decoded.iter_mut().for_each(|b| *b = 0);
    Ok(PaymentKey(buf))
}

/// Encrypt a plaintext string field using AES-256-GCM.
///
/// # Errors
///
/// Returns a configuration-class [`CipherError`] if `secret_material` is not
/// a valid key, or [`CipherError::AeadFailure`] on an internal AEAD error.
pub fn encrypt_field(plaintext: &str, secret_material: &str) -> Result<EncryptedField, CipherError> {
    let key = derive_key(secret_material)?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let mut buffer = plaintext.as_bytes().to_vec();
    let tag = key
        .cipher()
        .encrypt_in_place_detached(nonce, b"", &mut buffer)
        .map_err(|_| CipherError::AeadFailure)?;

    Ok(EncryptedField {
        iv: STANDARD.encode(nonce_bytes),
        auth_tag: STANDARD.encode(tag),
        ciphertext: STANDARD.encode(&buffer),
    })
}

/// Decrypt an [`EncryptedField`] back to its plaintext string.
///
/// # Errors
///
/// Returns a configuration-class [`CipherError`] if `secret_material` is not
/// a valid key, and [`CipherError::Integrity`] if any part of the record is
/// undecodable, has the wrong length, or fails authentication.
pub fn decrypt_field(field: &EncryptedField, secret_material: &str) -> Result<String, CipherError> {
    let key = derive_key(secret_material)?;

    let nonce_bytes = decode_part(&field.iv, Some(NONCE_LEN))?;
    let tag_bytes = decode_part(&field.auth_tag, Some(TAG_LEN))?;
    let mut buffer = decode_part(&field.ciphertext, None)?;

    key.cipher()
        .decrypt_in_place_detached(
            Nonce::from_slice(&nonce_bytes),
            b"",
            &mut buffer,
            Tag::from_slice(&tag_bytes),
        )
        .map_err(|_| CipherError::Integrity)?;

    String::from_utf8(buffer).map_err(|_| CipherError::Integrity)
}

fn decode_part(part: &str, expected_len: Option<usize>) -> Result<Vec<u8>, CipherError> {
    let bytes = STANDARD.decode(part).map_err(|_| CipherError::Integrity)?;
    match expected_len {
        Some(len) if bytes.len() != len => Err(CipherError::Integrity),
        _ => Ok(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const KEY: &str = "MDEyMzQ1Njc4OWFiY2RlZjAxMjM0NTY3ODlhYmNkZWY=";

    fn random_key() -> String {
        let mut key = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut key);
        STANDARD.encode(key)
    }

    fn flip_byte(part: &str, index: usize) -> String {
        let mut bytes = STANDARD.decode(part).unwrap();
        bytes[index] ^= 0x01;
        STANDARD.encode(bytes)
    }

    #[test]
    fn encrypt_decrypt_round_trip() {
        let field = encrypt_field("4111111111111111", KEY).unwrap();
        assert_eq!(decrypt_field(&field, KEY).unwrap(), "4111111111111111");
    }

    #[test]
    fn empty_plaintext_round_trips() {
        let field = encrypt_field("", KEY).unwrap();
        assert_eq!(field.ciphertext, "");
        assert_eq!(decrypt_field(&field, KEY).unwrap(), "");
    }

    #[test]
    fn record_parts_have_expected_lengths() {
        let field = encrypt_field("secret", KEY).unwrap();
        assert_eq!(STANDARD.decode(&field.iv).unwrap().len(), NONCE_LEN);
        assert_eq!(STANDARD.decode(&field.auth_tag).unwrap().len(), TAG_LEN);
        assert_eq!(STANDARD.decode(&field.ciphertext).unwrap().len(), 6);
    }

    #[test]
    fn same_plaintext_gets_fresh_nonce() {
        let a = encrypt_field("same", KEY).unwrap();
        let b = encrypt_field("same", KEY).unwrap();
        assert_ne!(a.iv, b.iv);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn wrong_key_fails_with_integrity() {
        let field = encrypt_field("secret", &random_key()).unwrap();
        let err = decrypt_field(&field, &random_key()).unwrap_err();
        assert!(matches!(err, CipherError::Integrity));
    }

    #[test]
    fn tampered_tag_fails_auth() {
        let mut field = encrypt_field("tamper me", KEY).unwrap();
        field.auth_tag = flip_byte(&field.auth_tag, 0);
        assert!(matches!(
            decrypt_field(&field, KEY),
            Err(CipherError::Integrity)
        ));
    }

    #[test]
    fn tampered_iv_fails_auth() {
        let mut field = encrypt_field("tamper me", KEY).unwrap();
        field.iv = flip_byte(&field.iv, 11);
        assert!(decrypt_field(&field, KEY).is_err());
    }

    #[test]
    fn truncated_tag_is_rejected() {
        let mut field = encrypt_field("tamper me", KEY).unwrap();
        let bytes = STANDARD.decode(&field.auth_tag).unwrap();
        field.auth_tag = STANDARD.encode(&bytes[..12]);
        assert!(matches!(
            decrypt_field(&field, KEY),
            Err(CipherError::Integrity)
        ));
    }

    #[test]
    fn undecodable_part_is_integrity_error() {
        let mut field = encrypt_field("x", KEY).unwrap();
        field.ciphertext = "!!!".into();
        assert!(matches!(
            decrypt_field(&field, KEY),
            Err(CipherError::Integrity)
        ));
    }

    #[test]
    fn derive_key_rejects_empty() {
        let err = derive_key("").unwrap_err();
        assert!(matches!(err, CipherError::MissingKey));
        assert!(err.is_configuration());
    }

    #[test]
    fn derive_key_rejects_short_key() {
        let short = STANDARD.encode([7u8; 16]);
        let err = derive_key(&short).unwrap_err();
        assert!(matches!(err, CipherError::InvalidKeyLength(16)));
        assert!(err.is_configuration());
    }

    #[test]
    fn derive_key_rejects_non_base64() {
        assert!(matches!(
            derive_key("not base64 at all"),
            Err(CipherError::InvalidKeyEncoding)
        ));
    }

    #[test]
    fn derive_key_is_deterministic() {
        let a = derive_key(KEY).unwrap();
        let b = derive_key(KEY).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
        assert_eq!(&a.as_bytes()[..], b"0123456789abcdef0123456789abcdef");
    }

    #[test]
    fn encrypt_with_invalid_key_is_configuration_error() {
        let err = encrypt_field("x", "").unwrap_err();
        assert!(err.is_configuration());
        let field = encrypt_field("x", KEY).unwrap();
        let err = decrypt_field(&field, &STANDARD.encode([1u8; 31])).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn maps_onto_service_errors() {
        assert_eq!(ServiceError::from(CipherError::Integrity).http_status(), 422);
        assert_eq!(ServiceError::from(CipherError::MissingKey).http_status(), 500);
        assert!(matches!(
            ServiceError::from(CipherError::InvalidKeyLength(16)),
            ServiceError::Configuration(_)
        ));
    }

    #[test]
    fn payment_key_debug_is_redacted() {
        let key = derive_key(KEY).unwrap();
        assert_eq!(format!("{key:?}"), "PaymentKey([REDACTED])");
    }

    proptest! {
        #[test]
        fn round_trip_any_string(s in ".*") {
            let field = encrypt_field(&s, KEY).unwrap();
            prop_assert_eq!(decrypt_field(&field, KEY).unwrap(), s);
        }

        #[test]
        fn any_single_flip_in_data_or_tag_is_detected(
            s in ".{1,64}",
            pick in any::<prop::sample::Index>(),
            in_tag in any::<bool>(),
        ) {
            let mut field = encrypt_field(&s, KEY).unwrap();
            if in_tag {
                field.auth_tag = flip_byte(&field.auth_tag, pick.index(TAG_LEN));
            } else {
                let len = STANDARD.decode(&field.ciphertext).unwrap().len();
                field.ciphertext = flip_byte(&field.ciphertext, pick.index(len));
            }
            prop_assert!(matches!(decrypt_field(&field, KEY), Err(CipherError::Integrity)));
        }
    }
}
