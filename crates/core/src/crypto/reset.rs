//! Issue and verify password-reset codes and tokens.
//!
//! Only the digest and expiry are ever stored. The raw secret goes to the
//! mailer once and is then dropped.

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use common::ResetSecret;

use super::digest::{digests_match, hash_token};

/// Number of decimal digits in a reset code.
pub const RESET_CODE_DIGITS: usize = 6;

/// Random bytes behind a reset token.
pub const RESET_TOKEN_BYTES: usize = 32;

const CODE_MODULUS: u32 = 1_000_000;
// Largest multiple of CODE_MODULUS that fits in a u32; draws at or above it are rejected.
const CODE_ZONE: u32 = u32::MAX - (u32::MAX % CODE_MODULUS);

/// Generate a uniformly distributed six-digit code, zero padded.
pub fn generate_reset_code() -> String {
    loop {
        let draw = OsRng.next_u32();
        if draw < CODE_ZONE {
            return format!("{:0width$}", draw % CODE_MODULUS, width = RESET_CODE_DIGITS);
        }
    }
}

/// Generate an opaque URL-safe token.
pub fn generate_reset_token() -> String {
    let mut bytes = [0u8; RESET_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Build the stored record for `raw`, expiring `ttl` after `now`.
pub fn issue_reset_secret(raw: &str, ttl: Duration, now: DateTime<Utc>) -> ResetSecret {
    ResetSecret {
        digest: hash_token(raw),
        expires_at: now + ttl,
    }
}

/// `true` if `presented` hashes to the stored digest and the record has not expired.
pub fn verify_reset_secret(secret: &ResetSecret, presented: &str, now: DateTime<Utc>) -> bool {
    if now >= secret.expires_at {
        return false;
    }
    digests_match(&hash_token(presented), &secret.digest)
}
