//! Value records persisted by the CRUD layer and exchanged with the core.
//!
//! Every record here is an immutable, caller-owned value. Field names match
//! the document-store shape so records round-trip through storage unchanged.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Encrypted fields
// ---------------------------------------------------------------------------

/// One field encrypted with AES-256-GCM.
///
/// Stored as `{ "iv": .., "tag": .., "data": .. }`, each part standard base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedField {
    /// Base64 of the 12-byte nonce.
    pub iv: String,
    /// Base64 of the 16-byte authentication tag.
    #[serde(rename = "tag")]
    pub auth_tag: String,
    /// Base64 of the ciphertext (same length as the plaintext bytes).
    #[serde(rename = "data")]
    pub ciphertext: String,
}

/// Plaintext payment card as submitted by the customer.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCard {
    pub cardholder_name: String,
    pub card_number: String,
    pub exp_month: String,
    pub exp_year: String,
    pub cvv: String,
}

impl fmt::Debug for PaymentCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Card data never reaches logs, not even through `{:?}`.
        f.write_str("PaymentCard([REDACTED])")
    }
}

/// A payment card with every sensitive field encrypted independently, so a
/// reader can decrypt only the fields it needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedPaymentCard {
    pub cardholder_name: EncryptedField,
    pub card_number: EncryptedField,
    pub exp_month: EncryptedField,
    pub exp_year: EncryptedField,
    pub cvv: EncryptedField,
}

/// Display-safe view of a stored card. Never carries the full number or CVV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCardSummary {
    pub cardholder_name: String,
    pub last4: String,
    pub exp_month: String,
    pub exp_year: String,
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

/// Occasion and recipient tags stored on a product document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagSet {
    pub occasion_tags: Vec<String>,
    pub recipient_tags: Vec<String>,
}

/// Tags hit by a free-text query. Same shape as [`TagSet`], never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagMatch {
    pub occasion: Vec<String>,
    pub recipient: Vec<String>,
}

impl TagMatch {
    /// `true` if the text matched no tag on either axis.
    pub fn is_empty(&self) -> bool {
        self.occasion.is_empty() && self.recipient.is_empty()
    }
}

/// Explicit tags as supplied by an administrator: either a comma-separated
/// string or a JSON list. Anything else normalizes to no tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagInput {
    Csv(String),
    List(Vec<serde_json::Value>),
    Other(serde_json::Value),
}

impl From<&str> for TagInput {
    fn from(value: &str) -> Self {
        TagInput::Csv(value.to_owned())
    }
}

impl From<Vec<&str>> for TagInput {
    fn from(values: Vec<&str>) -> Self {
        TagInput::List(values.into_iter().map(serde_json::Value::from).collect())
    }
}

// ---------------------------------------------------------------------------
// Password reset
// ---------------------------------------------------------------------------

/// Stored digest of a password-reset code or token, plus its expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetSecret {
    /// Lowercase hex SHA-256 of the raw code or token.
    pub digest: String,
    pub expires_at: DateTime<Utc>,
}
