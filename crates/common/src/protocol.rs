//! Request and response types for the core service HTTP API.
//!
//! All bodies are JSON with camelCase field names, matching the documents the
//! CRUD layer already stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{TagInput, TagMatch};

// ---------------------------------------------------------------------------
// Field cipher
// ---------------------------------------------------------------------------

/// Request body for `POST /fields/encrypt`.
#[derive(Clone, Serialize, Deserialize)]
pub struct EncryptFieldRequest {
    pub value: String,
}

/// Response body for `POST /fields/decrypt`.
#[derive(Clone, Serialize, Deserialize)]
pub struct DecryptFieldResponse {
    pub value: String,
}

// ---------------------------------------------------------------------------
// Tags and catalog
// ---------------------------------------------------------------------------

/// Request body for `POST /products/tags`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveTagsRequest {
    #[serde(default)]
    pub occasion_tags: Option<TagInput>,
    #[serde(default)]
    pub recipient_tags: Option<TagInput>,
    #[serde(default)]
    pub name: String,
}

/// Request body for `POST /catalog/filter`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFilterRequest {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub occasion: Option<TagInput>,
    #[serde(default)]
    pub recipient: Option<TagInput>,
}

/// Response body for `POST /catalog/filter`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFilterResponse {
    /// Document-store query object.
    pub filter: serde_json::Value,
}

// ---------------------------------------------------------------------------
// Chat assistant
// ---------------------------------------------------------------------------

/// Request body for `POST /chat/match`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMatchRequest {
    #[serde(default)]
    pub message: String,
}

/// Response body for `POST /chat/match`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMatchResponse {
    #[serde(flatten)]
    pub tags: TagMatch,
    /// Whether the message is about flowers or gifts at all.
    pub flower_topic: bool,
    /// Title for a new chat thread started by this message.
    pub title: String,
}

/// Request and response body for `POST /chat/sanitize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizeText {
    #[serde(default)]
    pub text: String,
}

// ---------------------------------------------------------------------------
// Password reset
// ---------------------------------------------------------------------------

/// Which kind of reset secret to issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResetKind {
    /// Short numeric code typed in by the user.
    Code,
    /// Long opaque token embedded in a link.
    Token,
}

/// Request body for `POST /reset/issue`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueResetRequest {
    pub kind: ResetKind,
}

/// Response body for `POST /reset/issue`.
///
/// `secret` is handed to the mailer and must not be stored; `digest` and
/// `expires_at` are what the CRUD layer persists.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueResetResponse {
    pub secret: String,
    pub digest: String,
    pub expires_at: DateTime<Utc>,
}

/// Request body for `POST /reset/verify`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResetRequest {
    pub presented: String,
    pub digest: String,
    pub expires_at: DateTime<Utc>,
}

/// Response body for `POST /reset/verify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResetResponse {
    pub valid: bool,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"bad_request"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&crate::ServiceError> for ErrorResponse {
    fn from(err: &crate::ServiceError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Overall service status: `"ok"` or `"degraded"`.
    pub status: String,
    /// Whether payment key material is currently loaded.
    pub key_ready: bool,
}
