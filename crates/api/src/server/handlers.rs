//! Axum request handlers for all service endpoints.
//!
//! Handlers are thin: each pulls the current key material when it needs one,
//! calls into `shop_core`, and maps failures through [`ServiceError`].

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use common::protocol::{
    CatalogFilterRequest, CatalogFilterResponse, ChatMatchRequest, ChatMatchResponse,
    DecryptFieldResponse, EncryptFieldRequest, ErrorResponse, HealthResponse, IssueResetRequest,
    IssueResetResponse, ResetKind, ResolveTagsRequest, SanitizeText, VerifyResetRequest,
    VerifyResetResponse,
};
use common::{EncryptedField, EncryptedPaymentCard, PaymentCard, ResetSecret, ServiceError};
use serde::Serialize;
use shop_core::{catalog, crypto, tags, text};
use tracing::{debug, warn};

use super::state::AppState;
use crate::keys::KeyMaterial;

/// `GET /health` — liveness and readiness check.
///
/// Returns `200 OK` when payment key material is loaded, `503` otherwise.
pub async fn health(State(state): State<AppState>) -> Response {
    let key_ready = state.key_store.is_ready();
    let (status_code, status_str) = if key_ready {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };
    let body = HealthResponse {
        status: status_str.into(),
        key_ready,
    };
    (status_code, Json(body)).into_response()
}

// ---------------------------------------------------------------------------
// Field cipher
// ---------------------------------------------------------------------------

/// `POST /fields/encrypt` — encrypt one scalar value.
pub async fn encrypt_field(
    State(state): State<AppState>,
    body: Result<Json<EncryptFieldRequest>, JsonRejection>,
) -> Response {
    respond(parse(body).and_then(|req| {
        let key = current_key(&state)?;
        crypto::encrypt_field(&req.value, key.expose()).map_err(ServiceError::from)
    }))
}

/// `POST /fields/decrypt` — decrypt one stored field.
pub async fn decrypt_field(
    State(state): State<AppState>,
    body: Result<Json<EncryptedField>, JsonRejection>,
) -> Response {
    respond(parse(body).and_then(|field| {
        let key = current_key(&state)?;
        crypto::decrypt_field(&field, key.expose())
            .map(|value| DecryptFieldResponse { value })
            .map_err(ServiceError::from)
    }))
}

/// `POST /payment-methods/encrypt` — encrypt every field of a card.
pub async fn encrypt_payment_method(
    State(state): State<AppState>,
    body: Result<Json<PaymentCard>, JsonRejection>,
) -> Response {
    respond(parse(body).and_then(|card| {
        let key = current_key(&state)?;
        crypto::encrypt_payment_card(&card, key.expose()).map_err(ServiceError::from)
    }))
}

/// `POST /payment-methods/summary` — display view of a stored card.
pub async fn payment_method_summary(
    State(state): State<AppState>,
    body: Result<Json<EncryptedPaymentCard>, JsonRejection>,
) -> Response {
    respond(parse(body).and_then(|card| {
        let key = current_key(&state)?;
        crypto::summarize_payment_card(&card, key.expose()).map_err(ServiceError::from)
    }))
}

// ---------------------------------------------------------------------------
// Tags, catalog, chat
// ---------------------------------------------------------------------------

/// `POST /products/tags` — final tags for a product being saved.
pub async fn resolve_tags(body: Result<Json<ResolveTagsRequest>, JsonRejection>) -> Response {
    let req = match parse(body) {
        Ok(req) => req,
        Err(err) => return respond::<()>(Err(err)),
    };
    let resolved = tags::resolve_product_tags(
        req.occasion_tags.as_ref(),
        req.recipient_tags.as_ref(),
        &req.name,
    );
    debug!(
        rules = ?tags::fired_rules(&req.name),
        occasion = ?resolved.occasion_tags,
        recipient = ?resolved.recipient_tags,
        "resolved product tags"
    );
    respond(Ok(resolved))
}

/// `POST /catalog/filter` — document-store filter for a catalog search.
pub async fn catalog_filter(body: Result<Json<CatalogFilterRequest>, JsonRejection>) -> Response {
    respond(parse(body).map(|req| CatalogFilterResponse {
        filter: catalog::build_search_filter(
            req.q.as_deref(),
            req.occasion.as_ref(),
            req.recipient.as_ref(),
        ),
    }))
}

/// `POST /chat/match` — tags and topic of an incoming chat message.
pub async fn chat_match(body: Result<Json<ChatMatchRequest>, JsonRejection>) -> Response {
    respond(parse(body).map(|req| ChatMatchResponse {
        tags: tags::match_free_text(&req.message),
        flower_topic: tags::is_flower_topic(&req.message),
        title: text::build_chat_title(&req.message),
    }))
}

/// `POST /chat/sanitize` — strip markdown from generated assistant text.
pub async fn chat_sanitize(body: Result<Json<SanitizeText>, JsonRejection>) -> Response {
    respond(parse(body).map(|req| SanitizeText {
        text: text::strip_markdown(&req.text),
    }))
}

// ---------------------------------------------------------------------------
// Password reset
// ---------------------------------------------------------------------------

/// `POST /reset/issue` — fresh reset code or token plus the record to store.
pub async fn issue_reset(
    State(state): State<AppState>,
    body: Result<Json<IssueResetRequest>, JsonRejection>,
) -> Response {
    let req = match parse(body) {
        Ok(req) => req,
        Err(err) => return respond::<()>(Err(err)),
    };
    let (secret, ttl) = match req.kind {
        ResetKind::Code => (crypto::generate_reset_code(), state.reset_code_ttl),
        ResetKind::Token => (crypto::generate_reset_token(), state.reset_token_ttl),
    };
    let record = crypto::issue_reset_secret(&secret, ttl, Utc::now());
    debug!(kind = ?req.kind, expires_at = %record.expires_at, "issued reset secret");
    respond(Ok(IssueResetResponse {
        secret,
        digest: record.digest,
        expires_at: record.expires_at,
    }))
}

/// `POST /reset/verify` — check a presented code or token against its record.
pub async fn verify_reset(body: Result<Json<VerifyResetRequest>, JsonRejection>) -> Response {
    respond(parse(body).map(|req| {
        let record = ResetSecret {
            digest: req.digest,
            expires_at: req.expires_at,
        };
        VerifyResetResponse {
            valid: crypto::verify_reset_secret(&record, &req.presented, Utc::now()),
        }
    }))
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Unwrap a JSON body, turning axum's rejection into a `bad_request` error.
fn parse<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ServiceError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ServiceError::BadRequest(rejection.body_text()))
}

fn current_key(state: &AppState) -> Result<Arc<KeyMaterial>, ServiceError> {
    state
        .key_store
        .current()
        .map_err(|e| ServiceError::Unavailable(e.to_string()))
}

fn respond<T: Serialize>(result: Result<T, ServiceError>) -> Response {
    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(err) => {
            warn!(code = err.code(), error = %err, "request failed");
            let status = StatusCode::from_u16(err.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(ErrorResponse::from(&err))).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::post, Router};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const KEY: &str = "MDEyMzQ1Njc4OWFiY2RlZjAxMjM0NTY3ODlhYmNkZWY=";

    fn ready_state() -> AppState {
        let state = AppState::default();
        state.key_store.store(KEY.into()).unwrap();
        state
    }

    fn router(state: AppState) -> Router {
        Router::new()
            .route("/fields/encrypt", post(encrypt_field))
            .route("/fields/decrypt", post(decrypt_field))
            .route("/payment-methods/encrypt", post(encrypt_payment_method))
            .route("/payment-methods/summary", post(payment_method_summary))
            .route("/reset/issue", post(issue_reset))
            .route("/reset/verify", post(verify_reset))
            .with_state(state)
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn encrypt_then_decrypt_field() {
        let state = ready_state();
        let (status, sealed) =
            post_json(router(state.clone()), "/fields/encrypt", json!({"value": "07"})).await;
        assert_eq!(status, StatusCode::OK);
        assert!(sealed["iv"].is_string() && sealed["tag"].is_string() && sealed["data"].is_string());

        let (status, opened) = post_json(router(state), "/fields/decrypt", sealed).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(opened["value"], "07");
    }

    #[tokio::test]
    async fn cipher_returns_503_without_key() {
        let (status, body) =
            post_json(router(AppState::default()), "/fields/encrypt", json!({"value": "x"})).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], "service_unavailable");
    }

    #[tokio::test]
    async fn tampered_field_returns_422() {
        let state = ready_state();
        let (_, mut sealed) =
            post_json(router(state.clone()), "/fields/encrypt", json!({"value": "secret"})).await;
        sealed["tag"] = json!("AAAAAAAAAAAAAAAAAAAAAA==");
        let (status, body) = post_json(router(state), "/fields/decrypt", sealed).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "integrity_error");
    }

    #[tokio::test]
    async fn payment_method_summary_masks_number() {
        let state = ready_state();
        let card = json!({
            "cardholderName": "Dana Sadykova",
            "cardNumber": "5169497812345678",
            "expMonth": "11",
            "expYear": "2027",
            "cvv": "909"
        });
        let (status, sealed) =
            post_json(router(state.clone()), "/payment-methods/encrypt", card).await;
        assert_eq!(status, StatusCode::OK);
        assert!(sealed["cvv"]["data"].is_string());

        let (status, summary) =
            post_json(router(state), "/payment-methods/summary", sealed).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            summary,
            json!({
                "cardholderName": "Dana Sadykova",
                "last4": "5678",
                "expMonth": "11",
                "expYear": "2027"
            })
        );
    }

    #[tokio::test]
    async fn issued_code_verifies_once_presented() {
        let state = ready_state();
        let (status, issued) =
            post_json(router(state.clone()), "/reset/issue", json!({"kind": "code"})).await;
        assert_eq!(status, StatusCode::OK);
        let code = issued["secret"].as_str().unwrap().to_owned();
        assert_eq!(code.len(), 6);
        assert_eq!(issued["digest"].as_str().unwrap(), crypto::hash_token(&code));

        let verify = json!({
            "presented": code,
            "digest": issued["digest"],
            "expiresAt": issued["expiresAt"]
        });
        let (_, result) = post_json(router(state.clone()), "/reset/verify", verify).await;
        assert_eq!(result["valid"], true);

        let wrong = json!({
            "presented": "not-the-code",
            "digest": issued["digest"],
            "expiresAt": issued["expiresAt"]
        });
        let (_, result) = post_json(router(state), "/reset/verify", wrong).await;
        assert_eq!(result["valid"], false);
    }

    #[tokio::test]
    async fn wrong_body_shape_is_bad_request() {
        let (status, body) =
            post_json(router(ready_state()), "/reset/issue", json!({"kind": "sms"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "bad_request");
    }

    #[tokio::test]
    async fn expired_reset_record_is_invalid() {
        let token = crypto::generate_reset_token();
        let verify = json!({
            "presented": token,
            "digest": crypto::hash_token(&token),
            "expiresAt": "2020-01-01T00:00:00Z"
        });
        let (_, result) = post_json(router(ready_state()), "/reset/verify", verify).await;
        assert_eq!(result["valid"], false);
    }
}
