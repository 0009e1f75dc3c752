//! Axum router construction.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

use super::{handlers, middleware, state::AppState};

/// Build the application [`Router`] with all routes and layers attached.
pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/fields/encrypt", post(handlers::encrypt_field))
        .route("/fields/decrypt", post(handlers::decrypt_field))
        .route("/payment-methods/encrypt", post(handlers::encrypt_payment_method))
        .route("/payment-methods/summary", post(handlers::payment_method_summary))
        .route("/products/tags", post(handlers::resolve_tags))
        .route("/catalog/filter", post(handlers::catalog_filter))
        .route("/chat/match", post(handlers::chat_match))
        .route("/chat/sanitize", post(handlers::chat_sanitize))
        .route("/reset/issue", post(handlers::issue_reset))
        .route("/reset/verify", post(handlers::verify_reset))
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(middleware::MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(middleware::REQUEST_TIMEOUT))
        .layer(CompressionLayer::new())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn call(req: Request<Body>) -> (u16, Value) {
        let resp = build(AppState::default()).oneshot(req).await.unwrap();
        let status = resp.status().as_u16();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[test]
    fn request_timeout_is_thirty_seconds() {
        assert_eq!(middleware::REQUEST_TIMEOUT, std::time::Duration::from_secs(30));
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let req = Request::builder()
            .uri("/unknown")
            .body(Body::empty())
            .unwrap();
        let (status, body) = call(req).await;
        assert_eq!(status, 404);
        assert_eq!(body["code"], "not_found");
    }

    #[tokio::test]
    async fn health_is_degraded_without_key() {
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = call(req).await;
        assert_eq!(status, 503);
        assert_eq!(body["keyReady"], false);
    }

    #[tokio::test]
    async fn product_tags_fall_back_to_name() {
        let (status, body) = call(post_json(
            "/products/tags",
            json!({"name": "Қызыл раушан", "occasionTags": [], "recipientTags": "mom"}),
        ))
        .await;
        assert_eq!(status, 200);
        assert_eq!(body["occasionTags"], json!(["love"]));
        assert_eq!(body["recipientTags"], json!(["mom"]));
    }

    #[tokio::test]
    async fn catalog_filter_escapes_query() {
        let (status, body) = call(post_json(
            "/catalog/filter",
            json!({"q": "roses (red)", "occasion": "love"}),
        ))
        .await;
        assert_eq!(status, 200);
        assert_eq!(body["filter"]["name"]["$regex"], "roses \\(red\\)");
        assert_eq!(body["filter"]["occasionTags"]["$in"], json!(["love"]));
    }

    #[tokio::test]
    async fn chat_match_reports_tags_and_title() {
        let (status, body) = call(post_json(
            "/chat/match",
            json!({"message": "Мама, день рождения"}),
        ))
        .await;
        assert_eq!(status, 200);
        assert_eq!(body["occasion"], json!(["birthday"]));
        assert_eq!(body["recipient"], json!(["mom"]));
        assert_eq!(body["title"], "Мама, день рождения");
    }

    #[tokio::test]
    async fn chat_sanitize_strips_markdown() {
        let (status, body) = call(post_json(
            "/chat/sanitize",
            json!({"text": "**Розы** и `тюльпаны`"}),
        ))
        .await;
        assert_eq!(status, 200);
        assert_eq!(body["text"], "Розы и тюльпаны");
    }

    #[tokio::test]
    async fn malformed_json_is_rejected() {
        let req = Request::builder()
            .method("POST")
            .uri("/chat/match")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = call(req).await;
        assert_eq!(status, 400);
        assert_eq!(body["code"], "bad_request");
    }
}
