pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/analyze", post(handlers::handle_analyze))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::backend::NullBackend;
    use crate::auth::USER_COOKIE_KEY;
    use crate::billing::{InMemoryAccessStore, UserAccess};
    use crate::config::Config;

    fn test_state(store: InMemoryAccessStore) -> AppState {
        AppState {
            access: Arc::new(store),
            backend: Arc::new(NullBackend),
            config: Config {
                database_url: "postgres://unused".to_string(),
                anthropic_api_key: None,
                llm_timeout_secs: 30,
                port: 0,
                rust_log: "info".to_string(),
            },
        }
    }

    fn store_with_credits(credits: i64) -> InMemoryAccessStore {
        let store = InMemoryAccessStore::new();
        store.insert(UserAccess {
            email: "dev@example.com".to_string(),
            credits,
            membership_plan: None,
            membership_expires_at: None,
        });
        store
    }

    fn analyze_request(body: Value, with_cookie: bool) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header(header::CONTENT_TYPE, "application/json");
        if with_cookie {
            builder = builder.header(
                header::COOKIE,
                format!("{USER_COOKIE_KEY}=dev@example.com"),
            );
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
        let response = build_router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(test_state(InMemoryAccessStore::new()), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_analyze_without_session_is_401() {
        let body = json!({"resumeText": "r", "jobDescription": "j"});
        let (status, body) = send(test_state(store_with_credits(1)), analyze_request(body, false)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_analyze_with_empty_input_is_400() {
        let body = json!({"resumeText": "  ", "jobDescription": "a job"});
        let (status, body) = send(test_state(store_with_credits(1)), analyze_request(body, true)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_with_missing_fields_is_400() {
        let (status, _) = send(test_state(store_with_credits(1)), analyze_request(json!({}), true)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_without_credits_is_402() {
        let body = json!({
            "resumeText": "Experienced React developer.",
            "jobDescription": "Looking for React, TypeScript, Agile experience."
        });
        let (status, body) = send(test_state(store_with_credits(0)), analyze_request(body, true)).await;
        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
        assert_eq!(body["error"]["code"], "PAYMENT_REQUIRED");
    }

    #[tokio::test]
    async fn test_analyze_happy_path_returns_full_bundle() {
        let body = json!({
            "resumeText": "Experienced React developer.",
            "jobDescription": "Looking for React, TypeScript, Agile experience."
        });
        let (status, body) = send(test_state(store_with_credits(1)), analyze_request(body, true)).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["analysis"].as_str().unwrap().contains("typescript"));
        assert!(!body["rewrittenResume"].as_str().unwrap().is_empty());
        assert!(!body["coverLetter"].as_str().unwrap().is_empty());
        assert!(!body["validationSummary"].as_str().unwrap().is_empty());
        assert_eq!(body["baselineMatchScore"], 40);
        assert!(body["improvedMatchScore"].is_u64());
        assert_eq!(body["creditsRemaining"], 0);
    }
}
