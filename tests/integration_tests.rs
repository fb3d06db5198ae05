//! # تست‌های Integration
//!
//! Router کامل با دیتابیس in-memory، بدون باز کردن پورت
//! (`tower::ServiceExt::oneshot`).
//!
//! ## اجرای تست‌ها:
//! ```bash
//! cargo test                           # همه تست‌ها
//! cargo test --test integration_tests  # فقط این فایل
//! ```

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use shorturl::{
    api::create_router,
    config::{Config, ConfigBuilder},
    database::Database,
    services::AppState,
    utils,
};

// =====================================
// Helpers
// =====================================

fn test_config() -> Config {
    ConfigBuilder::new()
        .views_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/views"))
        .build()
}

async fn test_state(config: Config) -> AppState {
    let db = Database::in_memory().await.expect("in-memory database");
    AppState::new(db, config).expect("app state")
}

async fn test_app() -> Router {
    create_router(test_state(test_config()).await)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

// =====================================
// End-to-end
// =====================================
mod http_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_shorten_then_redirect() {
        let app = test_app().await;

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/shorturl/new",
                json!({ "url": "https://example.com/a" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["original_url"], "https://example.com/a");

        let token = body["short_url"].as_str().unwrap().to_string();
        assert_eq!(token.len(), 8);
        assert!(utils::is_valid_short_code(&token));

        let response = app
            .oneshot(get(&format!("/api/shorturl/{token}")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://example.com/a"
        );
    }

    #[tokio::test]
    async fn test_repeated_submission_returns_same_token() {
        let app = test_app().await;
        let body = json!({ "url": "https://example.com/repeat" });

        let first = body_json(
            app.clone()
                .oneshot(post_json("/api/shorturl/new", body.clone()))
                .await
                .unwrap(),
        )
        .await;
        let second = body_json(
            app.oneshot(post_json("/api/shorturl/new", body))
                .await
                .unwrap(),
        )
        .await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_form_body_is_accepted() {
        let app = test_app().await;

        let request = Request::builder()
            .method("POST")
            .uri("/api/shorturl/new")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("url=https%3A%2F%2Fexample.com%2Fform"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["original_url"], "https://example.com/form");
    }

    #[tokio::test]
    async fn test_json_content_type_is_case_insensitive() {
        let app = test_app().await;

        let request = Request::builder()
            .method("POST")
            .uri("/api/shorturl/new")
            .header(header::CONTENT_TYPE, "Application/JSON; charset=utf-8")
            .body(Body::from(json!({ "url": "https://example.com/mixed" }).to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["original_url"], "https://example.com/mixed");
    }

    #[tokio::test]
    async fn test_invalid_url_is_400() {
        let app = test_app().await;

        let response = app
            .oneshot(post_json("/api/shorturl/new", json!({ "url": "notaurl" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": "invalid url" }));
    }

    #[tokio::test]
    async fn test_missing_or_malformed_body_is_400() {
        let app = test_app().await;

        for request in [
            post_json("/api/shorturl/new", json!({})),
            post_json("/api/shorturl/new", json!({ "url": 42 })),
            Request::builder()
                .method("POST")
                .uri("/api/shorturl/new")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        ] {
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(body_json(response).await, json!({ "error": "invalid url" }));
        }
    }

    #[tokio::test]
    async fn test_unknown_code_is_400() {
        let app = test_app().await;

        for uri in ["/api/shorturl/doesnotexist", "/api/shorturl/abcdEFGH"] {
            let response = app.clone().oneshot(get(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(body_json(response).await, json!({ "error": "invalid url" }));
        }
    }

    #[tokio::test]
    async fn test_store_failure_is_500_with_message() {
        let db = Database::in_memory().await.unwrap();
        let app = create_router(AppState::new(db.clone(), test_config()).unwrap());
        db.pool().close().await;

        let response = app
            .oneshot(post_json(
                "/api/shorturl/new",
                json!({ "url": "https://example.com/down" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        let body = body_json(response).await;
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("store unavailable"));
    }

    #[tokio::test]
    async fn test_index_page() {
        let app = test_app().await;

        let response = app.oneshot(get("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        assert!(body_string(response).await.contains("/api/shorturl/new"));
    }

    #[tokio::test]
    async fn test_missing_index_page_is_500() {
        let config = ConfigBuilder::new()
            .views_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/no-such-views"))
            .build();
        let app = create_router(test_state(config).await);

        let response = app.oneshot(get("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().starts_with("io error"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404_page() {
        let app = test_app().await;

        let response = app.oneshot(get("/no/such/page")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_string(response).await.contains("404"));
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app().await;

        let response = app.oneshot(get("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], true);
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let app = test_app().await;

        let request = Request::builder()
            .uri("/health")
            .header("x-request-id", "req-123")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.headers()["x-request-id"], "req-123");
    }
}

// =====================================
// Service-level properties
// =====================================
mod service_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shorturl::{
        database::{SqliteUrlStore, UrlStore},
        AppError,
    };

    #[tokio::test]
    async fn test_round_trip() {
        let state = test_state(test_config()).await;

        for url in [
            "https://example.com/a",
            "example.org",
            "http://10.0.0.1:8080/x?y=z#frag",
        ] {
            let mapping = state.shortener.shorten(url).await.unwrap();
            assert_eq!(state.resolver.resolve(&mapping.short).await.unwrap(), url);
        }
    }

    #[tokio::test]
    async fn test_unknown_code_is_not_found() {
        let state = test_state(test_config()).await;

        let result = state.resolver.resolve("zzzzzzzz").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_shorten_creates_one_record() {
        let db = Database::in_memory().await.unwrap();
        let state = AppState::new(db.clone(), test_config()).unwrap();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let shortener = state.shortener.clone();
                tokio::spawn(async move { shortener.shorten("https://example.com/race").await })
            })
            .collect();

        let mut codes = Vec::new();
        for handle in handles {
            codes.push(handle.await.unwrap().unwrap().short);
        }

        codes.dedup();
        assert_eq!(codes.len(), 1);

        let store = SqliteUrlStore::new(db);
        assert_eq!(store.count().await.unwrap(), 1);
        assert!(store
            .find_by_original("https://example.com/race")
            .await
            .unwrap()
            .is_some());
    }
}

// =====================================
// Property-Based Tests
// =====================================
mod property_tests {
    use proptest::prelude::*;
    use shorturl::utils;

    proptest! {
        #[test]
        fn generated_codes_are_valid(_seed in 0u8..64) {
            let code = utils::generate_short_code();
            prop_assert_eq!(code.len(), utils::SHORT_CODE_LENGTH);
            prop_assert!(utils::is_valid_short_code(&code));
        }

        #[test]
        fn well_formed_domains_are_valid(
            scheme in prop::sample::select(vec!["", "http://", "https://", "HTTPS://"]),
            label in "[a-z0-9]{1,12}",
            tld in "[a-z]{2,6}",
            path in "(/[a-zA-Z0-9_.~-]{0,8}){0,3}",
        ) {
            let url = format!("{scheme}{label}.{tld}{path}");
            prop_assert!(utils::is_valid_url(&url), "{}", url);
        }

        #[test]
        fn whitespace_makes_url_invalid(
            label in "[a-z]{1,8}",
            junk in "[ \t\n]{1,3}",
        ) {
            let url = format!("https://{label}{junk}.com");
            prop_assert!(!utils::is_valid_url(&url), "{}", url);
        }
    }
}
