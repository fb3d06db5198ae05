//! # لایه API
//!
//! ## ساختار URL‌ها:
//! - `GET /` - صفحه اصلی
//! - `POST /api/shorturl/new` - ساخت لینک کوتاه
//! - `GET /api/shorturl/:short_url` - Redirect به URL اصلی
//! - `GET /health` - Health check
//! - هر مسیر دیگه - صفحه 404
//!
//! ## مفاهیم Rust + Axum:
//! - **Router** و **State**
//! - **Middleware** با Tower

mod extractors;
pub mod handlers;
mod middleware;

pub use extractors::*;
pub use middleware::*;

use axum::{
    body::Body,
    http::Request,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info_span;

use crate::services::AppState;

// =====================================
// Router Builder
// =====================================
/// ساخت Router اصلی برنامه
///
/// ترتیب middleware‌ها از بیرون به داخل: trace، request id، panic،
/// CORS، compression، timeout.
pub fn create_router(state: AppState) -> Router {
    let timeout = state.config.request_timeout();

    Router::new()
        .route("/", get(handlers::pages::index))
        .nest("/api", api_routes())
        .route("/health", get(handlers::health::health_check))
        .fallback(handlers::pages::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                        info_span!(
                            "http_request",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id = tracing::field::Empty,
                        )
                    }),
                )
                .layer(axum_middleware::from_fn(request_id))
                .layer(CatchPanicLayer::custom(panic_response))
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(timeout)),
        )
        .with_state(state)
}

/// Route‌های API
fn api_routes() -> Router<AppState> {
    Router::new().nest("/shorturl", shorturl_routes())
}

fn shorturl_routes() -> Router<AppState> {
    Router::new()
        .route("/new", post(handlers::url::create_short_url))
        .route("/:short_url", get(handlers::url::redirect))
}
