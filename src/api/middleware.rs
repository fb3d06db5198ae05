//! # Middleware
//!
//! Middleware‌های سفارشی. بقیه (trace، timeout، CORS، compression)
//! از tower-http میان و در `api::create_router` اضافه میشن.

use std::any::Any;

use axum::{
    body::Body,
    http::{header::HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::Span;

use crate::error::AppError;

/// نام header شناسه request
pub const REQUEST_ID_HEADER: &str = "x-request-id";

// =====================================
// Request ID Middleware
// =====================================
/// اضافه کردن Request ID به هر request و response
///
/// اگه کلاینت خودش `X-Request-Id` فرستاده باشه همون استفاده میشه.
pub async fn request_id(mut request: Request<Body>, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
        .unwrap_or_else(|| nanoid::nanoid!(12));

    Span::current().record("request_id", request_id.as_str());

    let header_value = HeaderValue::from_str(&request_id).ok();

    if let Some(value) = &header_value {
        request.headers_mut().insert(REQUEST_ID_HEADER, value.clone());
    }

    let mut response = next.run(request).await;

    if let Some(value) = header_value {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

// =====================================
// Panic Handler
// =====================================
/// تبدیل panic داخل handler به پاسخ 500 با `{ "error": "..." }`
///
/// برای `tower_http::catch_panic::CatchPanicLayer::custom`
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "handler panicked".to_string()
    };

    AppError::Internal(detail).into_response()
}
