//! # URL Handlers
//!
//! ساخت لینک کوتاه و redirect

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::{
    api::extractors::JsonOrForm,
    error::{AppError, Result},
    models::{ShortenRequest, ShortenResponse},
    services::AppState,
};

// =====================================
// Create Short URL
// =====================================
/// ساخت لینک کوتاه (یا برگردوندن لینک موجود)
///
/// # Endpoint
/// `POST /api/shorturl/new`
///
/// # Request Body
/// JSON یا فرم:
/// ```json
/// { "url": "https://example.com/a" }
/// ```
///
/// # Response
/// - 201 `{ "original_url": "...", "short_url": "<8-char token>" }`
/// - 400 `{ "error": "invalid url" }`
pub async fn create_short_url(
    State(state): State<AppState>,
    JsonOrForm(request): JsonOrForm<ShortenRequest>,
) -> Result<impl IntoResponse> {
    let url = request.url.ok_or(AppError::InvalidUrl)?;

    let mapping = state.shortener.shorten(&url).await?;

    Ok((StatusCode::CREATED, Json(ShortenResponse::from(mapping))))
}

// =====================================
// Redirect
// =====================================
/// Redirect دائمی به URL اصلی
///
/// `axum::response::Redirect::permanent` کد 308 میده؛ اینجا 301 لازمه.
///
/// # Endpoint
/// `GET /api/shorturl/:short_url`
///
/// # Response
/// - 301 با `Location: <original>`
/// - 400 `{ "error": "invalid url" }` اگه کد پیدا نشه
pub async fn redirect(
    State(state): State<AppState>,
    Path(short_url): Path<String>,
) -> Result<Response> {
    let original = state.resolver.resolve(&short_url).await?;

    let location = HeaderValue::from_str(&original).map_err(|e| {
        AppError::Internal(format!("stored URL is not a valid header value: {e}"))
    })?;

    info!(short_code = %short_url, "Redirecting");

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response())
}
