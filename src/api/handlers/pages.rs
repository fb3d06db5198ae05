//! # صفحات HTML ثابت
//!
//! `index.html` و `404.html` از `Config::views_dir` خونده میشن.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::{error, warn};

use crate::{error::Result, services::AppState};

pub const INDEX_PAGE: &str = "index.html";
pub const NOT_FOUND_PAGE: &str = "404.html";

/// صفحه اصلی
///
/// # Endpoint
/// `GET /`
///
/// اگه فایل خونده نشه، 500 برمیگرده.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>> {
    let path = state.config.views_dir.join(INDEX_PAGE);

    let page = tokio::fs::read_to_string(&path).await.map_err(|e| {
        error!(path = %path.display(), error = %e, "Failed to read index page");
        e
    })?;

    Ok(Html(page))
}

/// هر مسیر ناشناخته
///
/// اگه `404.html` هم نباشه، یه متن ساده برمیگرده.
pub async fn not_found(State(state): State<AppState>) -> Response {
    let path = state.config.views_dir.join(NOT_FOUND_PAGE);

    match tokio::fs::read_to_string(&path).await {
        Ok(page) => (StatusCode::NOT_FOUND, Html(page)).into_response(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read 404 page");
            (StatusCode::NOT_FOUND, "Not Found").into_response()
        }
    }
}
