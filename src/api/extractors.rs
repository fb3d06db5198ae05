//! # Custom Extractors
//!
//! ## مفاهیم Rust + Axum:
//! - **FromRequest**: trait برای extractor‌هایی که body رو مصرف میکنن
//! - **Rejection**: نوع خطا وقتی extractor شکست میخوره

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header,
    Form, Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::AppError;

// =====================================
// JSON or Form
// =====================================
/// بدنه‌ای که میتونه JSON یا فرم URL-encoded باشه
///
/// با `Content-Type: application/json` به صورت JSON خونده میشه،
/// در غیر این صورت به صورت فرم. هر شکستی یعنی `InvalidUrl` (پاسخ 400).
///
/// # استفاده:
/// ```rust,ignore
/// async fn handler(JsonOrForm(body): JsonOrForm<ShortenRequest>) -> ... {}
/// ```
#[derive(Debug, Clone)]
pub struct JsonOrForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send + 'static,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| {
                value
                    .trim_start()
                    .to_ascii_lowercase()
                    .starts_with("application/json")
            });

        if is_json {
            let Json(data) = Json::<T>::from_request(req, state).await.map_err(|e| {
                debug!(error = %e, "Rejected JSON body");
                AppError::InvalidUrl
            })?;
            return Ok(JsonOrForm(data));
        }

        let Form(data) = Form::<T>::from_request(req, state).await.map_err(|e| {
            debug!(error = %e, "Rejected form body");
            AppError::InvalidUrl
        })?;

        Ok(JsonOrForm(data))
    }
}
