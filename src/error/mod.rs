//! # ماژول مدیریت خطاها (Error Handling)
//!
//! همه خطاهای برنامه اینجا تعریف میشن و از همینجا به پاسخ HTTP تبدیل میشن.
//!
//! ## مفاهیم Rust:
//! - **thiserror**: derive macro برای Error trait
//! - **From Trait**: تبدیل خودکار خطای کتابخانه‌ها با `#[from]`
//! - **Result Type Alias**: alias برای ساده‌تر شدن کد
//!
//! ## نگاشت خطا به HTTP
//!
//! | خطا | وضعیت | بدنه |
//! |---|---|---|
//! | `InvalidUrl` | 400 | `{"error":"invalid url"}` |
//! | `NotFound` | 400 | `{"error":"invalid url"}` |
//! | بقیه | 500 | `{"error":"<message>"}` |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// پیامی که کلاینت برای هر خطای ورودی میبینه
pub const INVALID_URL_MESSAGE: &str = "invalid url";

// =====================================
// Result Type Alias
// =====================================
/// نوع Result سفارشی برنامه
///
/// به جای `Result<UrlMapping, AppError>` مینویسیم `Result<UrlMapping>`
pub type Result<T, E = AppError> = std::result::Result<T, E>;

// =====================================
// Custom Error Enum
// =====================================
/// خطای اصلی برنامه
#[derive(Debug, Error)]
pub enum AppError {
    // ----------------------------------------
    // خطاهای کاربر (4xx)
    // ----------------------------------------
    /// URL ورودی نامعتبر یا ناموجود
    #[error("invalid url")]
    InvalidUrl,

    /// کد کوتاه در دیتابیس نیست
    #[error("short code '{0}' not found")]
    NotFound(String),

    // ----------------------------------------
    // خطاهای سرور (5xx)
    // ----------------------------------------
    /// بعد از چند بار تلاش هنوز کد تکراری تولید شده
    #[error("could not allocate a unique short code after {attempts} attempts")]
    StoreExhausted { attempts: usize },

    /// خطای دیتابیس (اتصال، کوئری، migration)
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] sqlx::Error),

    /// خطای IO (مثلا خوندن فایل HTML)
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// خطای تنظیمات
    #[error("configuration error: {0}")]
    Config(String),

    /// خطای سرور HTTP
    #[error("server error: {0}")]
    Server(String),

    /// خطای داخلی
    #[error("internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code متناسب با خطا
    ///
    /// `NotFound` عمدا 400 برمیگردونه، نه 404؛ کلاینت قدیمی همین رو انتظار داره.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidUrl | Self::NotFound(_) => StatusCode::BAD_REQUEST,

            Self::StoreExhausted { .. }
            | Self::StoreUnavailable(_)
            | Self::Io(_)
            | Self::Config(_)
            | Self::Server(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// آیا این یه خطای سرور هست؟
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// متنی که در فیلد `error` پاسخ قرار میگیره
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::InvalidUrl | Self::NotFound(_) => INVALID_URL_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

// =====================================
// Error Response DTO
// =====================================
/// بدنه JSON پاسخ خطا: `{ "error": "..." }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

// =====================================
// IntoResponse Implementation
// =====================================
/// تبدیل AppError به Response HTTP
///
/// با این impl هر handler میتونه مستقیم `Result<T, AppError>` برگردونه.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            error!(error = %self, "Server error occurred");
        }

        let status = self.status_code();
        (status, Json(ErrorResponse::new(self.public_message()))).into_response()
    }
}

// =====================================
// Option Extensions
// =====================================
/// Extension trait برای Option
pub trait OptionExt<T> {
    /// تبدیل None به `AppError::NotFound`
    fn ok_or_not_found(self, code: impl Into<String>) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, code: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| AppError::NotFound(code.into()))
    }
}
