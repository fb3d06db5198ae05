//! # Data Transfer Objects (DTOs)
//!
//! شکل ورودی و خروجی JSON در API

use serde::{Deserialize, Serialize};

use super::UrlMapping;

// =====================================
// Shorten
// =====================================
/// بدنه `POST /api/shorturl/new` (JSON یا فرم)
///
/// `url` اختیاریه تا نبودنش هم به همون خطای `invalid url` برسه،
/// نه به rejection پیش‌فرض axum.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShortenRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// پاسخ موفق ساخت لینک
///
/// ```json
/// { "original_url": "https://example.com/a", "short_url": "Xy3_-aB9" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub original_url: String,
    pub short_url: String,
}

impl From<UrlMapping> for ShortenResponse {
    fn from(mapping: UrlMapping) -> Self {
        Self {
            original_url: mapping.original,
            short_url: mapping.short,
        }
    }
}

// =====================================
// Health Check
// =====================================
/// پاسخ health check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: bool,
}

impl HealthResponse {
    #[must_use]
    pub fn healthy(database_ok: bool) -> Self {
        Self {
            status: if database_ok { "healthy" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: database_ok,
        }
    }
}
