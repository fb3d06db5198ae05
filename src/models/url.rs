//! # مدل UrlMapping
//!
//! تنها entity برنامه: ارتباط بین کد کوتاه و URL اصلی

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// =====================================
// UrlMapping Entity
// =====================================
/// یه رکورد ذخیره‌شده
///
/// # مفاهیم:
/// - `#[derive(FromRow)]`: تبدیل خودکار از ردیف دیتابیس
/// - رکورد بعد از ساخت هیچوقت تغییر نمیکنه و حذف نمیشه
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UrlMapping {
    /// URL اصلی که کاربر فرستاده
    pub original: String,

    /// کد کوتاه یکتا
    pub short: String,

    /// زمان ساخت
    pub created_at: DateTime<Utc>,
}

impl UrlMapping {
    /// ساخت رکورد جدید با زمان فعلی
    #[must_use]
    pub fn new(original: impl Into<String>, short: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            short: short.into(),
            created_at: Utc::now(),
        }
    }
}
