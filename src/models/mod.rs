//! # ماژول مدل‌ها (Domain Models)
//!
//! ## تفاوت انواع مدل:
//! - **Entity** (`UrlMapping`): داده‌ای که در دیتابیس ذخیره میشه
//! - **DTO**: برای دریافت/ارسال از API

mod url;
mod dto;

// Re-export همه مدل‌ها
pub use url::*;
pub use dto::*;
