//! # shorturl
//!
//! سرویس کوتاه‌کننده URL: یه URL بلند میگیره، اعتبارسنجی میکنه، یه کد کوتاه
//! ۸ کاراکتری براش میسازه (یا کد قبلی رو برمیگردونه) و درخواست‌های کد کوتاه
//! رو با 301 به URL اصلی redirect میکنه.
//!
//! ## ساختار پروژه
//!
//! ```text
//! src/
//! ├── lib.rs          # نقطه ورود کتابخانه
//! ├── main.rs         # نقطه ورود باینری
//! ├── config/         # تنظیمات از متغیرهای محیطی
//! ├── error/          # AppError و تبدیلش به پاسخ HTTP
//! ├── database/       # SQLite pool و UrlStore
//! ├── models/         # UrlMapping و DTO‌ها
//! ├── services/       # ShorteningService و RedirectResolver
//! ├── api/            # Router، handlers، middleware
//! └── utils/          # تولید کد و اعتبارسنجی URL
//! ```
//!
//! ## مثال استفاده
//!
//! ```rust,no_run
//! use shorturl::{api::create_router, config::Config, database::Database, services::AppState};
//!
//! #[tokio::main]
//! async fn main() -> shorturl::Result<()> {
//!     let config = Config::from_env()?;
//!     let db = Database::connect(&config.database_url).await?;
//!     db.migrate().await?;
//!     let app = create_router(AppState::new(db, config)?);
//!     # let _ = app;
//!     Ok(())
//! }
//! ```

// =====================================
// Module Declarations
// =====================================

/// ماژول مدیریت تنظیمات برنامه
pub mod config;

/// ماژول تعریف و مدیریت خطاها
pub mod error;

/// ماژول ارتباط با دیتابیس
pub mod database;

/// ماژول مدل‌های داده
pub mod models;

/// ماژول سرویس‌ها (Business Logic)
pub mod services;

/// ماژول API و HTTP Handlers
pub mod api;

/// ماژول توابع کمکی
pub mod utils;

// =====================================
// Re-exports
// =====================================

pub use error::{AppError, Result};

/// آیتم‌های پرکاربرد
///
/// ```rust
/// use shorturl::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::database::{Database, UrlStore};
    pub use crate::error::{AppError, Result};
    pub use crate::models::*;
    pub use crate::services::*;
}
