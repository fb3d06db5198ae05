//! # ماژول دیتابیس (Database Layer)
//!
//! اتصال به SQLite، اجرای migration‌ها و repository نگاشت‌ها.
//!
//! ## مفاهیم Rust:
//! - **Arc<T>**: اشتراک pool بین handlers
//! - **async_trait**: async در traits (برای `UrlStore`)
//!
//! ## الگوهای طراحی:
//! - Repository Pattern: سرویس‌ها فقط trait `UrlStore` رو میشناسن
//! - Connection Pool: مدیریت اتصالات دیتابیس

mod repository;

pub use repository::*;

use std::sync::Arc;
use std::time::Duration;

use sqlx::{
    migrate::Migrator,
    sqlite::{SqlitePool, SqlitePoolOptions},
};
use tracing::debug;

use crate::error::Result;

// مسیر migration‌ها
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

// =====================================
// Database Connection
// =====================================
/// اتصال به دیتابیس با Connection Pool
///
/// Clone ارزونه: فقط شمارنده `Arc` زیاد میشه.
#[derive(Debug, Clone)]
pub struct Database {
    pool: Arc<SqlitePool>,
}

impl Database {
    /// اتصال به دیتابیس
    ///
    /// # Arguments
    /// * `database_url` - آدرس دیتابیس (مثلا `sqlite://data/urls.db?mode=rwc`)
    ///
    /// # Errors
    /// `StoreUnavailable` اگه اتصال موفق نباشه، `Io` اگه پوشه فایل ساخته نشه
    pub async fn connect(database_url: impl AsRef<str>) -> Result<Self> {
        let url = database_url.as_ref();

        // ساخت پوشه فایل SQLite اگه وجود نداره
        if let Some(path) = url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if let Some(parent) = std::path::Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .connect(url)
            .await?;

        debug!(database_url = %url, "Connection pool ready");

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// دیتابیس in-memory با migration‌های اجرا شده
    ///
    /// فقط یک اتصال داره و هیچوقت بسته نمیشه، چون با بسته شدن اتصال
    /// کل داده‌های `:memory:` از بین میره. برای تست‌ها.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let db = Self {
            pool: Arc::new(pool),
        };

        db.migrate().await?;
        Ok(db)
    }

    /// اجرای migration‌ها
    pub async fn migrate(&self) -> Result<()> {
        MIGRATOR
            .run(&*self.pool)
            .await
            .map_err(sqlx::Error::from)?;
        Ok(())
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// بررسی سلامت دیتابیس
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&*self.pool).await?;
        Ok(())
    }
}
