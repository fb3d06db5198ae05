//! # Repository Pattern
//!
//! یه لایه انتزاعی بین سرویس‌ها و دیتابیس.
//! سرویس‌ها فقط با `UrlStore` کار میکنن، پس توی تست میشه mock‌اش کرد.
//!
//! ## مفاهیم Rust:
//! - **Traits**: تعریف interface
//! - **async_trait**: امکان async در traits و استفاده به صورت `dyn`
//! - **Enum برای نتیجه**: حالت‌های مختلف insert به جای `bool`

use async_trait::async_trait;
use tracing::debug;

use super::Database;
use crate::{error::Result, models::UrlMapping};

// =====================================
// Insert Outcome
// =====================================
/// نتیجه `insert_if_absent`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// رکورد جدید ذخیره شد
    Inserted(UrlMapping),

    /// یه request دیگه زودتر همین URL اصلی رو ذخیره کرده؛ رکورد اون برمیگرده
    OriginalTaken(UrlMapping),

    /// کد کوتاه قبلا برای URL دیگه‌ای استفاده شده (collision)
    CodeTaken,
}

// =====================================
// Store Trait
// =====================================
/// interface محدود برای دسترسی به نگاشت‌ها
///
/// `insert_if_absent` باید اتمیک باشه (نه read-then-write)،
/// چون یکتا بودن کد فقط همینجا تضمین میشه.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlStore: Send + Sync {
    /// پیدا کردن با URL اصلی
    async fn find_by_original(&self, original: &str) -> Result<Option<UrlMapping>>;

    /// پیدا کردن با کد کوتاه
    async fn find_by_code(&self, code: &str) -> Result<Option<UrlMapping>>;

    /// ذخیره رکورد، فقط اگه نه کد و نه URL اصلی قبلا وجود داشته باشن
    async fn insert_if_absent(&self, mapping: &UrlMapping) -> Result<InsertOutcome>;
}

// =====================================
// SQLite Store
// =====================================
/// پیاده‌سازی `UrlStore` روی SQLite
#[derive(Debug, Clone)]
pub struct SqliteUrlStore {
    db: Database,
}

impl SqliteUrlStore {
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// تعداد کل رکوردها
    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM url_mappings")
            .fetch_one(self.db.pool())
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl UrlStore for SqliteUrlStore {
    async fn find_by_original(&self, original: &str) -> Result<Option<UrlMapping>> {
        let mapping = sqlx::query_as::<_, UrlMapping>(
            r#"
            SELECT original, short, created_at
            FROM url_mappings
            WHERE original = ?
            "#,
        )
        .bind(original)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(mapping)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlMapping>> {
        let mapping = sqlx::query_as::<_, UrlMapping>(
            r#"
            SELECT original, short, created_at
            FROM url_mappings
            WHERE short = ?
            "#,
        )
        .bind(code)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(mapping)
    }

    async fn insert_if_absent(&self, mapping: &UrlMapping) -> Result<InsertOutcome> {
        // INSERT OR IGNORE روی هر دو ایندکس یکتا (short و original) اتمیکه
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO url_mappings (short, original, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&mapping.short)
        .bind(&mapping.original)
        .bind(mapping.created_at)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 1 {
            return Ok(InsertOutcome::Inserted(mapping.clone()));
        }

        // insert نادیده گرفته شد؛ ببینیم کدوم ایندکس مانع شده
        if let Some(existing) = self.find_by_original(&mapping.original).await? {
            debug!(short_code = %existing.short, "Original URL stored concurrently");
            return Ok(InsertOutcome::OriginalTaken(existing));
        }

        debug!(short_code = %mapping.short, "Short code collision");
        Ok(InsertOutcome::CodeTaken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    async fn store() -> SqliteUrlStore {
        SqliteUrlStore::new(Database::in_memory().await.unwrap())
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = store().await;
        let mapping = UrlMapping::new("https://example.com/a", "abcdEFGH");

        let outcome = store.insert_if_absent(&mapping).await.unwrap();
        assert_eq!(outcome, InsertOutcome::Inserted(mapping.clone()));

        let by_code = store.find_by_code("abcdEFGH").await.unwrap().unwrap();
        assert_eq!(by_code.original, "https://example.com/a");

        let by_original = store
            .find_by_original("https://example.com/a")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_original.short, "abcdEFGH");
    }

    #[tokio::test]
    async fn test_missing_records() {
        let store = store().await;
        assert!(store.find_by_code("nothere0").await.unwrap().is_none());
        assert!(store
            .find_by_original("https://example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_code_collision_is_reported() {
        let store = store().await;
        store
            .insert_if_absent(&UrlMapping::new("https://example.com/a", "samecode"))
            .await
            .unwrap();

        let outcome = store
            .insert_if_absent(&UrlMapping::new("https://example.com/b", "samecode"))
            .await
            .unwrap();

        assert_eq!(outcome, InsertOutcome::CodeTaken);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_original_returns_first_record() {
        let store = store().await;
        store
            .insert_if_absent(&UrlMapping::new("https://example.com/a", "first000"))
            .await
            .unwrap();

        let outcome = store
            .insert_if_absent(&UrlMapping::new("https://example.com/a", "second00"))
            .await
            .unwrap();

        match outcome {
            InsertOutcome::OriginalTaken(existing) => assert_eq!(existing.short, "first000"),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(store.count().await.unwrap(), 1);
    }
}
