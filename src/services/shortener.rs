//! # سرویس کوتاه‌سازی
//!
//! lookup-or-create: اگه URL قبلا ذخیره شده همون رکورد، وگرنه رکورد جدید.
//!
//! ## مفاهیم Rust:
//! - Dependency Injection: store و generator از بیرون تزریق میشن
//! - `Arc<dyn Trait>`: اشتراک یه پیاده‌سازی پویا بین threads

use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::ReachabilityProbe;
use crate::{
    database::{InsertOutcome, UrlStore},
    error::{AppError, Result},
    models::UrlMapping,
    utils,
};

/// حداکثر تعداد تلاش برای پیدا کردن کد آزاد
pub const MAX_CODE_ATTEMPTS: usize = 5;

/// تابع تولید کد کوتاه
pub type CodeGenerator = Arc<dyn Fn() -> String + Send + Sync>;

/// سرویس ساخت لینک کوتاه
#[derive(Clone)]
pub struct ShorteningService {
    store: Arc<dyn UrlStore>,
    generator: CodeGenerator,
    probe: Option<ReachabilityProbe>,
}

impl ShorteningService {
    #[must_use]
    pub fn new(store: Arc<dyn UrlStore>) -> Self {
        Self {
            store,
            generator: Arc::new(utils::generate_short_code),
            probe: None,
        }
    }

    /// جایگزینی تولیدکننده کد (برای تست collision)
    #[must_use]
    pub fn with_generator(mut self, generator: CodeGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// فعال کردن بررسی در دسترس بودن URL
    #[must_use]
    pub fn with_probe(mut self, probe: ReachabilityProbe) -> Self {
        self.probe = Some(probe);
        self
    }

    /// ساخت (یا پیدا کردن) لینک کوتاه برای `original`
    ///
    /// # Errors
    /// - `InvalidUrl`: URL نامعتبر یا (با probe فعال) در دسترس نیست
    /// - `StoreExhausted`: بعد از `MAX_CODE_ATTEMPTS` تلاش کد آزاد پیدا نشد
    /// - `StoreUnavailable`: خطای دیتابیس
    #[instrument(skip(self))]
    pub async fn shorten(&self, original: &str) -> Result<UrlMapping> {
        // Step 1: اعتبارسنجی
        if !utils::is_valid_url(original) {
            return Err(AppError::InvalidUrl);
        }

        if let Some(probe) = &self.probe {
            if !probe.is_reachable(original).await {
                warn!("Rejected unreachable URL");
                return Err(AppError::InvalidUrl);
            }
        }

        // Step 2: رکورد موجود
        if let Some(existing) = self.store.find_by_original(original).await? {
            return Ok(existing);
        }

        // Step 3: کد جدید با retry روی collision
        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let mapping = UrlMapping::new(original, (self.generator)());

            match self.store.insert_if_absent(&mapping).await? {
                InsertOutcome::Inserted(created) => {
                    info!(short_code = %created.short, attempt, "Created new short URL");
                    return Ok(created);
                }
                InsertOutcome::OriginalTaken(existing) => return Ok(existing),
                InsertOutcome::CodeTaken => {
                    warn!(short_code = %mapping.short, attempt, "Short code collision, retrying");
                }
            }
        }

        Err(AppError::StoreExhausted {
            attempts: MAX_CODE_ATTEMPTS,
        })
    }
}

impl std::fmt::Debug for ShorteningService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShorteningService")
            .field("probe", &self.probe.is_some())
            .finish_non_exhaustive()
    }
}
