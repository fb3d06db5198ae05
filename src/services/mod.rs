//! # ماژول سرویس‌ها (Business Logic Layer)
//!
//! ## لایه‌بندی معماری
//!
//! ```text
//! ┌─────────────────┐
//! │    API Layer    │  <-- HTTP handlers (axum)
//! ├─────────────────┤
//! │  Service Layer  │  <-- ShorteningService / RedirectResolver (اینجا!)
//! ├─────────────────┤
//! │   UrlStore      │  <-- Repository trait
//! ├─────────────────┤
//! │    Database     │  <-- SQLite
//! └─────────────────┘
//! ```
//!
//! ## مفاهیم Rust:
//! - **Dependency Injection**: store یک بار ساخته میشه و به سرویس‌ها داده میشه
//! - **Arc<T>**: اشتراک امن بین threads

mod reachability;
mod resolver;
mod shortener;

pub use reachability::*;
pub use resolver::*;
pub use shortener::*;

use std::sync::Arc;

use tracing::info;

use crate::{
    config::Config,
    database::{Database, SqliteUrlStore, UrlStore},
    error::{AppError, Result},
};

// =====================================
// Application State
// =====================================
/// وضعیت برنامه که بین همه handlers اشتراک‌گذاری میشه
///
/// هیچ singleton سراسری نداریم؛ همه چیز از اینجا به handler میرسه.
#[derive(Clone, Debug)]
pub struct AppState {
    /// تنظیمات برنامه
    pub config: Arc<Config>,

    /// برای health check
    pub database: Database,

    pub shortener: Arc<ShorteningService>,

    pub resolver: Arc<RedirectResolver>,
}

impl AppState {
    /// ساخت AppState از دیتابیس و تنظیمات
    ///
    /// # Errors
    /// `Config` اگه بررسی در دسترس بودن فعال باشه و HTTP client ساخته نشه
    pub fn new(database: Database, config: Config) -> Result<Self> {
        let store: Arc<dyn UrlStore> = Arc::new(SqliteUrlStore::new(database.clone()));

        let mut shortener = ShorteningService::new(store.clone());
        if config.check_reachability {
            let probe = ReachabilityProbe::new().map_err(|e| {
                AppError::Config(format!("cannot build reachability client: {e}"))
            })?;
            shortener = shortener.with_probe(probe);
            info!("URL reachability check enabled");
        }

        Ok(Self {
            config: Arc::new(config),
            database,
            shortener: Arc::new(shortener),
            resolver: Arc::new(RedirectResolver::new(store)),
        })
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}
