//! # Redirect Resolver
//!
//! کد کوتاه → URL اصلی

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    database::UrlStore,
    error::{AppError, OptionExt, Result},
    utils,
};

#[derive(Clone)]
pub struct RedirectResolver {
    store: Arc<dyn UrlStore>,
}

impl RedirectResolver {
    #[must_use]
    pub fn new(store: Arc<dyn UrlStore>) -> Self {
        Self { store }
    }

    /// گرفتن URL اصلی برای redirect
    ///
    /// مقدار ذخیره‌شده بدون هیچ تغییری برمیگرده.
    /// کدی که شکلش با کدهای ما نمیخونه اصلا به دیتابیس نمیرسه.
    ///
    /// # Errors
    /// `NotFound` اگه رکوردی با این کد نباشه
    #[instrument(skip(self))]
    pub async fn resolve(&self, code: &str) -> Result<String> {
        if !utils::is_valid_short_code(code) {
            debug!("Malformed short code");
            return Err(AppError::NotFound(code.to_string()));
        }

        let mapping = self.store.find_by_code(code).await?.ok_or_not_found(code)?;

        Ok(mapping.original)
    }
}

impl std::fmt::Debug for RedirectResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedirectResolver").finish_non_exhaustive()
    }
}
