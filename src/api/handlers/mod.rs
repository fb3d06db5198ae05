//! # HTTP Handlers
//!
//! هر handler یک async function هست که از extractor‌ها ورودی میگیره
//! و یه `IntoResponse` برمیگردونه.

pub mod health;
pub mod pages;
pub mod url;
