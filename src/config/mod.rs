//! # ماژول تنظیمات (Configuration)
//!
//! تنظیمات برنامه فقط یک بار، موقع استارت، از متغیرهای محیطی خونده میشن.
//!
//! ## مفاهیم Rust:
//! - **Default Trait**: مقادیر پیش‌فرض
//! - **Serde**: سریالایز/دسریالایز
//! - **Builder Pattern**: ساخت تدریجی آبجکت (بیشتر برای تست‌ها)

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// تنظیمات اصلی برنامه
///
/// # مثال
/// ```rust
/// use shorturl::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.port, 5000);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// آدرس هاست سرور
    pub host: String,

    /// پورت سرور
    pub port: u16,

    /// آدرس اتصال به دیتابیس
    pub database_url: String,

    /// پوشه صفحات HTML ثابت (`index.html` و `404.html`)
    pub views_dir: PathBuf,

    /// حداکثر زمان پردازش هر request (ثانیه)
    pub request_timeout_secs: u64,

    /// قبل از ساخت لینک، در دسترس بودن URL با یه request واقعی چک بشه؟
    pub check_reachability: bool,

    /// محیط اجرا (development, production)
    pub environment: Environment,
}

/// محیط اجرای برنامه
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Testing,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl From<String> for Environment {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            "testing" | "test" => Environment::Testing,
            _ => Environment::Development,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            database_url: "sqlite://data/urls.db?mode=rwc".to_string(),
            views_dir: PathBuf::from("views"),
            request_timeout_secs: 30,
            check_reachability: false,
            environment: Environment::Development,
        }
    }
}

impl Config {
    /// ساخت تنظیمات از متغیرهای محیطی
    ///
    /// هر متغیری که نباشه (یا parse نشه) مقدار پیش‌فرضش رو میگیره.
    ///
    /// # Errors
    /// خطا برمیگردونه اگه مقادیر نهایی معتبر نباشن (مثلا `PORT=0`)
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let get_env = |key: &str| env::var(key).ok().filter(|v| !v.trim().is_empty());

        let port = get_env("PORT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port);

        let request_timeout_secs = get_env("REQUEST_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.request_timeout_secs);

        let check_reachability = get_env("CHECK_URL_REACHABILITY")
            .map(|v| parse_flag(&v))
            .unwrap_or(defaults.check_reachability);

        let config = Self {
            host: get_env("HOST").unwrap_or(defaults.host),
            port,
            database_url: get_env("DATABASE_URL").unwrap_or(defaults.database_url),
            views_dir: get_env("VIEWS_DIR").map_or(defaults.views_dir, PathBuf::from),
            request_timeout_secs,
            check_reachability,
            environment: get_env("ENVIRONMENT")
                .map_or(defaults.environment, Environment::from),
        };

        config.validate()?;
        Ok(config)
    }

    /// اعتبارسنجی تنظیمات
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(AppError::Config("PORT cannot be 0".to_string()));
        }

        if self.request_timeout_secs == 0 {
            return Err(AppError::Config(
                "REQUEST_TIMEOUT_SECS must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// آدرس کامل سرور
    #[must_use]
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// `true`/`1`/`yes`/`on` (بدون حساسیت به حروف) یعنی فعال
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

// =====================================
// Builder Pattern
// =====================================
/// ساخت Config با Builder Pattern
///
/// # مثال
/// ```rust
/// use shorturl::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .port(8080)
///     .views_dir("static")
///     .build();
/// assert_eq!(config.port, 8080);
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    #[must_use]
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database_url = url.into();
        self
    }

    #[must_use]
    pub fn views_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.views_dir = dir.into();
        self
    }

    #[must_use]
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn check_reachability(mut self, enabled: bool) -> Self {
        self.config.check_reachability = enabled;
        self
    }

    #[must_use]
    pub fn environment(mut self, env: Environment) -> Self {
        self.config.environment = env;
        self
    }

    #[must_use]
    pub fn build(self) -> Config {
        self.config
    }

    /// ساخت Config با اعتبارسنجی
    ///
    /// # Errors
    /// خطا برمیگردونه اگه اعتبارسنجی fail بشه
    pub fn build_validated(self) -> Result<Config> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}
