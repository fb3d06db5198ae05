//! # بررسی در دسترس بودن URL
//!
//! یه قابلیت اضافه و اختیاری (`CHECK_URL_REACHABILITY=true`).
//! پیش‌فرض خاموشه و اعتبارسنجی فقط نحویه.

use std::time::Duration;

use tracing::{debug, instrument};

/// حداکثر زمان هر request بررسی
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// با یه request واقعی چک میکنه URL جواب میده یا نه
#[derive(Debug, Clone)]
pub struct ReachabilityProbe {
    client: reqwest::Client,
}

impl ReachabilityProbe {
    /// # Errors
    /// خطا برمیگردونه اگه HTTP client ساخته نشه (مثلا TLS backend در دسترس نباشه)
    pub fn new() -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(PROBE_TIMEOUT)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self { client })
    }

    /// اول `HEAD` و اگه جواب نداد `GET`؛ وضعیت نهایی زیر 400 یعنی در دسترسه
    #[instrument(skip(self))]
    pub async fn is_reachable(&self, url: &str) -> bool {
        let Some(target) = probe_target(url) else {
            return false;
        };

        match self.client.head(target.clone()).send().await {
            Ok(response) if response.status().as_u16() < 400 => return true,
            Ok(response) => debug!(status = %response.status(), "HEAD rejected, retrying with GET"),
            Err(e) => debug!(error = %e, "HEAD failed, retrying with GET"),
        }

        match self.client.get(target).send().await {
            Ok(response) => response.status().as_u16() < 400,
            Err(e) => {
                debug!(error = %e, "URL is not reachable");
                false
            }
        }
    }
}

/// URL بدون scheme با `http://` بررسی میشه
fn probe_target(url: &str) -> Option<url::Url> {
    let lower = url.to_ascii_lowercase();
    let candidate = if lower.starts_with("http://") || lower.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{url}")
    };

    url::Url::parse(&candidate).ok()
}
