//! # ماژول توابع کمکی (Utilities)
//!
//! تولید short code و اعتبارسنجی نحوی URL.
//!
//! ## مفاهیم Rust:
//! - **const**: ثابت‌های compile-time
//! - **once_cell::Lazy**: مقداردهی اولیه تنبل برای Regex
//! - **Regex**: عبارات منظم

use once_cell::sync::Lazy;
use regex::Regex;

// =====================================
// Constants
// =====================================
/// الفبای URL-safe برای short code (همون الفبای پیش‌فرض nanoid)
pub const SHORT_CODE_ALPHABET: [char; 64] = [
    '_', '-', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f',
    'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x',
    'y', 'z', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P',
    'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// طول ثابت short code
pub const SHORT_CODE_LENGTH: usize = 8;

/// حداکثر طول URL اصلی
pub const MAX_URL_LENGTH: usize = 2048;

// =====================================
// Lazy Statics (Regex patterns)
// =====================================
/// الگوی short code: دقیقا ۸ کاراکتر از الفبای URL-safe
pub static VALID_SHORT_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{8}$").expect("Invalid regex pattern"));

/// الگوی URL مطلق
///
/// - scheme اختیاری (`http`/`https`)
/// - host: دامنه با TLD حداقل دو حرفی، یا IPv4 با octet‌های 0 تا 255
/// - port، path، query و fragment اختیاری
///
/// حالت Unicode خاموشه (`-u`) تا `(?i)` فقط حروف ASCII رو match کنه؛
/// وگرنه case folding مثلا `ſ` و `K` (Kelvin) رو هم با `[a-z]` میپذیره.
pub static VALID_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i-u)^(?:https?://)?",
        r"(?:",
        r"(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z]{2,}",
        r"|",
        r"(?:(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.){3}",
        r"(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])",
        r")",
        r"(?::[0-9]{1,5})?",
        r"(?:/[a-z0-9\-._~%!$&'()*+,;=:@/]*)?",
        r"(?:\?[a-z0-9\-._~%!$&'()*+,;=:@/?]*)?",
        r"(?:#[a-z0-9\-._~%!$&'()*+,;=:@/?]*)?$",
    ))
    .expect("Invalid regex pattern")
});

// =====================================
// Short Code Generation
// =====================================
/// تولید short code تصادفی
///
/// nanoid از یه منبع تصادفی امن (CSPRNG) استفاده میکنه.
/// یکتا بودن اینجا تضمین نمیشه؛ سرویس با retry روی دیتابیس تضمینش میکنه.
///
/// # مثال
/// ```rust
/// use shorturl::utils::{generate_short_code, is_valid_short_code};
///
/// let code = generate_short_code();
/// assert_eq!(code.len(), 8);
/// assert!(is_valid_short_code(&code));
/// ```
#[must_use]
pub fn generate_short_code() -> String {
    nanoid::nanoid!(SHORT_CODE_LENGTH, &SHORT_CODE_ALPHABET)
}

// =====================================
// Validation Functions
// =====================================
/// آیا این رشته میتونه یه short code ساخته‌شده توسط ما باشه؟
#[must_use]
pub fn is_valid_short_code(code: &str) -> bool {
    VALID_SHORT_CODE.is_match(code)
}

/// اعتبارسنجی نحوی URL
///
/// فقط شکل رشته چک میشه؛ هیچ request شبکه‌ای زده نمیشه.
///
/// # مثال
/// ```rust
/// use shorturl::utils::is_valid_url;
///
/// assert!(is_valid_url("https://example.com/a"));
/// assert!(is_valid_url("www.example.com"));
/// assert!(!is_valid_url("not a url"));
/// ```
#[must_use]
pub fn is_valid_url(input: &str) -> bool {
    if input.is_empty() || input.len() > MAX_URL_LENGTH {
        return false;
    }

    VALID_URL.is_match(input)
}
