//! Masking of secrets in logged request and response bodies

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

pub const REDACTED: &str = "[REDACTED]";

/// JSON keys whose string values are always masked. Matched
/// case-insensitively, so `ManagerPassword` and `password` both hit.
const SECRET_KEYS: &str =
    r"password|[a-z]*password|access|refresh|access_token|refresh_token|token";

static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Authorization header
        r"(?i)(authorization:\s*bearer\s+)\S+".to_string(),
        // "key": "value" for secret keys
        format!(r#"(?i)("(?:{SECRET_KEYS})"\s*:\s*")[^"]*(")"#),
        // Any bare JWT
        r"eyJ[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]*".to_string(),
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("redaction pattern is valid"))
    .collect()
});

/// Applies the built-in patterns in order.
#[derive(Debug, Default, Clone, Copy)]
pub struct Redactor;

impl Redactor {
    pub fn new() -> Self {
        Self
    }

    pub fn redact<'a>(&self, input: &'a str) -> Cow<'a, str> {
        let mut result = Cow::Borrowed(input);
        for pattern in PATTERNS.iter() {
            if pattern.is_match(&result) {
                let replaced = pattern
                    .replace_all(&result, |caps: &Captures| {
                        let prefix = caps.get(1).map_or("", |m| m.as_str());
                        let suffix = caps.get(2).map_or("", |m| m.as_str());
                        format!("{prefix}{REDACTED}{suffix}")
                    })
                    .into_owned();
                result = Cow::Owned(replaced);
            }
        }
        result
    }
}
