//! String grammars used by the coercion rules.
//!
//! - **Digit runs**: every maximal run of digits in a text, concatenated.
//! - **Phone numbers**: the digit stream must contain exactly one
//!   non-overlapping match of the subscriber pattern (by default `9\d{9}`) of
//!   the configured length; the result is the country code followed by that
//!   match.
//! - **Array literals**: `[a, b, c]` on a single line. Items are split on every
//!   comma inside the outer brackets and trimmed; nested brackets are not
//!   interpreted.

use regex::Regex;
use std::sync::LazyLock;

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("digit-run regex is valid"));

static ARRAY_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(.*)\]$").expect("array-literal regex is valid"));

static DEFAULT_PHONE: LazyLock<PhoneFormat> = LazyLock::new(|| {
    PhoneFormat::new(
        PhoneFormat::DEFAULT_COUNTRY_CODE,
        PhoneFormat::DEFAULT_SUBSCRIBER_PATTERN,
        PhoneFormat::DEFAULT_SUBSCRIBER_LEN,
    )
    .expect("default subscriber pattern is valid")
});

/// Concatenate every digit run in `text`.
pub fn digits(text: &str) -> String {
    DIGIT_RUN.find_iter(text).map(|m| m.as_str()).collect()
}

/// Split a `[a, b, c]` literal into trimmed items.
///
/// Returns `None` when `text` is not wrapped in brackets. Every comma splits,
/// so `[]` holds one empty item and `[a,]` ends with one.
pub fn array_items(text: &str) -> Option<Vec<&str>> {
    let body = ARRAY_LITERAL.captures(text)?.get(1)?.as_str();
    Some(body.split(',').map(str::trim).collect())
}

/// How phone numbers are recognised and which country code is prepended.
#[derive(Debug, Clone)]
pub struct PhoneFormat {
    country_code: String,
    subscriber: Regex,
    subscriber_len: usize,
}

impl PhoneFormat {
    pub const DEFAULT_COUNTRY_CODE: &'static str = "7";
    pub const DEFAULT_SUBSCRIBER_PATTERN: &'static str = r"9\d{9}";
    pub const DEFAULT_SUBSCRIBER_LEN: usize = 10;

    pub fn new(
        country_code: impl Into<String>,
        subscriber_pattern: &str,
        subscriber_len: usize,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            country_code: country_code.into(),
            subscriber: Regex::new(subscriber_pattern)?,
            subscriber_len,
        })
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn subscriber_pattern(&self) -> &str {
        self.subscriber.as_str()
    }

    pub fn subscriber_len(&self) -> usize {
        self.subscriber_len
    }

    /// Extract the single subscriber number embedded in `text` and prefix it
    /// with the country code. Zero or several candidates yield `None`.
    pub fn extract(&self, text: &str) -> Option<String> {
        let stream = digits(text);
        let mut matches = self.subscriber.find_iter(&stream);
        let subscriber = matches.next()?;
        // Unicode digits are multi-byte, so the length is counted in chars.
        if matches.next().is_some() || subscriber.as_str().chars().count() != self.subscriber_len {
            return None;
        }
        Some(format!("{}{}", self.country_code, subscriber.as_str()))
    }
}

impl Default for PhoneFormat {
    fn default() -> Self {
        DEFAULT_PHONE.clone()
    }
}
