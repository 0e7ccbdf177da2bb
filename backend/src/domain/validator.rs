//! Field validation accumulator and the predicates forms check against.
//!
//! A [`Validator`] lives for a single validation attempt. Each field keeps
//! only the first failure recorded against it; later failing checks on the
//! same key are ignored so the user sees the most fundamental problem first.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

/// Email-shaped pattern used by signup and login forms.
///
/// Compiled once on first use and shared read-only afterwards.
pub fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = concat!(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@",
            r"[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
            r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        );
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// First-failure-wins error accumulator for form fields.
///
/// Serialises as `{ "field_errors": {..}, "non_field_errors": [..] }` so
/// templates can look up messages by field key.
///
/// # Examples
/// ```
/// use snippetbox::domain::validator::{Validator, not_blank};
///
/// let mut v = Validator::default();
/// v.check_field(not_blank("  "), "title", "This field cannot be blank");
/// v.check_field(false, "title", "ignored");
/// assert!(!v.valid());
/// assert_eq!(v.field_error("title"), Some("This field cannot be blank"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Validator {
    field_errors: BTreeMap<String, String>,
    non_field_errors: Vec<String>,
}

impl Validator {
    /// True when no field error has been recorded.
    ///
    /// Non-field errors are reported separately and never affect validity.
    pub fn valid(&self) -> bool {
        self.field_errors.is_empty()
    }

    /// Record `message` under `key` unless the key already holds a message.
    pub fn add_field_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.field_errors
            .entry(key.into())
            .or_insert_with(|| message.into());
    }

    /// Record `message` under `key` only when `ok` is false.
    pub fn check_field(&mut self, ok: bool, key: &str, message: &str) {
        if !ok {
            self.add_field_error(key, message);
        }
    }

    /// Record an error that is not tied to a single input.
    pub fn add_non_field_error(&mut self, message: impl Into<String>) {
        self.non_field_errors.push(message.into());
    }

    /// Message recorded for `key`, if any.
    pub fn field_error(&self, key: &str) -> Option<&str> {
        self.field_errors.get(key).map(String::as_str)
    }

    /// All recorded field errors keyed by field name.
    pub fn field_errors(&self) -> &BTreeMap<String, String> {
        &self.field_errors
    }

    /// Errors not tied to a field, in the order they were added.
    pub fn non_field_errors(&self) -> &[String] {
        &self.non_field_errors
    }
}

/// True when `value` contains something other than whitespace.
pub fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// True when `value` has at most `n` Unicode scalar values.
pub fn max_chars(value: &str, n: usize) -> bool {
    value.chars().count() <= n
}

/// True when `value` has at least `n` Unicode scalar values.
pub fn min_chars(value: &str, n: usize) -> bool {
    value.chars().count() >= n
}

/// True when `value` matches `rx`.
pub fn matches(value: &str, rx: &Regex) -> bool {
    rx.is_match(value)
}

/// True when `value` is one of `permitted`.
pub fn permitted_value<T: PartialEq>(value: &T, permitted: &[T]) -> bool {
    permitted.contains(value)
}
