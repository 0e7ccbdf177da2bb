//! Snippet data model.
//!
//! A snippet is written once and never mutated. It stays physically stored
//! after it expires but every read treats an expired snippet as absent.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Upper bound on the number of snippets returned by a "latest" query.
pub const LATEST_SNIPPETS_LIMIT: usize = 10;

/// Expiry periods, in days, a new snippet may choose from.
pub const PERMITTED_EXPIRY_DAYS: [i32; 3] = [1, 7, 365];

/// Validation errors returned by [`SnippetId`] constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnippetIdError {
    /// The raw value is not a decimal integer.
    #[error("snippet id must be an integer")]
    NotNumeric,
    /// The value is zero or negative.
    #[error("snippet id must be positive")]
    NotPositive,
}

/// Positive database identifier of a snippet.
///
/// # Examples
/// ```
/// use snippetbox::domain::SnippetId;
///
/// let id = SnippetId::parse("42").expect("valid id");
/// assert_eq!(id.get(), 42);
/// assert!(SnippetId::parse("-1").is_err());
/// assert!(SnippetId::parse("abc").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SnippetId(i64);

impl SnippetId {
    /// Wrap a raw identifier, rejecting values below one.
    pub fn new(raw: i64) -> Result<Self, SnippetIdError> {
        if raw < 1 {
            return Err(SnippetIdError::NotPositive);
        }
        Ok(Self(raw))
    }

    /// Parse a path segment into an identifier.
    pub fn parse(raw: &str) -> Result<Self, SnippetIdError> {
        let value = raw
            .parse::<i64>()
            .map_err(|_| SnippetIdError::NotNumeric)?;
        Self::new(value)
    }

    /// Raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for SnippetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored snippet.
///
/// ## Invariants
/// - `expires` is strictly later than `created`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snippet {
    pub id: SnippetId,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}

impl Snippet {
    /// True while `now` is before the expiry instant.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.expires > now
    }
}

/// Validated input for creating a snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSnippet {
    pub title: String,
    pub content: String,
    pub expires_in_days: i32,
}

impl NewSnippet {
    /// Expiry instant for a snippet inserted at `created`.
    pub fn expiry_from(&self, created: DateTime<Utc>) -> DateTime<Utc> {
        created + Duration::days(i64::from(self.expires_in_days))
    }
}
