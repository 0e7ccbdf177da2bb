//! Domain-level error types.
//!
//! These errors are transport agnostic. The HTTP adapter maps them to status
//! codes and generic bodies; nothing in here knows about responses.

use std::backtrace::Backtrace;
use std::sync::Arc;

use super::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The request is malformed and could not be decoded.
    InvalidRequest,
    /// The requested resource does not exist or is no longer visible.
    NotFound,
    /// Storage, rendering, or configuration failure inside the service.
    InternalError,
}

/// Domain error payload.
///
/// Internal errors capture a backtrace when they are constructed so the
/// request logger can report where the failure originated.
///
/// # Examples
/// ```
/// use snippetbox::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("snippet 7");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert!(err.backtrace().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
    backtrace: Option<Arc<Backtrace>>,
}

impl Error {
    /// Create a new error, capturing the trace identifier in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let backtrace = matches!(code, ErrorCode::InternalError)
            .then(|| Arc::new(Backtrace::force_capture()));
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            backtrace,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Diagnostic message. Never shown to clients for internal errors.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier recorded when the error was created.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Backtrace captured for internal errors.
    pub fn backtrace(&self) -> Option<&Backtrace> {
        self.backtrace.as_deref()
    }

    /// Attach a trace identifier to the error.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
