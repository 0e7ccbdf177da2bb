//! Domain primitives, ports, and use-cases.
//!
//! Nothing in here depends on HTTP or a particular database. Inbound adapters
//! call the ports; outbound adapters implement them.

pub mod accounts;
pub mod auth;
pub mod error;
pub mod ports;
pub mod snippet;
pub mod trace_id;
pub mod user;
pub mod validator;

pub use self::accounts::AccountsService;
pub use self::auth::{LoginCredentials, NewAccount};
pub use self::error::{Error, ErrorCode};
pub use self::snippet::{
    NewSnippet, Snippet, SnippetId, SnippetIdError, LATEST_SNIPPETS_LIMIT, PERMITTED_EXPIRY_DAYS,
};
pub use self::trace_id::{TraceId, TRACE_ID_HEADER};
pub use self::user::{NewUserRecord, StoredCredentials, User, UserId};
pub use self::validator::Validator;

/// Convenient result alias for handlers and use-cases.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use snippetbox::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such snippet"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
