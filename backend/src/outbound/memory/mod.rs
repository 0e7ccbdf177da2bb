//! In-process adapters used when no database is configured and by tests.
//!
//! State lives behind a mutex for the lifetime of the process. Expiry and
//! creation timestamps come from the injected clock so tests can move time.

mod snippet_repository;
mod user_repository;

pub use snippet_repository::InMemorySnippetRepository;
pub use user_repository::InMemoryUserRepository;
