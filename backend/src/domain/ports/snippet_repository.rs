//! Port abstraction for snippet persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{NewSnippet, Snippet, SnippetId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by snippet repository adapters.
    pub enum SnippetPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "snippet repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "snippet repository query failed: {message}",
        /// No live snippet has the requested identifier.
        NotFound { id: i64 } => "no live snippet with id {id}",
    }
}

/// Storage for immutable, soft-expiring snippets.
///
/// Adapters read "now" from an injected clock. An expired snippet stays
/// stored but is invisible to [`get`](Self::get) and
/// [`latest`](Self::latest).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnippetRepository: Send + Sync {
    /// Store a snippet created now and expiring after its chosen number of
    /// days. Returns the new identifier.
    async fn insert(&self, snippet: &NewSnippet) -> Result<SnippetId, SnippetPersistenceError>;

    /// Fetch a live snippet.
    ///
    /// Returns [`SnippetPersistenceError::NotFound`] when no row has `id` or
    /// the row has expired.
    async fn get(&self, id: SnippetId) -> Result<Snippet, SnippetPersistenceError>;

    /// Up to ten live snippets, newest identifier first.
    async fn latest(&self) -> Result<Vec<Snippet>, SnippetPersistenceError>;
}
