//! PostgreSQL-backed `SnippetRepository` implementation using Diesel ORM.
//!
//! Expiry is evaluated against the injected clock rather than the database
//! server time so every adapter agrees on "now".

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::Clock;

use crate::domain::ports::{SnippetPersistenceError, SnippetRepository};
use crate::domain::{NewSnippet, Snippet, SnippetId, LATEST_SNIPPETS_LIMIT};

use super::error_mapping::{classify_diesel_error, pool_error_message, DieselFailure};
use super::models::{NewSnippetRow, SnippetRow};
use super::pool::{DbPool, PoolError};
use super::schema::snippets;

/// Diesel-backed implementation of the `SnippetRepository` port.
#[derive(Clone)]
pub struct DieselSnippetRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselSnippetRepository {
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

fn map_pool_error(error: PoolError) -> SnippetPersistenceError {
    SnippetPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> SnippetPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => SnippetPersistenceError::connection(message),
        DieselFailure::UniqueViolation(_) => SnippetPersistenceError::query("duplicate snippet"),
        DieselFailure::Query(message) => SnippetPersistenceError::query(message),
    }
}

fn row_to_snippet(row: SnippetRow) -> Result<Snippet, SnippetPersistenceError> {
    let id = SnippetId::new(row.id)
        .map_err(|err| SnippetPersistenceError::query(format!("stored snippet id: {err}")))?;
    Ok(Snippet {
        id,
        title: row.title,
        content: row.content,
        created: row.created,
        expires: row.expires,
    })
}

#[async_trait]
impl SnippetRepository for DieselSnippetRepository {
    async fn insert(&self, snippet: &NewSnippet) -> Result<SnippetId, SnippetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let created = self.clock.utc();
        let row = NewSnippetRow {
            title: &snippet.title,
            content: &snippet.content,
            created,
            expires: snippet.expiry_from(created),
        };

        let id: i64 = diesel::insert_into(snippets::table)
            .values(&row)
            .returning(snippets::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        SnippetId::new(id)
            .map_err(|err| SnippetPersistenceError::query(format!("generated snippet id: {err}")))
    }

    async fn get(&self, id: SnippetId) -> Result<Snippet, SnippetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let now = self.clock.utc();

        let row = snippets::table
            .filter(snippets::id.eq(id.get()))
            .filter(snippets::expires.gt(now))
            .select(SnippetRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        match row {
            Some(row) => row_to_snippet(row),
            None => Err(SnippetPersistenceError::not_found(id.get())),
        }
    }

    async fn latest(&self) -> Result<Vec<Snippet>, SnippetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let now = self.clock.utc();
        let limit = i64::try_from(LATEST_SNIPPETS_LIMIT).unwrap_or(i64::MAX);

        let rows: Vec<SnippetRow> = snippets::table
            .filter(snippets::expires.gt(now))
            .order(snippets::id.desc())
            .limit(limit)
            .select(SnippetRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_snippet).collect()
    }
}
