//! Mutex-backed `SnippetRepository`.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{SnippetPersistenceError, SnippetRepository};
use crate::domain::{LATEST_SNIPPETS_LIMIT, NewSnippet, Snippet, SnippetId};

#[derive(Default)]
struct State {
    last_id: i64,
    rows: Vec<Snippet>,
}

/// Snippets held in memory, identifiers assigned sequentially from one.
pub struct InMemorySnippetRepository {
    state: Mutex<State>,
    clock: Arc<dyn Clock>,
}

impl InMemorySnippetRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(State::default()),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, SnippetPersistenceError> {
        self.state
            .lock()
            .map_err(|_| SnippetPersistenceError::connection("snippet store lock poisoned"))
    }
}

#[async_trait]
impl SnippetRepository for InMemorySnippetRepository {
    async fn insert(&self, snippet: &NewSnippet) -> Result<SnippetId, SnippetPersistenceError> {
        let created = self.clock.utc();
        let mut state = self.lock()?;
        let id = SnippetId::new(state.last_id + 1)
            .map_err(|err| SnippetPersistenceError::query(err.to_string()))?;
        state.last_id = id.get();
        state.rows.push(Snippet {
            id,
            title: snippet.title.clone(),
            content: snippet.content.clone(),
            created,
            expires: snippet.expiry_from(created),
        });
        Ok(id)
    }

    async fn get(&self, id: SnippetId) -> Result<Snippet, SnippetPersistenceError> {
        let now = self.clock.utc();
        self.lock()?
            .rows
            .iter()
            .find(|row| row.id == id && row.is_live_at(now))
            .cloned()
            .ok_or_else(|| SnippetPersistenceError::not_found(id.get()))
    }

    async fn latest(&self) -> Result<Vec<Snippet>, SnippetPersistenceError> {
        let now = self.clock.utc();
        let state = self.lock()?;
        Ok(state
            .rows
            .iter()
            .rev()
            .filter(|row| row.is_live_at(now))
            .take(LATEST_SNIPPETS_LIMIT)
            .cloned()
            .collect())
    }
}
