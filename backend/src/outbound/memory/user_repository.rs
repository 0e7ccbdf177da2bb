//! Mutex-backed `UserRepository`.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUserRecord, StoredCredentials, User, UserId};

#[derive(Default)]
struct State {
    last_id: i64,
    rows: Vec<User>,
}

/// Accounts held in memory. Emails are compared exactly, like the unique
/// constraint in PostgreSQL.
pub struct InMemoryUserRepository {
    state: Mutex<State>,
    clock: Arc<dyn Clock>,
}

impl InMemoryUserRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(State::default()),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, UserPersistenceError> {
        self.state
            .lock()
            .map_err(|_| UserPersistenceError::connection("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &NewUserRecord) -> Result<UserId, UserPersistenceError> {
        let created = self.clock.utc();
        let mut state = self.lock()?;
        if state.rows.iter().any(|row| row.email == user.email) {
            return Err(UserPersistenceError::duplicate_email());
        }
        state.last_id += 1;
        let id = UserId::new(state.last_id);
        state.rows.push(User {
            id,
            name: user.name.clone(),
            email: user.email.clone(),
            hashed_password: user.hashed_password.clone(),
            created,
        });
        Ok(id)
    }

    async fn find_credentials(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        Ok(self
            .lock()?
            .rows
            .iter()
            .find(|row| row.email == email)
            .map(|row| StoredCredentials {
                id: row.id,
                hashed_password: row.hashed_password.clone(),
            }))
    }

    async fn exists(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        Ok(self.lock()?.rows.iter().any(|row| row.id == id))
    }
}
