//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::Clock;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUserRecord, StoredCredentials, UserId};

use super::error_mapping::{
    classify_diesel_error, pool_error_message, DieselFailure, USERS_EMAIL_CONSTRAINT,
};
use super::models::{CredentialsRow, NewUserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::UniqueViolation(Some(name)) if name == USERS_EMAIL_CONSTRAINT => {
            UserPersistenceError::duplicate_email()
        }
        DieselFailure::UniqueViolation(_) => UserPersistenceError::query("unique violation"),
        DieselFailure::Query(message) => UserPersistenceError::query(message),
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &NewUserRecord) -> Result<UserId, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            name: &user.name,
            email: &user.email,
            hashed_password: &user.hashed_password,
            created: self.clock.utc(),
        };

        let id: i64 = diesel::insert_into(users::table)
            .values(&row)
            .returning(users::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(UserId::new(id))
    }

    async fn find_credentials(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::email.eq(email))
            .select(CredentialsRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(|row| StoredCredentials {
            id: UserId::new(row.id),
            hashed_password: row.hashed_password,
        }))
    }

    async fn exists(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            users::table.filter(users::id.eq(id.get())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }
}
