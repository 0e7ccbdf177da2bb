//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{NewUserRecord, StoredCredentials, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The email is already registered to another account.
        DuplicateEmail => "email address is already in use",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account, stamping its creation time.
    ///
    /// Fails with [`UserPersistenceError::DuplicateEmail`] when the email is
    /// taken.
    async fn insert(&self, user: &NewUserRecord) -> Result<UserId, UserPersistenceError>;

    /// Identifier and password hash for `email`, if registered.
    async fn find_credentials(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError>;

    /// Whether an account with `id` exists.
    async fn exists(&self, id: UserId) -> Result<bool, UserPersistenceError>;
}
