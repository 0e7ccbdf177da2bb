//! Account use-cases backed by the user repository and password hasher.
//!
//! Unknown emails and wrong passwords both surface as
//! [`AccountError::InvalidCredentials`]. Any other failure from the store is
//! propagated so callers report it as a server error instead of a login
//! failure.

use std::sync::Arc;

use async_trait::async_trait;
use zeroize::Zeroizing;

use super::ports::{
    AccountError, AccountService, PasswordHashError, PasswordHasher, UserPersistenceError,
    UserRepository,
};
use super::{LoginCredentials, NewAccount, NewUserRecord, UserId};

/// [`AccountService`] implementation shared by every adapter.
#[derive(Clone)]
pub struct AccountsService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl AccountsService {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    async fn hash(&self, password: &str) -> Result<String, AccountError> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || hasher.hash(password.as_str()))
            .await
            .map_err(|err| AccountError::hashing(err.to_string()))?
            .map_err(map_hash_error)
    }

    async fn verify(&self, password: &str, hashed: String) -> Result<bool, AccountError> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || hasher.verify(password.as_str(), &hashed))
            .await
            .map_err(|err| AccountError::hashing(err.to_string()))?
            .map_err(map_hash_error)
    }
}

fn map_persistence_error(error: UserPersistenceError) -> AccountError {
    match error {
        UserPersistenceError::DuplicateEmail => AccountError::duplicate_email(),
        other => AccountError::storage(other.to_string()),
    }
}

fn map_hash_error(error: PasswordHashError) -> AccountError {
    AccountError::hashing(error.to_string())
}

#[async_trait]
impl AccountService for AccountsService {
    async fn signup(&self, account: &NewAccount) -> Result<UserId, AccountError> {
        let hashed_password = self.hash(account.password()).await?;
        let record = NewUserRecord {
            name: account.name().to_owned(),
            email: account.email().to_owned(),
            hashed_password,
        };
        self.users
            .insert(&record)
            .await
            .map_err(map_persistence_error)
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, AccountError> {
        let stored = self
            .users
            .find_credentials(credentials.email())
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(AccountError::invalid_credentials)?;

        if self
            .verify(credentials.password(), stored.hashed_password)
            .await?
        {
            Ok(stored.id)
        } else {
            Err(AccountError::invalid_credentials())
        }
    }

    async fn exists(&self, id: UserId) -> Result<bool, AccountError> {
        self.users.exists(id).await.map_err(map_persistence_error)
    }
}
