//! Driving port for signup, login, and account lookups.
use async_trait::async_trait;

use crate::domain::{LoginCredentials, NewAccount, UserId};

use super::define_port_error;

define_port_error! {
    /// Outcomes of account operations that callers must distinguish.
    pub enum AccountError {
        /// The email is already registered.
        DuplicateEmail => "email address is already in use",
        /// Unknown email or wrong password. The two are not distinguished.
        InvalidCredentials => "invalid credentials",
        /// The user store failed.
        Storage { message: String } => "account storage failed: {message}",
        /// Password hashing failed.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Register a new account, hashing its password.
    async fn signup(&self, account: &NewAccount) -> Result<UserId, AccountError>;

    /// Resolve credentials to an account identifier.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, AccountError>;

    /// Whether `id` still refers to an account.
    async fn exists(&self, id: UserId) -> Result<bool, AccountError>;
}
