//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`SnippetRepository`, `UserRepository`, `PasswordHasher`)
//! are implemented by outbound adapters. The driving `AccountService` port is
//! what inbound handlers call for signup and login.

mod macros;
pub(crate) use macros::define_port_error;

mod account_service;
mod password_hasher;
mod snippet_repository;
mod user_repository;

#[cfg(test)]
pub use account_service::MockAccountService;
pub use account_service::{AccountError, AccountService};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use snippet_repository::MockSnippetRepository;
pub use snippet_repository::{SnippetPersistenceError, SnippetRepository};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
