//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories are thin translators between Diesel rows and domain types.
//! Row structs and table definitions stay private to this module.
//!
//! # Example
//!
//! ```ignore
//! use snippetbox::outbound::persistence::{DbPool, DieselSnippetRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/snippetbox")).await?;
//! let snippets = DieselSnippetRepository::new(pool, Arc::new(mockable::DefaultClock));
//! ```

mod diesel_snippet_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_snippet_repository::DieselSnippetRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{run_pending_migrations, MigrationError, MIGRATIONS};
pub use pool::{DbPool, PoolConfig, PoolError, PoolStage};
