//! Builders wiring port implementations into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use snippetbox::domain::AccountsService;
use snippetbox::domain::ports::{SnippetRepository, UserRepository};
use snippetbox::inbound::http::state::HttpState;
use snippetbox::inbound::http::templates::TemplateCache;
use snippetbox::outbound::hashing::Argon2PasswordHasher;
use snippetbox::outbound::memory::{InMemorySnippetRepository, InMemoryUserRepository};
use snippetbox::outbound::persistence::{DbPool, DieselSnippetRepository, DieselUserRepository};

use super::ServerConfig;

/// Snippet and user repositories backed by the pool when one is configured,
/// otherwise by process memory.
fn build_repositories(
    pool: Option<&DbPool>,
    clock: &Arc<dyn Clock>,
) -> (Arc<dyn SnippetRepository>, Arc<dyn UserRepository>) {
    match pool {
        Some(pool) => (
            Arc::new(DieselSnippetRepository::new(pool.clone(), clock.clone())),
            Arc::new(DieselUserRepository::new(pool.clone(), clock.clone())),
        ),
        None => (
            Arc::new(InMemorySnippetRepository::new(clock.clone())),
            Arc::new(InMemoryUserRepository::new(clock.clone())),
        ),
    }
}

/// Assemble the shared handler state.
pub(crate) fn build_http_state(
    config: &ServerConfig,
    templates: Arc<TemplateCache>,
) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let (snippets, users) = build_repositories(config.db_pool.as_ref(), &clock);
    let accounts = AccountsService::new(users, Arc::new(Argon2PasswordHasher::default()));
    web::Data::new(HttpState::new(
        snippets,
        Arc::new(accounts),
        templates,
        clock,
    ))
}
