//! Shared HTTP adapter state.
//!
//! Built once at startup and handed to handlers through `web::Data`, so
//! handlers only depend on ports and the immutable template cache.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{AccountService, SnippetRepository};

use super::templates::TemplateCache;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub snippets: Arc<dyn SnippetRepository>,
    pub accounts: Arc<dyn AccountService>,
    pub templates: Arc<TemplateCache>,
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use snippetbox::domain::AccountsService;
    /// use snippetbox::inbound::http::state::HttpState;
    /// use snippetbox::inbound::http::templates::TemplateCache;
    /// use snippetbox::outbound::hashing::Argon2PasswordHasher;
    /// use snippetbox::outbound::memory::{InMemorySnippetRepository, InMemoryUserRepository};
    ///
    /// let clock = Arc::new(DefaultClock);
    /// let accounts = AccountsService::new(
    ///     Arc::new(InMemoryUserRepository::new(clock.clone())),
    ///     Arc::new(Argon2PasswordHasher::default()),
    /// );
    /// let templates = TemplateCache::from_sources("", &[], &[]).expect("empty cache");
    /// let state = HttpState::new(
    ///     Arc::new(InMemorySnippetRepository::new(clock.clone())),
    ///     Arc::new(accounts),
    ///     Arc::new(templates),
    ///     clock,
    /// );
    /// assert!(!state.templates.contains("home.html"));
    /// ```
    pub fn new(
        snippets: Arc<dyn SnippetRepository>,
        accounts: Arc<dyn AccountService>,
        templates: Arc<TemplateCache>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            snippets,
            accounts,
            templates,
            clock,
        }
    }
}
