//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use std::path::PathBuf;
use std::sync::Arc;

use actix_files::Files;
use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use snippetbox::Trace;
use snippetbox::inbound::http::routes;
use snippetbox::inbound::http::state::HttpState;
use snippetbox::inbound::http::templates::TemplateCache;
use snippetbox::middleware::security_headers;

/// Name of the session cookie.
const SESSION_COOKIE: &str = "session";
/// Sessions expire this long after they were last written.
const SESSION_TTL_HOURS: i64 = 12;

#[derive(Clone)]
struct AppDependencies {
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
    static_dir: PathBuf,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        http_state,
        key,
        cookie_secure,
        same_site,
        static_dir,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE.into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default()
                .session_ttl(actix_web::cookie::time::Duration::hours(SESSION_TTL_HOURS)),
        )
        .build();

    App::new()
        .app_data(http_state)
        .service(Files::new("/static", static_dir))
        .configure(routes::configure)
        .wrap(session)
        .wrap(Trace)
        .wrap(security_headers())
}

/// Construct an Actix HTTP server serving the snippet pages.
///
/// # Parameters
/// - `config`: session, binding, static asset and optional database settings.
/// - `templates`: page templates parsed once at startup.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    config: ServerConfig,
    templates: Arc<TemplateCache>,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config, templates);
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        static_dir,
        db_pool: _,
    } = config;

    let deps = AppDependencies {
        http_state,
        key,
        cookie_secure,
        same_site,
        static_dir,
    };
    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();
    Ok(server)
}
