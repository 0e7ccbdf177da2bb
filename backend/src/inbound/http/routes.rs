//! Route table for the page handlers.
//!
//! Static assets are mounted by the server because their directory comes
//! from configuration.

use actix_web::web;

use super::snippets::{home, snippet_create, snippet_create_post, snippet_view};
use super::users::{login, login_post, logout_post, signup, signup_post};

/// Register every page handler.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use snippetbox::inbound::http::routes::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(home)
        .service(snippet_view)
        .service(snippet_create)
        .service(snippet_create_post)
        .service(signup)
        .service(signup_post)
        .service(login)
        .service(login_post)
        .service(logout_post);
}
