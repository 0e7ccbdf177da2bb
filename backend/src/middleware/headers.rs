//! Security headers applied to every response.

use actix_web::middleware::DefaultHeaders;

/// Content security policy restricting scripts, styles and frames to the
/// service's own origin plus the Google Fonts hosts used by the stylesheet.
pub const CONTENT_SECURITY_POLICY: &str =
    "default-src 'self'; style-src 'self' fonts.googleapis.com; font-src fonts.gstatic.com";

/// Value of the `Server` response header.
pub const SERVER_NAME: &str = "snippetbox";

/// Middleware inserting the standard hardening headers.
///
/// Headers already set by a handler are left untouched.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use snippetbox::middleware::security_headers;
///
/// let app = App::new().wrap(security_headers());
/// ```
pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Content-Security-Policy", CONTENT_SECURITY_POLICY))
        .add(("Referrer-Policy", "origin-when-cross-origin"))
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Frame-Options", "deny"))
        .add(("X-XSS-Protection", "0"))
        .add(("Server", SERVER_NAME))
}
