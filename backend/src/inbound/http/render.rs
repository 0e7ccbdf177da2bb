//! Buffered page rendering.
//!
//! A page is rendered into memory first. The status line and body are only
//! produced once rendering has succeeded, so a template failure can never
//! leave a half-written page with the wrong status behind; the caller gets an
//! internal error and the client a clean 500.

use std::error::Error as _;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use chrono::Datelike;
use serde::Serialize;

use crate::domain::{ApiResult, Error, Snippet};

use super::session::SessionContext;
use super::state::HttpState;
use super::templates::TemplateCache;

/// Values exposed to every page template.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TemplateData {
    pub current_year: i32,
    pub snippet: Option<Snippet>,
    pub snippets: Vec<Snippet>,
    /// Submitted or default form values plus their validation messages.
    pub form: Option<serde_json::Value>,
    pub flash: Option<String>,
    pub is_authenticated: bool,
    pub csrf_token: String,
}

impl TemplateData {
    /// Common data for the current request.
    ///
    /// Pops the pending flash message, so it is shown exactly once.
    pub async fn for_request(state: &HttpState, session: &SessionContext) -> ApiResult<Self> {
        Ok(Self {
            current_year: state.clock.utc().year(),
            flash: session.pop_flash()?,
            is_authenticated: is_authenticated(state, session).await?,
            csrf_token: session.csrf_token()?,
            ..Self::default()
        })
    }

    /// Attach a form payload.
    ///
    /// # Errors
    ///
    /// Returns an internal error when the form cannot be serialised.
    pub fn with_form<F: Serialize>(mut self, form: &F) -> ApiResult<Self> {
        let value = serde_json::to_value(form)
            .map_err(|err| Error::internal(format!("failed to serialise form: {err}")))?;
        self.form = Some(value);
        Ok(self)
    }
}

/// True when the session names an account that still exists.
async fn is_authenticated(state: &HttpState, session: &SessionContext) -> ApiResult<bool> {
    let Some(user_id) = session.user_id()? else {
        return Ok(false);
    };
    state
        .accounts
        .exists(user_id)
        .await
        .map_err(|err| Error::internal(format!("failed to check account {user_id}: {err}")))
}

/// Render `page` at `status`.
///
/// # Errors
///
/// An internal error when `page` is not cached, when the data cannot be turned
/// into a template context, or when the template fails to execute.
pub fn render(
    templates: &TemplateCache,
    status: StatusCode,
    page: &str,
    data: &TemplateData,
) -> ApiResult<HttpResponse> {
    let context = tera::Context::from_serialize(data)
        .map_err(|err| Error::internal(format!("failed to build context for {page}: {err}")))?;
    let body = templates
        .render(page, &context)
        .ok_or_else(|| Error::internal(format!("the template {page} does not exist")))?
        .map_err(|err| Error::internal(format!("failed to render {page}: {}", describe(&err))))?;

    Ok(HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(body))
}

/// Tera wraps the useful cause a few levels deep.
fn describe(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
