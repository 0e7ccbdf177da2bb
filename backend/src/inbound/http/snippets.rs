//! Snippet page handlers.
//!
//! ```text
//! GET  /                    latest snippets
//! GET  /snippet/view/{id}   one live snippet
//! GET  /snippet/create      empty form
//! POST /snippet/create      validate, store, flash, redirect
//! ```

use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, get, post, web};

use crate::domain::ports::SnippetPersistenceError;
use crate::domain::{ApiResult, Error, SnippetId};
use crate::inbound::http::forms::{SnippetCreateForm, SnippetCreateInput, decode_snippet_create};
use crate::inbound::http::render::{TemplateData, render};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

pub const SNIPPET_CREATED_FLASH: &str = "Snippet successfully created!";

fn map_snippet_error(error: SnippetPersistenceError) -> Error {
    match error {
        SnippetPersistenceError::NotFound { id } => Error::not_found(format!("snippet {id}")),
        other => Error::internal(other.to_string()),
    }
}

/// Home page listing up to ten live snippets.
#[get("/")]
pub async fn home(state: web::Data<HttpState>, session: SessionContext) -> ApiResult<HttpResponse> {
    let snippets = state.snippets.latest().await.map_err(map_snippet_error)?;
    let data = TemplateData {
        snippets,
        ..TemplateData::for_request(&state, &session).await?
    };
    render(&state.templates, StatusCode::OK, "home.html", &data)
}

/// A single snippet. Absent, expired and malformed ids are all 404.
#[get("/snippet/view/{id}")]
pub async fn snippet_view(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let raw = path.into_inner();
    let id = SnippetId::parse(&raw)
        .map_err(|err| Error::not_found(format!("snippet id {raw:?}: {err}")))?;
    let snippet = state.snippets.get(id).await.map_err(map_snippet_error)?;
    let data = TemplateData {
        snippet: Some(snippet),
        ..TemplateData::for_request(&state, &session).await?
    };
    render(&state.templates, StatusCode::OK, "view.html", &data)
}

#[get("/snippet/create")]
pub async fn snippet_create(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let data = TemplateData::for_request(&state, &session)
        .await?
        .with_form(&SnippetCreateForm::default())?;
    render(&state.templates, StatusCode::OK, "create.html", &data)
}

/// Create a snippet.
///
/// Invalid input re-renders the form at 422 with the submitted values. A
/// stored snippet sets a flash message and redirects to its page with 303.
#[post("/snippet/create")]
pub async fn snippet_create_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    input: web::Form<SnippetCreateInput>,
) -> ApiResult<HttpResponse> {
    let input = input.into_inner();
    session.verify_csrf(&input.csrf_token)?;
    let mut form = decode_snippet_create(input)?;

    if !form.validate() {
        let data = TemplateData::for_request(&state, &session)
            .await?
            .with_form(&form)?;
        return render(
            &state.templates,
            StatusCode::UNPROCESSABLE_ENTITY,
            "create.html",
            &data,
        );
    }

    let id = state
        .snippets
        .insert(&form.to_new_snippet())
        .await
        .map_err(map_snippet_error)?;
    session.put_flash(SNIPPET_CREATED_FLASH)?;
    Ok(HttpResponse::SeeOther()
        .insert_header((LOCATION, format!("/snippet/view/{id}")))
        .finish())
}
