//! Account page handlers.
//!
//! ```text
//! GET  /user/signup   empty signup form
//! POST /user/signup   validate, create account, flash, redirect to login
//! GET  /user/login    empty login form
//! POST /user/login    validate, authenticate, renew session, redirect
//! POST /user/logout   forget the account, renew session, flash, redirect
//! ```

use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, get, post, web};

use crate::domain::ports::AccountError;
use crate::domain::{ApiResult, Error};
use crate::inbound::http::forms::{
    DUPLICATE_EMAIL_MESSAGE, INVALID_CREDENTIALS_MESSAGE, LogoutInput, UserLoginForm,
    UserLoginInput, UserSignupForm, UserSignupInput, decode_user_login, decode_user_signup,
};
use crate::inbound::http::render::{TemplateData, render};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

pub const SIGNUP_FLASH: &str = "Your signup was successful. Please log in.";
pub const LOGOUT_FLASH: &str = "You've been logged out successfully!";

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location.to_owned()))
        .finish()
}

async fn render_form<F: serde::Serialize>(
    state: &HttpState,
    session: &SessionContext,
    status: StatusCode,
    page: &str,
    form: &F,
) -> ApiResult<HttpResponse> {
    let data = TemplateData::for_request(state, session)
        .await?
        .with_form(form)?;
    render(&state.templates, status, page, &data)
}

#[get("/user/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    render_form(
        &state,
        &session,
        StatusCode::OK,
        "signup.html",
        &UserSignupForm::default(),
    )
    .await
}

/// Register an account. A taken email is reported on the email field.
#[post("/user/signup")]
pub async fn signup_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    input: web::Form<UserSignupInput>,
) -> ApiResult<HttpResponse> {
    let input = input.into_inner();
    session.verify_csrf(&input.csrf_token)?;
    let mut form = decode_user_signup(input);

    if form.validate() {
        match state.accounts.signup(&form.to_new_account()).await {
            Ok(_) => {
                session.put_flash(SIGNUP_FLASH)?;
                return Ok(see_other("/user/login"));
            }
            Err(AccountError::DuplicateEmail) => {
                form.validator.add_field_error("email", DUPLICATE_EMAIL_MESSAGE);
            }
            Err(other) => return Err(Error::internal(format!("signup failed: {other}"))),
        }
    }

    render_form(
        &state,
        &session,
        StatusCode::UNPROCESSABLE_ENTITY,
        "signup.html",
        &form,
    )
    .await
}

#[get("/user/login")]
pub async fn login(state: web::Data<HttpState>, session: SessionContext) -> ApiResult<HttpResponse> {
    render_form(
        &state,
        &session,
        StatusCode::OK,
        "login.html",
        &UserLoginForm::default(),
    )
    .await
}

/// Sign in. Wrong email and wrong password produce the same message.
#[post("/user/login")]
pub async fn login_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    input: web::Form<UserLoginInput>,
) -> ApiResult<HttpResponse> {
    let input = input.into_inner();
    session.verify_csrf(&input.csrf_token)?;
    let mut form = decode_user_login(input);

    if form.validate() {
        match state.accounts.authenticate(&form.to_credentials()).await {
            Ok(user_id) => {
                session.persist_user(user_id)?;
                return Ok(see_other("/snippet/create"));
            }
            Err(AccountError::InvalidCredentials) => {
                form.validator.add_non_field_error(INVALID_CREDENTIALS_MESSAGE);
            }
            Err(other) => return Err(Error::internal(format!("login failed: {other}"))),
        }
    }

    render_form(
        &state,
        &session,
        StatusCode::UNPROCESSABLE_ENTITY,
        "login.html",
        &form,
    )
    .await
}

#[post("/user/logout")]
pub async fn logout_post(
    session: SessionContext,
    input: web::Form<LogoutInput>,
) -> ApiResult<HttpResponse> {
    session.verify_csrf(&input.csrf_token)?;
    session.forget_user();
    session.put_flash(LOGOUT_FLASH)?;
    Ok(see_other("/"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{MockAccountService, MockSnippetRepository};
    use crate::domain::UserId;
    use crate::inbound::http::session::CSRF_KEY;
    use crate::inbound::http::templates::TemplateCache;
    use crate::inbound::http::test_utils::{TEST_SESSION_COOKIE, test_session_middleware};
    use actix_session::Session;
    use actix_web::cookie::Cookie;
    use actix_web::{App, test as actix_test};
    use mockable::DefaultClock;

    const TOKEN: &str = "fixed-token";

    fn templates() -> TemplateCache {
        let page = r#"{% extends "base.html" %}{% block main %}{% for e in form.non_field_errors %}{{ e }}{% endfor %}{{ form.field_errors.email | default(value="") }}{% endblock %}"#;
        let pages: Vec<(String, String)> = ["signup.html", "login.html"]
            .into_iter()
            .map(|name| (name.to_owned(), page.to_owned()))
            .collect();
        TemplateCache::from_sources("{% block main %}{% endblock %}", &[], &pages)
            .expect("templates parse")
    }

    async fn call(
        accounts: MockAccountService,
        uri: &str,
        form: &[(&str, &str)],
    ) -> (StatusCode, String) {
        let state = web::Data::new(HttpState::new(
            Arc::new(MockSnippetRepository::new()),
            Arc::new(accounts),
            Arc::new(templates()),
            Arc::new(DefaultClock),
        ));
        let app = actix_test::init_service(
            App::new()
                .app_data(state)
                .wrap(test_session_middleware())
                .route(
                    "/seed",
                    web::get().to(|session: Session| async move {
                        session.insert(CSRF_KEY, TOKEN).expect("seed csrf token");
                        HttpResponse::Ok().finish()
                    }),
                )
                .service(signup_post)
                .service(login_post)
                .service(logout_post),
        )
        .await;

        let seed = actix_test::TestRequest::get().uri("/seed").to_request();
        let seeded = actix_test::call_service(&app, seed).await;
        let cookie: Cookie<'static> = seeded
            .response()
            .cookies()
            .find(|cookie| cookie.name() == TEST_SESSION_COOKIE)
            .expect("session cookie")
            .into_owned();

        let mut fields: Vec<(&str, &str)> = form.to_vec();
        fields.push(("csrf_token", TOKEN));
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(uri)
                .cookie(cookie)
                .set_form(&fields)
                .to_request(),
        )
        .await;
        let status = res.status();
        let location = res
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = actix_test::read_body(res).await;
        let body = std::str::from_utf8(&body).expect("utf8 body").to_owned();
        (status, location.unwrap_or(body))
    }

    #[actix_web::test]
    async fn duplicate_email_is_a_field_error() {
        let mut accounts = MockAccountService::new();
        accounts
            .expect_signup()
            .returning(|_| Err(AccountError::duplicate_email()));
        let (status, body) = call(
            accounts,
            "/user/signup",
            &[("name", "Al"), ("email", "al@example.com"), ("password", "longenough")],
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body, DUPLICATE_EMAIL_MESSAGE);
    }

    #[actix_web::test]
    async fn signup_storage_failure_is_a_server_error() {
        let mut accounts = MockAccountService::new();
        accounts
            .expect_signup()
            .returning(|_| Err(AccountError::storage("connection reset")));
        let (status, body) = call(
            accounts,
            "/user/signup",
            &[("name", "Al"), ("email", "al@example.com"), ("password", "longenough")],
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("connection reset"));
    }

    #[actix_web::test]
    async fn successful_signup_redirects_to_login() {
        let mut accounts = MockAccountService::new();
        accounts.expect_signup().returning(|_| Ok(UserId::new(1)));
        let (status, location) = call(
            accounts,
            "/user/signup",
            &[("name", "Al"), ("email", "al@example.com"), ("password", "longenough")],
        )
        .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location, "/user/login");
    }

    #[actix_web::test]
    async fn invalid_credentials_are_a_non_field_error() {
        let mut accounts = MockAccountService::new();
        accounts
            .expect_authenticate()
            .returning(|_| Err(AccountError::invalid_credentials()));
        let (status, body) = call(
            accounts,
            "/user/login",
            &[("email", "al@example.com"), ("password", "wrong")],
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body, INVALID_CREDENTIALS_MESSAGE);
    }

    #[actix_web::test]
    async fn credential_lookup_failure_is_a_server_error() {
        let mut accounts = MockAccountService::new();
        accounts
            .expect_authenticate()
            .returning(|_| Err(AccountError::storage("scan failed")));
        let (status, _) = call(
            accounts,
            "/user/login",
            &[("email", "al@example.com"), ("password", "whatever")],
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn successful_login_redirects_to_create() {
        let mut accounts = MockAccountService::new();
        accounts
            .expect_authenticate()
            .returning(|_| Ok(UserId::new(3)));
        let (status, location) = call(
            accounts,
            "/user/login",
            &[("email", "al@example.com"), ("password", "pa55word")],
        )
        .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location, "/snippet/create");
    }

    #[actix_web::test]
    async fn invalid_login_form_skips_authentication() {
        let mut accounts = MockAccountService::new();
        accounts.expect_authenticate().never();
        let (status, body) = call(
            accounts,
            "/user/login",
            &[("email", "not-an-email"), ("password", "pw")],
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body, crate::inbound::http::forms::EMAIL_MESSAGE);
    }

    #[actix_web::test]
    async fn logout_redirects_home() {
        let (status, location) = call(MockAccountService::new(), "/user/logout", &[]).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location, "/");
    }
}
