//! Shared harness for page-level integration tests.
//!
//! Builds the full middleware stack over in-memory adapters and a pinned
//! clock, and offers a cookie-carrying [`Browser`] so tests can walk through
//! multi-request flows the way a user agent would.

#![allow(dead_code, reason = "Each test binary uses a different subset")]

use std::path::Path;
use std::sync::{Arc, OnceLock};

use actix_http::Request;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::{HeaderMap, LOCATION};
use actix_web::{App, test, web};
use argon2::Params;
use chrono::{TimeZone, Utc};
use regex::Regex;
use snippetbox::Trace;
use snippetbox::domain::AccountsService;
use snippetbox::inbound::http::routes;
use snippetbox::inbound::http::state::HttpState;
use snippetbox::inbound::http::templates::TemplateCache;
use snippetbox::inbound::http::test_utils::{TEST_SESSION_COOKIE, test_session_middleware};
use snippetbox::middleware::security_headers;
use snippetbox::outbound::hashing::Argon2PasswordHasher;
use snippetbox::outbound::memory::{InMemorySnippetRepository, InMemoryUserRepository};
use snippetbox::test_support::MutableClock;

/// Templates shipped with the service.
pub fn shipped_templates() -> TemplateCache {
    let html = Path::new(env!("CARGO_MANIFEST_DIR")).join("ui/html");
    TemplateCache::from_dir(&html).expect("shipped templates parse")
}

/// Handler state plus the clock tests advance.
pub struct Harness {
    pub clock: Arc<MutableClock>,
    pub state: web::Data<HttpState>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_templates(shipped_templates())
    }

    pub fn with_templates(templates: TemplateCache) -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 4, 1, 10, 0, 0)
            .single()
            .expect("valid timestamp");
        let clock = Arc::new(MutableClock::new(start));
        let params = Params::new(8, 1, 1, None).expect("cheap argon2 params");
        let accounts = AccountsService::new(
            Arc::new(InMemoryUserRepository::new(clock.clone())),
            Arc::new(Argon2PasswordHasher::with_params(params)),
        );
        let state = web::Data::new(HttpState::new(
            Arc::new(InMemorySnippetRepository::new(clock.clone())),
            Arc::new(accounts),
            Arc::new(templates),
            clock.clone(),
        ));
        Self { clock, state }
    }

    /// Application with the production middleware order.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(self.state.clone())
            .configure(routes::configure)
            .wrap(test_session_middleware())
            .wrap(Trace)
            .wrap(security_headers())
    }
}

/// Response captured with its body read to a string.
pub struct Page {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl Page {
    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
    }

    /// Anti-forgery token embedded in the page's forms.
    pub fn csrf_token(&self) -> String {
        static CSRF_RE: OnceLock<Regex> = OnceLock::new();
        let re = CSRF_RE.get_or_init(|| {
            Regex::new(r#"name="csrf_token" value="([^"]+)""#).expect("csrf regex")
        });
        re.captures(&self.body)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_owned())
            .expect("page embeds a csrf token")
    }
}

/// Minimal user agent that replays the latest session cookie.
#[derive(Default)]
pub struct Browser {
    cookie: Option<Cookie<'static>>,
}

impl Browser {
    pub async fn send<S>(&mut self, app: &S, req: test::TestRequest) -> Page
    where
        S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        let req = match &self.cookie {
            Some(cookie) => req.cookie(cookie.clone()),
            None => req,
        };
        let res = test::call_service(app, req.to_request()).await;
        if let Some(cookie) = res
            .response()
            .cookies()
            .find(|c| c.name() == TEST_SESSION_COOKIE)
        {
            self.cookie = Some(cookie.into_owned());
        }
        let status = res.status();
        let headers = res.headers().clone();
        let body = test::read_body(res).await;
        Page {
            status,
            headers,
            body: String::from_utf8(body.to_vec()).expect("utf-8 body"),
        }
    }

    pub async fn get<S>(&mut self, app: &S, uri: &str) -> Page
    where
        S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        self.send(app, test::TestRequest::get().uri(uri)).await
    }

    pub async fn post_form<S>(&mut self, app: &S, uri: &str, form: &[(&str, &str)]) -> Page
    where
        S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        self.send(app, test::TestRequest::post().uri(uri).set_form(form))
            .await
    }

    /// Load `form_page`, then submit `fields` plus its csrf token to `action`.
    pub async fn submit<S>(
        &mut self,
        app: &S,
        form_page: &str,
        action: &str,
        fields: &[(&str, &str)],
    ) -> Page
    where
        S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        let token = self.get(app, form_page).await.csrf_token();
        let mut form: Vec<(&str, &str)> = fields.to_vec();
        form.push(("csrf_token", token.as_str()));
        self.post_form(app, action, &form).await
    }
}
