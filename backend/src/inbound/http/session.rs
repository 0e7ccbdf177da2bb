//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix session so handlers deal in domain terms: the signed-in
//! account, a one-shot flash message and the per-session form token.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use uuid::Uuid;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "authenticated_user_id";
pub(crate) const FLASH_KEY: &str = "flash";
pub(crate) const CSRF_KEY: &str = "csrf_token";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Record a successful login, renewing the session identifier first.
    pub fn persist_user(&self, user_id: UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.get())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Drop the signed-in account and renew the session identifier.
    pub fn forget_user(&self) {
        self.0.remove(USER_ID_KEY);
        self.0.renew();
    }

    /// The signed-in account, if any.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        self.0
            .get::<i64>(USER_ID_KEY)
            .map(|id| id.map(UserId::new))
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))
    }

    /// Store a message for the next rendered page.
    pub fn put_flash(&self, message: &str) -> Result<(), Error> {
        self.0
            .insert(FLASH_KEY, message)
            .map_err(|error| Error::internal(format!("failed to store flash: {error}")))
    }

    /// Take the pending flash message. A second call returns `None`.
    pub fn pop_flash(&self) -> Result<Option<String>, Error> {
        match self.0.remove_as::<String>(FLASH_KEY) {
            None => Ok(None),
            Some(Ok(message)) => Ok(Some(message)),
            Some(Err(raw)) => {
                tracing::warn!(raw = %raw, "discarding undecodable flash message");
                Ok(None)
            }
        }
    }

    /// The form token for this session, created on first use.
    pub fn csrf_token(&self) -> Result<String, Error> {
        let existing = self
            .0
            .get::<String>(CSRF_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        if let Some(token) = existing {
            return Ok(token);
        }
        let token = Uuid::new_v4().simple().to_string();
        self.0
            .insert(CSRF_KEY, &token)
            .map_err(|error| Error::internal(format!("failed to store csrf token: {error}")))?;
        Ok(token)
    }

    /// Reject a submitted form whose token does not match the session's.
    pub fn verify_csrf(&self, submitted: &str) -> Result<(), Error> {
        let expected = self
            .0
            .get::<String>(CSRF_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match expected {
            Some(token) if !submitted.is_empty() && token == submitted => Ok(()),
            _ => Err(Error::invalid_request("missing or mismatched csrf token")),
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::dev::ServiceResponse;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    use crate::inbound::http::test_utils::test_session_middleware;

    fn session_cookie(res: &ServiceResponse) -> Cookie<'static> {
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned()
    }

    #[actix_web::test]
    async fn flash_is_shown_once() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/put",
                    web::get().to(|session: SessionContext| async move {
                        session.put_flash("Saved!")?;
                        Ok::<_, Error>(HttpResponse::Ok().finish())
                    }),
                )
                .route(
                    "/pop",
                    web::get().to(|session: SessionContext| async move {
                        let flash = session.pop_flash()?.unwrap_or_default();
                        Ok::<_, Error>(HttpResponse::Ok().body(flash))
                    }),
                ),
        )
        .await;

        let put = test::call_service(&app, test::TestRequest::get().uri("/put").to_request()).await;
        let cookie = session_cookie(&put);

        let first = test::call_service(
            &app,
            test::TestRequest::get().uri("/pop").cookie(cookie).to_request(),
        )
        .await;
        let cookie = session_cookie(&first);
        assert_eq!(test::read_body(first).await, "Saved!");

        let second = test::call_service(
            &app,
            test::TestRequest::get().uri("/pop").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(test::read_body(second).await, "");
    }

    #[actix_web::test]
    async fn user_id_round_trips_and_is_forgotten() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/login",
                    web::get().to(|session: SessionContext| async move {
                        session.persist_user(UserId::new(42))?;
                        Ok::<_, Error>(HttpResponse::Ok().finish())
                    }),
                )
                .route(
                    "/logout",
                    web::get().to(|session: SessionContext| async move {
                        session.forget_user();
                        HttpResponse::Ok().finish()
                    }),
                )
                .route(
                    "/whoami",
                    web::get().to(|session: SessionContext| async move {
                        let id = session.user_id()?.map(|id| id.to_string());
                        Ok::<_, Error>(HttpResponse::Ok().body(id.unwrap_or_default()))
                    }),
                ),
        )
        .await;

        let login =
            test::call_service(&app, test::TestRequest::get().uri("/login").to_request()).await;
        let cookie = session_cookie(&login);
        let whoami = test::call_service(
            &app,
            test::TestRequest::get().uri("/whoami").cookie(cookie.clone()).to_request(),
        )
        .await;
        assert_eq!(test::read_body(whoami).await, "42");

        let logout = test::call_service(
            &app,
            test::TestRequest::get().uri("/logout").cookie(cookie).to_request(),
        )
        .await;
        let cookie = session_cookie(&logout);
        let whoami = test::call_service(
            &app,
            test::TestRequest::get().uri("/whoami").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(test::read_body(whoami).await, "");
    }

    #[actix_web::test]
    async fn csrf_token_is_stable_and_verified() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/token",
                    web::get().to(|session: SessionContext| async move {
                        let first = session.csrf_token()?;
                        let second = session.csrf_token()?;
                        assert_eq!(first, second);
                        Ok::<_, Error>(HttpResponse::Ok().body(first))
                    }),
                )
                .route(
                    "/check/{token}",
                    web::get().to(
                        |session: SessionContext, token: web::Path<String>| async move {
                            session.verify_csrf(&token)?;
                            Ok::<_, Error>(HttpResponse::Ok().finish())
                        },
                    ),
                ),
        )
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/token").to_request()).await;
        let cookie = session_cookie(&res);
        let body = test::read_body(res).await;
        let token = std::str::from_utf8(&body).expect("utf8 token").to_owned();

        let ok = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/check/{token}"))
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(ok.status(), StatusCode::OK);

        let forged = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/check/forged")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(forged.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn verify_without_session_token_is_rejected() {
        let app = test::init_service(App::new().wrap(test_session_middleware()).route(
            "/check",
            web::get().to(|session: SessionContext| async move {
                session.verify_csrf("anything")?;
                Ok::<_, Error>(HttpResponse::Ok().finish())
            }),
        ))
        .await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/check").to_request()).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
