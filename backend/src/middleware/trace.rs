//! Request tracing middleware.
//!
//! Each request runs with a fresh [`TraceId`] in task-local scope, echoed in
//! the `trace-id` response header. One `info` event is logged per request.
//! Server errors produced from a domain [`Error`](crate::domain::Error) are
//! logged at `error` with the method, request target, trace id, message and
//! the backtrace captured where the error was created.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{error, info};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Tracing middleware attaching a request-scoped trace identifier.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use snippetbox::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Clone)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service wrapper produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = TraceId::generate();
        let method = req.method().clone();
        let target = req.uri().to_string();
        let fut = self.service.call(req);
        Box::pin(TraceId::scope(trace_id, async move {
            let mut res = fut.await?;
            let status = res.status();

            if status.is_server_error() {
                log_server_error(&res, &method, &target, trace_id);
            }
            info!(
                method = %method,
                target = %target,
                status = status.as_u16(),
                trace_id = %trace_id,
                "request completed"
            );

            match HeaderValue::from_str(&trace_id.to_string()) {
                Ok(value) => {
                    res.response_mut()
                        .headers_mut()
                        .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                }
                Err(error) => {
                    error!(
                        %error,
                        trace_id = %trace_id,
                        "failed to encode trace identifier header"
                    );
                }
            }
            Ok(res)
        }))
    }
}

fn log_server_error<B>(
    res: &ServiceResponse<B>,
    method: &actix_web::http::Method,
    target: &str,
    trace_id: TraceId,
) {
    let Some(err) = res.response().error() else {
        error!(method = %method, target = %target, trace_id = %trace_id, "server error");
        return;
    };
    match err.as_error::<crate::domain::Error>() {
        Some(domain) => {
            let backtrace = domain
                .backtrace()
                .map(ToString::to_string)
                .unwrap_or_default();
            error!(
                method = %method,
                target = %target,
                trace_id = %trace_id,
                backtrace = %backtrace,
                "{}",
                domain.message()
            );
        }
        None => {
            error!(method = %method, target = %target, trace_id = %trace_id, "{err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ApiResult;
    use actix_web::{App, HttpResponse, test, web};

    async fn call_traced<F, Fut, Res>(handler: F) -> ServiceResponse
    where
        F: Fn() -> Fut + Clone + 'static,
        Fut: std::future::Future<Output = Res> + 'static,
        Res: actix_web::Responder + 'static,
    {
        let app =
            test::init_service(App::new().wrap(Trace).route("/", web::get().to(handler))).await;
        test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await
    }

    fn header(res: &ServiceResponse) -> String {
        res.headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("header is ascii")
            .to_owned()
    }

    #[actix_web::test]
    async fn handler_sees_the_header_trace_id() {
        let res = call_traced(|| async move {
            let id = TraceId::current().expect("trace id in scope");
            HttpResponse::Ok().body(id.to_string())
        })
        .await;
        let trace_id = header(&res);
        let body = test::read_body(res).await;
        assert_eq!(std::str::from_utf8(&body).expect("utf8 body"), trace_id);
    }

    #[actix_web::test]
    async fn server_error_keeps_header_and_hides_detail() {
        let res = call_traced(|| async move {
            ApiResult::<HttpResponse>::Err(crate::domain::Error::internal("db password leaked"))
        })
        .await;
        assert_eq!(res.status(), actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
        let trace_id = header(&res);
        assert!(!trace_id.is_empty());
        let body = test::read_body(res).await;
        assert_eq!(body, "Internal Server Error");
    }
}
