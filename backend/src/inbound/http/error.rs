//! HTTP adapter mapping for domain errors.
//!
//! The domain error stays transport agnostic. Here it becomes a status code
//! and a plain-text body carrying only the canonical reason phrase, so no
//! internal detail reaches the client. Logging of server errors happens in
//! the [`Trace`](crate::middleware::Trace) middleware, which sees the method
//! and request target.

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder
            .content_type(ContentType::plaintext())
            .body(status.canonical_reason().unwrap_or("Error"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;

    #[rstest]
    #[case(Error::invalid_request("bad form"), StatusCode::BAD_REQUEST, "Bad Request")]
    #[case(Error::not_found("snippet 9"), StatusCode::NOT_FOUND, "Not Found")]
    #[case(
        Error::internal("pool exhausted: postgres://secret@db"),
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal Server Error"
    )]
    #[actix_web::test]
    async fn responses_carry_only_the_reason_phrase(
        #[case] error: Error,
        #[case] status: StatusCode,
        #[case] body: &str,
    ) {
        let response = error.error_response();
        assert_eq!(response.status(), status);
        let bytes = to_bytes(response.into_body()).await.expect("read body");
        assert_eq!(bytes, body.as_bytes());
    }

    #[test]
    fn trace_id_is_echoed_as_header() {
        let error = Error::internal("boom").with_trace_id("abc");
        let response = error.error_response();
        assert_eq!(
            response
                .headers()
                .get(TRACE_ID_HEADER)
                .and_then(|value| value.to_str().ok()),
            Some("abc")
        );
    }
}
