//! Middleware attaching a request-scoped trace identifier.
//!
//! Every request runs inside a [`TraceId::scope`], so domain errors raised
//! while handling it capture the identifier, and the response carries it
//! back in the `Trace-Id` header.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::error;

use crate::domain::TraceId;

/// Middleware factory; wrap the app with `App::new().wrap(Trace)`.
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
        let header_value = trace_id.to_string();
        let fut = self.service.call(req);
        Box::pin(TraceId::scope(trace_id, async move {
            let mut res = fut.await?;
            match HeaderValue::from_str(&header_value) {
                Ok(value) => {
                    res.response_mut()
                        .headers_mut()
                        .insert(HeaderName::from_static("trace-id"), value);
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

#[cfg(test)]
mod tests {
    use actix_web::{App, HttpResponse, test, web};

    use super::*;

    #[actix_web::test]
    async fn responses_carry_a_trace_id_header() {
        let app = test::init_service(
            App::new()
                .wrap(Trace)
                .route("/ping", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let response = test::call_service(&app, test::TestRequest::get().uri("/ping").to_request())
            .await;
        let header = response
            .headers()
            .get("trace-id")
            .expect("trace-id header present");
        header
            .to_str()
            .expect("ascii header")
            .parse::<TraceId>()
            .expect("header is a UUID");
    }

    #[actix_web::test]
    async fn handlers_observe_the_scoped_trace_id() {
        async fn echo_trace() -> HttpResponse {
            match TraceId::current() {
                Some(id) => HttpResponse::Ok().body(id.to_string()),
                None => HttpResponse::InternalServerError().finish(),
            }
        }

        let app = test::init_service(
            App::new()
                .wrap(Trace)
                .route("/trace", web::get().to(echo_trace)),
        )
        .await;

        let response =
            test::call_service(&app, test::TestRequest::get().uri("/trace").to_request()).await;
        assert!(response.status().is_success());
    }
}
