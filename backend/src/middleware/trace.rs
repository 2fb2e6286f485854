//! Tracing middleware attaching a request-scoped trace identifier.
//!
//! Each incoming request receives a UUID trace id held in task-local storage
//! for correlation across logs and error responses. The id is echoed in the
//! `trace-id` response header.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, error};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Tracing middleware attaching a request-scoped UUID and adding a
/// `trace-id` header to every response.
///
/// Handlers can read the trace ID via [`TraceId::current`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use pet_registry::Trace;
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
        let path = req.path().to_owned();
        let fut = self.service.call(req);
        Box::pin(TraceId::scope(trace_id, async move {
            let mut res = fut.await?;
            debug!(%trace_id, %method, %path, status = res.status().as_u16(), "request served");
            match HeaderValue::from_str(&trace_id.to_string()) {
                Ok(value) => {
                    res.response_mut()
                        .headers_mut()
                        .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                }
                Err(error) => {
                    error!(%error, %trace_id, "failed to encode trace identifier header");
                }
            }
            Ok(res)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ApiResult;
    use actix_web::{App, HttpResponse, test, web};
    use serde_json::Value;

    #[actix_web::test]
    async fn adds_trace_id_header() {
        let app = test::init_service(
            App::new()
                .wrap(Trace)
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;
        let req = test::TestRequest::get().uri("/").to_request();
        let res = test::call_service(&app, req).await;
        let header = res
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .expect("trace id header");
        assert!(header.parse::<TraceId>().is_ok());
    }

    async fn test_trace_with_handler<F, Fut, Res>(
        handler: F,
    ) -> (
        actix_web::dev::ServiceResponse<actix_web::body::BoxBody>,
        String,
    )
    where
        F: Fn() -> Fut + Clone + 'static,
        Fut: std::future::Future<Output = Res> + 'static,
        Res: actix_web::Responder + 'static,
    {
        let app =
            test::init_service(App::new().wrap(Trace).route("/", web::get().to(handler))).await;
        let req = test::TestRequest::get().uri("/").to_request();
        let res = test::call_service(&app, req).await;
        let trace_id = res
            .headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("header is ascii")
            .to_owned();
        (res, trace_id)
    }

    #[actix_web::test]
    async fn exposes_trace_id_in_handler() {
        let (res, trace_id) = test_trace_with_handler(|| async move {
            let id = TraceId::current().expect("trace id in scope");
            HttpResponse::Ok().body(id.to_string())
        })
        .await;
        let body = test::read_body(res).await;
        let body = std::str::from_utf8(&body).expect("utf8 body");
        assert_eq!(trace_id, body);
    }

    #[actix_web::test]
    async fn propagates_trace_id_in_error() {
        let (res, trace_id) = test_trace_with_handler(|| async move {
            ApiResult::<HttpResponse>::Err(crate::domain::Error::not_found("pet not found"))
        })
        .await;
        let body: Value = test::read_body_json(res).await;
        assert_eq!(
            body.get("traceId").and_then(Value::as_str),
            Some(trace_id.as_str())
        );
    }
}
