//! Middleware rendering failures as JSON envelopes.
//!
//! Wraps the whole application. For requests that expect JSON, any response
//! carrying an error, whether raised by a handler, an extractor or an inner
//! middleware, is passed to the [`ExceptionMapper`] and replaced by its
//! envelope. Other requests keep the framework's default error rendering.
//!
//! Inner middleware must report rejections as responses
//! (`ServiceRequest::error_response`) rather than `Err`.

use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderMap, ACCEPT, ACCEPT_LANGUAGE},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use crate::handlers::error::ExceptionMapper;

/// Middleware for standardizing error responses
#[derive(Clone)]
pub struct ErrorHandlerMiddleware {
    mapper: Arc<ExceptionMapper>,
}

impl ErrorHandlerMiddleware {
    pub fn new(mapper: Arc<ExceptionMapper>) -> Self {
        Self { mapper }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ErrorHandlerMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ErrorHandlerMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorHandlerMiddlewareService {
            service: Rc::new(service),
            mapper: Arc::clone(&self.mapper),
        }))
    }
}

pub struct ErrorHandlerMiddlewareService<S> {
    service: Rc<S>,
    mapper: Arc<ExceptionMapper>,
}

impl<S, B> Service<ServiceRequest> for ErrorHandlerMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let mapper = Arc::clone(&self.mapper);

        let language = mapper.negotiate_language(
            req.headers()
                .get(ACCEPT_LANGUAGE)
                .and_then(|value| value.to_str().ok()),
        );
        req.extensions_mut().insert(language);

        let wants_json = expects_json(req.headers());

        Box::pin(async move {
            let res = service.call(req).await?;
            if !wants_json {
                return Ok(res.map_into_left_body());
            }
            let rendered = res.response().error().map(|err| mapper.render(err, language));
            match rendered {
                Some(envelope) => Ok(res.into_response(envelope).map_into_right_body()),
                None => Ok(res.map_into_left_body()),
            }
        })
    }
}

/// Whether the client asked for a JSON response: an `Accept` header
/// mentioning `json`, or an XMLHttpRequest
pub fn expects_json(headers: &HeaderMap) -> bool {
    let accepts_json = headers
        .get(ACCEPT)
        .and_then(|value| value.to_str().ok())
        .map_or(false, |accept| accept.to_ascii_lowercase().contains("json"));
    let is_ajax = headers
        .get("X-Requested-With")
        .and_then(|value| value.to_str().ok())
        .map_or(false, |value| value.eq_ignore_ascii_case("XMLHttpRequest"));
    accepts_json || is_ajax
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_expects_json() {
        let req = TestRequest::default()
            .insert_header((ACCEPT, "application/json"))
            .to_http_request();
        assert!(expects_json(req.headers()));

        let req = TestRequest::default()
            .insert_header((ACCEPT, "application/vnd.api+json"))
            .to_http_request();
        assert!(expects_json(req.headers()));

        let req = TestRequest::default()
            .insert_header(("X-Requested-With", "XMLHttpRequest"))
            .to_http_request();
        assert!(expects_json(req.headers()));

        let req = TestRequest::default()
            .insert_header((ACCEPT, "text/html"))
            .to_http_request();
        assert!(!expects_json(req.headers()));

        assert!(!expects_json(TestRequest::default().to_http_request().headers()));
    }
}
