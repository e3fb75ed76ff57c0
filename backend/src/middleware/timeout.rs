//! Request timeout middleware.
//!
//! Requests still running after the configured duration are dropped and
//! answered with 503 and the message `request timed out`.

use std::task::{Context, Poll};
use std::time::Duration;

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, ResponseError};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::warn;

use crate::domain::Error as DomainError;

/// Message returned when a request exceeds its deadline.
pub const TIMEOUT_MESSAGE: &str = "request timed out";

/// Default deadline applied to every request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Middleware bounding how long a request may run.
///
/// # Examples
/// ```
/// use std::time::Duration;
///
/// use actix_web::App;
/// use storefront::middleware::Timeout;
///
/// let app = App::new().wrap(Timeout::new(Duration::from_secs(30)));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Timeout {
    duration: Duration,
}

impl Timeout {
    pub const fn new(duration: Duration) -> Self {
        Self { duration }
    }

    pub const fn duration(&self) -> Duration {
        self.duration
    }
}

impl Default for Timeout {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_TIMEOUT)
    }
}

impl<S, B> Transform<S, ServiceRequest> for Timeout
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = TimeoutMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TimeoutMiddleware {
            service,
            duration: self.duration,
        }))
    }
}

/// Service wrapper produced by [`Timeout`].
pub struct TimeoutMiddleware<S> {
    service: S,
    duration: Duration,
}

impl<S, B> Service<ServiceRequest> for TimeoutMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request = req.request().clone();
        let duration = self.duration;
        let fut = self.service.call(req);
        Box::pin(async move {
            match tokio::time::timeout(duration, fut).await {
                Ok(result) => result.map(ServiceResponse::map_into_left_body),
                Err(_) => {
                    warn!(
                        path = %request.path(),
                        timeout_secs = duration.as_secs(),
                        "request timed out"
                    );
                    let response = DomainError::service_unavailable(TIMEOUT_MESSAGE)
                        .error_response()
                        .map_into_right_body();
                    Ok(ServiceResponse::new(request, response))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use rstest::rstest;

    async fn status_and_body(timeout: Duration, delay: Duration) -> (StatusCode, String) {
        let app = actix_test::init_service(App::new().wrap(Timeout::new(timeout)).route(
            "/",
            web::get().to(move || async move {
                tokio::time::sleep(delay).await;
                HttpResponse::Ok().body("done")
            }),
        ))
        .await;
        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request()).await;
        let status = res.status();
        let body = actix_test::read_body(res).await;
        (
            status,
            String::from_utf8(body.to_vec()).expect("utf8 body"),
        )
    }

    #[rstest]
    #[actix_web::test]
    async fn fast_requests_pass_through() {
        let (status, body) =
            status_and_body(Duration::from_secs(5), Duration::from_millis(0)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "done");
    }

    #[rstest]
    #[actix_web::test]
    async fn slow_requests_time_out() {
        let (status, body) =
            status_and_body(Duration::from_millis(20), Duration::from_secs(5)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let value: serde_json::Value = serde_json::from_str(&body).expect("JSON body");
        assert_eq!(value["errors"][0]["message"], TIMEOUT_MESSAGE);
    }

    #[rstest]
    fn default_is_two_minutes() {
        assert_eq!(Timeout::default().duration(), Duration::from_secs(120));
    }
}
