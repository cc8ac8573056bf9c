use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use crate::middleware::request_trace::TraceId;

/// Emits one `request_completed` event per request, levelled by status.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

/// Fields shared by every completion event.
struct Completed<'a> {
    method: &'a str,
    path: &'a str,
    trace_id: &'a str,
    duration_us: u64,
}

fn log_completed(status: StatusCode, done: &Completed<'_>) {
    let code = status.as_u16();
    // 101 means the request became a websocket session.
    let upgraded = status == StatusCode::SWITCHING_PROTOCOLS;
    let Completed {
        method,
        path,
        trace_id,
        duration_us,
    } = *done;
    if status.is_server_error() {
        error!(http.method = %method, url.path = %path, http.status_code = code, duration_us, trace_id = %trace_id, "request_completed");
    } else if status.is_client_error() {
        warn!(http.method = %method, url.path = %path, http.status_code = code, duration_us, trace_id = %trace_id, "request_completed");
    } else {
        info!(http.method = %method, url.path = %path, http.status_code = code, duration_us, trace_id = %trace_id, upgraded, "request_completed");
    }
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let trace_id = req
            .extensions()
            .get::<TraceId>()
            .map(|t| t.0.clone())
            .unwrap_or_else(|| "unknown".to_string());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;
            let status = match &result {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };
            let duration_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
            log_completed(
                status,
                &Completed {
                    method: &method,
                    path: &path,
                    trace_id: &trace_id,
                    duration_us,
                },
            );
            result
        })
    }
}
