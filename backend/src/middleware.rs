use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use actix_web::HttpMessage;
use futures_util::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;
use std::task::{Context, Poll};
use std::time::Instant;
use log::{info, warn, error};
use actix_web::http::header::{HeaderName, HeaderValue};
use uuid::Uuid;
use std::sync::atomic::{AtomicU64, Ordering};

static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Request ids are counter-based under test and UUID v4 otherwise.
fn generate_request_id() -> String {
    let is_test = cfg!(test) || std::env::var("RUST_ENV")
        .unwrap_or_default()
        .eq_ignore_ascii_case("test");

    if is_test {
        format!("test-{}", REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed))
    } else {
        Uuid::new_v4().to_string()
    }
}

/// Access log with an `x-request-id` echoed back on every response.
pub struct Logger;

impl<S, B> Transform<S, ServiceRequest> for Logger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = LoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LoggerMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct LoggerMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for LoggerMiddleware<S>
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
        let svc = self.service.clone();
        let start_time = Instant::now();
        let method = req.method().clone();
        let uri = req.uri().clone();
        let peer_addr = req
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let request_id = generate_request_id();
        req.extensions_mut().insert(request_id.clone());

        Box::pin(async move {
            let mut res = svc.call(req).await?;
            let duration = start_time.elapsed();

            if let Ok(header_value) = HeaderValue::try_from(request_id.as_str()) {
                res.headers_mut()
                    .insert(HeaderName::from_static("x-request-id"), header_value);
            }

            let status_code = res.status().as_u16();
            let line = format!(
                "request_id={} {} {} {} {}ms {}",
                request_id,
                method,
                uri,
                status_code,
                duration.as_millis(),
                peer_addr
            );
            if status_code >= 500 {
                error!("{}", line);
            } else if status_code >= 400 {
                warn!("{}", line);
            } else {
                info!("{}", line);
            }

            Ok(res)
        })
    }
}

/// The replay routes are public and read-only, so any origin may GET them.
pub fn cors_middleware() -> actix_cors::Cors {
    actix_cors::Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "OPTIONS"])
        .allowed_headers(vec![
            actix_web::http::header::ACCEPT,
            actix_web::http::header::CONTENT_TYPE,
        ])
        .max_age(3600)
}
