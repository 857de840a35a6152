//! `X-Process-Time` response header.

use std::time::Instant;

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};

use crate::observability::metrics;

pub const X_PROCESS_TIME: &str = "x-process-time";

/// Times the inner service and reports the wall-clock seconds as a header.
pub async fn process_time(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let start = Instant::now();

    let mut response = next.run(request).await;

    let elapsed = start.elapsed();
    if let Ok(value) = HeaderValue::from_str(&elapsed.as_secs_f64().to_string()) {
        response.headers_mut().insert(X_PROCESS_TIME, value);
    }
    metrics::record_request(&method, response.status().as_u16(), elapsed);

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, middleware, routing::get, Router};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_header_present_on_success_and_fallback() {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(middleware::from_fn(process_time));

        for uri in ["/", "/missing"] {
            let response = app
                .clone()
                .oneshot(axum::http::Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            let value = response.headers().get(X_PROCESS_TIME).unwrap();
            let seconds: f64 = value.to_str().unwrap().parse().unwrap();
            assert!(seconds >= 0.0);
        }
    }
}
