use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

/// Middleware to log request outcome and latency
pub async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_client_error() || status.is_server_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = %status,
            elapsed_ms = elapsed_ms,
            "Request failed"
        );
    } else {
        tracing::debug!(
            method = %method,
            uri = %uri,
            status = %status,
            elapsed_ms = elapsed_ms,
            "Request completed"
        );
    }

    response
}
