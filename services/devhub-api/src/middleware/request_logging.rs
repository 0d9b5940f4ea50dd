use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};

/// Log every request with its status and latency
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let started = Instant::now();

    info!("Incoming request: {} {}", method, uri);

    let response = next.run(req).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis();

    if status.is_server_error() {
        warn!("{} {} -> {} in {}ms", method, uri, status, elapsed_ms);
    } else {
        info!("{} {} -> {} in {}ms", method, uri, status, elapsed_ms);
    }

    response
}
