use axum::{body::Body, http::Request, middleware::Next, response::Response};

/// Logs every request before it reaches a handler.
///
/// The timestamp comes from the tracing subscriber's formatter.
pub async fn log_request_middleware(req: Request<Body>, next: Next) -> Response {
    tracing::info!(method = %req.method(), uri = %req.uri(), "incoming request");
    next.run(req).await
}
