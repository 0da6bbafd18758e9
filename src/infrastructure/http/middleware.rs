//! HTTP Middleware
//!
//! 请求状态日志：4xx 记 warn，5xx 记 error，其余记 debug（含耗时）

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// 请求状态日志中间件
///
/// 交易失败以 200 + failure envelope 返回，由分发器自行记录；
/// 这里只关心 HTTP 层面的状态码
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            elapsed_ms,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            elapsed_ms,
            "HTTP client error"
        );
    } else {
        tracing::debug!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            elapsed_ms,
            "HTTP request completed"
        );
    }

    response
}
