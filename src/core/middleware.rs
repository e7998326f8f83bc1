//! 核心中间件模块

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, warn};

/// 请求日志中间件
///
/// 记录匹配到的路由模板（如 `/api/products/:id`），未匹配的请求记为 `-`。
/// 4xx/5xx 响应以 warn 级别输出。
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "-".to_string());
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());

    let response = next.run(req).await;
    let status = response.status();
    let latency_ms = start.elapsed().as_millis() as u64;

    if status.is_client_error() || status.is_server_error() {
        warn!(
            method = %method,
            route = %route,
            uri = %uri,
            status = status.as_u16(),
            latency_ms,
            user_agent = ?user_agent,
            "product request failed"
        );
    } else {
        info!(
            method = %method,
            route = %route,
            uri = %uri,
            status = status.as_u16(),
            latency_ms,
            user_agent = ?user_agent,
            "product request handled"
        );
    }

    response
}
