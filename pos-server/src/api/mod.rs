//! API 路由模块
//!
//! - [`health`] - 健康检查 (公共)
//! - [`pos`] - 桌台、账单和点单接口

pub mod health;
pub mod pos;

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = std::time::Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        target: "http_access",
        elapsed_ms = started.elapsed().as_millis() as u64,
        "{} {} {}",
        method,
        uri,
        response.status()
    );

    response
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(pos::router())
}

/// Full application: routes, auth, and tower-http layers
pub fn build_router(state: ServerState) -> Router {
    health::mark_started();

    build_app()
        // require_auth 内部跳过 /health 和 OPTIONS
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(middleware::from_fn(log_request))
}
