//! API 模块
//!
//! 提供 REST API 支持：每个审阅资源一组路由，统一挂载在 `/api/v1` 下。

pub mod app_state;
pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod pagination;
pub mod routes;

use crate::api::app_state::AppState;
use crate::api::middleware::{cors_layer, security_headers_middleware};
use crate::config::config::ServerConfig;
use crate::observability::{ObservabilityState, create_observability_router, metrics_middleware};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(app_state: AppState, cors_origins: &[String]) -> Router {
    let api = Router::new()
        .merge(routes::session_routes::create_session_router())
        .merge(routes::experiment_routes::create_experiment_router())
        .merge(routes::scan_routes::create_scan_router())
        .merge(routes::scan_note_routes::create_scan_note_router())
        .merge(routes::image_routes::create_image_router())
        .merge(routes::site_routes::create_site_router())
        .merge(routes::user_routes::create_user_router())
        .merge(routes::annotation_routes::create_annotation_router())
        .merge(routes::email_routes::create_email_router());

    Router::new()
        .nest("/api/v1", api)
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .layer(axum::middleware::from_fn_with_state(
            app_state.metrics.clone(),
            metrics_middleware,
        ))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// 组装完整应用：可观测性端点、`/api/v1` 资源与请求超时
pub fn create_app(app_state: AppState, server: &ServerConfig, version: &str) -> Router {
    let observability = Arc::new(ObservabilityState::new(
        version.to_string(),
        app_state.metrics.clone(),
        app_state.db_pool.clone(),
    ));

    create_observability_router(observability)
        .merge(create_router(app_state, &server.cors_origins))
        .layer(TimeoutLayer::new(Duration::from_secs(server.request_timeout)))
}

/// 包装最终路由：`/api/v1/scans/` 与 `/api/v1/scans` 路由到同一处理程序
pub fn into_service(router: Router) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router)
}
