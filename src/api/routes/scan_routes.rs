//! Scan Routes

use axum::{
    routing::get,
    Router,
};

use crate::api::app_state::AppState;
use crate::api::handlers::scan_handler::*;

/// 创建扫描路由器
pub fn create_scan_router() -> Router<AppState> {
    Router::new()
        .route("/scans", get(list_scans).post(create_scan))
        .route(
            "/scans/:id",
            get(get_scan).put(update_scan).delete(delete_scan),
        )
}
