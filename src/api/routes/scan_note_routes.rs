//! Scan Note Routes

use axum::{
    routing::get,
    Router,
};

use crate::api::app_state::AppState;
use crate::api::handlers::scan_note_handler::*;

/// 创建扫描备注路由器
pub fn create_scan_note_router() -> Router<AppState> {
    Router::new()
        .route("/scan_notes", get(list_scan_notes).post(create_scan_note))
        .route(
            "/scan_notes/:id",
            get(get_scan_note).put(update_scan_note).delete(delete_scan_note),
        )
}
