//! Session Routes
//!
//! 会话 CRUD 以及导入/导出路径设置子资源。

use axum::{
    routing::get,
    Router,
};

use crate::api::app_state::AppState;
use crate::api::handlers::session_handler::*;

/// 创建会话路由器
pub fn create_session_router() -> Router<AppState> {
    Router::new()
        .route("/sessions", get(list_sessions).post(create_session))
        .route(
            "/sessions/:id",
            get(get_session).put(update_session).delete(delete_session),
        )
        .route(
            "/sessions/:id/settings",
            get(get_session_settings).put(update_session_settings),
        )
}
