//! Site Routes

use axum::{
    routing::get,
    Router,
};

use crate::api::app_state::AppState;
use crate::api::handlers::site_handler::*;

/// 创建站点路由器
pub fn create_site_router() -> Router<AppState> {
    Router::new()
        .route("/sites", get(list_sites).post(create_site))
        .route(
            "/sites/:id",
            get(get_site).put(update_site).delete(delete_site),
        )
}
