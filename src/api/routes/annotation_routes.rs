//! Annotation Routes

use axum::{
    routing::get,
    Router,
};

use crate::api::app_state::AppState;
use crate::api::handlers::annotation_handler::*;

/// 创建审阅结论路由器
pub fn create_annotation_router() -> Router<AppState> {
    Router::new()
        .route("/annotations", get(list_annotations).post(create_annotation))
        .route(
            "/annotations/:id",
            get(get_annotation).put(update_annotation).delete(delete_annotation),
        )
}
