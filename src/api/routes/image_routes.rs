//! Image Routes
//!
//! 图像只读：列表与文件下载。

use axum::{
    routing::get,
    Router,
};

use crate::api::app_state::AppState;
use crate::api::handlers::image_handler::*;

/// 创建图像路由器
pub fn create_image_router() -> Router<AppState> {
    Router::new()
        .route("/images", get(list_images))
        .route("/images/:id/download", get(download_image))
}
