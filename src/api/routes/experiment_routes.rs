//! Experiment Routes

use axum::{
    routing::get,
    Router,
};

use crate::api::app_state::AppState;
use crate::api::handlers::experiment_handler::*;

/// 创建实验路由器
pub fn create_experiment_router() -> Router<AppState> {
    Router::new()
        .route("/experiments", get(list_experiments).post(create_experiment))
        .route(
            "/experiments/:id",
            get(get_experiment).put(update_experiment).delete(delete_experiment),
        )
}
