//! Email Routes

use axum::{
    routing::post,
    Router,
};

use crate::api::app_state::AppState;
use crate::api::handlers::email_handler::*;

/// 创建邮件路由器
pub fn create_email_router() -> Router<AppState> {
    Router::new().route("/email", post(send_email))
}
