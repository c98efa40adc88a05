//! Routes 模块
//!
//! 定义 API 路由。

pub mod annotation_routes;
pub mod email_routes;
pub mod experiment_routes;
pub mod image_routes;
pub mod scan_note_routes;
pub mod scan_routes;
pub mod session_routes;
pub mod site_routes;
pub mod user_routes;
