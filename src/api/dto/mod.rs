//! DTO 模块
//!
//! 数据传输对象：请求载荷与按字段白名单投影的响应结构。

pub mod annotation_dto;
pub mod email_dto;
pub mod experiment_dto;
pub mod image_dto;
pub mod scan_dto;
pub mod scan_note_dto;
pub mod session_dto;
pub mod site_dto;
pub mod user_dto;

pub use annotation_dto::*;
pub use email_dto::*;
pub use experiment_dto::*;
pub use image_dto::*;
pub use scan_dto::*;
pub use scan_note_dto::*;
pub use session_dto::*;
pub use site_dto::*;
pub use user_dto::*;
