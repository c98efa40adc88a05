//! 会话 DTO

use serde::{Deserialize, Serialize};

use crate::models::Session;

/// 创建会话请求
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub name: String,
    #[serde(default)]
    pub importpath: String,
    #[serde(default)]
    pub exportpath: String,
}

/// 更新会话请求
#[derive(Debug, Deserialize)]
pub struct UpdateSessionRequest {
    pub name: String,
}

/// 会话响应
#[derive(Debug, Serialize, PartialEq)]
pub struct SessionResponse {
    pub id: String,
    pub name: String,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            id: session.id,
            name: session.name,
        }
    }
}

/// 会话设置（导入/导出路径），GET 与 PUT 共用
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSettings {
    pub importpath: String,
    pub exportpath: String,
}

impl From<&Session> for SessionSettings {
    fn from(session: &Session) -> Self {
        Self {
            importpath: session.import_path.clone(),
            exportpath: session.export_path.clone(),
        }
    }
}
