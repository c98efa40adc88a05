//! 扫描备注 DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ScanNote, User};

/// 创建备注请求
#[derive(Debug, Deserialize)]
pub struct CreateScanNoteRequest {
    pub note: String,
    /// 扫描 ID
    pub scan: String,
    /// 创建者用户 ID
    pub creator: String,
}

/// 更新备注请求，只允许修改内容
#[derive(Debug, Deserialize)]
pub struct UpdateScanNoteRequest {
    pub note: String,
}

/// 创建者姓名
#[derive(Debug, Serialize, PartialEq)]
pub struct CreatorSummary {
    pub first_name: String,
    pub last_name: String,
}

/// 备注响应
#[derive(Debug, Serialize, PartialEq)]
pub struct ScanNoteResponse {
    pub id: String,
    pub creator: CreatorSummary,
    pub note: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl ScanNoteResponse {
    pub fn new(note: ScanNote, creator: User) -> Self {
        Self {
            id: note.id,
            creator: CreatorSummary {
                first_name: creator.first_name,
                last_name: creator.last_name,
            },
            note: note.note,
            created: note.created,
            modified: note.modified,
        }
    }
}
