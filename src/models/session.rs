use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::repository::Record;

/// 审阅会话
///
/// 实验的命名容器，同时持有导入/导出路径设置。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// 会话唯一标识（记录 ID，不写入文档内容）
    #[serde(skip_serializing)]
    pub id: String,

    /// 会话名称
    pub name: String,

    /// 导入路径
    #[serde(default)]
    pub import_path: String,

    /// 导出路径
    #[serde(default)]
    pub export_path: String,
}

impl Session {
    /// 创建新会话
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            import_path: String::new(),
            export_path: String::new(),
        }
    }

    /// 设置导入/导出路径
    pub fn with_paths(mut self, import_path: &str, export_path: &str) -> Self {
        self.import_path = import_path.to_string();
        self.export_path = export_path.to_string();
        self
    }
}

impl Record for Session {
    const TABLE: &'static str = "session";

    fn id(&self) -> &str {
        &self.id
    }
}
