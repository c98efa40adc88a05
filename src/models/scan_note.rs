use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::repository::Record;

/// 扫描备注
///
/// `created` 与 `modified` 由服务端赋值。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanNote {
    #[serde(skip_serializing)]
    pub id: String,
    pub note: String,
    /// 创建者用户 ID
    pub creator: String,
    /// 所属扫描 ID
    pub scan: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl ScanNote {
    pub fn new(scan_id: &str, creator_id: &str, note: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            note: note.to_string(),
            creator: creator_id.to_string(),
            scan: scan_id.to_string(),
            created: now,
            modified: now,
        }
    }

    /// 修改备注内容并刷新修改时间
    pub fn edit(&mut self, note: &str) {
        self.note = note.to_string();
        self.modified = Utc::now();
    }
}

impl Record for ScanNote {
    const TABLE: &'static str = "scan_note";
    const FILTER_FIELDS: &'static [&'static str] = &["scan"];

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_bumps_modified_only() {
        let mut note = ScanNote::new("scan", "user", "motion artifact");
        let created = note.created;
        note.edit("ghosting");
        assert_eq!(note.note, "ghosting");
        assert_eq!(note.created, created);
        assert!(note.modified >= created);
    }
}
