use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::scan::Decision;
use crate::storage::repository::Record;

/// 用户对扫描给出的一次审阅结论
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Annotation {
    #[serde(skip_serializing)]
    pub id: String,
    pub scan: String,
    pub creator: String,
    pub decision: Decision,
    pub created: DateTime<Utc>,
}

impl Annotation {
    pub fn new(scan_id: &str, creator_id: &str, decision: Decision) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            scan: scan_id.to_string(),
            creator: creator_id.to_string(),
            decision,
            created: Utc::now(),
        }
    }
}

impl Record for Annotation {
    const TABLE: &'static str = "annotation";
    const FILTER_FIELDS: &'static [&'static str] = &["scan", "creator"];

    fn id(&self) -> &str {
        &self.id
    }
}
