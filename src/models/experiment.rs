use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::repository::Record;

/// 实验，隶属于某个会话
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Experiment {
    #[serde(skip_serializing)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub note: String,
    /// 所属会话 ID
    pub session: String,
}

impl Experiment {
    pub fn new(session_id: &str, name: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            note: String::new(),
            session: session_id.to_string(),
        }
    }

    pub fn with_note(mut self, note: &str) -> Self {
        self.note = note.to_string();
        self
    }
}

impl Record for Experiment {
    const TABLE: &'static str = "experiment";
    const FILTER_FIELDS: &'static [&'static str] = &["session"];

    fn id(&self) -> &str {
        &self.id
    }
}
