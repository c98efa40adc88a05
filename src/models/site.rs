use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::repository::Record;

/// 采集站点
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Site {
    #[serde(skip_serializing)]
    pub id: String,
    pub name: String,
}

impl Site {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
        }
    }
}

impl Record for Site {
    const TABLE: &'static str = "site";

    fn id(&self) -> &str {
        &self.id
    }
}
