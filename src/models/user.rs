use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::repository::Record;

/// 用户身份
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct User {
    #[serde(skip_serializing)]
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_superuser: bool,
}

impl User {
    pub fn new(username: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, first_name: &str, last_name: &str) -> Self {
        self.first_name = first_name.to_string();
        self.last_name = last_name.to_string();
        self
    }
}

impl Record for User {
    const TABLE: &'static str = "user";

    fn id(&self) -> &str {
        &self.id
    }
}
