//! 审阅结论 DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Annotation, Decision};

#[derive(Debug, Deserialize)]
pub struct AnnotationRequest {
    /// 扫描 ID
    pub scan: String,
    /// 创建者用户 ID
    pub creator: String,
    pub decision: Decision,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct AnnotationResponse {
    pub id: String,
    pub scan: String,
    pub creator: String,
    pub decision: Decision,
    pub created: DateTime<Utc>,
}

impl From<Annotation> for AnnotationResponse {
    fn from(annotation: Annotation) -> Self {
        Self {
            id: annotation.id,
            scan: annotation.scan,
            creator: annotation.creator,
            decision: annotation.decision,
            created: annotation.created,
        }
    }
}
