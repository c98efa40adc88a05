//! 实验 DTO

use serde::{Deserialize, Serialize};

use crate::models::{Experiment, Session};

/// 创建/更新实验请求
#[derive(Debug, Deserialize)]
pub struct ExperimentRequest {
    pub name: String,
    #[serde(default)]
    pub note: String,
    /// 会话 ID
    pub session: String,
}

/// 嵌套在实验中的会话摘要
#[derive(Debug, Serialize, PartialEq)]
pub struct SessionSummary {
    pub id: String,
    pub name: String,
}

/// 实验响应
#[derive(Debug, Serialize, PartialEq)]
pub struct ExperimentResponse {
    pub id: String,
    pub name: String,
    pub note: String,
    pub session: SessionSummary,
}

impl ExperimentResponse {
    pub fn new(experiment: Experiment, session: Session) -> Self {
        Self {
            id: experiment.id,
            name: experiment.name,
            note: experiment.note,
            session: SessionSummary {
                id: session.id,
                name: session.name,
            },
        }
    }
}
