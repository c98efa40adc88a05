//! 扫描 DTO

use serde::{Deserialize, Serialize};

use crate::api::dto::scan_note_dto::ScanNoteResponse;
use crate::models::{Decision, Scan};

/// 创建/更新扫描请求
#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub scan_id: String,
    pub scan_type: String,
    #[serde(default)]
    pub decision: Decision,
    /// 实验 ID
    pub experiment: String,
    /// 站点 ID
    pub site: String,
}

/// 扫描响应
#[derive(Debug, Serialize, PartialEq)]
pub struct ScanResponse {
    pub id: String,
    pub scan_id: String,
    pub scan_type: String,
    pub decision: Decision,
    pub notes: Vec<ScanNoteResponse>,
    pub site: String,
    pub experiment: String,
}

impl ScanResponse {
    pub fn new(scan: Scan, notes: Vec<ScanNoteResponse>) -> Self {
        Self {
            id: scan.id,
            scan_id: scan.scan_id,
            scan_type: scan.scan_type,
            decision: scan.decision,
            notes,
            site: scan.site,
            experiment: scan.experiment,
        }
    }
}
