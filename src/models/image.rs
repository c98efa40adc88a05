use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::storage::repository::Record;

/// 扫描下的单个图像文件
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Image {
    #[serde(skip_serializing)]
    pub id: String,

    /// 文件名（下载时作为 filename）
    pub name: String,

    /// 磁盘上的原始路径
    pub raw_path: PathBuf,

    /// 文件大小（字节）
    #[serde(default)]
    pub size: u64,

    /// 所属扫描 ID
    pub scan: String,
}

impl Image {
    pub fn new(scan_id: &str, name: &str, raw_path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            raw_path: raw_path.into(),
            size,
            scan: scan_id.to_string(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.raw_path
    }
}

impl Record for Image {
    const TABLE: &'static str = "image";
    const FILTER_FIELDS: &'static [&'static str] = &["scan"];

    fn id(&self) -> &str {
        &self.id
    }
}
