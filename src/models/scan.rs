use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::storage::repository::Record;

/// 审阅结论
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum Decision {
    /// 尚未审阅
    #[default]
    None,
    Good,
    Bad,
    Other,
    /// 可用但需额外处理
    UsableExtra,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::None => "NONE",
            Decision::Good => "GOOD",
            Decision::Bad => "BAD",
            Decision::Other => "OTHER",
            Decision::UsableExtra => "USABLE_EXTRA",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Decision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NONE" => Ok(Decision::None),
            "GOOD" => Ok(Decision::Good),
            "BAD" => Ok(Decision::Bad),
            "OTHER" => Ok(Decision::Other),
            "USABLE_EXTRA" => Ok(Decision::UsableExtra),
            other => Err(format!("unknown decision: {}", other)),
        }
    }
}

impl TryFrom<String> for Decision {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// 扫描，隶属于实验并关联到站点
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scan {
    #[serde(skip_serializing)]
    pub id: String,

    /// 设备侧扫描编号
    pub scan_id: String,

    /// 扫描类型（如 T1、T2、PD）
    pub scan_type: String,

    #[serde(default)]
    pub decision: Decision,

    /// 所属实验 ID
    pub experiment: String,

    /// 站点 ID
    pub site: String,
}

impl Scan {
    pub fn new(experiment_id: &str, site_id: &str, scan_id: &str, scan_type: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            scan_id: scan_id.to_string(),
            scan_type: scan_type.to_string(),
            decision: Decision::default(),
            experiment: experiment_id.to_string(),
            site: site_id.to_string(),
        }
    }
}

impl Record for Scan {
    const TABLE: &'static str = "scan";
    const FILTER_FIELDS: &'static [&'static str] = &["experiment", "site"];

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("GOOD", Decision::Good)]
    #[case("bad", Decision::Bad)]
    #[case("usable_extra", Decision::UsableExtra)]
    #[case("None", Decision::None)]
    fn test_decision_from_str(#[case] input: &str, #[case] expected: Decision) {
        assert_eq!(input.parse::<Decision>().unwrap(), expected);
    }

    #[test]
    fn test_decision_rejects_unknown() {
        assert!("MAYBE".parse::<Decision>().is_err());
    }

    #[test]
    fn test_decision_serde_matches_display() {
        let json = serde_json::to_string(&Decision::UsableExtra).unwrap();
        assert_eq!(json, format!("\"{}\"", Decision::UsableExtra));
        let parsed: Decision = serde_json::from_str("\"OTHER\"").unwrap();
        assert_eq!(parsed, Decision::Other);
    }

    #[test]
    fn test_decision_deserialize_ignores_case() {
        let parsed: Decision = serde_json::from_str("\"usable_extra\"").unwrap();
        assert_eq!(parsed, Decision::UsableExtra);
        assert!(serde_json::from_str::<Decision>("\"maybe\"").is_err());
    }

    #[test]
    fn test_new_scan_is_undecided() {
        let scan = Scan::new("exp", "site", "0001", "T1");
        assert_eq!(scan.decision, Decision::None);
        assert!(!scan.id.is_empty());
    }
}
