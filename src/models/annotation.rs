use serde::{Deserialize, Serialize};

use super::ExportRecord;

/// Category used when a PR has no task-type classification.
pub const UNKNOWN_TYPE: &str = "Unknown";
/// Confidence used when a PR has no task-type classification.
pub const DEFAULT_CONFIDENCE: f64 = 0.0;

/// Row of `task5_output.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityAnnotation {
    #[serde(rename = "ID")]
    pub id: Option<i64>,
    #[serde(rename = "AGENT")]
    pub agent: Option<String>,
    #[serde(rename = "TYPE")]
    pub pr_type: String,
    #[serde(rename = "CONFIDENCE")]
    pub confidence: f64,
    /// 1 when the title or body mentions a security keyword, else 0.
    #[serde(rename = "SECURITY")]
    pub security: u8,
}

impl SecurityAnnotation {
    pub fn is_security_related(&self) -> bool {
        self.security == 1
    }
}

impl ExportRecord for SecurityAnnotation {
    const FILE_NAME: &'static str = "task5_output.csv";
    const HEADERS: &'static [&'static str] = &["ID", "AGENT", "TYPE", "CONFIDENCE", "SECURITY"];
}
