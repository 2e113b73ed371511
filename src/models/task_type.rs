use serde::{Deserialize, Serialize};

use super::{ExportRecord, SourceRecord};
use crate::dataset::Subset;

/// Classification of a PR into a task category, e.g. "feat" or "fix".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrTaskType {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub reason: Option<String>,
    #[serde(rename = "type")]
    pub pr_type: Option<String>,
    pub confidence: Option<f64>,
}

impl SourceRecord for PrTaskType {
    const SUBSET: Subset = Subset::PrTaskType;
    const COLUMNS: &'static [&'static str] = &["id", "title", "reason", "type", "confidence"];
}

/// Row of `task3_output.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskTypeExport {
    #[serde(rename = "PRID")]
    pub pr_id: Option<i64>,
    #[serde(rename = "PRTITLE")]
    pub title: Option<String>,
    #[serde(rename = "PRREASON")]
    pub reason: Option<String>,
    #[serde(rename = "PRTYPE")]
    pub pr_type: Option<String>,
    #[serde(rename = "CONFIDENCE")]
    pub confidence: Option<f64>,
}

impl ExportRecord for TaskTypeExport {
    const FILE_NAME: &'static str = "task3_output.csv";
    const HEADERS: &'static [&'static str] =
        &["PRID", "PRTITLE", "PRREASON", "PRTYPE", "CONFIDENCE"];
}

impl From<&PrTaskType> for TaskTypeExport {
    fn from(task: &PrTaskType) -> Self {
        Self {
            pr_id: task.id,
            title: task.title.clone(),
            reason: task.reason.clone(),
            pr_type: task.pr_type.clone(),
            confidence: task.confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::serialized_headers;

    #[test]
    fn test_type_column_deserializes() {
        let task: PrTaskType = serde_json::from_value(serde_json::json!({
            "id": 1,
            "type": "fix",
            "confidence": 9
        }))
        .unwrap();
        assert_eq!(task.pr_type.as_deref(), Some("fix"));
        assert_eq!(task.confidence, Some(9.0));
    }

    #[test]
    fn test_export_headers_match_fields() {
        let row = TaskTypeExport::from(&PrTaskType::default());
        assert_eq!(serialized_headers(&row), TaskTypeExport::HEADERS);
    }
}
