use std::fmt;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// The four subsets (configurations) of the AIDev dataset used by the exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subset {
    AllPullRequest,
    AllRepository,
    PrTaskType,
    PrCommitDetails,
}

impl Subset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Subset::AllPullRequest => "all_pull_request",
            Subset::AllRepository => "all_repository",
            Subset::PrTaskType => "pr_task_type",
            Subset::PrCommitDetails => "pr_commit_details",
        }
    }
}

impl fmt::Display for Subset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct DatasetRequest {
    pub dataset: String,
    pub subset: Subset,
    pub split: String,
    pub limit: Option<usize>,
}

impl DatasetRequest {
    pub fn new(dataset: impl Into<String>, subset: Subset, split: impl Into<String>) -> Self {
        Self {
            dataset: dataset.into(),
            subset,
            split: split.into(),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }
}

/// Row-oriented table as returned by a provider, before typing.
#[derive(Debug, Clone)]
pub struct DatasetTable {
    pub subset: Subset,
    pub columns: Vec<String>,
    pub rows: Vec<Map<String, Value>>,
}

impl DatasetTable {
    pub fn new(subset: Subset, columns: Vec<String>, rows: Vec<Map<String, Value>>) -> Self {
        Self {
            subset,
            columns,
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fails on the first required column the table does not carry.
    ///
    /// A table with neither columns nor rows carries no schema to check.
    pub fn require_columns(&self, required: &[&str]) -> Result<()> {
        if self.columns.is_empty() && self.rows.is_empty() {
            return Ok(());
        }

        match required
            .iter()
            .find(|column| !self.columns.iter().any(|c| c == *column))
        {
            Some(column) => Err(Error::MissingColumn {
                subset: self.subset.to_string(),
                column: column.to_string(),
            }),
            None => Ok(()),
        }
    }

    pub fn into_records<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        let subset = self.subset;
        self.rows
            .into_iter()
            .enumerate()
            .map(|(idx, row)| {
                serde_json::from_value(Value::Object(row)).map_err(|e| {
                    Error::ParseError(format!("{} row {}: {}", subset, idx, e))
                })
            })
            .collect()
    }
}

#[async_trait]
pub trait DatasetProvider: Send + Sync {
    async fn load(&self, request: &DatasetRequest) -> Result<DatasetTable>;
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PullRequest;
    use serde_json::json;

    fn row(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_require_columns() {
        let table = DatasetTable::new(
            Subset::AllPullRequest,
            vec!["id".to_string(), "title".to_string()],
            vec![row(json!({"id": 1, "title": "x"}))],
        );
        assert!(table.require_columns(&["id", "title"]).is_ok());

        let err = table.require_columns(&["id", "body"]).unwrap_err();
        match err {
            Error::MissingColumn { subset, column } => {
                assert_eq!(subset, "all_pull_request");
                assert_eq!(column, "body");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_table_skips_column_check() {
        let table = DatasetTable::new(Subset::PrTaskType, Vec::new(), Vec::new());
        assert!(table.require_columns(&["id"]).is_ok());
    }

    #[test]
    fn test_into_records_reports_malformed_row() {
        let table = DatasetTable::new(
            Subset::AllPullRequest,
            vec!["id".to_string()],
            vec![row(json!({"id": 1})), row(json!({"id": "not-a-number"}))],
        );
        let err = table.into_records::<PullRequest>().unwrap_err();
        assert!(matches!(err, Error::ParseError(ref msg) if msg.contains("row 1")));
    }

    #[test]
    fn test_subset_names() {
        assert_eq!(Subset::AllPullRequest.to_string(), "all_pull_request");
        assert_eq!(Subset::PrCommitDetails.as_str(), "pr_commit_details");
    }
}
