use std::collections::HashSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;

use crate::dataset::provider::{DatasetProvider, DatasetRequest, DatasetTable};
use crate::error::{Error, Result};

/// Loads subsets from `<dir>/<subset>.jsonl`, one JSON object per line.
pub struct LocalProvider {
    root: PathBuf,
}

impl LocalProvider {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, request: &DatasetRequest) -> PathBuf {
        self.root.join(format!("{}.jsonl", request.subset))
    }
}

#[async_trait]
impl DatasetProvider for LocalProvider {
    async fn load(&self, request: &DatasetRequest) -> Result<DatasetTable> {
        let path = self.path_for(request);
        tracing::info!("Reading {} from {}", request.subset, path.display());

        let contents = tokio::fs::read_to_string(&path).await.map_err(|e| {
            Error::DatasetApi(format!("Cannot read {}: {}", path.display(), e))
        })?;

        let mut columns = Vec::new();
        let mut seen = HashSet::new();
        let mut rows = Vec::new();

        for (line_no, line) in contents.lines().enumerate() {
            if request.limit.is_some_and(|limit| rows.len() >= limit) {
                break;
            }
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let row = match serde_json::from_str::<Value>(line)? {
                Value::Object(map) => map,
                _ => {
                    return Err(Error::ParseError(format!(
                        "{}:{}: expected a JSON object",
                        path.display(),
                        line_no + 1
                    )))
                }
            };

            for key in row.keys() {
                if seen.insert(key.clone()) {
                    columns.push(key.clone());
                }
            }
            rows.push(row);
        }

        Ok(DatasetTable::new(request.subset, columns, rows))
    }

    fn name(&self) -> &str {
        "local"
    }
}
