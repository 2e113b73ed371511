use serde::{Deserialize, Serialize};

use super::{ExportRecord, SourceRecord};
use crate::analysis::sanitize_text;
use crate::dataset::Subset;

/// One changed file of one commit belonging to a PR.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitDetail {
    pub pr_id: Option<i64>,
    pub sha: Option<String>,
    pub message: Option<String>,
    pub filename: Option<String>,
    pub status: Option<String>,
    pub additions: Option<i64>,
    pub deletions: Option<i64>,
    pub changes: Option<i64>,
    pub patch: Option<String>,
}

impl SourceRecord for CommitDetail {
    const SUBSET: Subset = Subset::PrCommitDetails;
    const COLUMNS: &'static [&'static str] = &[
        "pr_id",
        "sha",
        "message",
        "filename",
        "status",
        "additions",
        "deletions",
        "changes",
        "patch",
    ];
}

/// Row of `task4_output.csv`. The diff is always present, sanitized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitExport {
    #[serde(rename = "PRID")]
    pub pr_id: Option<i64>,
    #[serde(rename = "PRSHA")]
    pub sha: Option<String>,
    #[serde(rename = "PRCOMMITMESSAGE")]
    pub message: Option<String>,
    #[serde(rename = "PRFILE")]
    pub filename: Option<String>,
    #[serde(rename = "PRSTATUS")]
    pub status: Option<String>,
    #[serde(rename = "PRADDS")]
    pub additions: Option<i64>,
    #[serde(rename = "PRDELSS")]
    pub deletions: Option<i64>,
    #[serde(rename = "PRCHANGECOUNT")]
    pub changes: Option<i64>,
    #[serde(rename = "PRDIFF")]
    pub diff: String,
}

impl ExportRecord for CommitExport {
    const FILE_NAME: &'static str = "task4_output.csv";
    const HEADERS: &'static [&'static str] = &[
        "PRID",
        "PRSHA",
        "PRCOMMITMESSAGE",
        "PRFILE",
        "PRSTATUS",
        "PRADDS",
        "PRDELSS",
        "PRCHANGECOUNT",
        "PRDIFF",
    ];
}

impl From<&CommitDetail> for CommitExport {
    fn from(commit: &CommitDetail) -> Self {
        Self {
            pr_id: commit.pr_id,
            sha: commit.sha.clone(),
            message: commit.message.clone(),
            filename: commit.filename.clone(),
            status: commit.status.clone(),
            additions: commit.additions,
            deletions: commit.deletions,
            changes: commit.changes,
            diff: sanitize_text(commit.patch.as_deref()),
        }
    }
}
