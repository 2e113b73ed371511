use serde::{Deserialize, Serialize};

use super::{ExportRecord, SourceRecord};
use crate::dataset::Subset;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequest {
    pub id: Option<i64>,
    #[serde(rename = "agent")]
    pub agent_name: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub repo_id: Option<i64>,
    pub repo_url: Option<String>,
}

impl SourceRecord for PullRequest {
    const SUBSET: Subset = Subset::AllPullRequest;
    const COLUMNS: &'static [&'static str] =
        &["id", "agent", "title", "body", "repo_id", "repo_url"];
}

/// Row of `task1_output.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PullRequestExport {
    #[serde(rename = "TITLE")]
    pub title: Option<String>,
    #[serde(rename = "ID")]
    pub id: Option<i64>,
    #[serde(rename = "AGENTNAME")]
    pub agent_name: Option<String>,
    #[serde(rename = "BODYSTRING")]
    pub body: Option<String>,
    #[serde(rename = "REPOID")]
    pub repo_id: Option<i64>,
    #[serde(rename = "REPOURL")]
    pub repo_url: Option<String>,
}

impl ExportRecord for PullRequestExport {
    const FILE_NAME: &'static str = "task1_output.csv";
    const HEADERS: &'static [&'static str] =
        &["TITLE", "ID", "AGENTNAME", "BODYSTRING", "REPOID", "REPOURL"];
}

impl From<&PullRequest> for PullRequestExport {
    fn from(pr: &PullRequest) -> Self {
        Self {
            title: pr.title.clone(),
            id: pr.id,
            agent_name: pr.agent_name.clone(),
            body: pr.body.clone(),
            repo_id: pr.repo_id,
            repo_url: pr.repo_url.clone(),
        }
    }
}
