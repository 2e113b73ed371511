use serde::{Deserialize, Serialize};

use super::{ExportRecord, SourceRecord};
use crate::dataset::Subset;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Repository {
    pub id: Option<i64>,
    pub language: Option<String>,
    pub stars: Option<i64>,
    pub url: Option<String>,
}

impl SourceRecord for Repository {
    const SUBSET: Subset = Subset::AllRepository;
    const COLUMNS: &'static [&'static str] = &["id", "language", "stars", "url"];
}

/// Row of `task2_output.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryExport {
    #[serde(rename = "REPOID")]
    pub repo_id: Option<i64>,
    #[serde(rename = "LANG")]
    pub language: Option<String>,
    #[serde(rename = "STARS")]
    pub stars: Option<i64>,
    #[serde(rename = "REPOURL")]
    pub repo_url: Option<String>,
}

impl ExportRecord for RepositoryExport {
    const FILE_NAME: &'static str = "task2_output.csv";
    const HEADERS: &'static [&'static str] = &["REPOID", "LANG", "STARS", "REPOURL"];
}

impl From<&Repository> for RepositoryExport {
    fn from(repo: &Repository) -> Self {
        Self {
            repo_id: repo.id,
            language: repo.language.clone(),
            stars: repo.stars,
            repo_url: repo.url.clone(),
        }
    }
}
