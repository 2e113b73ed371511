use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analysis::classifier::SecurityClassifier;
use crate::analysis::merge::annotate_security;
use crate::config::ExportConfig;
use crate::dataset::{DatasetProvider, DatasetRequest};
use crate::error::Result;
use crate::models::{
    CommitDetail, CommitExport, ExportRecord, PrTaskType, PullRequest, PullRequestExport,
    Repository, RepositoryExport, SecurityAnnotation, SourceRecord, TaskTypeExport,
};
use crate::storage::Storage;

/// Row counts of one export run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub pull_requests: usize,
    pub repositories: usize,
    pub task_types: usize,
    pub commit_details: usize,
    pub annotations: usize,
    pub security_flagged: usize,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Runs the five exports in order against one provider.
///
/// Loads happen one after another; any failure aborts the run and leaves
/// earlier exports in place.
pub struct ExportPipeline {
    provider: Box<dyn DatasetProvider>,
    classifier: SecurityClassifier,
    storage: Storage,
    config: ExportConfig,
}

impl ExportPipeline {
    pub fn new(
        provider: impl DatasetProvider + 'static,
        classifier: SecurityClassifier,
        storage: Storage,
        config: ExportConfig,
    ) -> Self {
        Self {
            provider: Box::new(provider),
            classifier,
            storage,
            config,
        }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!(
            "Exporting {} ({}) via {} provider into {}",
            self.config.dataset,
            self.config.split,
            self.provider.name(),
            self.storage.output_dir().display()
        );

        let mut summary = RunSummary::default();

        // Task 1
        let pull_requests: Vec<PullRequest> = self.load().await?;
        summary.pull_requests =
            self.export(pull_requests.iter().map(PullRequestExport::from))?;

        // Task 2
        let repositories: Vec<Repository> = self.load().await?;
        summary.repositories = self.export(repositories.iter().map(RepositoryExport::from))?;
        drop(repositories);

        // Task 3
        let task_types: Vec<PrTaskType> = self.load().await?;
        summary.task_types = self.export(task_types.iter().map(TaskTypeExport::from))?;

        // Task 4
        let commits: Vec<CommitDetail> = self.load().await?;
        summary.commit_details = self.export(commits.iter().map(CommitExport::from))?;
        drop(commits);

        // Task 5
        tracing::info!("Annotating {} pull requests", pull_requests.len());
        let annotations = annotate_security(&pull_requests, &task_types, &self.classifier);
        summary.security_flagged = annotations
            .iter()
            .filter(|a| a.is_security_related())
            .count();
        summary.annotations = self.storage.write_table(&annotations)?;
        tracing::info!(
            "Saved {} rows to {} ({} security flagged)",
            summary.annotations,
            SecurityAnnotation::FILE_NAME,
            summary.security_flagged
        );

        summary.completed_at = Some(Utc::now());
        Ok(summary)
    }

    async fn load<T: SourceRecord>(&self) -> Result<Vec<T>> {
        let request = DatasetRequest::new(&self.config.dataset, T::SUBSET, &self.config.split)
            .with_limit(self.config.row_limit);

        let table = self.provider.load(&request).await?;
        table.require_columns(T::COLUMNS)?;
        tracing::info!("Loaded {} rows from {}", table.len(), T::SUBSET);

        table.into_records()
    }

    fn export<T: ExportRecord>(&self, rows: impl Iterator<Item = T>) -> Result<usize> {
        let rows: Vec<T> = rows.collect();
        let written = self.storage.write_table(&rows)?;
        tracing::info!("Saved {} rows to {}", written, T::FILE_NAME);
        Ok(written)
    }
}
