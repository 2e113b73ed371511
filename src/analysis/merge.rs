use std::collections::HashMap;

use crate::analysis::classifier::SecurityClassifier;
use crate::models::{
    PrTaskType, PullRequest, SecurityAnnotation, DEFAULT_CONFIDENCE, UNKNOWN_TYPE,
};

/// A PR joined with its task type, before defaults are filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRecord<'a> {
    pub id: Option<i64>,
    pub agent: Option<&'a str>,
    pub title: Option<&'a str>,
    pub body: Option<&'a str>,
    pub pr_type: Option<&'a str>,
    pub confidence: Option<f64>,
}

impl MergedRecord<'_> {
    /// Fills absent type/confidence and computes the security flag.
    pub fn annotate(&self, classifier: &SecurityClassifier) -> SecurityAnnotation {
        SecurityAnnotation {
            id: self.id,
            agent: self.agent.map(str::to_string),
            pr_type: self.pr_type.unwrap_or(UNKNOWN_TYPE).to_string(),
            confidence: self.confidence.unwrap_or(DEFAULT_CONFIDENCE),
            security: classifier.classify_fields(self.title, self.body),
        }
    }
}

/// Left outer join of PRs onto task types by PR id, preserving PR order.
///
/// A PR with several task-type rows yields one merged record per row. A PR
/// without an id never matches.
pub fn left_join<'a>(
    pull_requests: &'a [PullRequest],
    task_types: &'a [PrTaskType],
) -> Vec<MergedRecord<'a>> {
    let mut by_id: HashMap<i64, Vec<&PrTaskType>> = HashMap::new();
    for task in task_types {
        if let Some(id) = task.id {
            by_id.entry(id).or_default().push(task);
        }
    }

    let duplicated = by_id.values().filter(|rows| rows.len() > 1).count();
    if duplicated > 0 {
        tracing::warn!(
            "{} PR ids have more than one task type; their PRs will be repeated",
            duplicated
        );
    }

    let mut merged = Vec::with_capacity(pull_requests.len());
    for pr in pull_requests {
        let base = MergedRecord {
            id: pr.id,
            agent: pr.agent_name.as_deref(),
            title: pr.title.as_deref(),
            body: pr.body.as_deref(),
            pr_type: None,
            confidence: None,
        };

        match pr.id.and_then(|id| by_id.get(&id)) {
            Some(matches) => {
                for task in matches {
                    merged.push(MergedRecord {
                        pr_type: task.pr_type.as_deref(),
                        confidence: task.confidence,
                        ..base.clone()
                    });
                }
            }
            None => merged.push(base),
        }
    }

    merged
}

/// Joins, fills and classifies in one pass.
pub fn annotate_security(
    pull_requests: &[PullRequest],
    task_types: &[PrTaskType],
    classifier: &SecurityClassifier,
) -> Vec<SecurityAnnotation> {
    left_join(pull_requests, task_types)
        .iter()
        .map(|record| record.annotate(classifier))
        .collect()
}
