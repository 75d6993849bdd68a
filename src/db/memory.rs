use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::db::{IssueStore, StoreError};
use crate::models::{Issue, IssueChanges, IssueFilter, NewIssue};

/// Process-local store keyed by issue id.
#[derive(Default)]
pub struct MemoryIssueStore {
    issues: DashMap<Uuid, Issue>,
}

impl MemoryIssueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IssueStore for MemoryIssueStore {
    async fn list(&self, project: &str, filter: &IssueFilter) -> Result<Vec<Issue>, StoreError> {
        let mut issues: Vec<Issue> = self
            .issues
            .iter()
            .filter(|entry| entry.project == project && filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        issues.sort_by(|a, b| a.created_on.cmp(&b.created_on).then(a.id.cmp(&b.id)));
        Ok(issues)
    }

    async fn create(
        &self,
        project: &str,
        issue: &NewIssue,
        now: DateTime<Utc>,
    ) -> Result<Issue, StoreError> {
        let created = Issue {
            id: Uuid::now_v7(),
            issue_title: issue.issue_title.clone(),
            issue_text: issue.issue_text.clone(),
            created_by: issue.created_by.clone(),
            assigned_to: issue.assigned_to.clone(),
            status_text: issue.status_text.clone(),
            open: issue.open,
            created_on: now,
            updated_on: now,
            project: project.to_string(),
        };
        self.issues.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        project: &str,
        id: Uuid,
        changes: &IssueChanges,
        now: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let Some(mut issue) = self.issues.get_mut(&id) else {
            return Ok(false);
        };
        if issue.project != project {
            return Ok(false);
        }

        changes.apply(&mut issue);
        issue.updated_on = now.max(issue.created_on);
        Ok(true)
    }

    async fn delete(&self, project: &str, id: Uuid) -> Result<bool, StoreError> {
        Ok(self
            .issues
            .remove_if(&id, |_, issue| issue.project == project)
            .is_some())
    }
}
