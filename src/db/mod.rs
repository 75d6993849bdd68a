pub mod issues;
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Issue, IssueChanges, IssueFilter, NewIssue};

pub use issues::PgIssueStore;
pub use memory::MemoryIssueStore;

/// A persistence fault reported by the store backend.
#[derive(Debug)]
pub struct StoreError {
    pub message: String,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError {
            message: err.to_string(),
        }
    }
}

/// Issue persistence. Every operation is scoped to a single project.
#[async_trait]
pub trait IssueStore: Send + Sync {
    /// Issues of `project` matching every filter, oldest first.
    async fn list(&self, project: &str, filter: &IssueFilter) -> Result<Vec<Issue>, StoreError>;

    /// Persist a new issue stamped with `now` and return it with its generated id.
    async fn create(
        &self,
        project: &str,
        issue: &NewIssue,
        now: DateTime<Utc>,
    ) -> Result<Issue, StoreError>;

    /// Merge `changes` into the issue matching `{project, id}` and refresh
    /// `updated_on`. Returns `false` when nothing matched.
    async fn update(
        &self,
        project: &str,
        id: Uuid,
        changes: &IssueChanges,
        now: DateTime<Utc>,
    ) -> Result<bool, StoreError>;

    /// Remove the issue matching `{project, id}`. Returns `false` when nothing matched.
    async fn delete(&self, project: &str, id: Uuid) -> Result<bool, StoreError>;
}
