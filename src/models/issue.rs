use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored issue. `project` is the partition key and never leaves the server.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub issue_title: String,
    pub issue_text: String,
    pub created_by: String,
    pub assigned_to: String,
    pub status_text: String,
    pub open: bool,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
    #[serde(skip_serializing, default)]
    pub project: String,
}

/// Validated create payload with defaults already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct NewIssue {
    pub issue_title: String,
    pub issue_text: String,
    pub created_by: String,
    pub assigned_to: String,
    pub status_text: String,
    pub open: bool,
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueChanges {
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
    pub open: Option<bool>,
}

impl IssueChanges {
    pub fn is_empty(&self) -> bool {
        self.issue_title.is_none()
            && self.issue_text.is_none()
            && self.created_by.is_none()
            && self.assigned_to.is_none()
            && self.status_text.is_none()
            && self.open.is_none()
    }

    /// Merge the supplied fields into `issue`.
    pub fn apply(&self, issue: &mut Issue) {
        if let Some(v) = &self.issue_title {
            issue.issue_title = v.clone();
        }
        if let Some(v) = &self.issue_text {
            issue.issue_text = v.clone();
        }
        if let Some(v) = &self.created_by {
            issue.created_by = v.clone();
        }
        if let Some(v) = &self.assigned_to {
            issue.assigned_to = v.clone();
        }
        if let Some(v) = &self.status_text {
            issue.status_text = v.clone();
        }
        if let Some(v) = self.open {
            issue.open = v;
        }
    }
}

/// Equality filters applied on top of the project partition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueFilter {
    pub id: Option<Uuid>,
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
    pub open: Option<bool>,
    pub created_on: Option<DateTime<Utc>>,
    pub updated_on: Option<DateTime<Utc>>,
}

impl IssueFilter {
    pub fn matches(&self, issue: &Issue) -> bool {
        fn eq<T: PartialEq>(want: &Option<T>, have: &T) -> bool {
            want.as_ref().is_none_or(|w| w == have)
        }

        eq(&self.id, &issue.id)
            && eq(&self.issue_title, &issue.issue_title)
            && eq(&self.issue_text, &issue.issue_text)
            && eq(&self.created_by, &issue.created_by)
            && eq(&self.assigned_to, &issue.assigned_to)
            && eq(&self.status_text, &issue.status_text)
            && eq(&self.open, &issue.open)
            && eq(&self.created_on, &issue.created_on)
            && eq(&self.updated_on, &issue.updated_on)
    }
}
