pub mod issue;

pub use issue::{Issue, IssueChanges, IssueFilter, NewIssue};
