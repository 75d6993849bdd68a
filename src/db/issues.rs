use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::db::{IssueStore, StoreError};
use crate::models::{Issue, IssueChanges, IssueFilter, NewIssue};

/// PostgreSQL-backed store over the `issues` table.
#[derive(Clone)]
pub struct PgIssueStore {
    pool: PgPool,
}

impl PgIssueStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IssueStore for PgIssueStore {
    async fn list(&self, project: &str, filter: &IssueFilter) -> Result<Vec<Issue>, StoreError> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM issues WHERE project = ");
        query.push_bind(project);

        if let Some(id) = filter.id {
            query.push(" AND id = ").push_bind(id);
        }
        push_eq(&mut query, "issue_title", &filter.issue_title);
        push_eq(&mut query, "issue_text", &filter.issue_text);
        push_eq(&mut query, "created_by", &filter.created_by);
        push_eq(&mut query, "assigned_to", &filter.assigned_to);
        push_eq(&mut query, "status_text", &filter.status_text);
        if let Some(open) = filter.open {
            query.push(" AND open = ").push_bind(open);
        }
        if let Some(created_on) = filter.created_on {
            query.push(" AND created_on = ").push_bind(created_on);
        }
        if let Some(updated_on) = filter.updated_on {
            query.push(" AND updated_on = ").push_bind(updated_on);
        }
        query.push(" ORDER BY created_on, id");

        let issues = query
            .build_query_as::<Issue>()
            .fetch_all(&self.pool)
            .await?;
        Ok(issues)
    }

    async fn create(
        &self,
        project: &str,
        issue: &NewIssue,
        now: DateTime<Utc>,
    ) -> Result<Issue, StoreError> {
        let created = sqlx::query_as::<_, Issue>(
            "INSERT INTO issues
                (id, project, issue_title, issue_text, created_by, assigned_to, status_text, open, created_on, updated_on)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9) RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(project)
        .bind(&issue.issue_title)
        .bind(&issue.issue_text)
        .bind(&issue.created_by)
        .bind(&issue.assigned_to)
        .bind(&issue.status_text)
        .bind(issue.open)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(
        &self,
        project: &str,
        id: Uuid,
        changes: &IssueChanges,
        now: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let mut query = QueryBuilder::<Postgres>::new("UPDATE issues SET updated_on = GREATEST(");
        query.push_bind(now).push(", created_on)");

        push_set(&mut query, "issue_title", &changes.issue_title);
        push_set(&mut query, "issue_text", &changes.issue_text);
        push_set(&mut query, "created_by", &changes.created_by);
        push_set(&mut query, "assigned_to", &changes.assigned_to);
        push_set(&mut query, "status_text", &changes.status_text);
        if let Some(open) = changes.open {
            query.push(", open = ").push_bind(open);
        }

        query.push(" WHERE project = ").push_bind(project);
        query.push(" AND id = ").push_bind(id);

        let result = query.build().execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, project: &str, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM issues WHERE project = $1 AND id = $2")
            .bind(project)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// Column names are compile-time constants, never client input.
fn push_eq(query: &mut QueryBuilder<'_, Postgres>, column: &'static str, value: &Option<String>) {
    if let Some(value) = value {
        query.push(format!(" AND {column} = ")).push_bind(value.clone());
    }
}

fn push_set(query: &mut QueryBuilder<'_, Postgres>, column: &'static str, value: &Option<String>) {
    if let Some(value) = value {
        query.push(format!(", {column} = ")).push_bind(value.clone());
    }
}
