use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use crate::error::IssueError;
use crate::models::Issue;
use crate::payload::fields;
use crate::payload::IssueBody;
use crate::state::SharedState;

pub async fn list(
    State(state): State<SharedState>,
    Path(project): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Issue>>, IssueError> {
    let Some(filter) = fields::parse_filter(&params)? else {
        tracing::debug!(project = %project, "Filter can never match, returning no issues");
        return Ok(Json(Vec::new()));
    };

    let issues = state.store.list(&project, &filter).await?;
    tracing::debug!(project = %project, count = issues.len(), "Listed issues");
    Ok(Json(issues))
}

pub async fn create(
    State(state): State<SharedState>,
    Path(project): Path<String>,
    IssueBody(body): IssueBody,
) -> Result<Json<Issue>, IssueError> {
    let new_issue = fields::parse_new_issue(&body)?;

    let issue = state.store.create(&project, &new_issue, Utc::now()).await?;
    tracing::info!(project = %project, id = %issue.id, "Issue created");
    Ok(Json(issue))
}

pub async fn update(
    State(state): State<SharedState>,
    Path(project): Path<String>,
    IssueBody(body): IssueBody,
) -> Result<Json<Value>, IssueError> {
    let id = fields::identifier(&body).cloned().ok_or(IssueError::MissingId)?;

    let changes = match fields::parse_changes(&body) {
        Ok(changes) => changes,
        Err(fields::InvalidField(field)) => {
            tracing::debug!(project = %project, %id, field, "Rejected update value");
            return Err(IssueError::CouldNotUpdate(id));
        }
    };
    if changes.is_empty() {
        return Err(IssueError::NoUpdateFields(id));
    }

    let Some(issue_id) = fields::parse_id(&id) else {
        return Err(IssueError::CouldNotUpdate(id));
    };

    match state.store.update(&project, issue_id, &changes, Utc::now()).await {
        Ok(true) => {
            tracing::info!(project = %project, id = %issue_id, "Issue updated");
            Ok(Json(json!({ "result": "successfully updated", "_id": id })))
        }
        Ok(false) => Err(IssueError::CouldNotUpdate(id)),
        Err(e) => {
            tracing::error!(project = %project, id = %issue_id, "Failed to update issue: {e}");
            Err(IssueError::CouldNotUpdate(id))
        }
    }
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(project): Path<String>,
    IssueBody(body): IssueBody,
) -> Result<Json<Value>, IssueError> {
    let id = fields::identifier(&body).cloned().ok_or(IssueError::MissingId)?;

    let Some(issue_id) = fields::parse_id(&id) else {
        return Err(IssueError::CouldNotDelete(id));
    };

    match state.store.delete(&project, issue_id).await {
        Ok(true) => {
            tracing::info!(project = %project, id = %issue_id, "Issue deleted");
            Ok(Json(json!({ "result": "successfully deleted", "_id": id })))
        }
        Ok(false) => Err(IssueError::CouldNotDelete(id)),
        Err(e) => {
            tracing::error!(project = %project, id = %issue_id, "Failed to delete issue: {e}");
            Err(IssueError::CouldNotDelete(id))
        }
    }
}
