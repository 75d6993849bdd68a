use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse};

use crate::error::AppError;
use crate::models::Issue;
use crate::payload::fields;
use crate::state::SharedState;

struct IssueRow {
    id: String,
    issue_title: String,
    issue_text: String,
    created_by: String,
    assigned_to: String,
    status_text: String,
    open: bool,
    created_on: String,
    updated_on: String,
}

impl From<Issue> for IssueRow {
    fn from(issue: Issue) -> Self {
        IssueRow {
            id: issue.id.to_string(),
            issue_title: issue.issue_title,
            issue_text: issue.issue_text,
            created_by: issue.created_by,
            assigned_to: issue.assigned_to,
            status_text: issue.status_text,
            open: issue.open,
            created_on: issue.created_on.format("%Y-%m-%d %H:%M UTC").to_string(),
            updated_on: issue.updated_on.format("%Y-%m-%d %H:%M UTC").to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "project.html")]
struct ProjectTemplate {
    project: String,
    project_path: String,
    issues: Vec<IssueRow>,
}

/// Issues of one project, narrowed by the same query filters as the API.
pub async fn show(
    State(state): State<SharedState>,
    Path(project): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    let filter = fields::parse_filter(&params).map_err(|fields::InvalidField(field)| {
        AppError::BadRequest(format!("Invalid filter value: {field}"))
    })?;

    let issues = match filter {
        Some(filter) => state.store.list(&project, &filter).await?,
        None => Vec::new(),
    };

    let template = ProjectTemplate {
        project_path: form_urlencoded::byte_serialize(project.as_bytes())
            .collect::<String>()
            .replace('+', "%20"),
        project,
        issues: issues.into_iter().map(IssueRow::from).collect(),
    };
    let page = template
        .render()
        .map_err(|e| AppError::Internal(format!("Failed to render project page: {e}")))?;
    Ok(Html(page))
}
