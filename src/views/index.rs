use askama::Template;
use axum::response::{Html, IntoResponse};

use crate::error::AppError;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate;

pub async fn index() -> Result<impl IntoResponse, AppError> {
    let page = IndexTemplate
        .render()
        .map_err(|e| AppError::Internal(format!("Failed to render index: {e}")))?;
    Ok(Html(page))
}
