use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use serde_json::Value;

use crate::error::AppError;
use crate::payload::parser;

/// A request body decoded from JSON or an urlencoded form.
#[derive(Debug, Clone)]
pub struct IssueBody(pub Value);

impl<S> FromRequest<S> for IssueBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        parser::parse_body(content_type.as_deref(), &body)
            .map(IssueBody)
            .map_err(AppError::BadRequest)
    }
}
