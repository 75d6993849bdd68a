use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};

use crate::db::StoreError;
use crate::payload::fields::{CreateRejection, InvalidField};

/// Outcome of a rejected issue request.
///
/// Every variant is answered with `200 OK`; clients tell failures apart by the
/// `error` key of the body. Update and delete deliberately report a missing
/// issue and an issue of another project with the same message.
#[derive(Debug)]
pub enum IssueError {
    RequiredFieldsMissing,
    InvalidField(&'static str),
    MissingId,
    NoUpdateFields(Value),
    CouldNotUpdate(Value),
    CouldNotDelete(Value),
    Store(StoreError),
}

impl std::fmt::Display for IssueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueError::RequiredFieldsMissing => write!(f, "required field(s) missing"),
            IssueError::InvalidField(field) => write!(f, "invalid field value: {field}"),
            IssueError::MissingId => write!(f, "missing _id"),
            IssueError::NoUpdateFields(id) => write!(f, "no update field(s) sent: {id}"),
            IssueError::CouldNotUpdate(id) => write!(f, "could not update: {id}"),
            IssueError::CouldNotDelete(id) => write!(f, "could not delete: {id}"),
            IssueError::Store(err) => write!(f, "Store error: {err}"),
        }
    }
}

impl IntoResponse for IssueError {
    fn into_response(self) -> Response {
        let body = match self {
            IssueError::RequiredFieldsMissing => json!({ "error": "required field(s) missing" }),
            IssueError::InvalidField(field) => {
                json!({ "error": "invalid field value", "field": field })
            }
            IssueError::MissingId => json!({ "error": "missing _id" }),
            IssueError::NoUpdateFields(id) => {
                json!({ "error": "no update field(s) sent", "_id": id })
            }
            IssueError::CouldNotUpdate(id) => json!({ "error": "could not update", "_id": id }),
            IssueError::CouldNotDelete(id) => json!({ "error": "could not delete", "_id": id }),
            IssueError::Store(err) => {
                tracing::error!("Store error: {err}");
                json!({ "error": err.message })
            }
        };

        (StatusCode::OK, axum::Json(body)).into_response()
    }
}

impl From<StoreError> for IssueError {
    fn from(err: StoreError) -> Self {
        IssueError::Store(err)
    }
}

impl From<InvalidField> for IssueError {
    fn from(err: InvalidField) -> Self {
        IssueError::InvalidField(err.0)
    }
}

impl From<CreateRejection> for IssueError {
    fn from(rejection: CreateRejection) -> Self {
        match rejection {
            CreateRejection::MissingRequired => IssueError::RequiredFieldsMissing,
            CreateRejection::Invalid(field) => field.into(),
        }
    }
}

/// Failures outside the issue contract: unreadable bodies and page rendering.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Internal(String),
    Store(StoreError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            AppError::Internal(msg) => write!(f, "Internal Error: {msg}"),
            AppError::Store(err) => write!(f, "Store Error: {err}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Store(err) => {
                tracing::error!("Store error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err)
    }
}
