use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::models::{IssueChanges, IssueFilter, NewIssue};

/// A supplied value that cannot be coerced to the field's type.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidField(pub &'static str);

/// Why a create payload was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateRejection {
    MissingRequired,
    Invalid(InvalidField),
}

/// Build a new issue from a request body. Keys outside the create allow-list are ignored.
pub fn parse_new_issue(body: &Value) -> Result<NewIssue, CreateRejection> {
    let required = |name: &'static str| -> Result<Option<String>, CreateRejection> {
        let value = string_field(body.get(name), name).map_err(CreateRejection::Invalid)?;
        Ok(value.filter(|s| !s.is_empty()))
    };

    let issue_title = required("issue_title")?;
    let issue_text = required("issue_text")?;
    let created_by = required("created_by")?;
    let (Some(issue_title), Some(issue_text), Some(created_by)) =
        (issue_title, issue_text, created_by)
    else {
        return Err(CreateRejection::MissingRequired);
    };

    let optional = |name: &'static str| {
        string_field(body.get(name), name)
            .map(Option::unwrap_or_default)
            .map_err(CreateRejection::Invalid)
    };

    Ok(NewIssue {
        issue_title,
        issue_text,
        created_by,
        assigned_to: optional("assigned_to")?,
        status_text: optional("status_text")?,
        open: bool_field(body.get("open"), "open")
            .map_err(CreateRejection::Invalid)?
            .unwrap_or(true),
    })
}

/// Collect the fields an update body asks to change. An empty string clears a text field.
pub fn parse_changes(body: &Value) -> Result<IssueChanges, InvalidField> {
    let text = |name: &'static str| string_field(body.get(name), name);

    Ok(IssueChanges {
        issue_title: text("issue_title")?,
        issue_text: text("issue_text")?,
        created_by: text("created_by")?,
        assigned_to: text("assigned_to")?,
        status_text: text("status_text")?,
        open: bool_field(body.get("open"), "open")?,
    })
}

/// Turn query parameters into equality filters. Unknown keys are ignored and
/// the last occurrence of a repeated key wins.
///
/// Returns `Ok(None)` when a supplied value can never match a stored issue.
pub fn parse_filter(params: &[(String, String)]) -> Result<Option<IssueFilter>, InvalidField> {
    let mut filter = IssueFilter::default();

    for (key, value) in params {
        match key.as_str() {
            "_id" => match Uuid::parse_str(value.trim()) {
                Ok(id) => filter.id = Some(id),
                Err(_) => return Ok(None),
            },
            "issue_title" => filter.issue_title = Some(value.clone()),
            "issue_text" => filter.issue_text = Some(value.clone()),
            "created_by" => filter.created_by = Some(value.clone()),
            "assigned_to" => filter.assigned_to = Some(value.clone()),
            "status_text" => filter.status_text = Some(value.clone()),
            "open" => filter.open = Some(parse_bool(value).ok_or(InvalidField("open"))?),
            "created_on" => filter.created_on = Some(parse_timestamp(value, "created_on")?),
            "updated_on" => filter.updated_on = Some(parse_timestamp(value, "updated_on")?),
            other => tracing::debug!("Ignoring unknown filter key: {other}"),
        }
    }

    Ok(Some(filter))
}

/// The `_id` of an update or delete body, if one was sent.
pub fn identifier(body: &Value) -> Option<&Value> {
    match body.get("_id")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        id => Some(id),
    }
}

/// Interpret an echoed `_id` as an issue id. Malformed ids resolve to `None`.
pub fn parse_id(id: &Value) -> Option<Uuid> {
    id.as_str().and_then(|s| Uuid::parse_str(s.trim()).ok())
}

fn string_field(value: Option<&Value>, name: &'static str) -> Result<Option<String>, InvalidField> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(_) => Err(InvalidField(name)),
    }
}

fn bool_field(value: Option<&Value>, name: &'static str) -> Result<Option<bool>, InvalidField> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(1) => Ok(Some(true)),
            Some(0) => Ok(Some(false)),
            _ => Err(InvalidField(name)),
        },
        Some(Value::String(s)) => parse_bool(s).map(Some).ok_or(InvalidField(name)),
        Some(_) => Err(InvalidField(name)),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn parse_timestamp(s: &str, name: &'static str) -> Result<DateTime<Utc>, InvalidField> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| InvalidField(name))
}
