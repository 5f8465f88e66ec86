use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttendanceId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepartmentId(pub i64);

impl fmt::Display for AttendanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for DepartmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn label(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "P",
            AttendanceStatus::Absent => "A",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: AttendanceId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub employee: EmployeeId,
}

/// Body of both create and update requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendancePayload {
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub employee: EmployeeId,
}

/// Listing endpoints answer a bare array, or an envelope when pagination is on.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Plain(Vec<T>),
    Paginated { results: Vec<T> },
}

impl<T> ListResponse<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Plain(items) => items,
            ListResponse::Paginated { results } => results,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeResponse {
    pub id: EmployeeId,
    pub emp_id: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub department: Option<DepartmentId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentResponse {
    pub id: DepartmentId,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    Transport,
    Validation,
    Unexpected,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, thiserror::Error)]
#[error("{error}")]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "VALIDATION_ERROR".to_string(),
            details: None,
        }
    }

    /// Builds a validation error from a field-keyed error body
    /// (`{"date": ["..."], "non_field_errors": ["..."]}`).
    pub fn validation_fields(fields: BTreeMap<String, Vec<String>>) -> Self {
        let summary = fields
            .iter()
            .flat_map(|(field, messages)| {
                messages.iter().map(move |m| {
                    if field == "non_field_errors" {
                        m.clone()
                    } else {
                        format!("{field}: {m}")
                    }
                })
            })
            .collect::<Vec<_>>()
            .join("; ");
        Self {
            error: if summary.is_empty() {
                "Validation failed".to_string()
            } else {
                summary
            },
            code: "VALIDATION_ERROR".to_string(),
            details: Some(json!({ "fields": fields })),
        }
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "UNKNOWN".to_string(),
            details: None,
        }
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "REQUEST_FAILED".to_string(),
            details: None,
        }
    }

    pub fn server(status: u16, msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "SERVER_ERROR".to_string(),
            details: Some(json!({ "status": status })),
        }
    }

    pub fn kind(&self) -> ApiErrorKind {
        match self.code.as_str() {
            "REQUEST_FAILED" | "SERVER_ERROR" => ApiErrorKind::Transport,
            "VALIDATION_ERROR" => ApiErrorKind::Validation,
            _ => ApiErrorKind::Unexpected,
        }
    }

    pub fn field_errors(&self) -> BTreeMap<String, Vec<String>> {
        self.details
            .as_ref()
            .and_then(|d| d.get("fields"))
            .and_then(|f| serde_json::from_value(f.clone()).ok())
            .unwrap_or_default()
    }
}

/// Reads a DRF style error body. Only objects whose every value is a string or a
/// list of strings count as field errors; a lone `detail` is a plain message.
pub(crate) fn parse_field_errors(body: &Value) -> Option<BTreeMap<String, Vec<String>>> {
    let map: &Map<String, Value> = body.as_object()?;
    if map.is_empty() || (map.len() == 1 && map.contains_key("detail")) {
        return None;
    }
    let mut fields = BTreeMap::new();
    for (key, value) in map {
        let messages = match value {
            Value::String(s) => vec![s.clone()],
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()?,
            _ => return None,
        };
        fields.insert(key.clone(), messages);
    }
    Some(fields)
}
