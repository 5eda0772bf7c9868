use crate::store::traits::ExternalText;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

/// Identifies submissions coming from the portfolio contact form.
pub const SOURCE: &str = "web_contact_form";

/// The three fields of a submission, coerced to strings but not yet normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactRequest {
    /// Pulls `name`, `email` and `message` out of a parsed body.
    ///
    /// Returns `None` when any of them is absent or falsy (`null`, `false`, `0`, `""`).
    /// A `null` body counts as an empty object.
    pub fn from_body(body: &Value) -> Option<Self> {
        let field = |key: &str| body.get(key).filter(|v| is_truthy(v)).map(coerce_to_string);
        Some(Self {
            name: field("name")?,
            email: field("email")?,
            message: field("message")?,
        })
    }
}

impl ExternalText for ContactRequest {
    fn cleaned(&self) -> Self {
        Self {
            name: self.clean(&self.name),
            email: self.clean(&self.email).to_lowercase(),
            message: self.clean(&self.message),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|n| n != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) => s.to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => coerce_number(n),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => coerce_to_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Whole floats print without a fraction, so `1.0` and `1e2` become `1` and `100`.
fn coerce_number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => {
            (f as i64).to_string()
        }
        _ => n.to_string(),
    }
}

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// One normalized contact message as it is written to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SubmissionRecord {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub message: String,
    pub source: String,
    pub user_agent: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl SubmissionRecord {
    pub fn new(
        request: &ContactRequest,
        user_agent: Option<String>,
        created_at: OffsetDateTime,
    ) -> Self {
        let cleaned = request.cleaned();
        Self {
            name: cleaned.name,
            email: cleaned.email,
            message: cleaned.message,
            source: SOURCE.to_string(),
            user_agent,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredRecord {
    pub id: Uuid,
    #[serde(flatten)]
    pub record: SubmissionRecord,
}
