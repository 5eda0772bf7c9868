use crate::form::transport::{RawResponse, TransportError};
use crate::form::state::SEND_FAILED_MESSAGE;
use serde_json::Value;

type Decoder = fn(&[u8]) -> Option<String>;

/// Tried in order; the first decoder that understands the body wins.
const DECODERS: [Decoder; 3] = [error_field, json_value, plain_text];

/// Human-readable message for a failed endpoint response.
pub fn error_message(response: &RawResponse) -> String {
    DECODERS
        .iter()
        .find_map(|decode| decode(&response.body))
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| format!("Error {}", response.status))
}

pub fn transport_failure_message(error: &TransportError) -> String {
    let text = error.to_string();
    if text.trim().is_empty() {
        return SEND_FAILED_MESSAGE.to_string();
    }
    text
}

fn error_field(body: &[u8]) -> Option<String> {
    match serde_json::from_slice::<Value>(body).ok()? {
        Value::Object(fields) => fields.get("error").map(render),
        _ => None,
    }
}

fn json_value(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<Value>(body)
        .ok()
        .map(|value| render(&value))
}

fn plain_text(body: &[u8]) -> Option<String> {
    std::str::from_utf8(body).ok().map(str::to_string)
}

fn render(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.to_owned(),
        other => other.to_string(),
    }
}
