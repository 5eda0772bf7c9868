use crate::app_state::AppState;
use crate::errors::{error_response, AppErrors, INTERNAL_ERROR_MESSAGE};
use crate::store::{ContactRequest, SubmissionRecord};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::USER_AGENT;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response, Result};
use serde_json::{json, Value};
use std::any::Any;
use time::OffsetDateTime;
use tracing::{error, info};
use validator::Validate;

pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

pub async fn contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppErrors> {
    let received_at = OffsetDateTime::now_utc();
    let body: Value = serde_json::from_slice(&body)?;
    let request = ContactRequest::from_body(&body).ok_or(AppErrors::MissingFields)?;
    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let record = SubmissionRecord::new(&request, user_agent, received_at);
    record.validate()?;
    state.store.insert(record).await?;
    info!(source = crate::store::SOURCE, "contact request stored");

    Ok((StatusCode::CREATED, Json(json!({ "success": true }))))
}

/// Turns a panic inside a handler into the usual `{ "error": ... }` body.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else {
        "unknown panic"
    };
    error!(panic = details, "handler panicked");
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        INTERNAL_ERROR_MESSAGE.to_string(),
    )
}
